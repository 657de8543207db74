use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

/// Effective application configuration.
///
/// Built from defaults, an optional `dealscout.toml` patch, `DEALSCOUT_*`
/// environment overrides, and programmatic [`ConfigOverrides`], in that
/// order. Credential values are optional on purpose: a missing key surfaces
/// when the corresponding upstream call is attempted, not at load time.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub itad: ItadConfig,
    pub steam: SteamConfig,
    pub llm: LlmConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Deals-aggregator (IsThereAnyDeal) client settings.
#[derive(Clone, Debug)]
pub struct ItadConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    /// ISO country code used for price lookups.
    pub country: String,
    /// Comma-separated shop ids; "61" is Steam.
    pub shops: String,
    pub search_limit: u32,
}

/// Steam storefront metadata/review settings.
#[derive(Clone, Debug)]
pub struct SteamConfig {
    pub api_key: Option<SecretString>,
    pub store_base_url: String,
    pub language: String,
    pub country: String,
}

/// Model-provider settings for the structured agent calls.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
}

#[derive(Clone, Debug)]
pub struct HttpConfig {
    /// Per-request timeout applied to every outbound call.
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub itad_api_key: Option<String>,
    pub steam_api_key: Option<String>,
    pub llm_api_key: Option<String>,
    pub llm_model: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            itad: ItadConfig {
                api_key: None,
                base_url: "https://api.isthereanydeal.com".to_string(),
                country: "US".to_string(),
                shops: "61".to_string(),
                search_limit: 10,
            },
            steam: SteamConfig {
                api_key: None,
                store_base_url: "https://store.steampowered.com".to_string(),
                language: "english".to_string(),
                country: "US".to_string(),
            },
            llm: LlmConfig {
                api_key: None,
                base_url: "https://api.deepseek.com".to_string(),
                model: "deepseek-chat".to_string(),
                temperature: 0.2,
            },
            http: HttpConfig { timeout_secs: 10 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("dealscout.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(itad) = patch.itad {
            if let Some(itad_api_key_value) = itad.api_key {
                self.itad.api_key = Some(secret_value(itad_api_key_value));
            }
            if let Some(base_url) = itad.base_url {
                self.itad.base_url = base_url;
            }
            if let Some(country) = itad.country {
                self.itad.country = country;
            }
            if let Some(shops) = itad.shops {
                self.itad.shops = shops;
            }
            if let Some(search_limit) = itad.search_limit {
                self.itad.search_limit = search_limit;
            }
        }

        if let Some(steam) = patch.steam {
            if let Some(steam_api_key_value) = steam.api_key {
                self.steam.api_key = Some(secret_value(steam_api_key_value));
            }
            if let Some(store_base_url) = steam.store_base_url {
                self.steam.store_base_url = store_base_url;
            }
            if let Some(language) = steam.language {
                self.steam.language = language;
            }
            if let Some(country) = steam.country {
                self.steam.country = country;
            }
        }

        if let Some(llm) = patch.llm {
            if let Some(llm_api_key_value) = llm.api_key {
                self.llm.api_key = Some(secret_value(llm_api_key_value));
            }
            if let Some(base_url) = llm.base_url {
                self.llm.base_url = base_url;
            }
            if let Some(model) = llm.model {
                self.llm.model = model;
            }
            if let Some(temperature) = llm.temperature {
                self.llm.temperature = temperature;
            }
        }

        if let Some(http) = patch.http {
            if let Some(timeout_secs) = http.timeout_secs {
                self.http.timeout_secs = timeout_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        // Credentials also honor the bare names the upstream services
        // document, so an existing environment keeps working.
        let itad_key = read_env("DEALSCOUT_ITAD_API_KEY").or_else(|| read_env("ITAD_API_KEY"));
        if let Some(value) = itad_key {
            self.itad.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("DEALSCOUT_ITAD_BASE_URL") {
            self.itad.base_url = value;
        }
        if let Some(value) = read_env("DEALSCOUT_ITAD_COUNTRY") {
            self.itad.country = value;
        }
        if let Some(value) = read_env("DEALSCOUT_ITAD_SHOPS") {
            self.itad.shops = value;
        }
        if let Some(value) = read_env("DEALSCOUT_ITAD_SEARCH_LIMIT") {
            self.itad.search_limit = parse_u32("DEALSCOUT_ITAD_SEARCH_LIMIT", &value)?;
        }

        let steam_key = read_env("DEALSCOUT_STEAM_API_KEY").or_else(|| read_env("STEAM_API_KEY"));
        if let Some(value) = steam_key {
            self.steam.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("DEALSCOUT_STEAM_STORE_BASE_URL") {
            self.steam.store_base_url = value;
        }
        if let Some(value) = read_env("DEALSCOUT_STEAM_LANGUAGE") {
            self.steam.language = value;
        }
        if let Some(value) = read_env("DEALSCOUT_STEAM_COUNTRY") {
            self.steam.country = value;
        }

        let llm_key = read_env("DEALSCOUT_LLM_API_KEY").or_else(|| read_env("DEEPSEEK_API_KEY"));
        if let Some(value) = llm_key {
            self.llm.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("DEALSCOUT_LLM_BASE_URL") {
            self.llm.base_url = value;
        }
        if let Some(value) = read_env("DEALSCOUT_LLM_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = read_env("DEALSCOUT_LLM_TEMPERATURE") {
            self.llm.temperature = parse_f64("DEALSCOUT_LLM_TEMPERATURE", &value)?;
        }

        if let Some(value) = read_env("DEALSCOUT_HTTP_TIMEOUT_SECS") {
            self.http.timeout_secs = parse_u64("DEALSCOUT_HTTP_TIMEOUT_SECS", &value)?;
        }

        let log_level =
            read_env("DEALSCOUT_LOGGING_LEVEL").or_else(|| read_env("DEALSCOUT_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("DEALSCOUT_LOGGING_FORMAT").or_else(|| read_env("DEALSCOUT_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(itad_api_key) = overrides.itad_api_key {
            self.itad.api_key = Some(secret_value(itad_api_key));
        }
        if let Some(steam_api_key) = overrides.steam_api_key {
            self.steam.api_key = Some(secret_value(steam_api_key));
        }
        if let Some(llm_api_key) = overrides.llm_api_key {
            self.llm.api_key = Some(secret_value(llm_api_key));
        }
        if let Some(llm_model) = overrides.llm_model {
            self.llm.model = llm_model;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_itad(&self.itad)?;
        validate_llm(&self.llm)?;
        validate_http(&self.http)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("dealscout.toml"), PathBuf::from("config/dealscout.toml")]
        .into_iter()
        .find(|path| path.exists())
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    itad: Option<ItadPatch>,
    steam: Option<SteamPatch>,
    llm: Option<LlmPatch>,
    http: Option<HttpPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItadPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    country: Option<String>,
    shops: Option<String>,
    search_limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SteamPatch {
    api_key: Option<String>,
    store_base_url: Option<String>,
    language: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LlmPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HttpPatch {
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn validate_itad(itad: &ItadConfig) -> Result<(), ConfigError> {
    if itad.base_url.trim().is_empty() {
        return Err(ConfigError::Validation("itad.base_url must not be empty".to_string()));
    }
    if itad.search_limit == 0 || itad.search_limit > 50 {
        return Err(ConfigError::Validation(
            "itad.search_limit must be in range 1..=50".to_string(),
        ));
    }
    Ok(())
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    if llm.base_url.trim().is_empty() {
        return Err(ConfigError::Validation("llm.base_url must not be empty".to_string()));
    }
    if llm.model.trim().is_empty() {
        return Err(ConfigError::Validation("llm.model must not be empty".to_string()));
    }
    if !(0.0..=2.0).contains(&llm.temperature) {
        return Err(ConfigError::Validation(
            "llm.temperature must be in range 0.0..=2.0".to_string(),
        ));
    }
    Ok(())
}

fn validate_http(http: &HttpConfig) -> Result<(), ConfigError> {
    if http.timeout_secs == 0 || http.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "http.timeout_secs must be in range 1..=300".to_string(),
        ));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    if logging.level.trim().is_empty() {
        return Err(ConfigError::Validation("logging.level must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

    use secrecy::ExposeSecret;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    /// Serializes every test that loads config, since the load path reads
    /// process environment variables.
    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    fn load_with_file(contents: &str, overrides: ConfigOverrides) -> AppConfig {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");

        AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides,
        })
        .expect("config should load")
    }

    #[test]
    fn defaults_are_valid_and_carry_no_credentials() {
        let config = AppConfig::default();
        config.validate().expect("defaults should validate");
        assert!(config.itad.api_key.is_none());
        assert!(config.steam.api_key.is_none());
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.llm.model, "deepseek-chat");
    }

    #[test]
    fn file_patch_overrides_defaults() {
        let _guard = env_guard();
        let config = load_with_file(
            r#"
            [itad]
            country = "DE"
            search_limit = 5

            [logging]
            level = "debug"
            format = "json"
            "#,
            ConfigOverrides::default(),
        );

        assert_eq!(config.itad.country, "DE");
        assert_eq!(config.itad.search_limit, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        // untouched sections keep their defaults
        assert_eq!(config.llm.base_url, "https://api.deepseek.com");
    }

    #[test]
    fn programmatic_overrides_win_over_file_values() {
        let _guard = env_guard();
        let config = load_with_file(
            r#"
            [llm]
            model = "from-file"
            "#,
            ConfigOverrides {
                llm_model: Some("from-override".to_string()),
                llm_api_key: Some("sk-test".to_string()),
                ..ConfigOverrides::default()
            },
        );

        assert_eq!(config.llm.model, "from-override");
        let key = config.llm.api_key.expect("override key should be set");
        assert_eq!(key.expose_secret(), "sk-test");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = AppConfig::load(LoadOptions {
            config_path: Some(PathBuf::from("/nonexistent/dealscout.toml")),
            require_file: true,
            overrides: ConfigOverrides::default(),
        });
        assert!(matches!(result, Err(ConfigError::MissingConfigFile(_))));
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let _guard = env_guard();
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"[database]\nurl = \"sqlite://x\"\n").expect("write config");

        let result = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides: ConfigOverrides::default(),
        });
        assert!(matches!(result, Err(ConfigError::ParseFile { .. })));
    }

    #[test]
    fn out_of_range_search_limit_fails_validation() {
        let _guard = env_guard();
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"[itad]\nsearch_limit = 0\n").expect("write config");

        let result = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides: ConfigOverrides::default(),
        });
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn out_of_range_temperature_fails_validation() {
        let _guard = env_guard();
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"[llm]\ntemperature = 3.5\n").expect("write config");

        let result = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides: ConfigOverrides::default(),
        });
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn env_overrides_beat_file_values() -> Result<(), String> {
        let _guard = env_guard();

        env::set_var("DEALSCOUT_ITAD_COUNTRY", "FR");
        env::set_var("DEALSCOUT_ITAD_API_KEY", "itad-from-env");

        let result = (|| -> Result<(), String> {
            let mut file = tempfile::NamedTempFile::new().map_err(|err| err.to_string())?;
            file.write_all(b"[itad]\ncountry = \"DE\"\napi_key = \"itad-from-file\"\n")
                .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(file.path().to_path_buf()),
                require_file: true,
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.itad.country == "FR", "env country should win over the file value")?;
            let key = config.itad.api_key.as_ref().ok_or("itad api key should be set")?;
            ensure(
                key.expose_secret() == "itad-from-env",
                "env credential should win over the file value",
            )?;
            ensure(
                config.logging.level == "debug",
                "programmatic override should win over defaults",
            )
        })();

        clear_vars(&["DEALSCOUT_ITAD_COUNTRY", "DEALSCOUT_ITAD_API_KEY"]);
        result
    }

    #[test]
    fn bare_credential_names_are_honored() -> Result<(), String> {
        let _guard = env_guard();

        env::set_var("ITAD_API_KEY", "itad-bare");
        env::set_var("DEALSCOUT_ITAD_API_KEY", "itad-prefixed");
        env::set_var("STEAM_API_KEY", "steam-bare");
        env::set_var("DEEPSEEK_API_KEY", "sk-bare");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            let itad = config.itad.api_key.as_ref().ok_or("itad api key should be set")?;
            ensure(
                itad.expose_secret() == "itad-prefixed",
                "the prefixed name should win over the bare alias",
            )?;
            let steam = config.steam.api_key.as_ref().ok_or("steam api key should be set")?;
            ensure(steam.expose_secret() == "steam-bare", "bare steam alias should be honored")?;
            let llm = config.llm.api_key.as_ref().ok_or("llm api key should be set")?;
            ensure(llm.expose_secret() == "sk-bare", "bare deepseek alias should be honored")
        })();

        clear_vars(&[
            "ITAD_API_KEY",
            "DEALSCOUT_ITAD_API_KEY",
            "STEAM_API_KEY",
            "DEEPSEEK_API_KEY",
        ]);
        result
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_guard();

        env::set_var("TEST_DEALSCOUT_LLM_KEY", "sk-from-env");

        let result = (|| -> Result<(), String> {
            let mut file = tempfile::NamedTempFile::new().map_err(|err| err.to_string())?;
            file.write_all(b"[llm]\napi_key = \"${TEST_DEALSCOUT_LLM_KEY}\"\n")
                .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(file.path().to_path_buf()),
                require_file: true,
                overrides: ConfigOverrides::default(),
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            let key = config.llm.api_key.as_ref().ok_or("llm api key should be set")?;
            ensure(
                key.expose_secret() == "sk-from-env",
                "interpolated credential should come from the environment",
            )
        })();

        clear_vars(&["TEST_DEALSCOUT_LLM_KEY"]);
        result
    }

    #[test]
    fn interpolation_of_an_unset_variable_is_an_error() {
        let _guard = env_guard();
        env::remove_var("DEALSCOUT_TEST_UNSET_VAR");

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"[itad]\napi_key = \"${DEALSCOUT_TEST_UNSET_VAR}\"\n")
            .expect("write config");

        let result = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides: ConfigOverrides::default(),
        });
        assert!(matches!(result, Err(ConfigError::MissingEnvInterpolation { .. })));
    }

    #[test]
    fn invalid_numeric_env_override_is_an_error() -> Result<(), String> {
        let _guard = env_guard();

        env::set_var("DEALSCOUT_ITAD_SEARCH_LIMIT", "lots");

        let result = (|| -> Result<(), String> {
            match AppConfig::load(LoadOptions::default()) {
                Ok(_) => Err("expected invalid override to fail the load".to_string()),
                Err(ConfigError::InvalidEnvOverride { key, .. }) => ensure(
                    key == "DEALSCOUT_ITAD_SEARCH_LIMIT",
                    "error should name the offending variable",
                ),
                Err(other) => Err(format!("unexpected error: {other}")),
            }
        })();

        clear_vars(&["DEALSCOUT_ITAD_SEARCH_LIMIT"]);
        result
    }
}
