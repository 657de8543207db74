pub mod doctor;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dealscout_agent::ChatClient;
use dealscout_core::config::{AppConfig, LoadOptions};
use dealscout_pipeline::PriceAdvisor;
use dealscout_tools::ItadClient;

#[derive(Debug, Parser)]
#[command(
    name = "dealscout",
    about = "Steam deal advisor",
    long_about = "Resolve a game query, look up current and historical prices, \
                  and get a buy/wait recommendation.",
    after_help = "Examples:\n  dealscout \"portal 2\"\n  dealscout doctor --json",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Free-text game query; prompted for interactively when omitted.
    query: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Validate configuration and report credential readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

fn init_logging(config: &AppConfig) {
    use dealscout_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Doctor { json }) = cli.command {
        println!("{}", doctor::run(json));
        return Ok(());
    }

    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http.timeout_secs))
        .build()
        .context("could not build HTTP client")?;

    let llm = Arc::new(ChatClient::new(http.clone(), config.llm.clone()));
    let deals = Arc::new(ItadClient::new(http, config.itad.clone()));
    let advisor = PriceAdvisor::new(llm, deals);

    let query = match cli.query {
        Some(query) => query,
        None => read_query()?,
    };

    let result = advisor.advise(query.trim()).await?;
    println!("{result}");
    Ok(())
}

fn read_query() -> Result<String> {
    print!("Which game do you want to check? ");
    std::io::stdout().flush().context("could not flush stdout")?;

    let mut query = String::new();
    std::io::stdin().read_line(&mut query).context("could not read query from stdin")?;
    Ok(query)
}
