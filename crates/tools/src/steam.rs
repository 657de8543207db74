use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use dealscout_core::config::SteamConfig;
use dealscout_core::{RecentRating, ReleaseType, SteamInfo};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::UpstreamError;

const MAX_TAGS: usize = 10;

/// Steam storefront metadata client.
///
/// Combines the appdetails and recent-review endpoints into one normalized
/// [`SteamInfo`]. Not used by the price pipeline itself; available to
/// collaborators that want review and tag context.
#[derive(Clone)]
pub struct SteamStoreClient {
    http: reqwest::Client,
    config: SteamConfig,
}

impl SteamStoreClient {
    pub fn new(http: reqwest::Client, config: SteamConfig) -> Self {
        Self { http, config }
    }

    pub async fn app_details(&self, app_id: &str) -> Result<SteamInfo, UpstreamError> {
        debug!(app_id, "querying storefront metadata");
        let data = self.fetch_store_data(app_id).await?;

        let tags = extract_tags(&data);
        let release_type = data
            .release_date
            .as_ref()
            .map(|release| classify_release(&release.date, Utc::now().date_naive()))
            .unwrap_or(ReleaseType::Unknown);
        let recent_rating = self.fetch_recent_rating(app_id).await?;

        info!(app_id, ?release_type, "storefront metadata assembled");
        Ok(SteamInfo { recent_rating, tags, release_type, store: "Steam".to_string() })
    }

    async fn fetch_store_data(&self, app_id: &str) -> Result<AppData, UpstreamError> {
        let url = format!("{}/api/appdetails", self.config.store_base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("appids", app_id),
                ("l", self.config.language.as_str()),
                ("cc", self.config.country.as_str()),
            ])
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { url, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| UpstreamError::Transport { url: url.clone(), source })?;
        let mut envelopes: HashMap<String, AppDetailsEnvelope> = serde_json::from_str(&body)
            .map_err(|source| UpstreamError::Decode { url: url.clone(), source })?;

        let envelope = envelopes.remove(app_id).ok_or_else(|| UpstreamError::Payload {
            url: url.clone(),
            message: format!("appdetails response has no entry for app {app_id}"),
        })?;
        if !envelope.success {
            return Err(UpstreamError::Payload {
                url,
                message: format!("appdetails lookup failed for app {app_id}"),
            });
        }
        envelope.data.ok_or_else(|| UpstreamError::Payload {
            url,
            message: format!("appdetails entry for app {app_id} carries no data"),
        })
    }

    async fn fetch_recent_rating(&self, app_id: &str) -> Result<RecentRating, UpstreamError> {
        let url = format!("{}/appreviews/{app_id}", self.config.store_base_url);
        let mut query: Vec<(&str, String)> = vec![
            ("json", "1".to_string()),
            ("filter", "recent".to_string()),
            ("language", "all".to_string()),
            ("review_type", "all".to_string()),
            ("purchase_type", "all".to_string()),
            ("num_per_page", "0".to_string()),
        ];
        if let Some(key) = &self.config.api_key {
            query.push(("key", key.expose_secret().to_string()));
        }

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { url, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| UpstreamError::Transport { url: url.clone(), source })?;
        let reviews: ReviewsResponse = serde_json::from_str(&body)
            .map_err(|source| UpstreamError::Decode { url: url.clone(), source })?;

        if reviews.success != 1 {
            return Err(UpstreamError::Payload {
                url,
                message: format!("review summary lookup failed for app {app_id}"),
            });
        }

        let desc = reviews
            .query_summary
            .and_then(|summary| summary.review_score_desc)
            .unwrap_or_default();
        Ok(RecentRating::from_review_score_desc(&desc))
    }
}

#[derive(Debug, Deserialize)]
struct AppDetailsEnvelope {
    #[serde(default)]
    success: bool,
    data: Option<AppData>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AppData {
    #[serde(default)]
    tags: Vec<Described>,
    #[serde(default)]
    genres: Vec<Described>,
    #[serde(default)]
    categories: Vec<Described>,
    release_date: Option<ReleaseDateField>,
}

#[derive(Debug, Deserialize)]
struct Described {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ReleaseDateField {
    #[serde(default)]
    date: String,
}

/// User-voted tags win; otherwise official genres and categories are
/// merged, deduplicated, and capped at ten.
pub(crate) fn extract_tags(data: &AppData) -> Vec<String> {
    if !data.tags.is_empty() {
        return data.tags.iter().take(MAX_TAGS).map(|tag| tag.description.clone()).collect();
    }

    let mut tags = Vec::new();
    for described in data.genres.iter().chain(data.categories.iter()) {
        if !tags.contains(&described.description) {
            tags.push(described.description.clone());
        }
        if tags.len() == MAX_TAGS {
            break;
        }
    }
    tags
}

/// Classify a storefront release-date string against today.
///
/// The storefront formats dates per locale; the english store uses
/// "19 Apr, 2011" or "Apr 19, 2011", and some payloads carry ISO dates.
pub(crate) fn classify_release(raw: &str, today: NaiveDate) -> ReleaseType {
    let raw = raw.trim();
    if raw.is_empty() {
        return ReleaseType::Unknown;
    }

    let parsed = ["%Y-%m-%d", "%d %b, %Y", "%b %d, %Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok());

    match parsed {
        Some(date) if date >= today - Duration::days(365) => ReleaseType::Recent,
        Some(_) => ReleaseType::Catalog,
        None => ReleaseType::Unknown,
    }
}

#[derive(Debug, Deserialize)]
struct ReviewsResponse {
    #[serde(default)]
    success: i64,
    query_summary: Option<QuerySummary>,
}

#[derive(Debug, Deserialize)]
struct QuerySummary {
    review_score_desc: Option<String>,
}
