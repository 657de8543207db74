use async_trait::async_trait;
use dealscout_core::config::ItadConfig;
use dealscout_core::{Candidate, PriceInfo};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::UpstreamError;

/// Seam between the pipeline and the deals aggregator.
///
/// The production implementation is [`ItadClient`]; tests substitute a
/// scripted fake.
#[async_trait]
pub trait DealsApi: Send + Sync {
    /// Search the catalog for a keyword. An empty result is a normal
    /// outcome, not an error.
    async fn search(&self, keyword: &str) -> Result<Vec<Candidate>, UpstreamError>;

    /// Batched price overview for the given aggregator ids. Ids the
    /// upstream has no data for are skipped, never errored.
    async fn fetch_prices(&self, ids: &[String]) -> Result<Vec<PriceInfo>, UpstreamError>;
}

/// IsThereAnyDeal HTTP client.
#[derive(Clone)]
pub struct ItadClient {
    http: reqwest::Client,
    config: ItadConfig,
}

impl ItadClient {
    pub fn new(http: reqwest::Client, config: ItadConfig) -> Self {
        Self { http, config }
    }

    fn api_key(&self) -> Result<&str, UpstreamError> {
        self.config
            .api_key
            .as_ref()
            .map(|key| key.expose_secret())
            .ok_or(UpstreamError::MissingApiKey { service: "isthereanydeal" })
    }
}

#[async_trait]
impl DealsApi for ItadClient {
    async fn search(&self, keyword: &str) -> Result<Vec<Candidate>, UpstreamError> {
        let url = format!("{}/games/search/v1", self.config.base_url);
        let key = self.api_key()?;

        debug!(keyword, limit = self.config.search_limit, "searching deals catalog");
        let limit = self.config.search_limit.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[("key", key), ("title", keyword), ("limit", limit.as_str())])
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
        let candidates = parse_search_response(&body)
            .map_err(|source| UpstreamError::Decode { url, source })?;

        info!(keyword, count = candidates.len(), "deals catalog search finished");
        Ok(candidates)
    }

    async fn fetch_prices(&self, ids: &[String]) -> Result<Vec<PriceInfo>, UpstreamError> {
        let url = format!("{}/games/overview/v2", self.config.base_url);
        let key = self.api_key()?;

        info!(?ids, "querying price overview");
        let response = self
            .http
            .post(&url)
            .query(&[
                ("key", key),
                ("country", self.config.country.as_str()),
                ("shops", self.config.shops.as_str()),
            ])
            .json(ids)
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
        let overview: OverviewResponse = serde_json::from_str(&body)
            .map_err(|source| UpstreamError::Decode { url, source })?;

        let prices = collect_prices(ids, overview);
        info!(matched = prices.len(), requested = ids.len(), "price overview finished");
        Ok(prices)
    }
}

/// Decode the search endpoint's response body: a bare array of
/// `{id, title, type?}` items, `type` defaulting to "game".
pub fn parse_search_response(body: &str) -> Result<Vec<Candidate>, serde_json::Error> {
    serde_json::from_str(body)
}

#[derive(Debug, Deserialize)]
pub(crate) struct OverviewResponse {
    #[serde(default)]
    prices: Vec<OverviewEntry>,
}

#[derive(Debug, Deserialize)]
struct OverviewEntry {
    id: String,
    current: Option<CurrentDeal>,
    lowest: Option<LowestDeal>,
}

#[derive(Debug, Deserialize)]
struct CurrentDeal {
    price: Money,
    cut: Option<u8>,
    shop: Shop,
}

#[derive(Debug, Deserialize)]
struct LowestDeal {
    price: Money,
}

#[derive(Debug, Deserialize)]
struct Money {
    amount: f64,
    // some payload revisions carry the discount inside the price object
    cut: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct Shop {
    name: String,
}

/// Match overview entries back to the requested ids, in request order.
///
/// Ids with no matching entry, and entries missing their current or lowest
/// deal, are logged and skipped.
pub(crate) fn collect_prices(ids: &[String], overview: OverviewResponse) -> Vec<PriceInfo> {
    let mut results = Vec::new();

    for id in ids {
        let Some(entry) = overview.prices.iter().find(|entry| &entry.id == id) else {
            warn!(id, "no price data for requested id");
            continue;
        };
        let (Some(current), Some(lowest)) = (&entry.current, &entry.lowest) else {
            warn!(id, "price entry is missing current or lowest deal");
            continue;
        };

        results.push(PriceInfo {
            current_price: current.price.amount,
            historical_low: lowest.price.amount,
            discount_percent: current.cut.or(current.price.cut).unwrap_or(0),
            store: current.shop.name.clone(),
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::{collect_prices, parse_search_response, OverviewResponse};

    const SEARCH_FIXTURE: &str = r#"[
        {"id": "01849783-6a26-7147-ab32-71804ca47e8e", "title": "Portal 2", "type": "game"},
        {"id": "018d937f-07f4-7d6d-b001-c2ff4ecbb721", "title": "Portal 2 - The Final Hours"}
    ]"#;

    const OVERVIEW_FIXTURE: &str = r#"{
        "prices": [
            {
                "id": "id-a",
                "current": {
                    "price": {"amount": 29.99},
                    "cut": 0,
                    "shop": {"name": "Steam"}
                },
                "lowest": {"price": {"amount": 4.99}}
            }
        ]
    }"#;

    #[test]
    fn search_response_decodes_and_defaults_missing_type() {
        let candidates = parse_search_response(SEARCH_FIXTURE).expect("fixture should decode");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].kind, "game");
        assert_eq!(candidates[1].kind, "game");
        assert_eq!(candidates[1].title, "Portal 2 - The Final Hours");
    }

    #[test]
    fn empty_search_response_is_a_normal_empty_vector() {
        let candidates = parse_search_response("[]").expect("empty array should decode");
        assert!(candidates.is_empty());
    }

    #[test]
    fn unmatched_ids_are_skipped_without_error() {
        let overview: OverviewResponse =
            serde_json::from_str(OVERVIEW_FIXTURE).expect("fixture should decode");
        let ids = vec!["id-a".to_string(), "id-b".to_string()];

        let prices = collect_prices(&ids, overview);

        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].current_price, 29.99);
        assert_eq!(prices[0].historical_low, 4.99);
        assert_eq!(prices[0].store, "Steam");
    }

    #[test]
    fn results_follow_request_order_not_response_order() {
        let body = r#"{
            "prices": [
                {
                    "id": "id-b",
                    "current": {"price": {"amount": 9.99}, "cut": 50, "shop": {"name": "Steam"}},
                    "lowest": {"price": {"amount": 2.49}}
                },
                {
                    "id": "id-a",
                    "current": {"price": {"amount": 29.99}, "cut": 0, "shop": {"name": "Steam"}},
                    "lowest": {"price": {"amount": 4.99}}
                }
            ]
        }"#;
        let overview: OverviewResponse = serde_json::from_str(body).expect("should decode");
        let ids = vec!["id-a".to_string(), "id-b".to_string()];

        let prices = collect_prices(&ids, overview);

        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].current_price, 29.99);
        assert_eq!(prices[1].current_price, 9.99);
        assert_eq!(prices[1].discount_percent, 50);
    }

    #[test]
    fn discount_inside_the_price_object_is_honored() {
        let body = r#"{
            "prices": [
                {
                    "id": "id-a",
                    "current": {"price": {"amount": 14.99, "cut": 25}, "shop": {"name": "Steam"}},
                    "lowest": {"price": {"amount": 4.99}}
                }
            ]
        }"#;
        let overview: OverviewResponse = serde_json::from_str(body).expect("should decode");
        let prices = collect_prices(&["id-a".to_string()], overview);
        assert_eq!(prices[0].discount_percent, 25);
    }

    #[test]
    fn missing_prices_array_yields_empty_results() {
        let overview: OverviewResponse = serde_json::from_str("{}").expect("should decode");
        let prices = collect_prices(&["id-a".to_string()], overview);
        assert!(prices.is_empty());
    }
}
