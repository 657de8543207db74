use serde::{Deserialize, Serialize};

/// Steam recent-review rating bucket, mapped from the storefront's
/// `review_score_desc` strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecentRating {
    OverwhelminglyPositive,
    VeryPositive,
    Positive,
    MostlyPositive,
    Mixed,
    MostlyNegative,
    Negative,
    VeryNegative,
    OverwhelminglyNegative,
    NoRating,
}

impl RecentRating {
    /// Map the storefront's English review summary to a rating bucket.
    /// Unknown or missing descriptions fall back to `NoRating`.
    pub fn from_review_score_desc(desc: &str) -> Self {
        match desc {
            "Overwhelmingly Positive" => Self::OverwhelminglyPositive,
            "Very Positive" => Self::VeryPositive,
            "Positive" => Self::Positive,
            "Mostly Positive" => Self::MostlyPositive,
            "Mixed" => Self::Mixed,
            "Mostly Negative" => Self::MostlyNegative,
            "Negative" => Self::Negative,
            "Very Negative" => Self::VeryNegative,
            "Overwhelmingly Negative" => Self::OverwhelminglyNegative,
            _ => Self::NoRating,
        }
    }
}

/// Whether a title released within the last year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseType {
    /// Released within the last 365 days.
    Recent,
    /// Older than a year.
    Catalog,
    /// Release date missing or unparseable.
    Unknown,
}

/// Normalized storefront metadata for one app.
///
/// Not consumed by the main pipeline; exposed for collaborators that want
/// review and tag context alongside price data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteamInfo {
    pub recent_rating: RecentRating,
    /// Up to ten tags, user-voted tags preferred over official genres.
    pub tags: Vec<String>,
    pub release_type: ReleaseType,
    #[serde(default = "default_store")]
    pub store: String,
}

fn default_store() -> String {
    "Steam".to_string()
}
