// API request/response models (DTOs)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::views::geography::{CountryCount, CountryRow, YearCount};
use crate::views::popularity::PopularityBar;
use crate::views::WatchLists;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable "nothing found" notice for empty results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            meta: Some(Meta::now()),
        }
    }

    /// Successful response whose data is empty; `message` explains what was not found.
    pub fn empty(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::success(data)
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            message: None,
            meta: Some(Meta::now()),
        }
    }
}

/// Metadata included in all API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct Meta {
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
    pub version: String,
}

impl Meta {
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now(),
            request_id: uuid::Uuid::new_v4().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
    pub store_reachable: bool,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
}

#[derive(Debug, Deserialize)]
pub struct TopMoviesQuery {
    /// Defaults to the latest year present in the data.
    pub year: Option<i32>,
    /// Genre name or "All".
    pub genre: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TopMoviesResponse {
    pub year: i32,
    pub genre: String,
    pub movies: Vec<PopularityBar>,
}

#[derive(Debug, Deserialize)]
pub struct TitleSearchQuery {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct MovieDetailQuery {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct CountryOverviewResponse {
    pub total_rows: usize,
    pub countries: Vec<CountryCount>,
    /// Selector values in first-appearance order.
    pub options: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CountryMoviesResponse {
    pub country: String,
    pub movies: Vec<CountryRow>,
}

#[derive(Debug, Serialize)]
pub struct YearlyCountsResponse {
    pub years: Vec<YearCount>,
}

#[derive(Debug, Deserialize)]
pub struct ActorQuery {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ActorMovie {
    pub title: String,
    pub release_year: Option<i32>,
    pub popularity: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ActorMoviesResponse {
    pub actor: String,
    pub movies: Vec<ActorMovie>,
}

#[derive(Debug, Deserialize)]
pub struct AddTitleRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct SessionListsResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub lists: WatchLists,
    /// Set on add requests: false when the title was already on the list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<bool>,
}
