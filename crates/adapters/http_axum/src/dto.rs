//! Wire types: request envelopes and data-transfer objects.
//!
//! Everything here is camelCase JSON and deliberately loose (strings instead
//! of typed ids and language codes) so that malformed values reach the mapper
//! and come back as an error envelope.

use serde::{Deserialize, Serialize};

use refhub_domain::page::DEFAULT_PAGE_SIZE;
use refhub_domain::time::Timestamp;

/// Caller metadata carried by every request envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryContext {
    #[serde(default)]
    pub query_username: Option<String>,
    #[serde(default)]
    pub query_session_id: Option<String>,
    /// Language used to resolve `displayName` in responses.
    #[serde(default)]
    pub query_iso3_language: Option<String>,
}

/// Body of `POST /regionService/findAnyMatching`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindAnyMatchingQuery {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub iso3_language: Option<String>,
    #[serde(default)]
    pub pageable: Option<PageableDto>,
    #[serde(flatten)]
    pub context: QueryContext,
}

/// Body of `POST /regionService/countAnyMatching`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountAnyMatchingQuery {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub iso3_language: Option<String>,
    #[serde(flatten)]
    pub context: QueryContext,
}

/// Body of `POST /regionService/getById`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetByIdQuery {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub context: QueryContext,
}

/// Body of `POST /regionService/save`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct SaveQuery<T> {
    #[serde(default)]
    pub entity: Option<T>,
    #[serde(flatten)]
    pub context: QueryContext,
}

/// Body of `POST /regionService/delete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteByIdQuery {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub context: QueryContext,
}

/// Requested page: zero-based `page`, `size`, and ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageableDto {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
    #[serde(default)]
    pub sort: Vec<OrderDto>,
}

impl Default for PageableDto {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Ordering on one property; `direction` is `ASC` (default) or `DESC`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub property: String,
    #[serde(default)]
    pub direction: Option<String>,
}

/// A slice of results with total-count metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

/// Wire representation of a region.
///
/// `created`, `modified` and `displayName` are filled on the way out and
/// ignored on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDto {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub translations: Vec<RegionTrlDto>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created: Option<Timestamp>,
    #[serde(default)]
    pub modified: Option<Timestamp>,
    #[serde(default)]
    pub display_name: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Wire representation of a region name in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionTrlDto {
    pub iso3_language: String,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}
