//! Storage port: repository traits for persistence.

use std::future::Future;

use refhub_domain::error::RefHubError;
use refhub_domain::id::RegionId;
use refhub_domain::language::Iso3Language;
use refhub_domain::page::{Page, Pageable};
use refhub_domain::region::Region;

/// Search predicate shared by the find and count queries.
///
/// A `None` filter matches every region. Otherwise the filter is a
/// case-insensitive substring of the canonical name or of a translation,
/// restricted to `iso3_language` when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionCriteria {
    pub filter: Option<String>,
    pub iso3_language: Option<Iso3Language>,
}

impl RegionCriteria {
    /// Build criteria, treating a blank filter as "match everything".
    #[must_use]
    pub fn new(filter: Option<&str>, iso3_language: Option<Iso3Language>) -> Self {
        Self {
            filter: filter
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(ToString::to_string),
            iso3_language,
        }
    }

    /// Evaluate the predicate against a region in memory.
    #[must_use]
    pub fn matches(&self, region: &Region) -> bool {
        self.filter
            .as_deref()
            .is_none_or(|filter| region.matches(filter, self.iso3_language.as_ref()))
    }
}

/// Persistence port for [`Region`]s.
pub trait RegionRepository {
    fn create(&self, region: Region) -> impl Future<Output = Result<Region, RefHubError>> + Send;

    fn get_by_id(
        &self,
        id: RegionId,
    ) -> impl Future<Output = Result<Option<Region>, RefHubError>> + Send;

    fn update(&self, region: Region) -> impl Future<Output = Result<Region, RefHubError>> + Send;

    fn delete(&self, id: RegionId) -> impl Future<Output = Result<(), RefHubError>> + Send;

    /// Fetch the slice of matching regions described by `pageable`.
    ///
    /// Sort properties are guaranteed to be in
    /// [`SORTABLE_PROPERTIES`](refhub_domain::region::SORTABLE_PROPERTIES).
    fn find_matching(
        &self,
        criteria: RegionCriteria,
        pageable: Pageable,
    ) -> impl Future<Output = Result<Page<Region>, RefHubError>> + Send;

    fn count_matching(
        &self,
        criteria: RegionCriteria,
    ) -> impl Future<Output = Result<u64, RefHubError>> + Send;
}
