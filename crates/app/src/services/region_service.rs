//! Region service: use-cases for managing regions.

use refhub_domain::error::{NotFoundError, RefHubError, ValidationError};
use refhub_domain::id::RegionId;
use refhub_domain::language::Iso3Language;
use refhub_domain::page::{Page, Pageable};
use refhub_domain::region::{Region, SORTABLE_PROPERTIES};
use refhub_domain::time;

use crate::ports::{RegionCriteria, RegionRepository};

/// Application service for region queries and CRUD operations.
pub struct RegionService<R> {
    repo: R,
}

impl<R: RegionRepository> RegionService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Find one page of regions matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`RefHubError::Validation`] when `pageable` sorts on an unknown
    /// property, or a storage error propagated from the repository.
    pub async fn find_any_matching(
        &self,
        filter: Option<&str>,
        iso3_language: Option<Iso3Language>,
        pageable: Pageable,
    ) -> Result<Page<Region>, RefHubError> {
        if let Some(order) = pageable
            .sort()
            .iter()
            .find(|o| !SORTABLE_PROPERTIES.contains(&o.property.as_str()))
        {
            return Err(ValidationError::UnknownSortProperty(order.property.clone()).into());
        }

        let criteria = RegionCriteria::new(filter, iso3_language);
        self.repo.find_matching(criteria, pageable).await
    }

    /// Count regions matching `filter`, using the same predicate as
    /// [`Self::find_any_matching`].
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn count_any_matching(
        &self,
        filter: Option<&str>,
        iso3_language: Option<Iso3Language>,
    ) -> Result<u64, RefHubError> {
        let criteria = RegionCriteria::new(filter, iso3_language);
        self.repo.count_matching(criteria).await
    }

    /// Look up a region by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`RefHubError::NotFound`] when no region with `id` exists,
    /// or a storage error from the repository.
    pub async fn load(&self, id: RegionId) -> Result<Region, RefHubError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Create the region if its id is unknown, otherwise update it.
    ///
    /// On create both timestamps are set to now. On update the stored
    /// `created` is kept and `modified` is set to now.
    ///
    /// # Errors
    ///
    /// Returns [`RefHubError::Validation`] if invariants fail, or a
    /// storage error from the repository.
    pub async fn save(&self, mut region: Region) -> Result<Region, RefHubError> {
        region.validate()?;
        let now = time::now();

        if let Some(existing) = self.repo.get_by_id(region.id).await? {
            region.created = existing.created;
            region.modified = now;
            tracing::debug!(region_id = %region.id, "updating region");
            self.repo.update(region).await
        } else {
            region.created = now;
            region.modified = now;
            tracing::debug!(region_id = %region.id, "creating region");
            self.repo.create(region).await
        }
    }

    /// Delete a region by id.
    ///
    /// # Errors
    ///
    /// Returns [`RefHubError::NotFound`] when no region with `id` exists,
    /// or a storage error propagated from the repository.
    pub async fn delete(&self, id: RegionId) -> Result<(), RefHubError> {
        if self.repo.get_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }
        self.repo.delete(id).await
    }
}

fn not_found(id: RegionId) -> RefHubError {
    NotFoundError {
        entity: "Region",
        id: id.to_string(),
    }
    .into()
}
