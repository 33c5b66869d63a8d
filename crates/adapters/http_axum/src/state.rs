//! Shared application state for axum handlers.

use std::sync::Arc;

use refhub_app::ports::RegionRepository;
use refhub_app::services::region_service::RegionService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not need to
/// be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Region query and CRUD service.
    pub region_service: Arc<RegionService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            region_service: Arc::clone(&self.region_service),
        }
    }
}

impl<R> AppState<R>
where
    R: RegionRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(region_service: RegionService<R>) -> Self {
        Self::from_arc(Arc::new(region_service))
    }

    /// Create a new application state from a pre-wrapped `Arc` service.
    pub fn from_arc(region_service: Arc<RegionService<R>>) -> Self {
        Self { region_service }
    }
}
