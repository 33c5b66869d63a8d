//! JSON handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod regions;

use axum::Router;
use axum::routing::post;

use refhub_app::ports::RegionRepository;

use crate::state::AppState;

/// Build the `/regionService` sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: RegionRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/findAnyMatching", post(regions::find_any_matching::<R>))
        .route("/countAnyMatching", post(regions::count_any_matching::<R>))
        .route("/getById", post(regions::get_by_id::<R>))
        .route("/save", post(regions::save::<R>))
        .route("/delete", post(regions::delete::<R>))
}
