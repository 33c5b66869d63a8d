//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use refhub_app::ports::RegionRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the region endpoint under `/regionService`. Includes a
/// [`CatchPanicLayer`] that answers panicking handlers with a `fault` envelope and
/// a [`TraceLayer`] that logs each HTTP request/response at the `DEBUG` level.
pub fn build<R>(state: AppState<R>) -> Router
where
    R: RegionRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/regionService", crate::api::routes())
        .layer(CatchPanicLayer::custom(crate::error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
