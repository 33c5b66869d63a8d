//! # refhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the region endpoint under `/regionService`: `findAnyMatching`,
//!   `countAnyMatching`, `getById`, `save`, `delete` (all `POST` + JSON)
//! - Map request envelopes and DTOs into application service calls
//!   (driving adapter) with hand-written mapping functions
//! - Wrap every outcome in a uniform [`ServiceResult`](envelope::ServiceResult)
//!   envelope; errors never surface as protocol-level failures
//!
//! ## Dependency rule
//! Depends on `refhub-app` (for port traits and services) and `refhub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod dto;
pub mod envelope;
pub mod error;
pub mod mapper;
pub mod router;
pub mod state;
