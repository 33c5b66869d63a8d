//! # refhub-domain
//!
//! Pure domain model for the refhub reference-data service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Regions** (reference entities with per-language translations)
//! - Define **ISO 639-3 language codes** used to resolve translated names
//! - Define **pagination** primitives (`Pageable`, `Page`)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod language;
pub mod page;
pub mod region;
