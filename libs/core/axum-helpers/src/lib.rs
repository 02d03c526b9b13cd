//! Shared Axum plumbing for the workspace's HTTP adapters.
//!
//! Domain crates translate their own error enums into [`AppError`] to get a
//! consistent JSON error body; binaries use [`server::create_app`] for the
//! bind/serve/graceful-shutdown boilerplate.

pub mod errors;
pub mod extractors;
pub mod health;
pub mod server;

pub use errors::{AppError, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
