//! Items Domain
//!
//! Domain and application core for the item catalog: the `Item` aggregate
//! with its value objects, the repository and cache ports it depends on, and
//! the service layer orchestrating the CRUD + search use cases.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (DTO in / DTO out)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Use-case orchestration, error translation, cache policy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Ports    │  ← Repository + cache traits (+ reference adapters)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Entity    │  ← Invariant-enforcing aggregate + value objects
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{
//!     handlers,
//!     repository::InMemoryItemRepository,
//!     service::ItemService,
//! };
//!
//! // Create a repository and service
//! let repository = InMemoryItemRepository::new();
//! let service = ItemService::new(repository);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! ```

pub mod cache;
pub mod error;
pub mod handlers;
pub mod models;
pub mod redis;
pub mod repository;
pub mod service;
pub mod values;

// Re-export commonly used types
pub use cache::{InMemoryItemCache, ItemCache};
pub use error::{InvalidValue, ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use models::{CreateItem, Item, ItemResponse, SearchQuery, UpdateItem};
pub use self::redis::RedisItemCache;
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
pub use values::{ItemDescription, ItemName, Money};
