//! Item catalog HTTP API.
//!
//! All collaborators are wired here with plain constructor passing: the
//! repository and cache adapters are chosen from configuration and handed to
//! the service, the service to the router. No registry, no container.

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use axum_helpers::{errors::not_found, server::create_app};
use core_config::cache::CacheConfig;
use core_config::server::ServerConfig;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_items::{
    ApiDoc, InMemoryItemCache, InMemoryItemRepository, ItemCache, ItemService, RedisItemCache,
    handlers,
};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    let environment = Environment::from_env();
    init_tracing(&environment);

    let server_config = ServerConfig::from_env()?;
    let cache_config = CacheConfig::from_env()?;

    let repository = InMemoryItemRepository::new();
    let cache: Arc<dyn ItemCache> = match &cache_config.redis_url {
        Some(url) => {
            info!("Using Redis item cache at {}", url);
            Arc::new(RedisItemCache::connect(url).await?)
        }
        None => {
            info!("REDIS_URL not set, using in-process item cache");
            Arc::new(InMemoryItemCache::new())
        }
    };

    let service = ItemService::with_cache(repository, cache, cache_config.ttl());

    let router = Router::new()
        .nest("/api/v1/items", handlers::router(service))
        .merge(axum_helpers::health::router())
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http());

    create_app(router, &server_config).await?;
    Ok(())
}
