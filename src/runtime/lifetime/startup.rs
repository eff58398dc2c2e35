use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::services::PathMapper;
use crate::api::{DomainResolver, RequestRouter};
use crate::config::StaticConfig;
use crate::services::LinkService;
use crate::storage::{LinkStore, StorageFactory};

/// Everything a front end needs to serve requests
pub struct StartupContext {
    pub store: Arc<dyn LinkStore>,
    pub link_service: Arc<LinkService>,
    pub router: Arc<RequestRouter>,
    pub path_mapper: PathMapper,
}

/// Build the store, services and router described by `config`.
pub async fn prepare_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let store = StorageFactory::create(&config.storage)
        .await
        .context("Failed to create storage backend")?;

    let context = build_context(store, config);

    info!(
        "Pre-startup completed in {} ms (collision policy: {})",
        start_time.elapsed().as_millis(),
        config.links.collision_policy
    );
    Ok(context)
}

/// Wire services around an existing store.
pub fn build_context(store: Arc<dyn LinkStore>, config: &StaticConfig) -> StartupContext {
    let link_service = Arc::new(LinkService::from_config(store.clone(), &config.links));
    let router = Arc::new(RequestRouter::new(
        link_service.clone(),
        DomainResolver::from_config(&config.routing),
    ));

    StartupContext {
        store,
        link_service,
        router,
        path_mapper: PathMapper::from_config(&config.routing),
    }
}
