//! Server mode
//!
//! Starts the actix-web server in front of the request router.

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::RequestRouter;
use crate::api::services::{PathMapper, RedirectService};
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Route every path and method to the redirect front end.
pub fn configure_gateway(
    router: Arc<RequestRouter>,
    mapper: PathMapper,
) -> impl Fn(&mut web::ServiceConfig) + Clone + Send + 'static {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(router.clone()))
            .app_data(web::Data::new(mapper.clone()))
            .route("/{tail:.*}", web::to(RedirectService::handle));
    }
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: Arc<StaticConfig>) -> Result<()> {
    let startup = lifetime::startup::prepare_startup(&config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let configure = configure_gateway(startup.router.clone(), startup.path_mapper.clone());

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    match config.routing.stage.as_deref() {
        Some(stage) => info!(
            "Link endpoint: /{}/{} (stage prefix optional)",
            stage, config.routing.resource
        ),
        None => info!("Link endpoint: /{}", config.routing.resource),
    }

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .app_data(web::PayloadConfig::new(64 * 1024))
            .configure(configure.clone())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    info!("Server stopped");
    Ok(())
}
