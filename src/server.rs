//! Dev server: artist API, Deezer proxy and the single-page application
//!
//! Both proxy modes expose the same surface. `manual` routes everything that
//! is not an artist API call through one catch-all handler; `middleware`
//! mounts a scoped proxy service and a static file service whose fallback is
//! the entry document.

use actix_cors::Cors;
use actix_files::Files;
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::api::{self, proxy, spa, AppState};
use crate::config::{AppConfig, ProxyMode};
use crate::stores::CacheEvent;

/// Register every route for `mode`
pub fn mount(cfg: &mut web::ServiceConfig, mode: ProxyMode, state: &AppState) {
    api::configure(cfg);

    match mode {
        ProxyMode::Manual => {
            cfg.service(web::resource("/{tail:.*}").to(api::manual_dispatch));
        }
        ProxyMode::Middleware => {
            cfg.service(
                web::scope(state.proxy.prefix()).default_service(web::to(proxy::proxy_handler)),
            );

            let dist = state.dist_dir.clone();
            cfg.service(
                Files::new("/", &state.dist_dir)
                    .index_file("index.html")
                    .default_handler(fn_service(move |req: ServiceRequest| {
                        let dist = dist.clone();
                        async move {
                            let (req, _) = req.into_parts();
                            let resp = spa::serve_index(&dist, &req);
                            Ok::<_, actix_web::Error>(ServiceResponse::new(req, resp))
                        }
                    })),
            );
        }
    }
}

/// Log artist cache changes as they land
fn watch_cache(state: &AppState) {
    let mut events = state.repo.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(CacheEvent::Loaded { count }) => debug!("Artist cache loaded {} artists", count),
                Ok(CacheEvent::Updated(id)) => debug!("Artist {} updated in cache", id),
                Err(RecvError::Lagged(skipped)) => debug!("Missed {} cache events", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    });
}

/// Run the dev server until shutdown
pub async fn run(mut config: AppConfig, mode: ProxyMode) -> Result<()> {
    config.proxy.mode = mode;

    let port = config.proxy.port();
    let addr = format!("{}:{}", config.proxy.host, port);

    if !config.proxy.dist_dir.is_dir() {
        warn!(
            "Build output {:?} does not exist; static requests will fail",
            config.proxy.dist_dir
        );
    }

    let state = web::Data::new(AppState::from_config(&config)?);
    watch_cache(&state);

    info!(
        "Proxying {}/* to {} ({:?} mode)",
        config.proxy.api_prefix, config.proxy.upstream, mode
    );
    info!("Serving static files from {:?}", config.proxy.dist_dir);
    info!("Server running on http://localhost:{}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let state = state.clone();
        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(|cfg| mount(cfg, mode, &state))
    })
    .bind(&addr)
    .with_context(|| format!("Failed to bind {}", addr))?
    .run()
    .await?;

    Ok(())
}
