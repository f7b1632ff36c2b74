use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use mockable::DefaultClock;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::handlers::{
    handle_active_time, handle_favicon, handle_forecast, handle_health, handle_root, AppState,
};
use crate::config::ServiceConfig;
use crate::forecast::Forecaster;
use crate::helpers::build_llm_client;
use crate::task::HttpTaskSource;

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/favicon.ico", get(handle_favicon))
        .route("/api/tasks/forecast-time", post(handle_forecast))
        .route("/api/tasks/active-time", post(handle_active_time))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "skipping invalid CORS origin");
                None
            }
        })
        .collect();
    // Credentials rule out wildcards; mirror the preflight instead.
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub struct ForecastServer {
    pub config: ServiceConfig,
    pub state: AppState,
}

impl ForecastServer {
    pub fn new(config: ServiceConfig, state: Option<AppState>) -> Self {
        let state = state.unwrap_or_else(|| {
            let llm = Arc::new(build_llm_client(&config));
            AppState {
                tasks: Arc::new(HttpTaskSource::new(
                    &config.backend_url,
                    config.backend_timeout,
                )),
                forecaster: Arc::new(Forecaster::new(llm)),
                clock: Arc::new(DefaultClock),
            }
        });
        Self { config, state }
    }

    pub async fn start(&self) -> Result<(), String> {
        let app = build_router(self.state.clone(), &self.config.cors_origins);
        let addr = resolve_addr(&self.config.bind_addr())?;

        let server = axum::Server::try_bind(&addr).map_err(|err| err.to_string())?;
        info!(%addr, backend = %self.config.backend_url, "service listening");
        server
            .serve(app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|err| err.to_string())?;
        info!("service stopped");
        Ok(())
    }
}

fn resolve_addr(raw: &str) -> Result<SocketAddr, String> {
    raw.to_socket_addrs()
        .map_err(|err| format!("invalid bind address {}: {}", raw, err))?
        .next()
        .ok_or_else(|| format!("bind address {} resolved to nothing", raw))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_wildcard_bind_address() {
        let addr = resolve_addr("0.0.0.0:5002").unwrap();
        assert_eq!(addr.port(), 5002);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn rejects_address_without_port() {
        assert!(resolve_addr("0.0.0.0").is_err());
    }
}
