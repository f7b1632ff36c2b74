use task_forecast::api::server::ForecastServer;
use task_forecast::ServiceConfig;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = ServiceConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default_log_level())),
        )
        .with_target(false)
        .init();

    if config.llm_api_key.is_none() {
        tracing::warn!("GROQ_API_KEY is not set; forecasts will use fallback values");
    }

    let server = ForecastServer::new(config, None);
    if let Err(err) = server.start().await {
        error!("server error: {}", err);
        std::process::exit(1);
    }
}
