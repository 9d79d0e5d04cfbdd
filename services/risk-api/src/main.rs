use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use risk_api::{config::Config, cors::build_cors, handlers, middleware::RateLimiter, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    info!("Starting Fraud Risk API...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded successfully");

    // No trained classifier backend is linked into this binary
    let state = AppState::from_config(&config, None).context("Failed to build scorer")?;
    info!(
        using_mock_predictions = state.using_mock_predictions(),
        auth_enabled = state.auth_enabled,
        "Scoring components initialized"
    );

    let data = web::Data::new(state);
    let cors_config = config.cors.clone();
    let rate_limit_enabled = config.rate_limit.requests_per_minute > 0;
    let rate_limiter = RateLimiter::new(config.rate_limit.requests_per_minute)
        .exempt([data.path("/health")]);

    let server_config = config.server.clone();

    info!(
        "Starting HTTP server on {}:{}",
        server_config.host, server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Condition::new(
                rate_limit_enabled,
                rate_limiter.clone(),
            ))
            .wrap(build_cors(&cors_config))
            .wrap(middleware::Logger::default())
            .configure(|cfg| handlers::configure_routes(cfg, &data))
    })
    .workers(server_config.workers)
    .bind((server_config.host, server_config.port))?
    .run()
    .await?;

    Ok(())
}
