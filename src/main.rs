use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use jwt_api::config::AppConfig;
use jwt_api::middleware::rate_limit::RateLimitMiddleware;
use jwt_api::routes;
use jwt_api::state::AppState;
use std::env;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;

fn init_tracing(fallback_level: &str) {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| fallback_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .json()
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info");
            error!(error = %e, "Invalid configuration, refusing to start");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_tracing(&config.log_level);

    let state = match AppState::from_config(&config) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            error!(error = %e, "Failed to initialize application state");
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        }
    };

    let auth_rate_limit = RateLimitMiddleware::new(config.auth_rate_limit_per_minute);
    let bind_address = config.bind_address();

    info!(
        bind_address = %bind_address,
        token_ttl_seconds = config.token_ttl.num_seconds(),
        "Starting JWT API server"
    );
    info!("Available endpoints:");
    info!("   GET  /                      - Health check (public)");
    info!("   POST /auth                  - Issue token (public, rate limited)");
    info!("   GET  /contents              - Token claims (protected)");
    info!("   GET  /api-docs/openapi.json - OpenAPI document (public)");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        let auth_rate_limit = auth_rate_limit.clone();

        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(cors)
            .configure(|cfg| routes::configure(cfg, auth_rate_limit))
    })
    .bind(&bind_address)?
    .run()
    .await
}
