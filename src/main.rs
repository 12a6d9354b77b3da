use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use mobile_price::config::Settings;
use mobile_price::routes::{self, AppState};
use mobile_price::Predictor;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting mobile price prediction service...");

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    // Load model and reference data, then fit preprocessing once
    let artifacts = settings.artifacts.clone();
    let predictor = tokio::task::spawn_blocking(move || {
        Predictor::load(&artifacts.model_path, &artifacts.reference_path)
    })
    .await
    .map_err(std::io::Error::other)?
    .map_err(|e| {
        error!("Failed to load artifacts: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;

    match predictor.price_range() {
        Some((low, high)) => info!(
            model = %predictor.model_name(),
            reference_rows = predictor.reference_rows(),
            "Predictor ready (reference prices {:.2}..{:.2})",
            low,
            high
        ),
        None => info!(
            model = %predictor.model_name(),
            reference_rows = predictor.reference_rows(),
            "Predictor ready"
        ),
    }

    let app_state = AppState { predictor };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(1);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
