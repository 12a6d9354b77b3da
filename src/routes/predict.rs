use actix_web::{http::header::ContentType, web, HttpResponse, Responder};
use std::collections::HashMap;

use crate::core::Predictor;
use crate::models::{HealthResponse, PredictForm, PredictResponse};

/// Form page served at `/`
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Application state shared across all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub predictor: Predictor,
}

/// Configure all prediction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/predict", web::post().to(predict));
}

/// Static form page
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        model: state.predictor.model_name().to_string(),
        reference_rows: state.predictor.reference_rows(),
    })
}

/// Predict endpoint
///
/// POST /predict
///
/// Form body (`application/x-www-form-urlencoded`):
/// `weight_g, SIM, display_type, display_resolution, display_size_ppi, OS,
/// CPU, memory_card, internal_memory_GB, RAM_GB, primary_camera,
/// secondary_camera, battery`
///
/// Always answers 200; failures are reported in the envelope.
async fn predict(
    state: web::Data<AppState>,
    form: web::Form<HashMap<String, String>>,
) -> impl Responder {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id);
    let _guard = span.enter();

    let response = match state.predictor.predict_form(PredictForm::new(form.into_inner())) {
        Ok(price) => {
            tracing::info!(price, "Returning prediction");
            PredictResponse::success(price)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Prediction failed");
            PredictResponse::failure(e)
        }
    };

    HttpResponse::Ok().json(response)
}
