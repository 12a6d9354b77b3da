// Route exports
pub mod predict;

pub use predict::AppState;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};

use crate::models::PredictResponse;

/// Form body that could not be decoded, reported in the failure envelope
#[derive(Debug)]
pub struct FormError(pub String);

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for FormError {}

impl error::ResponseError for FormError {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Ok().json(PredictResponse::failure(&self.0))
    }
}

/// Handle form payload errors
pub fn handle_form_payload_error(err: error::UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Form payload error on {}: {}", req.path(), err);
    FormError(format!("Invalid form: {}", err)).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(handle_form_payload_error))
        .configure(predict::configure);
}
