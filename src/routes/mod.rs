//! HTTP handlers. Each handler extracts its inputs, calls one service
//! function and maps the result onto a JSON response.

use actix_multipart::form::MultipartFormConfig;
use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod categories;
pub mod history;
pub mod inventory;
pub mod items;

/// Error body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

pub fn detail(message: impl Into<String>) -> ErrorBody {
    ErrorBody {
        detail: message.into(),
    }
}

/// Map a service failure onto its HTTP status.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Forbidden(message) => HttpResponse::Forbidden().json(detail(message)),
        ServiceError::NotFound(message) => HttpResponse::NotFound().json(detail(message)),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(detail(message))
        }
        ServiceError::Internal => {
            HttpResponse::InternalServerError().json(detail("Internal server error"))
        }
    }
}

fn bad_request<E>(err: E, _req: &HttpRequest) -> actix_web::Error
where
    E: std::fmt::Display + std::fmt::Debug + 'static,
{
    let response = HttpResponse::BadRequest().json(detail(err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Register every endpoint together with extractor settings that report
/// malformed input as `{"detail": ...}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(bad_request))
        .app_data(web::QueryConfig::default().error_handler(bad_request))
        .app_data(web::PathConfig::default().error_handler(bad_request))
        .app_data(MultipartFormConfig::default().error_handler(bad_request))
        .service(categories::create_category)
        .service(categories::list_categories)
        .service(categories::get_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(items::create_item)
        .service(items::list_items)
        .service(items::get_item)
        .service(items::update_item)
        .service(items::delete_item)
        .service(items::upload_item_image)
        .service(items::get_item_image)
        .service(inventory::inventory_summary)
        .service(history::list_history);
}
