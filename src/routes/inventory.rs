use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::inventory::inventory_summary as inventory_summary_service;

#[get("/inventory/")]
pub async fn inventory_summary(repo: web::Data<DieselRepository>) -> impl Responder {
    match inventory_summary_service(repo.get_ref()) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(err) => error_response(err),
    }
}
