use actix_web::{HttpResponse, Responder, get, web};

use crate::auth::ActingUser;
use crate::forms::history::HistoryQueryForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::history::list_history as list_history_service;

#[get("/history/")]
pub async fn list_history(
    web::Query(form): web::Query<HistoryQueryForm>,
    user: ActingUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match list_history_service(form, user.id(), server_config.get_ref(), repo.get_ref()) {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(err) => error_response(err),
    }
}
