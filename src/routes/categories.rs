use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::auth::ActingUser;
use crate::dto::AckDto;
use crate::forms::categories::{CategoryForm, CategoryFormPayload};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    get_category as get_category_service, list_categories as list_categories_service,
    update_category as update_category_service,
};

fn parse_form(form: CategoryForm) -> Result<CategoryFormPayload, HttpResponse> {
    CategoryFormPayload::try_from(form).map_err(|e| error_response(ServiceError::from(e)))
}

#[post("/categories/")]
pub async fn create_category(
    user: ActingUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let payload = match parse_form(form) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match create_category_service(payload, user.id(), repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err),
    }
}

#[get("/categories/")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_categories_service(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err),
    }
}

#[get("/categories/{category_id}")]
pub async fn get_category(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match get_category_service(category_id.into_inner(), repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err),
    }
}

#[put("/categories/{category_id}")]
pub async fn update_category(
    category_id: web::Path<i32>,
    user: ActingUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let payload = match parse_form(form) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match update_category_service(category_id.into_inner(), payload, user.id(), repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err),
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    user: ActingUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_category_service(category_id.into_inner(), user.id(), repo.get_ref()) {
        Ok(()) => HttpResponse::Ok().json(AckDto::ok()),
        Err(err) => error_response(err),
    }
}
