use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::auth::ActingUser;
use crate::dto::AckDto;
use crate::forms::images::UploadImageForm;
use crate::forms::items::{ItemForm, ItemFormPayload, ItemListParams};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::images::{
    ImageStorage, StagedImage, get_item_image as get_item_image_service,
    upload_item_image as upload_item_image_service,
};
use crate::services::items::{
    create_item as create_item_service, delete_item as delete_item_service,
    get_item as get_item_service, list_items as list_items_service,
    update_item as update_item_service,
};
use crate::uploads::{ImageUrlResolver, UploadQueue};

fn parse_form(form: ItemForm) -> Result<ItemFormPayload, HttpResponse> {
    ItemFormPayload::try_from(form).map_err(|e| error_response(ServiceError::from(e)))
}

#[post("/items/")]
pub async fn create_item(
    user: ActingUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ItemForm>,
) -> impl Responder {
    let payload = match parse_form(form) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match create_item_service(payload, user.id(), repo.get_ref()) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => error_response(err),
    }
}

#[get("/items/")]
pub async fn list_items(
    params: web::Query<ItemListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_items_service(params.category_id, repo.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response(err),
    }
}

#[get("/items/{item_id}")]
pub async fn get_item(item_id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    match get_item_service(item_id.into_inner(), repo.get_ref()) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => error_response(err),
    }
}

#[put("/items/{item_id}")]
pub async fn update_item(
    item_id: web::Path<i32>,
    user: ActingUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ItemForm>,
) -> impl Responder {
    let payload = match parse_form(form) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match update_item_service(item_id.into_inner(), payload, user.id(), repo.get_ref()) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => error_response(err),
    }
}

#[delete("/items/{item_id}")]
pub async fn delete_item(
    item_id: web::Path<i32>,
    user: ActingUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_item_service(item_id.into_inner(), user.id(), repo.get_ref()) {
        Ok(()) => HttpResponse::Ok().json(AckDto::ok()),
        Err(err) => error_response(err),
    }
}

#[post("/items/{item_id}/image")]
pub async fn upload_item_image(
    item_id: web::Path<i32>,
    user: ActingUser,
    repo: web::Data<DieselRepository>,
    queue: web::Data<UploadQueue>,
    resolver: web::Data<ImageUrlResolver>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<UploadImageForm>,
) -> impl Responder {
    let image = StagedImage {
        source: form.file.file.path().to_path_buf(),
        extension: form.extension(),
        content_type: form.content_type(),
    };
    let storage = ImageStorage {
        upload_dir: &server_config.upload_dir,
        resolver: resolver.get_ref(),
    };

    // `form` owns the temporary file and keeps it alive until the copy is done.
    let result = upload_item_image_service(
        item_id.into_inner(),
        image,
        user.id(),
        repo.get_ref(),
        queue.get_ref(),
        &storage,
    );
    drop(form);

    match result {
        Ok(link) => HttpResponse::Ok().json(link),
        Err(err) => error_response(err),
    }
}

#[get("/items/{item_id}/image")]
pub async fn get_item_image(
    item_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    resolver: web::Data<ImageUrlResolver>,
) -> impl Responder {
    match get_item_image_service(item_id.into_inner(), repo.get_ref(), resolver.get_ref()) {
        Ok(link) => HttpResponse::Ok().json(link),
        Err(err) => error_response(err),
    }
}
