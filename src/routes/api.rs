//! JSON endpoints mounted under `/api`.

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::forms::classes::{ClassForm, ClassFormPayload};
use crate::forms::notes::{NoteForm, NoteFormPayload, UpdateNoteForm, UpdateNoteFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::calendar::show_calendar;
use crate::services::classes::{self as classes_service, ClassesQueryParams};
use crate::services::notes as notes_service;

type ApiResult = Result<HttpResponse, ServiceError>;

#[get("/classes")]
pub async fn list_classes(
    params: web::Query<ClassesQueryParams>,
    repo: web::Data<DieselRepository>,
) -> ApiResult {
    let classes = classes_service::show_classes(params.into_inner(), repo.get_ref())?;
    Ok(HttpResponse::Ok().json(classes))
}

#[post("/classes")]
pub async fn create_class(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ClassForm>,
) -> ApiResult {
    let payload: ClassFormPayload = form.try_into()?;
    let class = classes_service::create_class(payload, repo.get_ref())?;
    Ok(HttpResponse::Created().json(class))
}

#[get("/classes/{class_id}")]
pub async fn get_class(
    class_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> ApiResult {
    let class = classes_service::get_class(class_id.into_inner(), repo.get_ref())?;
    Ok(HttpResponse::Ok().json(class))
}

#[put("/classes/{class_id}")]
pub async fn update_class(
    class_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ClassForm>,
) -> ApiResult {
    let payload: ClassFormPayload = form.try_into()?;
    let class = classes_service::update_class(class_id.into_inner(), payload, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(class))
}

#[delete("/classes/{class_id}")]
pub async fn delete_class(
    class_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> ApiResult {
    classes_service::delete_class(class_id.into_inner(), repo.get_ref())?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/calendar")]
pub async fn calendar(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> ApiResult {
    let view = show_calendar(&server_config.calendar, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(view))
}

#[get("/notes")]
pub async fn list_all_notes(repo: web::Data<DieselRepository>) -> ApiResult {
    let notes = notes_service::show_all_notes(repo.get_ref())?;
    Ok(HttpResponse::Ok().json(notes))
}

#[get("/classes/{class_id}/notes")]
pub async fn list_notes(
    class_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> ApiResult {
    let notes = notes_service::show_notes(class_id.into_inner(), repo.get_ref())?;
    Ok(HttpResponse::Ok().json(notes))
}

#[post("/classes/{class_id}/notes")]
pub async fn create_note(
    class_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<NoteForm>,
) -> ApiResult {
    let payload: NoteFormPayload = form.try_into()?;
    let note = notes_service::create_note(class_id.into_inner(), payload, repo.get_ref())?;
    Ok(HttpResponse::Created().json(note))
}

#[get("/notes/{note_id}")]
pub async fn get_note(note_id: web::Path<i32>, repo: web::Data<DieselRepository>) -> ApiResult {
    let note = notes_service::get_note(note_id.into_inner(), repo.get_ref())?;
    Ok(HttpResponse::Ok().json(note))
}

#[put("/notes/{note_id}")]
pub async fn update_note(
    note_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateNoteForm>,
) -> ApiResult {
    let payload: UpdateNoteFormPayload = form.try_into()?;
    let note = notes_service::update_note(note_id.into_inner(), payload, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(note))
}

#[delete("/notes/{note_id}")]
pub async fn delete_note(
    note_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> ApiResult {
    notes_service::delete_note(note_id.into_inner(), repo.get_ref())?;
    Ok(HttpResponse::NoContent().finish())
}
