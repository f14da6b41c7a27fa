use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::ClassCategory;
use crate::dto::classes::ClassListItemDto;
use crate::forms::classes::{ClassFormPayload, ClassPageForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::schedule::placement::CategoryColors;
use crate::services::ServiceError;
use crate::services::calendar::show_calendar as show_calendar_service;
use crate::services::classes::{
    ClassesQueryParams, create_class as create_class_service,
    delete_class as delete_class_service, get_class as get_class_service,
    show_classes as show_classes_service, update_class as update_class_service,
};

fn category_options() -> Vec<(&'static str, CategoryColors)> {
    ClassCategory::ALL
        .into_iter()
        .map(|c| (c.as_str(), c.colors()))
        .collect()
}

#[get("/")]
pub async fn index(
    params: web::Query<ClassesQueryParams>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let category = params.category.clone();
    match show_classes_service(params.into_inner(), repo.get_ref()) {
        Ok(classes) => {
            let classes: Vec<ClassListItemDto> =
                classes.iter().map(ClassListItemDto::from).collect();
            let mut context = base_context(&flash_messages, "index");
            context.insert("classes", &classes);
            context.insert("categories", &category_options());
            context.insert("form", &ClassPageForm::default());
            context.insert("form_action", "/classes");
            context.insert("selected_category", &category);
            render_template(&tera, "main/index.html", &context)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to render class list: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/calendar")]
pub async fn calendar(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_calendar_service(&server_config.calendar, repo.get_ref()) {
        Ok(view) => {
            let mut context = base_context(&flash_messages, "calendar");
            context.insert("calendar", &view);
            render_template(&tera, "main/calendar.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render calendar: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/classes/{class_id}/delete")]
pub async fn delete_class(
    class_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_class_service(class_id.into_inner(), repo.get_ref()) {
        Ok(()) => FlashMessage::success("Class deleted.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Class not found.").send(),
        Err(err) => {
            log::error!("Failed to delete class: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/")
}

#[post("/classes")]
pub async fn create_class(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ClassPageForm>,
) -> impl Responder {
    let payload: ClassFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/");
        }
    };

    match create_class_service(payload, repo.get_ref()) {
        Ok(class) => FlashMessage::success(format!("Class {} added.", class.title)).send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to add class: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/")
}

#[get("/classes/{class_id}/edit")]
pub async fn edit_class(
    class_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match get_class_service(class_id.into_inner(), repo.get_ref()) {
        Ok(class) => {
            let mut context = base_context(&flash_messages, "index");
            context.insert("form_action", &format!("/classes/{}/update", class.id));
            context.insert("form", &ClassPageForm::from(&class));
            context.insert("categories", &category_options());
            render_template(&tera, "main/edit.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Class not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to render class form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/classes/{class_id}/update")]
pub async fn update_class(
    class_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ClassPageForm>,
) -> impl Responder {
    let class_id = class_id.into_inner();
    let edit_url = format!("/classes/{class_id}/edit");

    let payload: ClassFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&edit_url);
        }
    };

    match update_class_service(class_id, payload, repo.get_ref()) {
        Ok(_) => FlashMessage::success("Class updated.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Class not found.").send(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect(&edit_url);
        }
        Err(err) => {
            log::error!("Failed to update class: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/")
}
