use actix_web::error::JsonPayloadError;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde_json::json;
use tera::{Context, Tera};

use crate::services::ServiceError;

pub mod api;
pub mod main;

/// Registers every page and API route together with the JSON body settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .service(api::list_classes)
                .service(api::create_class)
                .service(api::get_class)
                .service(api::update_class)
                .service(api::delete_class)
                .service(api::calendar)
                .service(api::list_all_notes)
                .service(api::list_notes)
                .service(api::create_note)
                .service(api::get_note)
                .service(api::update_note)
                .service(api::delete_note),
        )
        .service(main::index)
        .service(main::calendar)
        .service(main::create_class)
        .service(main::edit_class)
        .service(main::update_class)
        .service(main::delete_class);
}

/// Undecodable JSON bodies are reported like any other rejected input.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ServiceError::Form(err.to_string()).into()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Form(_) | ServiceError::TypeConstraint(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `{"error": message}` with the matching status.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
