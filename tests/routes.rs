use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use classmate::domain::types::{ClassCategory, MeetingDay};
use classmate::repository::{ClassListQuery, ClassReader, DieselRepository};
use classmate::routes;

mod common;

fn classes(repo: &DieselRepository) -> Vec<classmate::domain::class::ClassRecord> {
    repo.list_classes(ClassListQuery::default())
        .expect("should list classes")
        .1
}

macro_rules! app {
    ($repo:expr) => {{
        let store = CookieMessageStore::builder(Key::generate()).build();
        test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(store).build())
                .app_data(web::Data::new($repo.clone()))
                .configure(routes::configure),
        )
        .await
    }};
}

#[actix_web::test]
async fn class_form_creates_and_updates_a_class() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let app = app!(repo);

    let req = test::TestRequest::post()
        .uri("/classes")
        .set_form([
            ("title", "Biology"),
            ("category", "lecture"),
            ("meetings", "Wednesday 14:00-15:30\nfriday 09:00 10:00"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let created = classes(&repo);
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].meetings.len(), 2);
    assert_eq!(created[0].meetings[0].slot.day, MeetingDay::Wednesday);

    let id = created[0].id.get();
    let req = test::TestRequest::post()
        .uri(&format!("/classes/{id}/update"))
        .set_form([
            ("title", "Biology II"),
            ("category", "seminar"),
            ("meetings", "thursday 16:00-17:15"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let updated = classes(&repo);
    assert_eq!(updated[0].title, "Biology II");
    assert_eq!(updated[0].category, ClassCategory::Seminar);
    assert_eq!(updated[0].meetings.len(), 1);
}

#[actix_web::test]
async fn rejected_class_form_redirects_without_saving() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let app = app!(repo);

    let req = test::TestRequest::post()
        .uri("/classes")
        .set_form([
            ("title", "Biology"),
            ("category", "lecture"),
            ("meetings", "monday 11:00-10:00"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    assert!(classes(&repo).is_empty());

    let req = test::TestRequest::post()
        .uri("/classes/42/update")
        .set_form([("title", "Ghost"), ("category", "lab"), ("meetings", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/classes/42/edit"
    );
}

#[actix_web::test]
async fn undecodable_json_bodies_get_json_errors() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let app = app!(repo);

    let bodies = [
        "{\"title\": \"Biology\"",
        r#"{"title":"Biology","category":"lab","type":"lab","meetings":[]}"#,
    ];
    for body in bodies {
        let req = test::TestRequest::post()
            .uri("/api/classes")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
    assert!(classes(&repo).is_empty());
}

#[actix_web::test]
async fn huge_page_numbers_list_nothing() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();
    let app = app!(repo);

    let req = test::TestRequest::get()
        .uri(&format!("/api/classes?page={}", usize::MAX))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!([]));
}
