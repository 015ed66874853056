use actix_web::{
    get, http::header::ContentType, post, HttpResponse, Responder, ResponseError,
    web::{Data, Form, ServiceConfig, scope},
};
use actix_web_validator::Json;
use tracing::{error, warn};

use crate::http::AppState;
use crate::landing::form::{FormState, SubmissionFlow, SUBMIT_ERROR_MESSAGE};
use crate::landing::views::render_page;
use super::models::LeadForm;
use super::service::{LeadService, ServiceError};

#[get("/")]
async fn landing_page(state: Data<AppState>) -> impl Responder {
    let html = render_page(
        &state.landing,
        &FormState::fresh(),
        &SubmissionFlow::default(),
        state.now(),
    );
    HttpResponse::Ok().content_type(ContentType::html()).body(html)
}

/// Browser form submission; answers with the re-rendered page
#[post("/leads")]
async fn submit_form(
    state: Data<AppState>,
    service: Data<LeadService>,
    form: Form<LeadForm>,
) -> impl Responder {
    let form = form.into_inner();
    let mut flow = SubmissionFlow::default();
    flow.begin();

    let status = match service.submit(&form).await {
        Ok(_) => {
            flow.succeed();
            actix_web::http::StatusCode::OK
        }
        Err(err) => {
            match &err {
                ServiceError::DatabaseError(e) => error!("Lead submission failed: {:?}", e),
                ServiceError::ValidationError(msg) => warn!("Lead form rejected: {}", msg),
            }
            // The page only ever shows the generic message; details stay in the logs
            flow.fail(SUBMIT_ERROR_MESSAGE);
            err.status_code()
        }
    };

    // On failure the form keeps its values and submission id so a retry is idempotent
    let html = render_page(&state.landing, &FormState::from(form), &flow, state.now());
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(html)
}

/// Scripted clients: JSON in, JSON out
#[post("/leads")]
async fn create_lead(
    service: Data<LeadService>,
    form: Json<LeadForm>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.submit(&form).await?;

    Ok(if response.created {
        HttpResponse::Created().json(response)
    } else {
        HttpResponse::Ok().json(response)
    })
}

pub fn lead_config(config: &mut ServiceConfig) {
    config
        .service(landing_page)
        .service(submit_form)
        .service(scope("/api").service(create_lead));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::validation;
    use crate::db::delivery_repository::DeliveryTarget;
    use crate::db::memory::MemoryStore;
    use crate::landing::vacancy::VacancySnapshot;
    use crate::landing::LandingConfig;
    use actix_web::{http::StatusCode, test, App};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn landing() -> LandingConfig {
        LandingConfig {
            deadline: Utc.with_ymd_and_hms(2025, 10, 17, 21, 59, 59).unwrap(),
            vacancies: VacancySnapshot::new(10, 7).unwrap(),
        }
    }

    fn lead_service(store: Arc<MemoryStore>) -> LeadService {
        LeadService::new(
            store,
            DeliveryTarget {
                url: "http://hooks.test/lead".to_string(),
                max_attempts: 5,
            },
        )
    }

    fn form_fields(submission_id: &str) -> Vec<(&'static str, String)> {
        vec![
            ("submission_id", submission_id.to_string()),
            ("name", "Ana Silva".to_string()),
            ("country_code", "+351".to_string()),
            ("phone", "912 345 678".to_string()),
            ("email", "ana@example.com".to_string()),
        ]
    }

    macro_rules! app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(Data::new(AppState::new(landing())))
                    .app_data(Data::new(lead_service($store)))
                    .app_data(validation::json_config())
                    .app_data(validation::form_config())
                    .configure(lead_config),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn landing_page_renders_form() {
        let app = app!(Arc::new(MemoryStore::default()));
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains(r#"id="lead-form""#));
        assert!(body.contains(">3/10<"));
    }

    #[actix_web::test]
    async fn form_submission_shows_confirmation() {
        let store = Arc::new(MemoryStore::default());
        let app = app!(store.clone());

        let id = uuid::Uuid::new_v4().to_string();
        let req = test::TestRequest::post()
            .uri("/leads")
            .set_form(form_fields(&id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("Pré-inscrição Recebida com Sucesso!"));

        let leads = store.leads();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].phone, "+351 912 345 678");
        assert_eq!(leads[0].submission_id.to_string(), id);
    }

    #[actix_web::test]
    async fn store_failure_keeps_form_populated() {
        let store = Arc::new(MemoryStore::default());
        store.set_unavailable(true);
        let app = app!(store.clone());

        let id = uuid::Uuid::new_v4().to_string();
        let req = test::TestRequest::post()
            .uri("/leads")
            .set_form(form_fields(&id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains(SUBMIT_ERROR_MESSAGE));
        assert!(body.contains(r#"value="Ana Silva""#));
        assert!(body.contains(&id));
        assert!(!body.contains("Pré-inscrição Recebida"));
    }

    #[actix_web::test]
    async fn invalid_form_shows_generic_error() {
        let store = Arc::new(MemoryStore::default());
        let app = app!(store.clone());

        let id = uuid::Uuid::new_v4().to_string();
        let mut fields = form_fields(&id);
        fields[1].1 = "   ".to_string();
        let req = test::TestRequest::post()
            .uri("/leads")
            .set_form(fields)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains(SUBMIT_ERROR_MESSAGE));
        assert!(!body.contains("Campo obrigatório"));
        assert!(body.contains(&id));
        assert!(store.leads().is_empty());
    }

    #[actix_web::test]
    async fn undecodable_form_renders_the_page() {
        let store = Arc::new(MemoryStore::default());
        let app = app!(store.clone());

        let req = test::TestRequest::post()
            .uri("/leads")
            .set_form(form_fields("not-a-uuid"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get(actix_web::http::header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );

        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains(SUBMIT_ERROR_MESSAGE));
        assert!(body.contains(r#"id="lead-form""#));
        assert!(store.leads().is_empty());
    }

    #[actix_web::test]
    async fn unknown_country_code_is_rejected() {
        let store = Arc::new(MemoryStore::default());
        let app = app!(store.clone());

        let id = uuid::Uuid::new_v4().to_string();
        let mut fields = form_fields(&id);
        fields[2].1 = "+999".to_string();
        let req = test::TestRequest::post()
            .uri("/leads")
            .set_form(fields)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(store.leads().is_empty());
    }

    #[actix_web::test]
    async fn json_submission_is_idempotent() {
        let store = Arc::new(MemoryStore::default());
        let app = app!(store.clone());

        let payload = serde_json::json!({
            "submission_id": uuid::Uuid::new_v4(),
            "name": "Ana Silva",
            "country_code": "+32",
            "phone": "470 12 34 56",
            "email": "ana@example.com"
        });

        let first = test::TestRequest::post()
            .uri("/api/leads")
            .set_json(&payload)
            .to_request();
        assert_eq!(test::call_service(&app, first).await.status(), StatusCode::CREATED);

        let second = test::TestRequest::post()
            .uri("/api/leads")
            .set_json(&payload)
            .to_request();
        assert_eq!(test::call_service(&app, second).await.status(), StatusCode::OK);

        assert_eq!(store.leads().len(), 1);
        assert_eq!(store.deliveries().len(), 1);
    }

    #[actix_web::test]
    async fn json_submission_with_bad_email_is_rejected() {
        let app = app!(Arc::new(MemoryStore::default()));

        let req = test::TestRequest::post()
            .uri("/api/leads")
            .set_json(serde_json::json!({
                "name": "Ana Silva",
                "phone": "470 12 34 56",
                "email": "ana"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
