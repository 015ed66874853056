use actix_web::{http::header::ContentType, web, HttpResponse};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::http::AppState;
use crate::landing::form::{FormState, SubmissionFlow, SUBMIT_ERROR_MESSAGE};
use crate::landing::views::render_page;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: Value,
}

fn bad_request(error: &str, fields: Map<String, Value>) -> actix_web::Error {
    let error_response = ErrorResponse {
        error: error.to_string(),
        fields: Value::Object(fields),
    };
    actix_web::error::InternalError::from_response(
        "",
        HttpResponse::BadRequest().json(error_response)
    ).into()
}

fn malformed_request(message: &str) -> actix_web::Error {
    let mut fields = Map::new();
    fields.insert("message".to_string(), json!(message));
    bad_request("Request validation failed", fields)
}

/// Form extractor config: an undecodable browser form gets the page back
/// with a blank form and the generic error panel
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, req| {
            tracing::warn!("Rejected form submission: {}", err);

            let body = match req.app_data::<web::Data<AppState>>() {
                Some(state) => {
                    let mut flow = SubmissionFlow::default();
                    flow.begin();
                    flow.fail(SUBMIT_ERROR_MESSAGE);
                    render_page(&state.landing, &FormState::fresh(), &flow, state.now())
                }
                None => SUBMIT_ERROR_MESSAGE.to_string(),
            };

            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest()
                    .content_type(ContentType::html())
                    .body(body)
            ).into()
        })
}

/// JsonConfig for the lead API: field errors are reported per field, decoding
/// errors as a single message
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default()
        .error_handler(|err, _req| match err {
            actix_web_validator::Error::Validate(validation_errors) => {
                let mut fields = Map::new();
                for (field, errors) in validation_errors.field_errors() {
                    let messages: Vec<String> = errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("Invalid value for {}", field))
                        })
                        .collect();
                    fields.insert(field.to_string(), json!({ "errors": messages }));
                }
                tracing::warn!("Rejected lead: {} invalid field(s)", fields.len());
                bad_request("Validation failed", fields)
            }
            actix_web_validator::Error::Deserialize(de_err) => {
                let err_string = de_err.to_string();
                tracing::warn!("Rejected lead payload: {}", err_string);

                if err_string.contains("EOF while parsing") {
                    malformed_request("Request body is empty. Expected a lead JSON payload")
                } else if err_string.contains("missing field") {
                    malformed_request(&err_string)
                } else {
                    malformed_request("Invalid JSON format")
                }
            }
            other => {
                tracing::warn!("Rejected lead request: {}", other);
                malformed_request("Validation error")
            }
        })
}
