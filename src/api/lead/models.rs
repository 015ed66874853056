use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::landing::form::{COUNTRY_CODES, DEFAULT_COUNTRY_CODE};

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::from("Campo obrigatório"));
        return Err(err);
    }
    Ok(())
}

/// Only codes offered by the page's selector are accepted
fn known_country_code(value: &str) -> Result<(), ValidationError> {
    if COUNTRY_CODES.iter().any(|(code, _)| *code == value) {
        return Ok(());
    }
    let mut err = ValidationError::new("country_code");
    err.message = Some(Cow::from("Código de país inválido"));
    Err(err)
}

/// Lead form as submitted by the page or a JSON client
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct LeadForm {
    /// Generated when the form is rendered; a fresh one is assigned when absent
    #[serde(default = "Uuid::new_v4")]
    pub submission_id: Uuid,

    #[validate(
        custom(function = "not_blank"),
        length(max = 120, message = "Nome deve ter no máximo 120 caracteres")
    )]
    pub name: String,

    #[serde(default = "default_country_code")]
    #[validate(custom(function = "known_country_code"))]
    pub country_code: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 32, message = "Telefone deve ter no máximo 32 caracteres")
    )]
    pub phone: String,

    #[validate(email(message = "E-mail inválido"))]
    pub email: String,
}

/// Contact payload stored in `leads` and sent to the webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lead {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Lead {
    /// The phone is the country code and local number joined by one space
    pub fn from_form(form: &LeadForm) -> Self {
        Self {
            name: form.name.clone(),
            phone: format!("{} {}", form.country_code, form.phone),
            email: form.email.clone(),
        }
    }
}

/// Lead keyed by the client-generated submission id
#[derive(Debug, Clone)]
pub struct NewLead {
    pub submission_id: Uuid,
    pub lead: Lead,
}

impl From<&LeadForm> for NewLead {
    fn from(form: &LeadForm) -> Self {
        Self {
            submission_id: form.submission_id,
            lead: Lead::from_form(form),
        }
    }
}
