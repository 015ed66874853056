use uuid::Uuid;

use crate::api::lead::LeadForm;

pub const DEFAULT_COUNTRY_CODE: &str = "+32";

/// Shown for any failed submission; details only go to the logs
pub const SUBMIT_ERROR_MESSAGE: &str = "Erro ao enviar seus dados. Por favor, tente novamente.";

/// Dialling codes offered by the phone selector, in display order
pub const COUNTRY_CODES: &[(&str, &str)] = &[
    ("+32", "🇧🇪 +32"),
    ("+351", "🇵🇹 +351"),
    ("+55", "🇧🇷 +55"),
    ("+1", "🇺🇸 +1"),
    ("+44", "🇬🇧 +44"),
    ("+34", "🇪🇸 +34"),
    ("+33", "🇫🇷 +33"),
    ("+49", "🇩🇪 +49"),
    ("+39", "🇮🇹 +39"),
    ("+41", "🇨🇭 +41"),
    ("+54", "🇦🇷 +54"),
    ("+52", "🇲🇽 +52"),
    ("+56", "🇨🇱 +56"),
];

/// Values currently held by the lead form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub submission_id: Uuid,
    pub name: String,
    pub country_code: String,
    pub phone: String,
    pub email: String,
}

impl FormState {
    /// Empty form with a new submission id
    pub fn fresh() -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            name: String::new(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            phone: String::new(),
            email: String::new(),
        }
    }
}

impl From<LeadForm> for FormState {
    fn from(form: LeadForm) -> Self {
        Self {
            submission_id: form.submission_id,
            name: form.name,
            country_code: form.country_code,
            phone: form.phone,
            email: form.email,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

/// Submission state machine for one form
///
/// `Idle -> Submitting -> Submitted` on success,
/// `Idle -> Submitting -> Idle` with an error message on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFlow {
    status: SubmissionStatus,
    error: Option<String>,
}

impl SubmissionFlow {
    /// Enter `Submitting`, clearing any previous error.
    ///
    /// Returns `false` without changing state when a submission is already
    /// in flight or has completed.
    pub fn begin(&mut self) -> bool {
        if self.status != SubmissionStatus::Idle {
            return false;
        }
        self.error = None;
        self.status = SubmissionStatus::Submitting;
        true
    }

    pub fn succeed(&mut self) {
        if self.status == SubmissionStatus::Submitting {
            self.status = SubmissionStatus::Submitted;
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status == SubmissionStatus::Submitting {
            self.status = SubmissionStatus::Idle;
            self.error = Some(message.into());
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The submit control is disabled while a submission is in flight
    pub fn submit_disabled(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        match self.status {
            SubmissionStatus::Submitting => "Enviando...",
            _ => "Quero Garantir Minha Vaga Agora!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_path() {
        let mut flow = SubmissionFlow::default();
        assert_eq!(flow.status(), SubmissionStatus::Idle);

        assert!(flow.begin());
        assert_eq!(flow.status(), SubmissionStatus::Submitting);
        assert!(flow.submit_disabled());
        assert_eq!(flow.submit_label(), "Enviando...");

        flow.succeed();
        assert_eq!(flow.status(), SubmissionStatus::Submitted);
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn failure_returns_to_idle_with_error() {
        let mut flow = SubmissionFlow::default();
        flow.begin();
        flow.fail(SUBMIT_ERROR_MESSAGE);

        assert_eq!(flow.status(), SubmissionStatus::Idle);
        assert_eq!(flow.error(), Some(SUBMIT_ERROR_MESSAGE));
        assert!(!flow.submit_disabled());
    }

    #[test]
    fn retry_clears_previous_error() {
        let mut flow = SubmissionFlow::default();
        flow.begin();
        flow.fail(SUBMIT_ERROR_MESSAGE);

        assert!(flow.begin());
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn reentry_while_submitting_is_rejected() {
        let mut flow = SubmissionFlow::default();
        assert!(flow.begin());
        assert!(!flow.begin());
        assert_eq!(flow.status(), SubmissionStatus::Submitting);
    }

    #[test]
    fn fresh_form_uses_default_country_code() {
        let a = FormState::fresh();
        let b = FormState::fresh();
        assert_eq!(a.country_code, "+32");
        assert_ne!(a.submission_id, b.submission_id);
    }
}
