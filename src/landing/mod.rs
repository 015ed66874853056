pub mod content;
pub mod countdown;
pub mod form;
pub mod vacancy;
pub mod views;

use chrono::{DateTime, Utc};

use self::vacancy::VacancySnapshot;

/// Values the page widgets are built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingConfig {
    /// Registration closes at this instant
    pub deadline: DateTime<Utc>,
    pub vacancies: VacancySnapshot,
}
