use crate::landing::countdown::{system_clock, Clock};
use crate::landing::LandingConfig;

/// Shared, read-only state for the page handlers
pub struct AppState {
    pub landing: LandingConfig,
    pub clock: Clock,
}

impl AppState {
    pub fn new(landing: LandingConfig) -> Self {
        Self::with_clock(landing, system_clock())
    }

    pub fn with_clock(landing: LandingConfig, clock: Clock) -> Self {
        AppState { landing, clock }
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        (self.clock)()
    }
}
