use serde::Serialize;

/// Fixed workshop capacity and the seats still open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VacancySnapshot {
    pub total: u32,
    pub remaining: u32,
}

impl VacancySnapshot {
    /// Build a snapshot, requiring `total > 0` and `remaining <= total`
    pub fn new(total: u32, remaining: u32) -> Result<Self, String> {
        if total == 0 {
            return Err("TOTAL_VACANCIES must be greater than zero".to_string());
        }
        if remaining > total {
            return Err(format!(
                "REMAINING_VACANCIES ({}) cannot exceed TOTAL_VACANCIES ({})",
                remaining, total
            ));
        }
        Ok(Self { total, remaining })
    }

    pub fn filled(&self) -> u32 {
        self.total.saturating_sub(self.remaining)
    }

    /// Share of seats taken, in percent. Not guarded against `total == 0`.
    pub fn filled_percentage(&self) -> f64 {
        f64::from(self.filled()) / f64::from(self.total) * 100.0
    }

    pub fn fraction_text(&self) -> String {
        format!("{}/{}", self.filled(), self.total)
    }

    pub fn warning_text(&self) -> String {
        format!("Restam apenas {} vagas disponíveis!", self.remaining)
    }

    pub fn badge_text(&self) -> String {
        format!("VAGAS LIMITADAS - APENAS {} RESTANTES", self.remaining)
    }
}
