pub mod countdown;
pub mod health;
pub mod lead;
pub mod validation;
