pub mod connection;
pub mod delivery_repository;
pub mod lead_repository;
#[cfg(test)]
pub mod memory;
pub mod migrations;
pub mod models;
