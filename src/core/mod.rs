//! Core engine modules

pub mod comparison;
pub mod cost;
pub mod engine;
pub mod providers;
pub mod report;
pub mod trends;
pub mod types;
