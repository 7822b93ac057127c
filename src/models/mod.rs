// src/models/mod.rs

//! Domain models for the seat monitor.

mod config;
mod course;

// Re-export all public types
pub use config::{CatalogConfig, Config, MonitorConfig, NotifierConfig, Target, TwilioConfig};
pub use course::{Activity, ActivityKind, Course};
