#![forbid(unsafe_code)]

//! Core domain model and business logic for UV Lens.
//!
//! This crate provides:
//! - Static reference tables (skin types, SPF, outdoor time, environments)
//! - The UV protection calculator and one-shot assessment
//! - Profile persistence
//! - Weather/UV, location and reminder collaborators

pub mod types;
pub mod error;
pub mod tables;
pub mod config;
pub mod logging;
pub mod calculator;
pub mod assessment;
pub mod profile_store;
pub mod location;
pub mod weather;
pub mod reminder;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use calculator::{
    calculate_effective_uv, calculate_protection_level, calculate_time_to_burn,
    calculate_vitamin_d_time, get_uv_thresholds,
};
pub use assessment::{assess, format_minutes, uv_index_band};
pub use profile_store::{JsonProfileStore, ProfileStore};
pub use location::{FixedLocation, LocationError, LocationProvider};
pub use weather::{OpenWeatherProvider, UvProvider};
pub use reminder::{ReminderScheduler, ScheduledReminder, TerminalReminder};
