//! Core domain types for UV Lens.
//!
//! This module defines the fundamental types used throughout the system:
//! - Reference table rows (skin types, environments)
//! - The user's skin/behaviour profile
//! - Calculator outputs (protection result, thresholds, assessment)
//! - Data exchanged with the location and weather providers

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Reference Table Rows
// ============================================================================

/// A Fitzpatrick-style skin type
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkinType {
    /// 1 (most sensitive) to 5 (least)
    pub ordinal: u8,
    pub description: &'static str,
    /// Minutes to burn at UV index 1 without protection
    pub base_burn_time: f64,
}

/// Surroundings that reflect or block UV
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentKind {
    Shady,
    Mixed,
    Sunny,
    WaterSand,
    Snow,
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EnvironmentKind::Shady => "shady",
            EnvironmentKind::Mixed => "mixed",
            EnvironmentKind::Sunny => "sunny",
            EnvironmentKind::WaterSand => "water/sand",
            EnvironmentKind::Snow => "snow",
        };
        f.write_str(label)
    }
}

/// An environment with its UV reflection multiplier
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    pub kind: EnvironmentKind,
    pub reflection_factor: f64,
}

// ============================================================================
// Profile
// ============================================================================

/// User-supplied profile, stored as a flat record of table indices
///
/// Field names are camelCase on disk so the record keeps the shape of the
/// `uvProfile` entry other front ends write.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Index into the skin type table (0-4)
    pub skin_type: usize,
    /// Index into the SPF table (0-3)
    pub sunscreen_usage: usize,
    /// Index into the outdoor-time table (0-4)
    pub time_outdoors: usize,
    /// Index into the environment table (0-4), mixed when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<usize>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            skin_type: 2,
            sunscreen_usage: 1,
            time_outdoors: 2,
            environment: Some(crate::tables::DEFAULT_ENVIRONMENT),
        }
    }
}

impl Profile {
    /// Environment index with the mixed default applied
    pub fn environment_index(&self) -> usize {
        self.environment
            .unwrap_or(crate::tables::DEFAULT_ENVIRONMENT)
    }
}

// ============================================================================
// Calculator Outputs
// ============================================================================

/// Overall UV risk classification
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Extreme => "extreme",
        };
        f.write_str(label)
    }
}

/// A duration in whole minutes, or no limit at all
///
/// Ordering puts every finite duration below `Unbounded`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExposureTime {
    Minutes(u64),
    Unbounded,
}

impl ExposureTime {
    /// Minute count, `None` when unbounded
    pub fn minutes(self) -> Option<u64> {
        match self {
            ExposureTime::Minutes(m) => Some(m),
            ExposureTime::Unbounded => None,
        }
    }

    /// Minutes as a float, with `Unbounded` mapped to infinity
    pub fn as_f64(self) -> f64 {
        match self {
            ExposureTime::Minutes(m) => m as f64,
            ExposureTime::Unbounded => f64::INFINITY,
        }
    }
}

/// Result of scoring a profile against current and forecast UV
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProtectionResult {
    pub level: RiskLevel,
    /// Clamped to 0..=100
    pub score: u32,
    /// Headline first, then risk-specific advice, then reapplication notes
    pub recommendations: Vec<String>,
    /// Minutes between sunscreen applications
    pub reapply_time: Option<u32>,
    /// Time to burn at the worst forecast UV
    pub safe_exposure_time: ExposureTime,
}

/// Personalised UV index alert thresholds
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct UvThresholds {
    pub safe: f64,
    pub caution: f64,
    pub danger: f64,
}

/// Everything computed for one (profile, UV, forecast) input
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Assessment {
    pub protection: ProtectionResult,
    pub vitamin_d_time: ExposureTime,
    pub thresholds: UvThresholds,
}

// ============================================================================
// Provider Data
// ============================================================================

/// Geographic coordinates in decimal degrees
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions reported by a weather/UV provider
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub uv_index: f64,
    pub temperature_c: f64,
    pub description: String,
    pub place: Option<String>,
    pub country: Option<String>,
}
