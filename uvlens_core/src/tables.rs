//! Static reference tables for the UV calculator.
//!
//! All tables are indexed by the positions stored in a [`Profile`]. Lookups
//! return `None` for out-of-range indices and callers pick the fallback.

use crate::types::*;

/// Environment used when a profile has none (mixed, factor 1.0)
pub const DEFAULT_ENVIRONMENT: usize = 1;

/// Skin type used by threshold lookups for an invalid index
pub const DEFAULT_SKIN_TYPE: usize = 2;

/// Planned outdoor minutes when the profile's bucket is invalid
pub const DEFAULT_PLANNED_MINUTES: u32 = 90;

/// SPF multiplier meaning "no sunscreen"
pub const NO_SUNSCREEN_SPF: f64 = 1.0;

/// Fraction of skin exposed when estimating vitamin D time
pub const DEFAULT_BODY_EXPOSURE: f64 = 0.25;

// ============================================================================
// Tables
// ============================================================================

pub static SKIN_TYPES: [SkinType; 5] = [
    SkinType {
        ordinal: 1,
        description: "Always burns, never tans",
        base_burn_time: 67.0,
    },
    SkinType {
        ordinal: 2,
        description: "Usually burns, tans minimally",
        base_burn_time: 100.0,
    },
    SkinType {
        ordinal: 3,
        description: "Sometimes burns, tans moderately",
        base_burn_time: 133.0,
    },
    SkinType {
        ordinal: 4,
        description: "Rarely burns, tans easily",
        base_burn_time: 200.0,
    },
    SkinType {
        ordinal: 5,
        description: "Never burns, tans very easily",
        base_burn_time: 300.0,
    },
];

/// No sunscreen, SPF 15-29, SPF 30-49, SPF 50+
pub static SPF_VALUES: [f64; 4] = [1.0, 15.0, 30.0, 50.0];

/// Under 30 min, 30-60 min, 1-2 h, 2-3 h, over 3 h
pub static TIME_OUTDOORS: [u32; 5] = [30, 45, 90, 150, 240];

pub static ENVIRONMENTS: [Environment; 5] = [
    Environment {
        kind: EnvironmentKind::Shady,
        reflection_factor: 0.8,
    },
    Environment {
        kind: EnvironmentKind::Mixed,
        reflection_factor: 1.0,
    },
    Environment {
        kind: EnvironmentKind::Sunny,
        reflection_factor: 1.1,
    },
    Environment {
        kind: EnvironmentKind::WaterSand,
        reflection_factor: 1.25,
    },
    Environment {
        kind: EnvironmentKind::Snow,
        reflection_factor: 1.85,
    },
];

/// Base UV thresholds before the per-skin adjustment
pub const BASE_THRESHOLDS: UvThresholds = UvThresholds {
    safe: 3.0,
    caution: 6.0,
    danger: 8.0,
};

/// Lower bounds applied after the adjustment
pub const THRESHOLD_FLOORS: UvThresholds = UvThresholds {
    safe: 1.0,
    caution: 2.0,
    danger: 3.0,
};

/// Per-skin-type offsets; more sensitive skin gets lower thresholds
pub static THRESHOLD_ADJUSTMENTS: [UvThresholds; 5] = [
    UvThresholds { safe: -1.0, caution: -2.0, danger: -2.0 },
    UvThresholds { safe: -0.5, caution: -1.0, danger: -1.0 },
    UvThresholds { safe: 0.0, caution: 0.0, danger: 0.0 },
    UvThresholds { safe: 0.5, caution: 1.0, danger: 1.0 },
    UvThresholds { safe: 1.0, caution: 2.0, danger: 2.0 },
];

/// Vitamin D synthesis factors; lighter skin synthesises faster
pub static VITAMIN_D_SKIN_FACTORS: [f64; 5] = [0.5, 0.7, 1.0, 1.5, 2.0];

// ============================================================================
// Lookups
// ============================================================================

pub fn skin_type(index: usize) -> Option<&'static SkinType> {
    SKIN_TYPES.get(index)
}

pub fn environment(index: usize) -> Option<&'static Environment> {
    ENVIRONMENTS.get(index)
}

pub fn spf_value(index: usize) -> Option<f64> {
    SPF_VALUES.get(index).copied()
}

pub fn planned_minutes(index: usize) -> Option<u32> {
    TIME_OUTDOORS.get(index).copied()
}

impl RiskLevel {
    /// Fixed sunscreen reapplication interval for this level
    pub fn reapply_minutes(self) -> Option<u32> {
        match self {
            RiskLevel::Extreme => Some(60),
            RiskLevel::High => Some(90),
            RiskLevel::Moderate => Some(120),
            RiskLevel::Low => None,
        }
    }
}

impl Profile {
    /// Check every index against its table
    ///
    /// Returns a list of problems (empty if valid). The calculator tolerates
    /// out-of-range indices, so this is for callers that accept user input.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if skin_type(self.skin_type).is_none() {
            errors.push(format!(
                "Skin type {} out of range (0-{})",
                self.skin_type,
                SKIN_TYPES.len() - 1
            ));
        }
        if spf_value(self.sunscreen_usage).is_none() {
            errors.push(format!(
                "Sunscreen usage {} out of range (0-{})",
                self.sunscreen_usage,
                SPF_VALUES.len() - 1
            ));
        }
        if planned_minutes(self.time_outdoors).is_none() {
            errors.push(format!(
                "Time outdoors {} out of range (0-{})",
                self.time_outdoors,
                TIME_OUTDOORS.len() - 1
            ));
        }
        if let Some(env) = self.environment {
            if environment(env).is_none() {
                errors.push(format!(
                    "Environment {} out of range (0-{})",
                    env,
                    ENVIRONMENTS.len() - 1
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skin_types_ordered_by_sensitivity() {
        for pair in SKIN_TYPES.windows(2) {
            assert!(pair[0].base_burn_time < pair[1].base_burn_time);
            assert_eq!(pair[0].ordinal + 1, pair[1].ordinal);
        }
    }

    #[test]
    fn test_mixed_environment_is_identity() {
        let mixed = environment(DEFAULT_ENVIRONMENT).unwrap();
        assert_eq!(mixed.kind, EnvironmentKind::Mixed);
        assert_eq!(mixed.reflection_factor, 1.0);
    }

    #[test]
    fn test_lookups_out_of_range() {
        assert!(skin_type(5).is_none());
        assert!(environment(9).is_none());
        assert!(spf_value(4).is_none());
        assert!(planned_minutes(5).is_none());
    }

    #[test]
    fn test_default_profile_validates() {
        let errors = Profile::default().validate();
        assert!(errors.is_empty(), "Unexpected errors: {:?}", errors);
    }

    #[test]
    fn test_validate_reports_each_bad_index() {
        let profile = Profile {
            skin_type: 5,
            sunscreen_usage: 4,
            time_outdoors: 7,
            environment: Some(5),
        };
        let errors = profile.validate();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("Skin type 5"));
    }

    #[test]
    fn test_missing_environment_is_valid() {
        let profile = Profile {
            environment: None,
            ..Profile::default()
        };
        assert!(profile.validate().is_empty());
        assert_eq!(profile.environment_index(), DEFAULT_ENVIRONMENT);
    }

    #[test]
    fn test_reapply_minutes_by_level() {
        assert_eq!(RiskLevel::Extreme.reapply_minutes(), Some(60));
        assert_eq!(RiskLevel::High.reapply_minutes(), Some(90));
        assert_eq!(RiskLevel::Moderate.reapply_minutes(), Some(120));
        assert_eq!(RiskLevel::Low.reapply_minutes(), None);
    }
}
