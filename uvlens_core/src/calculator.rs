//! UV protection scoring engine.
//!
//! Pure functions over the static tables in [`crate::tables`]. Nothing here
//! fails: invalid indices and out-of-range numbers resolve to documented
//! fallbacks so a result can always be shown.
//!
//! ## Protection scoring
//!
//! 1. **UV band** on the current effective UV: 20 / 40 / 60 / 80 / 100
//! 2. **Exposure ratio** of planned minutes to time-to-burn at the worst
//!    forecast UV: +40 above 1, +20 above 0.7
//! 3. **Skin sensitivity**: +20 for the two most burn-prone types
//!
//! The level is taken from the unclamped score; the reported score is capped
//! at 100.

use crate::tables::{self, DEFAULT_PLANNED_MINUTES, NO_SUNSCREEN_SPF};
use crate::{ExposureTime, Profile, ProtectionResult, RiskLevel, UvThresholds};

/// UV index adjusted by the environment's reflection factor
///
/// An unknown environment index uses a factor of 1.0.
pub fn calculate_effective_uv(actual_uv: f64, environment_index: usize) -> f64 {
    let factor = tables::environment(environment_index)
        .map(|e| e.reflection_factor)
        .unwrap_or(1.0);
    actual_uv * factor
}

/// Minutes until the skin burns at `uv_index`, with SPF as a linear multiplier
///
/// Unbounded for an unknown skin type or a UV index that is not positive.
pub fn calculate_time_to_burn(skin_type_index: usize, uv_index: f64, spf_value: f64) -> ExposureTime {
    let Some(skin) = tables::skin_type(skin_type_index) else {
        return ExposureTime::Unbounded;
    };
    // Also catches NaN
    if !(uv_index > 0.0) {
        return ExposureTime::Unbounded;
    }

    let unprotected = skin.base_burn_time / uv_index;
    let minutes = (unprotected * spf_value).round().max(0.0);
    ExposureTime::Minutes(minutes as u64)
}

/// Score a profile against the current UV and a short forecast
pub fn calculate_protection_level(
    profile: &Profile,
    current_uv: f64,
    forecast_uv: &[f64],
) -> ProtectionResult {
    let environment = profile.environment_index();
    let effective_uv = calculate_effective_uv(current_uv, environment);

    // Worst case over the lookahead window, so a dip can't hide a later spike
    let max_forecast_uv = forecast_uv.iter().copied().fold(current_uv, f64::max);
    let max_effective_uv = calculate_effective_uv(max_forecast_uv, environment);

    let spf = tables::spf_value(profile.sunscreen_usage).unwrap_or(NO_SUNSCREEN_SPF);
    let time_to_burn = calculate_time_to_burn(profile.skin_type, max_effective_uv, spf);
    let planned_minutes =
        tables::planned_minutes(profile.time_outdoors).unwrap_or(DEFAULT_PLANNED_MINUTES);

    let mut score: u32 = 0;
    let mut recommendations: Vec<String> = Vec::new();

    score += uv_band_score(effective_uv);

    let exposure_ratio = f64::from(planned_minutes) / time_to_burn.as_f64();
    if let Some((points, advice)) = exposure_ratio_score(exposure_ratio) {
        score += points;
        recommendations.push(advice.into());
    }

    let sensitive_skin = profile.skin_type <= 1;
    if sensitive_skin {
        score += 20;
        recommendations.push("Your skin type is highly sensitive to UV.".into());
    }

    let level = classify(score, effective_uv);

    match level {
        RiskLevel::Extreme => {
            recommendations.insert(0, "⚠️ EXTREME UV RISK - Avoid sun exposure if possible".into());
            if spf < 50.0 {
                recommendations.push("Apply SPF 50+ sunscreen immediately".into());
            }
            recommendations.push("Wear protective clothing, hat, and sunglasses".into());
            recommendations.push("Seek shade frequently".into());
        }
        RiskLevel::High => {
            recommendations.insert(0, "🔴 HIGH UV RISK - Maximum protection needed".into());
            if spf < 30.0 {
                recommendations.push("Apply at least SPF 30 sunscreen".into());
            }
            recommendations.push("Wear a wide-brimmed hat".into());
            recommendations.push("Stay in shade during peak hours (10am-4pm)".into());
        }
        RiskLevel::Moderate => {
            recommendations.insert(0, "🟡 MODERATE UV RISK - Protection recommended".into());
            if spf < 15.0 {
                recommendations.push("Apply SPF 15+ sunscreen".into());
            }
            recommendations.push("Wear sunglasses".into());
            recommendations.push("Consider seeking shade during midday".into());
        }
        RiskLevel::Low => {
            recommendations.insert(0, "🟢 LOW UV RISK - Minimal protection needed".into());
            recommendations.push("Sunglasses recommended".into());
            if sensitive_skin {
                recommendations.push("Light sunscreen still advisable for sensitive skin".into());
            }
        }
    }

    let reapply_time = level.reapply_minutes();

    if let Some(minutes) = reapply_time {
        if spf > NO_SUNSCREEN_SPF {
            let hours = f64::from(minutes) / 60.0;
            recommendations.push(format!("Reapply sunscreen every {} hours", hours));
            if matches!(profile.environment, Some(3) | Some(4)) {
                recommendations.push("Reapply immediately after swimming or sweating".into());
            }
        }
    }

    tracing::debug!(
        "Protection level {} (raw score {}, effective UV {:.2}, worst UV {:.2}, burn {:?})",
        level,
        score,
        effective_uv,
        max_effective_uv,
        time_to_burn
    );

    ProtectionResult {
        level,
        score: score.min(100),
        recommendations,
        reapply_time,
        safe_exposure_time: time_to_burn,
    }
}

/// Personalised UV alert thresholds for a skin type
///
/// An unknown skin type gets the unadjusted (type 3) thresholds.
pub fn get_uv_thresholds(skin_type_index: usize) -> UvThresholds {
    let adjustment = tables::THRESHOLD_ADJUSTMENTS
        .get(skin_type_index)
        .copied()
        .unwrap_or(tables::THRESHOLD_ADJUSTMENTS[tables::DEFAULT_SKIN_TYPE]);
    let base = tables::BASE_THRESHOLDS;
    let floor = tables::THRESHOLD_FLOORS;

    UvThresholds {
        safe: (base.safe + adjustment.safe).max(floor.safe),
        caution: (base.caution + adjustment.caution).max(floor.caution),
        danger: (base.danger + adjustment.danger).max(floor.danger),
    }
}

/// Minutes of exposure needed for adequate vitamin D synthesis
///
/// Unbounded below UV 3, where synthesis is negligible. Otherwise the estimate
/// is clamped to 5..=30 minutes.
pub fn calculate_vitamin_d_time(
    skin_type_index: usize,
    uv_index: f64,
    body_exposure_fraction: f64,
) -> ExposureTime {
    // Base time at UV 3 with a quarter of the body exposed
    const BASE_MINUTES: f64 = 15.0;

    let factor = tables::VITAMIN_D_SKIN_FACTORS
        .get(skin_type_index)
        .copied()
        .unwrap_or(1.0);

    if !(uv_index >= 3.0) {
        return ExposureTime::Unbounded;
    }

    let time = (BASE_MINUTES * factor * 3.0) / (uv_index * body_exposure_fraction * 4.0);
    ExposureTime::Minutes(time.min(30.0).max(5.0).round() as u64)
}

fn uv_band_score(effective_uv: f64) -> u32 {
    if effective_uv < 3.0 {
        20
    } else if effective_uv < 6.0 {
        40
    } else if effective_uv < 8.0 {
        60
    } else if effective_uv < 11.0 {
        80
    } else {
        100
    }
}

/// Points and advice for planned minutes over time-to-burn
///
/// Above 1 is overexposure; (0.7, 1] is close to the limit.
fn exposure_ratio_score(ratio: f64) -> Option<(u32, &'static str)> {
    if ratio > 1.0 {
        Some((
            40,
            "Your planned time exceeds safe exposure. Consider reducing time outdoors.",
        ))
    } else if ratio > 0.7 {
        Some((20, "You're approaching your safe exposure limit."))
    } else {
        None
    }
}

/// Level from the unclamped score; UV alone can force at least moderate
fn classify(score: u32, effective_uv: f64) -> RiskLevel {
    if score >= 80 {
        RiskLevel::Extreme
    } else if score >= 60 {
        RiskLevel::High
    } else if score >= 40 || effective_uv >= 3.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}
