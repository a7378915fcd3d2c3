//! One-shot assessment bundling everything a report shows.
//!
//! Recomputed from scratch for every (profile, UV, forecast) input; nothing is
//! cached between calls.

use crate::calculator::{
    calculate_protection_level, calculate_vitamin_d_time, get_uv_thresholds,
};
use crate::config::AssessmentConfig;
use crate::{Assessment, ExposureTime, Profile};

/// Assess a profile against the current UV and an hourly forecast
///
/// Only the first `settings.forecast_hours` forecast entries are considered.
/// Vitamin D time uses the current UV, not the forecast peak.
pub fn assess(
    profile: &Profile,
    current_uv: f64,
    hourly_forecast: &[f64],
    settings: &AssessmentConfig,
) -> Assessment {
    let window = &hourly_forecast[..hourly_forecast.len().min(settings.forecast_hours)];

    tracing::debug!(
        "Assessing UV {:.1} with {} of {} forecast hours",
        current_uv,
        window.len(),
        hourly_forecast.len()
    );

    Assessment {
        protection: calculate_protection_level(profile, current_uv, window),
        vitamin_d_time: calculate_vitamin_d_time(
            profile.skin_type,
            current_uv,
            settings.body_exposure,
        ),
        thresholds: get_uv_thresholds(profile.skin_type),
    }
}

/// Human-readable duration: "N/A", "45m" or "2h 5m"
pub fn format_minutes(time: ExposureTime) -> String {
    match time {
        ExposureTime::Unbounded => "N/A".into(),
        ExposureTime::Minutes(m) if m >= 60 => format!("{}h {}m", m / 60, m % 60),
        ExposureTime::Minutes(m) => format!("{}m", m),
    }
}

/// Standard label for a raw UV index reading
pub fn uv_index_band(uv_index: f64) -> &'static str {
    if uv_index <= 2.0 {
        "low"
    } else if uv_index <= 5.0 {
        "moderate"
    } else if uv_index <= 7.0 {
        "high"
    } else if uv_index <= 10.0 {
        "very high"
    } else {
        "extreme"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RiskLevel;

    fn sensitive_profile() -> Profile {
        Profile {
            skin_type: 1,
            sunscreen_usage: 0,
            time_outdoors: 2,
            environment: Some(1),
        }
    }

    #[test]
    fn test_assess_bundles_all_outputs() {
        crate::logging::init_test();

        let assessment = assess(&sensitive_profile(), 9.0, &[9.0, 9.0], &AssessmentConfig::default());

        assert_eq!(assessment.protection.level, RiskLevel::Extreme);
        assert_eq!(assessment.protection.safe_exposure_time, ExposureTime::Minutes(11));
        // 15 * 0.7 * 3 / (9 * 0.25 * 4) = 3.5 → clamped to 5
        assert_eq!(assessment.vitamin_d_time, ExposureTime::Minutes(5));
        assert_eq!(assessment.thresholds.safe, 2.5);
    }

    #[test]
    fn test_forecast_beyond_window_is_ignored() {
        let settings = AssessmentConfig::default();
        let profile = sensitive_profile();

        // The spike sits in hour 3, outside the default 2-hour window
        let assessment = assess(&profile, 2.0, &[2.0, 2.0, 11.0], &settings);
        assert_eq!(assessment.protection.safe_exposure_time, ExposureTime::Minutes(50));

        let wide = AssessmentConfig {
            forecast_hours: 3,
            ..settings
        };
        let assessment = assess(&profile, 2.0, &[2.0, 2.0, 11.0], &wide);
        assert_eq!(assessment.protection.safe_exposure_time, ExposureTime::Minutes(9));
    }

    #[test]
    fn test_short_forecast_is_fine() {
        let profile = Profile {
            skin_type: 4,
            sunscreen_usage: 0,
            time_outdoors: 0,
            environment: None,
        };
        let assessment = assess(&profile, 1.0, &[], &AssessmentConfig::default());
        assert_eq!(assessment.protection.level, RiskLevel::Low);
        assert_eq!(assessment.vitamin_d_time, ExposureTime::Unbounded);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(ExposureTime::Unbounded), "N/A");
        assert_eq!(format_minutes(ExposureTime::Minutes(11)), "11m");
        assert_eq!(format_minutes(ExposureTime::Minutes(60)), "1h 0m");
        assert_eq!(format_minutes(ExposureTime::Minutes(9375)), "156h 15m");
    }

    #[test]
    fn test_uv_index_band() {
        assert_eq!(uv_index_band(0.0), "low");
        assert_eq!(uv_index_band(2.0), "low");
        assert_eq!(uv_index_band(5.5), "high");
        assert_eq!(uv_index_band(9.0), "very high");
        assert_eq!(uv_index_band(11.2), "extreme");
    }
}
