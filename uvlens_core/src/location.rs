//! Location acquisition.
//!
//! There is no device geolocation on a terminal, so the provided
//! implementation resolves coordinates from the command line or config.

use crate::config::LocationConfig;
use crate::Location;

/// Reasons a position could not be obtained
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("timed out acquiring position")]
    Timeout,
}

/// Source of the user's current position
pub trait LocationProvider {
    fn locate(&self) -> std::result::Result<Location, LocationError>;
}

/// Coordinates fixed up front
#[derive(Clone, Debug, Default)]
pub struct FixedLocation {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl FixedLocation {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Command-line coordinates take precedence over configured ones
    pub fn resolve(
        cli_latitude: Option<f64>,
        cli_longitude: Option<f64>,
        config: &LocationConfig,
    ) -> Self {
        Self::new(
            cli_latitude.or(config.latitude),
            cli_longitude.or(config.longitude),
        )
    }
}

impl LocationProvider for FixedLocation {
    fn locate(&self) -> std::result::Result<Location, LocationError> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(LocationError::PositionUnavailable(
                "no coordinates configured; pass --lat/--lon or set [location]".into(),
            ));
        };

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::PositionUnavailable(format!(
                "coordinates out of range ({}, {})",
                latitude, longitude
            )));
        }

        tracing::debug!("Using fixed location {:.4}, {:.4}", latitude, longitude);
        Ok(Location {
            latitude,
            longitude,
        })
    }
}
