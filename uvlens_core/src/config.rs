//! Configuration file support for UV Lens.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/uvlens/config.toml`.

use crate::tables::DEFAULT_BODY_EXPOSURE;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub assessment: AssessmentConfig,

    #[serde(default)]
    pub reminders: ReminderConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Fixed coordinates used when none are given on the command line
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Weather/UV provider configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WeatherConfig {
    /// API key from the config file, falling back to `OPENWEATHER_API_KEY`
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()))
    }
}

/// Assessment parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Hours of the hourly forecast that count towards the worst case
    #[serde(default = "default_forecast_hours")]
    pub forecast_hours: usize,

    /// Fraction of skin exposed for the vitamin D estimate
    #[serde(default = "default_body_exposure")]
    pub body_exposure: f64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            forecast_hours: default_forecast_hours(),
            body_exposure: default_body_exposure(),
        }
    }
}

/// Reapplication reminder configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Permission to show reminders
    #[serde(default = "default_reminders_enabled")]
    pub enabled: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: default_reminders_enabled(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|_| PathBuf::from("."))
    });
    base.join("uvlens")
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".into()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_forecast_hours() -> usize {
    2
}

fn default_body_exposure() -> f64 {
    DEFAULT_BODY_EXPOSURE
}

fn default_reminders_enabled() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        base.join("uvlens").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let exposure = self.assessment.body_exposure;
        if !(exposure > 0.0 && exposure <= 1.0) {
            return Err(Error::Config(format!(
                "assessment.body_exposure must be in (0, 1], got {}",
                exposure
            )));
        }
        if self.weather.timeout_secs == 0 {
            return Err(Error::Config("weather.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.assessment.forecast_hours, 2);
        assert_eq!(config.assessment.body_exposure, 0.25);
        assert!(config.reminders.enabled);
        assert!(config.location.latitude.is_none());
        assert!(config.weather.base_url.starts_with("https://"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.location.latitude = Some(38.72);
        config.location.longitude = Some(-9.14);
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.location.latitude, Some(38.72));
        assert_eq!(parsed.location.longitude, Some(-9.14));
        assert_eq!(parsed.weather.timeout_secs, config.weather.timeout_secs);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[assessment]
forecast_hours = 6
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.assessment.forecast_hours, 6);
        assert_eq!(config.assessment.body_exposure, 0.25); // default
        assert_eq!(config.weather.timeout_secs, 10); // default
    }

    #[test]
    fn test_load_from_rejects_bad_body_exposure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[assessment]\nbody_exposure = 1.5\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.reminders.enabled = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.reminders.enabled);
    }

    #[test]
    fn test_configured_api_key_wins() {
        let weather = WeatherConfig {
            api_key: Some("from-config".into()),
            ..WeatherConfig::default()
        };
        assert_eq!(weather.resolved_api_key().as_deref(), Some("from-config"));
    }
}
