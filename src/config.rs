use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::analytics::anomaly::DEFAULT_ANOMALY_THRESHOLD;
use crate::analytics::stability::SimulationInputs;

/// Environment variable naming an optional JSON settings file.
pub const CONFIG_ENV: &str = "CIVIC_PULSE_CONFIG";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Runtime settings. Every field has a default, so a settings file only
/// needs the keys it wants to override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Socrata resource for NYC 311 service requests.
    pub nyc_endpoint: String,
    /// Rows requested from the NYC feed.
    pub nyc_limit: usize,
    /// ArcGIS FeatureServer query endpoint for Auckland roadworks.
    pub auckland_endpoint: String,
    /// Features requested from the Auckland feed.
    pub auckland_limit: usize,
    pub request_timeout_secs: u64,
    /// Anomaly sensitivity in standard deviations.
    pub anomaly_threshold: f64,
    /// Starting slider positions for the simulation panel.
    pub simulation: SimulationInputs,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nyc_endpoint: "https://data.cityofnewyork.us/resource/erm2-nwe9.json".to_string(),
            nyc_limit: 800,
            auckland_endpoint: "https://services2.arcgis.com/JkPEgZJGxhSjYOo0/arcgis/rest/services/Roadworks/FeatureServer/0/query".to_string(),
            auckland_limit: 200,
            request_timeout_secs: 20,
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
            simulation: SimulationInputs::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        serde_json::from_str(&text).context("parsing settings JSON")
    }

    /// Settings from `$CIVIC_PULSE_CONFIG` if set, else the defaults.
    /// A broken file is logged and ignored.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        let path = Path::new(&path);
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "nyc_limit": 100, "anomaly_threshold": 1.5, "simulation": {{ "infrastructure": 65, "governance": 40, "transparency": 55, "emergencyResponse": 30 }} }}"#
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.nyc_limit, 100);
        assert_eq!(settings.anomaly_threshold, 1.5);
        assert_eq!(settings.simulation.emergency_response, 30.0);
        assert_eq!(settings.auckland_limit, 200);
        assert_eq!(settings.nyc_endpoint, Settings::default().nyc_endpoint);
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Settings::load(file.path()).is_err());
        assert!(Settings::load(Path::new("/definitely/not/here.json")).is_err());
    }
}
