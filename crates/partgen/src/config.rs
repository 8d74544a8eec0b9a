//! TOML configuration.
//!
//! Every section and field is optional; anything left out keeps its default.
//!
//! ```toml
//! [profile]
//! involute_samples = 15
//! pitch_circle_fraction = 0.5
//! gear_bore_clearance = 0.1
//!
//! [input]
//! hole_diameter = 5.0
//! num_holes = 4
//! quantity = 1
//!
//! [output]
//! bom_file = "BOM.csv"
//! ```

use std::path::{Path, PathBuf};

use partgen_profile::ProfileConfig;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Profile generation tunables.
    pub profile: ProfileConfig,
    /// Defaults for columns missing from CSV input.
    pub input: InputDefaults,
    /// Batch output settings.
    pub output: OutputConfig,
}

/// Values used when a CSV file has no column for them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDefaults {
    /// Flange bolt hole diameter.
    pub hole_diameter: f64,
    /// Flange bolt hole count.
    pub num_holes: u32,
    /// Quantity per part.
    pub quantity: u32,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            hole_diameter: 5.0,
            num_holes: 4,
            quantity: 1,
        }
    }
}

/// Where batch results go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// BOM file name, relative to the output directory.
    pub bom_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            bom_file: PathBuf::from("BOM.csv"),
        }
    }
}

impl Config {
    /// Parse from TOML text and check the profile settings.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.profile.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PartError;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [profile]
            involute_samples = 30

            [input]
            num_holes = 6
            "#,
        )
        .unwrap();

        assert_eq!(config.profile.involute_samples, 30);
        assert_eq!(config.profile.pitch_circle_fraction, 0.5);
        assert_eq!(config.input.num_holes, 6);
        assert_eq!(config.input.hole_diameter, 5.0);
        assert_eq!(config.input.quantity, 1);
        assert_eq!(config.output.bom_file, PathBuf::from("BOM.csv"));
    }

    #[test]
    fn test_bad_type_is_config_error() {
        let err = Config::from_toml_str("[input]\nnum_holes = \"four\"").unwrap_err();
        assert!(matches!(err, PartError::Config(_)));
    }

    #[test]
    fn test_rejects_unusable_profile_settings() {
        for text in [
            "[profile]\ninvolute_samples = 0",
            "[profile]\npitch_circle_fraction = 1.5",
            "[profile]\npitch_circle_fraction = -0.25",
            "[profile]\npitch_circle_fraction = nan",
            "[profile]\ngear_bore_clearance = -0.1",
        ] {
            let err = Config::from_toml_str(text).unwrap_err();
            assert!(
                matches!(err, PartError::InvalidDimensions { ref part, .. } if part == "profile config"),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/partgen.toml").unwrap_err();
        assert!(matches!(err, PartError::Io(_)));
    }
}
