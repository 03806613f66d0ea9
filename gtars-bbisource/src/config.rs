use std::fs::read_to_string;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{BbiSourceError, Result};
use crate::models::WindowFunction;

/// Tunables of a [`crate::BbiDataSource`].
///
/// Every field has a default, so a TOML file only needs to list what it overrides.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BbiSourceConfig {
    /// Assumed display width in pixels, used for the whole-genome resolution.
    pub screen_width: u32,
    /// Bins per tile, used to turn a zoom number into bases per pixel.
    pub bins_per_tile: u32,
    /// Largest accepted ratio of the finest reduction level to the target resolution.
    pub fallback_tolerance: f64,
    /// Maximum number of values sampled when estimating the data range.
    pub value_sample_size: usize,
    /// Bases per pixel at which the data range is sampled.
    pub value_range_resolution: u32,
    pub lower_percentile: usize,
    pub upper_percentile: usize,
    pub default_data_min: f64,
    pub default_data_max: f64,
    /// Multiplied with the finest reduction level to get the bigBed visibility window.
    pub visibility_window_multiplier: u64,
    pub window_function: WindowFunction,
}

impl Default for BbiSourceConfig {
    fn default() -> Self {
        BbiSourceConfig {
            screen_width: 1000,
            bins_per_tile: 700,
            fallback_tolerance: 2.0,
            value_sample_size: 10000,
            value_range_resolution: 1_000_000,
            lower_percentile: 10,
            upper_percentile: 90,
            default_data_min: 0.0,
            default_data_max: 100.0,
            visibility_window_multiplier: 2000,
            window_function: WindowFunction::Mean,
        }
    }
}

impl BbiSourceConfig {
    ///
    /// Check that the values can be used for queries.
    ///
    /// Widths and tolerances must be positive and the percentiles must be ordered
    /// within 0..=100. A zero sample size is allowed but disables range estimation.
    ///
    pub fn validate(&self) -> Result<()> {
        if self.screen_width == 0 {
            return Err(BbiSourceError::InvalidConfig(
                "screen_width must be positive".to_string(),
            ));
        }
        if self.bins_per_tile == 0 {
            return Err(BbiSourceError::InvalidConfig(
                "bins_per_tile must be positive".to_string(),
            ));
        }
        if self.fallback_tolerance.is_nan() || self.fallback_tolerance <= 0.0 {
            return Err(BbiSourceError::InvalidConfig(format!(
                "fallback_tolerance must be positive, got {}",
                self.fallback_tolerance
            )));
        }
        if self.value_range_resolution == 0 {
            return Err(BbiSourceError::InvalidConfig(
                "value_range_resolution must be positive".to_string(),
            ));
        }
        if self.lower_percentile > self.upper_percentile || self.upper_percentile > 100 {
            return Err(BbiSourceError::InvalidConfig(format!(
                "percentiles must satisfy lower <= upper <= 100, got {} and {}",
                self.lower_percentile, self.upper_percentile
            )));
        }
        if self.value_sample_size == 0 {
            warn!("value_sample_size is 0, data range will use the defaults");
        }
        if self.fallback_tolerance < 1.0 {
            warn!(
                "fallback_tolerance {} is below 1, the finest zoom level will rarely be used",
                self.fallback_tolerance
            );
        }
        Ok(())
    }
}

impl TryFrom<&Path> for BbiSourceConfig {
    type Error = BbiSourceError;

    fn try_from(path: &Path) -> std::result::Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: BbiSourceConfig = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_toml(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[rstest]
    fn test_defaults_are_valid() {
        let config = BbiSourceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bins_per_tile, 700);
        assert_eq!(config.window_function, WindowFunction::Mean);
    }

    #[rstest]
    fn test_try_from_partial_toml() {
        let file = write_toml("screen_width = 1200\nwindow_function = \"max\"\n");
        let config = BbiSourceConfig::try_from(file.path()).unwrap();

        assert_eq!(config.screen_width, 1200);
        assert_eq!(config.window_function, WindowFunction::Max);
        assert_eq!(config.fallback_tolerance, 2.0);
        assert_eq!(config.value_sample_size, 10000);
    }

    #[rstest]
    fn test_try_from_rejects_bad_percentiles() {
        let file = write_toml("lower_percentile = 95\nupper_percentile = 5\n");
        let result = BbiSourceConfig::try_from(file.path());
        assert!(matches!(result, Err(BbiSourceError::InvalidConfig(_))));
    }

    #[rstest]
    fn test_try_from_rejects_unknown_window_function() {
        let file = write_toml("window_function = \"median\"\n");
        let result = BbiSourceConfig::try_from(file.path());
        assert!(matches!(result, Err(BbiSourceError::Toml(_))));
    }

    #[rstest]
    fn test_try_from_missing_file() {
        let result = BbiSourceConfig::try_from(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(BbiSourceError::Io(_))));
    }
}
