//! Core configuration type for rendering

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::builder::RenderConfigBuilder;
use super::errors::ConfigError;
use crate::utils::constants::{
    DEFAULT_CHUNK_DELAY_MS, DEFAULT_MAX_INPUT_BYTES, DEFAULT_SURFACE_POOL_SIZE,
};

/// Main configuration struct for rendering operations
///
/// Raw HTML passthrough is deliberately absent: the table preprocessor injects
/// HTML into the document, so the converter always runs with it enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// `~~strike~~` support (default: true)
    pub(crate) strikethrough: bool,
    /// Bare URL autolinking (default: true)
    pub(crate) autolink: bool,
    /// `- [ ]` task list items (default: true)
    pub(crate) tasklist: bool,
    /// `^sup^` support (default: false)
    pub(crate) superscript: bool,
    /// Render soft line breaks as `<br />` (default: false)
    pub(crate) hard_breaks: bool,

    /// Largest document the converter accepts, in bytes
    ///
    /// `None` disables the limit. Default: 8 MiB
    pub(crate) max_input_bytes: Option<usize>,

    /// Delay between chunk append attempts, in milliseconds
    ///
    /// Applies equally to the next chunk and to a retry of a failed append.
    /// Default: 30ms
    pub(crate) chunk_delay_ms: u64,

    /// Idle render surfaces kept for reuse. Default: 4
    pub(crate) surface_pool_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            strikethrough: true,
            autolink: true,
            tasklist: true,
            superscript: false,
            hard_breaks: false,
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
            chunk_delay_ms: DEFAULT_CHUNK_DELAY_MS,
            surface_pool_size: DEFAULT_SURFACE_POOL_SIZE,
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read,
    /// `ConfigError::Parse` if it is not valid JSON for this struct, and
    /// `ConfigError::Invalid` if a value fails validation.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_bytes == Some(0) {
            return Err(ConfigError::Invalid(
                "max_input_bytes must be greater than zero (use null to disable the limit)"
                    .to_string(),
            ));
        }
        if self.surface_pool_size == 0 {
            return Err(ConfigError::Invalid(
                "surface_pool_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert!(config.strikethrough());
        assert!(!config.superscript());
        assert_eq!(config.max_input_bytes(), Some(DEFAULT_MAX_INPUT_BYTES));
        assert_eq!(config.chunk_delay().as_millis(), 30);
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "chunk_delay_ms": 5, "superscript": true }}"#).unwrap();

        let config = RenderConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.chunk_delay().as_millis(), 5);
        assert!(config.superscript());
        assert!(config.autolink());
    }

    #[test]
    fn test_from_json_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "surface_pool_size": 0 }}"#).unwrap();

        let err = RenderConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = RenderConfig::from_json_file("/nonexistent/mathdown.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_from_json_file_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = RenderConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
