//! Fluent builder for `RenderConfig`
//!
//! Every field has a default, so there is no required-field state to track;
//! `build()` only validates.

use super::errors::ConfigError;
use super::types::RenderConfig;

#[derive(Debug, Clone, Default)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    #[must_use]
    pub fn strikethrough(mut self, enabled: bool) -> Self {
        self.config.strikethrough = enabled;
        self
    }

    #[must_use]
    pub fn autolink(mut self, enabled: bool) -> Self {
        self.config.autolink = enabled;
        self
    }

    #[must_use]
    pub fn tasklist(mut self, enabled: bool) -> Self {
        self.config.tasklist = enabled;
        self
    }

    #[must_use]
    pub fn superscript(mut self, enabled: bool) -> Self {
        self.config.superscript = enabled;
        self
    }

    #[must_use]
    pub fn hard_breaks(mut self, enabled: bool) -> Self {
        self.config.hard_breaks = enabled;
        self
    }

    /// Set the converter input limit
    ///
    /// Documents (and chunks) larger than this are rejected by the converter,
    /// which the pipeline reports as a document conversion failure.
    ///
    /// # Example
    /// ```rust
    /// # use mathdown::config::RenderConfig;
    /// let config = RenderConfig::builder()
    ///     .max_input_bytes(Some(64 * 1024))
    ///     .build()?;
    /// assert_eq!(config.max_input_bytes(), Some(65536));
    /// # Ok::<(), mathdown::config::ConfigError>(())
    /// ```
    #[must_use]
    pub fn max_input_bytes(mut self, limit: Option<usize>) -> Self {
        self.config.max_input_bytes = limit;
        self
    }

    /// Set the pacing delay between chunk append attempts
    #[must_use]
    pub fn chunk_delay_ms(mut self, millis: u64) -> Self {
        self.config.chunk_delay_ms = millis;
        self
    }

    #[must_use]
    pub fn surface_pool_size(mut self, size: usize) -> Self {
        self.config.surface_pool_size = size;
        self
    }

    /// Validate and produce the config
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `max_input_bytes` is `Some(0)` or
    /// `surface_pool_size` is zero.
    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
