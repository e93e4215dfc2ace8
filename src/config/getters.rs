//! Getter methods for `RenderConfig`

use std::time::Duration;

use super::types::RenderConfig;

impl RenderConfig {
    #[must_use]
    pub fn strikethrough(&self) -> bool {
        self.strikethrough
    }

    #[must_use]
    pub fn autolink(&self) -> bool {
        self.autolink
    }

    #[must_use]
    pub fn tasklist(&self) -> bool {
        self.tasklist
    }

    #[must_use]
    pub fn superscript(&self) -> bool {
        self.superscript
    }

    #[must_use]
    pub fn hard_breaks(&self) -> bool {
        self.hard_breaks
    }

    #[must_use]
    pub fn max_input_bytes(&self) -> Option<usize> {
        self.max_input_bytes
    }

    /// Pacing delay between chunk append attempts
    #[must_use]
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    #[must_use]
    pub fn surface_pool_size(&self) -> usize {
        self.surface_pool_size
    }
}
