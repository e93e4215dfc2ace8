//! Configuration module for rendering
//!
//! This module provides the `RenderConfig` struct and its builder for
//! configuring the converter extensions, input limits and chunk pacing, with
//! validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod errors;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::RenderConfigBuilder;
pub use errors::ConfigError;
pub use types::RenderConfig;
