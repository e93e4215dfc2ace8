pub mod chunked;
pub mod config;
pub mod markdown;
pub mod math;
pub mod pipeline;
pub mod surface_pool;
pub mod table;
pub mod utils;

pub use chunked::{
    AppendError, ChunkEvent, ChunkSequencer, ChunkedRender, HtmlBuffer, RenderTarget,
    SequenceOutcome, spawn_chunked_render,
};
pub use config::{ConfigError, RenderConfig};
pub use markdown::{CellMarkdownRenderer, ComrakConverter, ConversionError, MarkdownConverter};
pub use math::{MathDelimiter, MathSegment, extract_segments, restore_segments};
pub use pipeline::{RenderError, RenderPipeline, split_into_chunks};
pub use surface_pool::{PooledSurface, Reusable, SurfacePool};
pub use table::PipeTableConverter;

/// Render a Markdown + math document with the default comrak converter
///
/// Shorthand for `RenderPipeline::with_defaults().render(text)`.
pub fn render(text: &str) -> String {
    RenderPipeline::with_defaults().render(text)
}
