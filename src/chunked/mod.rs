//! Incremental rendering: one blank-line chunk at a time into a live target
//!
//! [`ChunkSequencer`] is the synchronous state machine (one append attempt
//! per step). [`spawn_chunked_render`] drives it on a tokio task with a fixed
//! pacing delay and reports progress as [`ChunkEvent`]s.

pub mod errors;
pub mod scheduler;
pub mod sequencer;
pub mod target;

pub use errors::AppendError;
pub use scheduler::{ChunkEvent, ChunkedRender, SequenceOutcome, spawn_chunked_render};
pub use sequencer::{ChunkSequencer, Step};
pub use target::{HtmlBuffer, RenderTarget};
