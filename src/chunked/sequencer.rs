//! Chunk sequencing as an explicit state machine
//!
//! A `ChunkSequencer` owns the chunk list and a cursor. Each call to
//! [`ChunkSequencer::step`] makes exactly one append attempt; the caller
//! decides when the next step happens. Rendering and appending can also be
//! driven separately, so the render can run off the thread that holds the
//! target.

use std::sync::Arc;

use super::errors::AppendError;
use super::target::RenderTarget;
use crate::markdown::MarkdownConverter;
use crate::pipeline::{RenderPipeline, split_into_chunks};

/// Result of one append attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Chunk `index` was appended after `attempts` tries
    Appended { index: usize, attempts: u64 },
    /// Chunk `index` failed its `attempts`-th try; the next step retries it
    Retry {
        index: usize,
        attempts: u64,
        error: AppendError,
    },
    /// Every chunk has been appended
    Finished,
}

/// Sequential chunk renderer
///
/// Invariants:
/// - chunk `i + 1` is never rendered before chunk `i` was acknowledged
/// - a chunk is rendered once; retries re-append the same HTML
/// - there is no retry limit and no way to skip a chunk
pub struct ChunkSequencer<C> {
    pipeline: Arc<RenderPipeline<C>>,
    chunks: Vec<String>,
    next: usize,
    /// HTML of `chunks[next]`, rendered but not yet acknowledged
    pending: Option<String>,
    attempts: u64,
}

impl<C: MarkdownConverter> ChunkSequencer<C> {
    /// Sequencer over the blank-line chunks of `text`
    pub fn new(pipeline: Arc<RenderPipeline<C>>, text: &str) -> Self {
        Self::from_chunks(pipeline, split_into_chunks(text))
    }

    pub fn from_chunks(pipeline: Arc<RenderPipeline<C>>, chunks: Vec<String>) -> Self {
        Self {
            pipeline,
            chunks,
            next: 0,
            pending: None,
            attempts: 0,
        }
    }

    /// Total number of chunks
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Index of the chunk the next step will attempt
    #[must_use]
    pub fn next_index(&self) -> usize {
        self.next
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next >= self.chunks.len()
    }

    pub fn pipeline(&self) -> &Arc<RenderPipeline<C>> {
        &self.pipeline
    }

    /// Text of the current chunk if it still has to be rendered.
    ///
    /// `None` once the current chunk's HTML is held for (re-)appending, or
    /// when every chunk is done.
    #[must_use]
    pub fn unrendered_chunk(&self) -> Option<&str> {
        if self.pending.is_some() {
            return None;
        }
        self.chunks.get(self.next).map(String::as_str)
    }

    /// HTML of the current chunk awaiting acknowledgement, if rendered
    #[must_use]
    pub fn pending_html(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Store HTML rendered elsewhere for the current chunk.
    ///
    /// Ignored if the chunk already has HTML or the sequence is finished, so a
    /// chunk is never rendered twice.
    pub fn set_rendered(&mut self, html: String) {
        if self.pending.is_none() && !self.is_finished() {
            self.pending = Some(html);
        }
    }

    /// Make one append attempt against `target`, rendering inline first if
    /// the current chunk has no HTML yet.
    pub fn step<T: RenderTarget + ?Sized>(&mut self, target: &mut T) -> Step {
        self.try_append(target)
    }

    /// Append the current chunk's HTML to `target`.
    ///
    /// On success the cursor advances; on failure it stays and the HTML is
    /// kept for the retry. A chunk without HTML is rendered inline; callers
    /// that must not render under a lock go through [`Self::unrendered_chunk`]
    /// and [`Self::set_rendered`] first.
    pub fn try_append<T: RenderTarget + ?Sized>(&mut self, target: &mut T) -> Step {
        let Some(chunk) = self.chunks.get(self.next) else {
            return Step::Finished;
        };

        let pipeline = &self.pipeline;
        let html = self.pending.get_or_insert_with(|| pipeline.render(chunk));
        self.attempts += 1;

        match target.append(html) {
            Ok(()) => {
                let step = Step::Appended {
                    index: self.next,
                    attempts: self.attempts,
                };
                self.pending = None;
                self.attempts = 0;
                self.next += 1;
                step
            }
            Err(error) => Step::Retry {
                index: self.next,
                attempts: self.attempts,
                error,
            },
        }
    }
}
