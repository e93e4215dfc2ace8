//! Tokio scheduler driving a `ChunkSequencer`
//!
//! One task per document. The task renders the current chunk on the blocking
//! pool, makes one append attempt under the target lock, reports it on an
//! unbounded channel, sleeps the pacing delay, and repeats. The target is held
//! weakly: once its owner drops it, the next scheduled attempt is a no-op and
//! the task ends. There is no other way to stop a sequence.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use super::sequencer::{ChunkSequencer, Step};
use super::target::RenderTarget;
use crate::markdown::MarkdownConverter;
use crate::pipeline::{RenderError, RenderPipeline};

/// Progress report from a running sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkEvent {
    Appended { index: usize, total: usize },
    Retrying { index: usize, attempt: u64, error: String },
    TargetGone { index: usize },
    Finished { total: usize },
}

/// How a sequence ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// Every chunk was appended
    Completed { chunks: usize },
    /// The target was torn down before chunk `at_chunk` could be appended
    TargetGone { at_chunk: usize },
}

/// Handle to a spawned chunked render
///
/// Events queue without bound until read. A target that keeps rejecting
/// appends produces one `Retrying` event per pacing delay, so a holder that
/// keeps the handle alive must drain [`Self::next_event`]; dropping the handle
/// (or just the events, via [`Self::join`]) discards them instead.
pub struct ChunkedRender {
    events: UnboundedReceiver<ChunkEvent>,
    handle: JoinHandle<SequenceOutcome>,
}

impl ChunkedRender {
    /// Next progress event, or `None` once the task has ended and all events
    /// were received
    pub async fn next_event(&mut self) -> Option<ChunkEvent> {
        self.events.recv().await
    }

    /// Wait for the sequence to end.
    ///
    /// A sequence whose target keeps failing never ends.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::TaskFailed` if the task panicked.
    pub async fn join(self) -> Result<SequenceOutcome, RenderError> {
        // Unread events are dropped; later sends fail and are ignored
        drop(self.events);
        self.handle
            .await
            .map_err(|e| RenderError::TaskFailed(e.to_string()))
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Render `text` chunk by chunk into `target`, pacing attempts by `delay`.
///
/// The first attempt runs immediately; every later attempt, whether for the
/// next chunk or a retry of a failed one, waits `delay` first. Failed appends
/// are retried forever with the same delay.
///
/// Must be called from within a tokio runtime.
pub fn spawn_chunked_render<C, T>(
    pipeline: Arc<RenderPipeline<C>>,
    text: &str,
    target: Weak<Mutex<T>>,
    delay: Duration,
) -> ChunkedRender
where
    C: MarkdownConverter + 'static,
    T: RenderTarget + 'static,
{
    let sequencer = ChunkSequencer::new(pipeline, text);
    let (tx, events) = unbounded_channel();

    let handle = tokio::spawn(async move {
        let mut sequencer = sequencer;
        let total = sequencer.len();
        let mut first_attempt = true;

        loop {
            if sequencer.is_finished() {
                let _ = tx.send(ChunkEvent::Finished { total });
                return SequenceOutcome::Completed { chunks: total };
            }

            if !first_attempt {
                tokio::time::sleep(delay).await;
            }
            first_attempt = false;

            // Render on the blocking pool, with no lock held; a retry reuses
            // the HTML already stored in the sequencer
            if let Some(chunk) = sequencer.unrendered_chunk() {
                let chunk: Arc<str> = Arc::from(chunk);
                let pipeline = Arc::clone(sequencer.pipeline());
                let html = match pipeline.render_async(chunk).await {
                    Ok(html) => html,
                    Err(e) => {
                        error!(
                            "Chunk {} failed to render: {}; appending nothing",
                            sequencer.next_index(),
                            e
                        );
                        String::new()
                    }
                };
                sequencer.set_rendered(html);
            }

            let Some(target) = target.upgrade() else {
                let index = sequencer.next_index();
                debug!("Render target gone before chunk {}/{}, stopping", index, total);
                let _ = tx.send(ChunkEvent::TargetGone { index });
                return SequenceOutcome::TargetGone { at_chunk: index };
            };

            // Held for the append only; released before the next await
            let step = {
                let mut guard = target.lock();
                sequencer.try_append(&mut *guard)
            };
            drop(target);

            // Send errors only mean nobody is listening
            match step {
                Step::Appended { index, .. } => {
                    debug!("Appended chunk {}/{}", index + 1, total);
                    let _ = tx.send(ChunkEvent::Appended { index, total });
                }
                Step::Retry {
                    index,
                    attempts,
                    error,
                } => {
                    warn!(
                        "Append of chunk {} failed (attempt {}): {}, retrying in {:?}",
                        index, attempts, error, delay
                    );
                    let _ = tx.send(ChunkEvent::Retrying {
                        index,
                        attempt: attempts,
                        error: error.to_string(),
                    });
                }
                Step::Finished => {}
            }
        }
    });

    ChunkedRender { events, handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunked::{AppendError, HtmlBuffer};
    use crate::markdown::{ComrakConverter, ConversionError};

    const DELAY: Duration = Duration::from_millis(1);

    struct Flaky {
        failures: usize,
        accepted: Vec<String>,
    }

    impl RenderTarget for Flaky {
        fn append(&mut self, html: &str) -> Result<(), AppendError> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(AppendError::Closed);
            }
            self.accepted.push(html.to_string());
            Ok(())
        }
    }

    fn pipeline() -> Arc<RenderPipeline<ComrakConverter>> {
        Arc::new(RenderPipeline::with_defaults())
    }

    async fn drain(render: &mut ChunkedRender) -> Vec<ChunkEvent> {
        let mut events = Vec::new();
        while let Some(event) = render.next_event().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_chunks_appended_in_order() {
        let target = Arc::new(Mutex::new(HtmlBuffer::new()));
        let mut render = spawn_chunked_render(
            pipeline(),
            "# Title\n\n\\(a_1\\)\n\nlast *word*",
            Arc::downgrade(&target),
            DELAY,
        );

        let events = drain(&mut render).await;
        assert_eq!(
            events,
            vec![
                ChunkEvent::Appended { index: 0, total: 3 },
                ChunkEvent::Appended { index: 1, total: 3 },
                ChunkEvent::Appended { index: 2, total: 3 },
                ChunkEvent::Finished { total: 3 },
            ]
        );
        assert_eq!(
            render.join().await.unwrap(),
            SequenceOutcome::Completed { chunks: 3 }
        );
        assert_eq!(
            target.lock().as_str(),
            "<h1>Title</h1>\n<p>\\(a_1\\)</p>\n<p>last <em>word</em></p>\n"
        );
    }

    #[tokio::test]
    async fn test_failed_append_is_retried_until_accepted() {
        let target = Arc::new(Mutex::new(Flaky {
            failures: 3,
            accepted: Vec::new(),
        }));
        let mut render = spawn_chunked_render(pipeline(), "a\n\nb", Arc::downgrade(&target), DELAY);

        let events = drain(&mut render).await;
        let retries = events
            .iter()
            .filter(|e| matches!(e, ChunkEvent::Retrying { index: 0, .. }))
            .count();
        assert_eq!(retries, 3);
        assert_eq!(events[3], ChunkEvent::Appended { index: 0, total: 2 });
        assert_eq!(target.lock().accepted, vec!["<p>a</p>\n", "<p>b</p>\n"]);
    }

    #[tokio::test]
    async fn test_persistent_failure_starves_later_chunks() {
        let target = Arc::new(Mutex::new(Flaky {
            failures: usize::MAX,
            accepted: Vec::new(),
        }));
        let mut render = spawn_chunked_render(pipeline(), "a\n\nb", Arc::downgrade(&target), DELAY);

        for attempt in 1..=5 {
            let event = tokio::time::timeout(Duration::from_secs(5), render.next_event())
                .await
                .unwrap();
            assert!(matches!(
                event,
                Some(ChunkEvent::Retrying { index: 0, attempt: a, .. }) if a == attempt
            ));
        }
        assert!(!render.is_finished());
        assert!(target.lock().accepted.is_empty());

        // Tearing the target down is the only way out
        drop(target);
        assert_eq!(
            render.join().await.unwrap(),
            SequenceOutcome::TargetGone { at_chunk: 0 }
        );
    }

    #[tokio::test]
    async fn test_target_dropped_before_start() {
        let target = Arc::new(Mutex::new(HtmlBuffer::new()));
        let weak = Arc::downgrade(&target);
        drop(target);

        let mut render = spawn_chunked_render(pipeline(), "a\n\nb", weak, DELAY);
        assert_eq!(drain(&mut render).await, vec![ChunkEvent::TargetGone { index: 0 }]);
        assert_eq!(
            render.join().await.unwrap(),
            SequenceOutcome::TargetGone { at_chunk: 0 }
        );
    }

    /// Records whether the target was locked while a chunk was converted
    struct LockWatcher {
        target: Arc<Mutex<HtmlBuffer>>,
        conversions: std::sync::atomic::AtomicUsize,
        converted_under_lock: std::sync::atomic::AtomicBool,
    }

    impl MarkdownConverter for LockWatcher {
        fn to_html(&self, markdown: &str) -> Result<String, ConversionError> {
            use std::sync::atomic::Ordering;

            self.conversions.fetch_add(1, Ordering::SeqCst);
            if self.target.try_lock().is_none() {
                self.converted_under_lock.store(true, Ordering::SeqCst);
            }
            ComrakConverter::new().to_html(markdown)
        }
    }

    #[tokio::test]
    async fn test_chunks_render_without_holding_target_lock() {
        use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

        let target = Arc::new(Mutex::new(HtmlBuffer::new()));
        let watcher = Arc::new(LockWatcher {
            target: Arc::clone(&target),
            conversions: AtomicUsize::new(0),
            converted_under_lock: AtomicBool::new(false),
        });
        let pipeline = Arc::new(RenderPipeline::new(Arc::clone(&watcher)));

        let render = spawn_chunked_render(
            pipeline,
            "*one*\n\ntwo",
            Arc::downgrade(&target),
            DELAY,
        );
        assert_eq!(
            render.join().await.unwrap(),
            SequenceOutcome::Completed { chunks: 2 }
        );

        assert_eq!(watcher.conversions.load(Ordering::SeqCst), 2);
        assert!(!watcher.converted_under_lock.load(Ordering::SeqCst));
        assert_eq!(target.lock().as_str(), "<p><em>one</em></p>\n<p>two</p>\n");
    }

    #[tokio::test]
    async fn test_retries_do_not_render_again() {
        use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

        let buffer = Arc::new(Mutex::new(HtmlBuffer::new()));
        let watcher = Arc::new(LockWatcher {
            target: Arc::clone(&buffer),
            conversions: AtomicUsize::new(0),
            converted_under_lock: AtomicBool::new(false),
        });
        let target = Arc::new(Mutex::new(Flaky {
            failures: 4,
            accepted: Vec::new(),
        }));

        let render = spawn_chunked_render(
            Arc::new(RenderPipeline::new(Arc::clone(&watcher))),
            "only",
            Arc::downgrade(&target),
            DELAY,
        );
        render.join().await.unwrap();

        assert_eq!(watcher.conversions.load(Ordering::SeqCst), 1);
        assert_eq!(target.lock().accepted, vec!["<p>only</p>\n"]);
    }

    #[tokio::test]
    async fn test_undrained_events_do_not_stall_the_sequence() {
        let target = Arc::new(Mutex::new(HtmlBuffer::new()));
        let mut render = spawn_chunked_render(pipeline(), "a\n\nb\n\nc", Arc::downgrade(&target), DELAY);

        // Nobody reads while the sequence runs
        while !render.is_finished() {
            tokio::time::sleep(DELAY).await;
        }
        assert_eq!(target.lock().appends(), 3);
        assert_eq!(drain(&mut render).await.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_text_is_a_single_empty_chunk() {
        let target = Arc::new(Mutex::new(HtmlBuffer::new()));
        let render = spawn_chunked_render(pipeline(), "", Arc::downgrade(&target), DELAY);

        assert_eq!(
            render.join().await.unwrap(),
            SequenceOutcome::Completed { chunks: 1 }
        );
        assert_eq!(target.lock().appends(), 1);
        assert_eq!(target.lock().as_str(), "");
    }
}
