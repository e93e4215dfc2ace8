//! Error types for render targets

/// A render target refused an append
///
/// Every variant is treated the same way by the sequencer: the same chunk is
/// retried after the pacing delay.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppendError {
    /// Target rejected the fragment (busy, not ready, ...)
    #[error("Append rejected: {0}")]
    Rejected(String),

    /// Target is closed to further appends
    #[error("Render target closed")]
    Closed,
}
