use thiserror::Error;

/// Failures while awaiting or tearing down the work behind a subscription.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("failed to await observable task: {0}")]
    JoinTask(#[from] tokio::task::JoinError),

    #[error("observable thread panicked")]
    JoinThread,

    /// Unsubscribe logic needs a `Tokio` runtime but the subscription was created
    /// outside of one.
    #[error("observable that uses Tokio tasks was subscribed outside of a Tokio runtime")]
    NoRuntime,
}
