pub type Result<T> = std::result::Result<T, QueueError>;

/// Queue failures (§7) are all retryable-without-ack by the worker's poll
/// loop — they never cause a deployment to be marked `failed`.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("send failed: {0}")]
    Send(String),

    #[error("receive failed: {0}")]
    Receive(String),

    #[error("delete failed: {0}")]
    Delete(String),

    #[error("extend visibility failed: {0}")]
    ExtendVisibility(String),

    /// Message body did not decode as a `JobMessage` — the caller acks and
    /// drops this one rather than retrying (§4.5 "invalid messages").
    #[error("message decode failed: {0}")]
    Decode(String),
}
