/// Errors raised by the transfer-function core.
///
/// Everything else is sanitized by clamping, so these are the only
/// failure values a caller has to handle.
#[derive(Debug, thiserror::Error)]
pub enum TfnError {
    #[error("transfer function contains too few color points ({count}, need at least 2)")]
    TooFewColorPoints { count: usize },
    #[error("transfer function contains too few opacity points ({count}, need at least 2)")]
    TooFewOpacityPoints { count: usize },
    #[error("invalid sample resolution {0} (need at least 2)")]
    InvalidResolution(usize),
    #[error("commit failed: {0}")]
    Commit(String),
}
