//! Router error types.

/// Errors raised while constructing a router.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouterError {
    /// Routing settings cannot produce meaningful travel times
    #[error("invalid routing settings: {0}")]
    InvalidSettings(String),
}
