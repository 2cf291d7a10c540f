//! Error types for ENS resolution.
//!
//! [`EnsError`] covers configuration, transport construction, and input
//! contract violations. Ordinary resolution misses are *not* errors: every
//! lookup layer models "no resolver", "no record", and exhausted retries as
//! absence (`None`) instead.

/// Error type for ENS resolution operations.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum EnsError {
    /// Invalid configuration (bad endpoint URL, bad parameters).
    #[error("Config error: {0}")]
    Config(String),

    /// Transport construction or protocol error.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The supplied address is not a 20-byte hex address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

impl EnsError {
    /// Create a config error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an invalid-address error.
    #[must_use]
    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::InvalidAddress(msg.into())
    }
}

/// Convenience result alias for ENS operations.
pub type Result<T> = std::result::Result<T, EnsError>;
