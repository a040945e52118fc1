use thiserror::Error;

/// Scale configuration failures. These are programming errors in the host's
/// startup sequence and surface at the point of use.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("device dpi has not been established yet")]
    NotInitialized,
    #[error("device dpi was already set to {0}")]
    AlreadySet(f64),
    #[error("dpi must be positive, got {0}")]
    NonPositiveDpi(f64),
}

/// Element tree misuse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("element is still attached to another container; remove it first")]
    AlreadyAttached,
    #[error("element is currently borrowed")]
    Busy,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
