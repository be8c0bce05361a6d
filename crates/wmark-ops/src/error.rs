//! Error types for compositing operations.

use thiserror::Error;

/// Error type for compositing operations.
///
/// [`crate::composite::composite`] never returns these. They come from
/// parameter construction and from the checked entry point
/// [`crate::composite::try_composite`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A caller-side contract of the compositor was broken.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
}

/// Result type for compositing operations.
pub type OpsResult<T> = Result<T, OpsError>;
