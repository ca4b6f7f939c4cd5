//! Error types for the floating-body animator.

use super::BodyHandle;

/// Errors returned by [`super::FloatingBodyAnimator`] operations.
///
/// Every failure is local and leaves the registry untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FloatingError {
    #[error("invalid {name}: {value} (must be finite and > 0)")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("no floating body registered for handle {0}")]
    NotFound(BodyHandle),
    #[error("time must be finite, got {0}")]
    InvalidTime(f64),
}

pub type FloatingResult<T> = Result<T, FloatingError>;
