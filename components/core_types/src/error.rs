//! Errors for reading the outcome of a future value.
//!
//! Settlement itself never fails: any error payload handed to a settler is
//! threaded through the failure continuations as-is. This type only covers
//! asking a future value for its result.

use thiserror::Error;

/// Why a future value could not produce a success value.
///
/// # Examples
///
/// ```
/// use core_types::DeferredError;
///
/// let error: DeferredError<&str> = DeferredError::Unsettled;
/// assert_eq!(error.to_string(), "future value has not settled");
/// assert_eq!(error.into_rejection(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeferredError<E> {
    /// No outcome has been recorded yet.
    #[error("future value has not settled")]
    Unsettled,

    /// The recorded outcome is an error.
    #[error("future value was rejected")]
    Rejected(E),
}

impl<E> DeferredError<E> {
    /// Returns the recorded error payload, if the outcome was a rejection.
    pub fn into_rejection(self) -> Option<E> {
        match self {
            DeferredError::Unsettled => None,
            DeferredError::Rejected(error) => Some(error),
        }
    }

    /// Returns true if the future value has not settled yet.
    pub fn is_unsettled(&self) -> bool {
        matches!(self, DeferredError::Unsettled)
    }
}
