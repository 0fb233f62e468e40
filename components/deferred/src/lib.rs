//! Synchronous future values with chained continuations.
//!
//! This crate provides a minimal deferred-value primitive:
//! - [`FutureValue`] - a value that may not exist yet, plus queues of
//!   continuations waiting for it
//! - [`Settler`] - the capability to fulfill or fail exactly one future value
//! - [`defer`] - creates a fresh settler and its unsettled future value
//!
//! # Overview
//!
//! There is no scheduler. Settling runs continuations immediately on the
//! caller's stack, strictly in attachment order. A success continuation that
//! returns another future value pauses the chain: the continuations attached
//! after it are moved onto that future value and run when its own settler is
//! settled.
//!
//! Future values are single-threaded (`Rc`-backed) handles.
//!
//! # Examples
//!
//! ## Plain chain
//!
//! ```
//! use deferred::defer;
//!
//! let settler = defer::<i32, String>();
//! settler.future_value().then(|x| x + 1).then(|x| x * 2);
//!
//! assert_eq!(settler.fulfill(3), Some(8));
//! ```
//!
//! ## Chain pausing on another future value
//!
//! ```
//! use deferred::defer;
//!
//! let request = defer::<String, String>();
//! let response = defer::<String, String>();
//! let pending_response = response.future_value();
//!
//! request
//!     .future_value()
//!     .then_deferred(move |_| pending_response)
//!     .then(|body| body.to_uppercase());
//!
//! assert_eq!(request.fulfill("GET /".to_string()), None);
//! assert_eq!(response.fulfill("ok".to_string()), Some("OK".to_string()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod continuation;
pub mod future_value;
pub mod settler;

// Re-export main types at crate root
pub use continuation::{Continuation, Continued, Recovery};
pub use core_types::{DeferredError, SettlementStatus};
pub use future_value::FutureValue;
pub use settler::Settler;

/// Creates a settler wrapping a fresh, unsettled future value with empty
/// continuation queues.
///
/// The producer keeps the settler and hands
/// [`future_value`](Settler::future_value) to consumers.
///
/// # Examples
///
/// ```
/// use deferred::{defer, SettlementStatus};
///
/// let settler = defer::<i32, String>();
/// let future = settler.future_value();
///
/// assert_eq!(future.status(), SettlementStatus::Unsettled);
/// assert_eq!(future.pending_successes(), 0);
/// assert_eq!(future.pending_failures(), 0);
/// ```
pub fn defer<T, E>() -> Settler<T, E> {
    Settler::new()
}
