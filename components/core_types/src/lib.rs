//! Core types shared by the deferred-value runtime.
//!
//! This crate provides the foundational types used by the `deferred`
//! component: the settlement status of a future value and the error
//! returned when reading an outcome that is not (successfully) available.
//!
//! # Overview
//!
//! - [`SettlementStatus`] - Lifecycle state of a future value
//! - [`DeferredError`] - Error produced when reading an unsettled or rejected outcome
//!
//! # Examples
//!
//! ```
//! use core_types::{DeferredError, SettlementStatus};
//!
//! let status = SettlementStatus::Unsettled;
//! assert!(!status.is_settled());
//!
//! let error: DeferredError<String> = DeferredError::Rejected("boom".to_string());
//! assert_eq!(error.to_string(), "future value was rejected");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod status;

pub use error::DeferredError;
pub use status::SettlementStatus;
