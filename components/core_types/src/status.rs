//! Settlement status of a future value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The state of a future value.
///
/// A future value starts out `Unsettled` and moves to exactly one of the
/// terminal states the first time its settler supplies an outcome. The
/// recorded status never changes after that.
///
/// # Examples
///
/// ```
/// use core_types::SettlementStatus;
///
/// assert!(!SettlementStatus::Unsettled.is_settled());
/// assert!(SettlementStatus::Fulfilled.is_settled());
/// assert!(SettlementStatus::Rejected.is_settled());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// No outcome has been recorded yet.
    #[default]
    Unsettled,
    /// A success value has been recorded.
    Fulfilled,
    /// An error has been recorded.
    Rejected,
}

impl SettlementStatus {
    /// Returns true once an outcome has been recorded.
    pub fn is_settled(self) -> bool {
        !matches!(self, SettlementStatus::Unsettled)
    }
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettlementStatus::Unsettled => "unsettled",
            SettlementStatus::Fulfilled => "fulfilled",
            SettlementStatus::Rejected => "rejected",
        };
        f.write_str(name)
    }
}
