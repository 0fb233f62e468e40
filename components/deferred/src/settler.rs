//! Settlement of a future value.
//!
//! A [`Settler`] owns exactly one [`FutureValue`] and is the only way to
//! record its outcome. Settling runs continuations synchronously on the
//! caller's stack.
//!
//! The success and failure paths deliberately behave differently:
//! - `fulfill` removes one success continuation per step and drives the chain
//!   forward until the queue is empty or a continuation hands back a future
//!   value;
//! - `fail` folds the error through every failure continuation without
//!   removing any, so a later `fail` replays them all.

use crate::continuation::{Continued, Recovery};
use crate::future_value::FutureValue;
use tracing::debug;

/// Failure continuations detached from a future value while they run.
///
/// Reattached on drop, so a panicking recovery unwinds without emptying the
/// future value's failure list.
struct DetachedFailures<'a, T, E> {
    owner: &'a FutureValue<T, E>,
    failures: Vec<Recovery<E>>,
}

impl<T, E> Drop for DetachedFailures<'_, T, E> {
    fn drop(&mut self) {
        self.owner.restore_failures(std::mem::take(&mut self.failures));
    }
}

/// The capability to settle one future value.
///
/// # Examples
///
/// ```
/// use deferred::{Recovery, Settler};
/// use deferred::SettlementStatus;
///
/// let settler: Settler<u32, String> = Settler::new();
/// let future = settler.future_value();
/// future.on_failure_only(Recovery::new(|e: String| format!("wrapped: {e}")));
///
/// settler.fail("disk full".to_string());
/// assert_eq!(future.status(), SettlementStatus::Rejected);
/// ```
pub struct Settler<T, E> {
    owned: FutureValue<T, E>,
}

impl<T, E> Settler<T, E> {
    /// Creates a settler wrapping a fresh, unsettled future value.
    pub fn new() -> Self {
        Self {
            owned: FutureValue::new(),
        }
    }

    /// Returns a handle to the owned future value, for consumers.
    pub fn future_value(&self) -> FutureValue<T, E> {
        self.owned.clone()
    }
}

impl<T: Clone, E> Settler<T, E> {
    /// Fulfills the future value with `data` and drives its success chain.
    ///
    /// Only the first outcome is recorded; later calls drop `data`. Every call
    /// still removes the next success continuation (if any) and runs it with
    /// the recorded value, so repeated calls pump an attached chain one link
    /// at a time.
    ///
    /// A continuation returning a plain value feeds the next continuation
    /// immediately. A continuation returning a future value moves the rest
    /// of the chain onto that future value and stops; the chain resumes when
    /// that future value's own settler is settled.
    ///
    /// # Returns
    ///
    /// The last value produced once no continuations remain, or `None` if the
    /// chain paused on a future value or the recorded outcome is a rejection.
    pub fn fulfill(&self, data: T) -> Option<T> {
        let mut current = self.owned.clone();
        let mut data = data;

        loop {
            if current.record_fulfilled(data) {
                debug!("future value fulfilled");
            }

            let Some(value) = current.fulfilled_value() else {
                debug!("fulfill on a rejected future value has no success value to pass on");
                return None;
            };

            let Some(continuation) = current.pop_success() else {
                return Some(value);
            };

            match continuation.call(value) {
                Continued::Value(outcome) => {
                    let next = Settler::new();
                    next.owned.append_queues(current.take_queues());
                    current = next.owned;
                    data = outcome;
                }
                Continued::Deferred(inner) => {
                    let remaining = current.take_queues();
                    debug!(
                        successes = remaining.success.len(),
                        failures = remaining.failure.len(),
                        "chain paused on a future value"
                    );
                    inner.append_queues(remaining);
                    return None;
                }
            }
        }
    }
}

impl<T, E: Clone> Settler<T, E> {
    /// Rejects the future value with `error` and runs its failure chain.
    ///
    /// Only the first outcome is recorded. Every call folds the recorded
    /// error through all failure continuations in attachment order, each
    /// receiving the previous one's output; the final output is discarded.
    /// Failure continuations are never removed, even when one of them panics.
    pub fn fail(&self, error: E) {
        if self.owned.record_rejected(error) {
            debug!("future value rejected");
        }

        let Some(recorded) = self.owned.rejected_error() else {
            debug!("fail on a fulfilled future value has no error to pass on");
            return;
        };

        let mut detached = DetachedFailures {
            owner: &self.owned,
            failures: self.owned.take_failures(),
        };
        if detached.failures.is_empty() {
            debug!("rejection dropped: no failure continuations attached");
            return;
        }

        let _ = detached
            .failures
            .iter_mut()
            .fold(recorded, |error, recovery| recovery.call(error));
    }
}

impl<T, E> Default for Settler<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> std::fmt::Debug for Settler<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settler").field("owned", &self.owned).finish()
    }
}
