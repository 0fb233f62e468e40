//! The future value container and its attachment API.
//!
//! A [`FutureValue`] is a shared handle: every clone observes the same
//! recorded outcome and the same continuation queues. Consumers can only
//! attach continuations and inspect; recording an outcome is reserved for
//! the owning [`Settler`](crate::Settler).

use crate::continuation::{Continuation, Recovery};
use core_types::{DeferredError, SettlementStatus};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// The recorded outcome of a future value.
#[derive(Debug)]
enum Settlement<T, E> {
    Unsettled,
    Fulfilled(T),
    Rejected(E),
}

impl<T, E> Settlement<T, E> {
    fn status(&self) -> SettlementStatus {
        match self {
            Settlement::Unsettled => SettlementStatus::Unsettled,
            Settlement::Fulfilled(_) => SettlementStatus::Fulfilled,
            Settlement::Rejected(_) => SettlementStatus::Rejected,
        }
    }
}

/// Success and failure queues detached from a future value, ready to be
/// appended onto another one.
pub(crate) struct Queues<T, E> {
    pub(crate) success: VecDeque<Continuation<T, E>>,
    pub(crate) failure: Vec<Recovery<E>>,
}

struct State<T, E> {
    settlement: Settlement<T, E>,
    success: VecDeque<Continuation<T, E>>,
    failure: Vec<Recovery<E>>,
}

/// A value that may not exist yet.
///
/// Continuations attached with [`on_settled`](FutureValue::on_settled) run
/// when the owning settler supplies the outcome. Success continuations run
/// once each, in attachment order; failure continuations run in attachment
/// order every time the settler fails.
///
/// # Examples
///
/// ```
/// use deferred::defer;
///
/// let settler = defer::<i32, String>();
/// let future = settler.future_value();
///
/// future.then(|x| x + 1).then(|x| x * 2);
/// assert_eq!(future.pending_successes(), 2);
///
/// assert_eq!(settler.fulfill(3), Some(8));
/// assert_eq!(future.pending_successes(), 0);
/// ```
pub struct FutureValue<T, E> {
    state: Rc<RefCell<State<T, E>>>,
}

impl<T, E> FutureValue<T, E> {
    /// Creates an unsettled future value with empty queues.
    pub(crate) fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                settlement: Settlement::Unsettled,
                success: VecDeque::new(),
                failure: Vec::new(),
            })),
        }
    }

    /// Attaches a success continuation, a failure continuation, or both.
    ///
    /// `None` arguments are ignored. Attaching never runs anything, even if
    /// the future value has already settled.
    ///
    /// Returns `self` so attachments can be chained.
    pub fn on_settled(
        &self,
        on_success: Option<Continuation<T, E>>,
        on_failure: Option<Recovery<E>>,
    ) -> &Self {
        let mut state = self.state.borrow_mut();
        if let Some(continuation) = on_success {
            state.success.push_back(continuation);
        }
        if let Some(recovery) = on_failure {
            state.failure.push(recovery);
        }
        trace!(
            successes = state.success.len(),
            failures = state.failure.len(),
            "continuations attached"
        );
        drop(state);
        self
    }

    /// Attaches a failure continuation only.
    ///
    /// Typically used once at the end of a chain as a catch-all.
    pub fn on_failure_only(&self, on_failure: Recovery<E>) {
        self.on_settled(None, Some(on_failure));
    }

    /// Returns the current settlement status.
    pub fn status(&self) -> SettlementStatus {
        self.state.borrow().settlement.status()
    }

    /// Returns true once an outcome has been recorded.
    pub fn is_settled(&self) -> bool {
        self.status().is_settled()
    }

    /// Number of success continuations still waiting to run.
    pub fn pending_successes(&self) -> usize {
        self.state.borrow().success.len()
    }

    /// Number of attached failure continuations.
    pub fn pending_failures(&self) -> usize {
        self.state.borrow().failure.len()
    }

    /// Returns true if both handles point at the same future value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Records a success value if nothing has been recorded yet.
    ///
    /// Returns false (dropping `value`) when the outcome is already frozen.
    pub(crate) fn record_fulfilled(&self, value: T) -> bool {
        let mut state = self.state.borrow_mut();
        if matches!(state.settlement, Settlement::Unsettled) {
            state.settlement = Settlement::Fulfilled(value);
            true
        } else {
            false
        }
    }

    /// Records an error if nothing has been recorded yet.
    pub(crate) fn record_rejected(&self, error: E) -> bool {
        let mut state = self.state.borrow_mut();
        if matches!(state.settlement, Settlement::Unsettled) {
            state.settlement = Settlement::Rejected(error);
            true
        } else {
            false
        }
    }

    /// Removes the first success continuation in line.
    pub(crate) fn pop_success(&self) -> Option<Continuation<T, E>> {
        self.state.borrow_mut().success.pop_front()
    }

    /// Detaches both queues, leaving this future value with none.
    pub(crate) fn take_queues(&self) -> Queues<T, E> {
        let mut state = self.state.borrow_mut();
        Queues {
            success: std::mem::take(&mut state.success),
            failure: std::mem::take(&mut state.failure),
        }
    }

    /// Appends detached queues after this future value's own continuations.
    pub(crate) fn append_queues(&self, mut queues: Queues<T, E>) {
        let mut state = self.state.borrow_mut();
        state.success.append(&mut queues.success);
        state.failure.append(&mut queues.failure);
    }

    /// Detaches the failure continuations so they can run without a borrow
    /// held.
    pub(crate) fn take_failures(&self) -> Vec<Recovery<E>> {
        std::mem::take(&mut self.state.borrow_mut().failure)
    }

    /// Puts failure continuations back in front of any attached meanwhile.
    pub(crate) fn restore_failures(&self, mut failures: Vec<Recovery<E>>) {
        let mut state = self.state.borrow_mut();
        failures.append(&mut state.failure);
        state.failure = failures;
    }
}

impl<T: 'static, E: 'static> FutureValue<T, E> {
    /// Attaches a success continuation that transforms the value.
    pub fn then<F>(&self, f: F) -> &Self
    where
        F: FnOnce(T) -> T + 'static,
    {
        self.on_settled(Some(Continuation::map(f)), None)
    }

    /// Attaches a success continuation that hands back another future value.
    ///
    /// Continuations attached after this one wait for that future value to be
    /// settled by its own settler.
    ///
    /// # Examples
    ///
    /// ```
    /// use deferred::defer;
    ///
    /// let outer = defer::<i32, String>();
    /// let inner = defer::<i32, String>();
    /// let inner_future = inner.future_value();
    ///
    /// outer
    ///     .future_value()
    ///     .then_deferred(move |_| inner_future)
    ///     .then(|x| x * 10);
    ///
    /// assert_eq!(outer.fulfill(1), None);
    /// assert_eq!(inner.fulfill(5), Some(50));
    /// ```
    pub fn then_deferred<F>(&self, f: F) -> &Self
    where
        F: FnOnce(T) -> FutureValue<T, E> + 'static,
    {
        self.on_settled(Some(Continuation::chain(f)), None)
    }
}

impl<T: Clone, E> FutureValue<T, E> {
    /// Clone of the recorded success value, if the future value fulfilled.
    pub(crate) fn fulfilled_value(&self) -> Option<T> {
        match &self.state.borrow().settlement {
            Settlement::Fulfilled(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl<T, E: Clone> FutureValue<T, E> {
    /// Clone of the recorded error, if the future value was rejected.
    pub(crate) fn rejected_error(&self) -> Option<E> {
        match &self.state.borrow().settlement {
            Settlement::Rejected(error) => Some(error.clone()),
            _ => None,
        }
    }
}

impl<T: Clone, E: Clone> FutureValue<T, E> {
    /// Returns the recorded outcome.
    ///
    /// # Errors
    ///
    /// [`DeferredError::Unsettled`] if nothing has been recorded yet, or
    /// [`DeferredError::Rejected`] carrying the recorded error.
    pub fn result(&self) -> Result<T, DeferredError<E>> {
        match &self.state.borrow().settlement {
            Settlement::Unsettled => Err(DeferredError::Unsettled),
            Settlement::Fulfilled(value) => Ok(value.clone()),
            Settlement::Rejected(error) => Err(DeferredError::Rejected(error.clone())),
        }
    }
}

impl<T, E> Clone for FutureValue<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T, E> fmt::Debug for FutureValue<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_borrow() {
            Ok(state) => f
                .debug_struct("FutureValue")
                .field("status", &state.settlement.status())
                .field("successes", &state.success.len())
                .field("failures", &state.failure.len())
                .finish(),
            Err(_) => write!(f, "FutureValue {{ <borrowed> }}"),
        }
    }
}
