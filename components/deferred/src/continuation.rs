//! Continuations attached to a future value.
//!
//! Success continuations are one-shot (`FnOnce`) and may either produce a
//! plain value or hand back another [`FutureValue`], which pauses the chain.
//! Failure continuations ([`Recovery`]) transform the error payload and may
//! run any number of times.

use crate::future_value::FutureValue;

/// What a success continuation produced.
///
/// # Examples
///
/// ```
/// use deferred::{defer, Continued};
///
/// let plain: Continued<i32, String> = Continued::Value(4);
/// assert!(!plain.is_deferred());
///
/// let settler = defer::<i32, String>();
/// let pending: Continued<i32, String> = settler.future_value().into();
/// assert!(pending.is_deferred());
/// ```
pub enum Continued<T, E> {
    /// A plain value; it feeds the next continuation immediately.
    Value(T),
    /// A value that is not available yet; the rest of the chain waits for it.
    Deferred(FutureValue<T, E>),
}

impl<T, E> Continued<T, E> {
    /// Returns true if the continuation handed back a future value.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Continued::Deferred(_))
    }
}

impl<T, E> From<FutureValue<T, E>> for Continued<T, E> {
    fn from(future: FutureValue<T, E>) -> Self {
        Continued::Deferred(future)
    }
}

impl<T: std::fmt::Debug, E> std::fmt::Debug for Continued<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Continued::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Continued::Deferred(future) => f.debug_tuple("Deferred").field(future).finish(),
        }
    }
}

/// A success continuation.
///
/// Runs at most once, with the value recorded on the future value it was
/// attached to.
///
/// Every continuation in a chain shares one queue, so it must produce the
/// same value type `T` it receives (or a `FutureValue<T, E>`). To change
/// the type along a chain, pick a `T` that covers each step, such as an enum
/// of the stages' values.
pub struct Continuation<T, E> {
    callback: Box<dyn FnOnce(T) -> Continued<T, E>>,
}

impl<T: 'static, E: 'static> Continuation<T, E> {
    /// Creates a continuation from a closure that decides whether to continue
    /// with a plain value or a future value.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(T) -> Continued<T, E> + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Creates a continuation that transforms the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use deferred::{defer, Continuation};
    ///
    /// let settler = defer::<i32, String>();
    /// settler
    ///     .future_value()
    ///     .on_settled(Some(Continuation::map(|x| x + 1)), None);
    ///
    /// assert_eq!(settler.fulfill(1), Some(2));
    /// ```
    pub fn map<F>(f: F) -> Self
    where
        F: FnOnce(T) -> T + 'static,
    {
        Self::new(move |value| Continued::Value(f(value)))
    }

    /// Creates a continuation that hands back a future value, pausing the
    /// chain until that future value is settled.
    pub fn chain<F>(f: F) -> Self
    where
        F: FnOnce(T) -> FutureValue<T, E> + 'static,
    {
        Self::new(move |value| Continued::Deferred(f(value)))
    }
}

impl<T, E> Continuation<T, E> {
    /// Consumes the continuation, running it with `value`.
    pub fn call(self, value: T) -> Continued<T, E> {
        (self.callback)(value)
    }
}

impl<T, E> std::fmt::Debug for Continuation<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Continuation {{ ... }}")
    }
}

/// A failure continuation.
///
/// Receives the current error payload and returns the payload for the next
/// recovery in line.
pub struct Recovery<E> {
    callback: Box<dyn FnMut(E) -> E>,
}

impl<E: 'static> Recovery<E> {
    /// Creates a recovery from an error-transforming closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(E) -> E + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Creates a recovery that looks at the error and passes it on unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use deferred::{defer, Recovery};
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let seen = Rc::new(RefCell::new(Vec::new()));
    /// let log = seen.clone();
    ///
    /// let settler = defer::<i32, String>();
    /// settler
    ///     .future_value()
    ///     .on_failure_only(Recovery::inspect(move |e: &String| log.borrow_mut().push(e.clone())));
    /// settler.fail("boom".to_string());
    ///
    /// assert_eq!(*seen.borrow(), vec!["boom".to_string()]);
    /// ```
    pub fn inspect<F>(mut f: F) -> Self
    where
        F: FnMut(&E) + 'static,
    {
        Self::new(move |error| {
            f(&error);
            error
        })
    }
}

impl<E> Recovery<E> {
    /// Runs the recovery with `error`.
    pub fn call(&mut self, error: E) -> E {
        (self.callback)(error)
    }
}

impl<E> std::fmt::Debug for Recovery<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Recovery {{ ... }}")
    }
}
