//! Recording stubs for capability interfaces
//!
//! Test doubles are written by hand per capability trait, but the
//! programmable pieces are shared: a [`StubOp`] per operation holds the
//! programmed result, and a [`CallLog`] shared by all operations of one stub
//! records every call in invocation order.
//!
//! Available behind the `test-utils` feature.

use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Programmed behavior of a single stubbed operation
enum Behavior<T, E> {
    /// Every call yields a clone of the same value
    Return(T),
    /// Calls consume the queue front to back
    Sequence(VecDeque<T>),
    /// Every call yields a clone of the same error
    Fail(E),
}

/// One programmable operation slot of a stub provider.
///
/// A slot is always constructed with an explicit default behavior
/// ([`returning`](Self::returning) or [`failing`](Self::failing)); leaving an
/// operation unconfigured in a test never produces an implicit behavior.
pub struct StubOp<T, E> {
    op: &'static str,
    behavior: Mutex<Behavior<T, E>>,
}

impl<T: Clone, E: Clone> StubOp<T, E> {
    /// Create a slot whose default behavior is returning `value`
    pub fn returning(op: &'static str, value: T) -> Self {
        Self {
            op,
            behavior: Mutex::new(Behavior::Return(value)),
        }
    }

    /// Create a slot whose default behavior is failing with `err`
    pub fn failing(op: &'static str, err: E) -> Self {
        Self {
            op,
            behavior: Mutex::new(Behavior::Fail(err)),
        }
    }

    /// Reprogram the slot to return a fixed value on every call
    pub fn ret(&self, value: T) {
        *self.behavior.lock().expect("stub lock") = Behavior::Return(value);
    }

    /// Reprogram the slot to yield `values` one call at a time.
    ///
    /// A call past the end of the sequence panics.
    pub fn seq<I>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        *self.behavior.lock().expect("stub lock") =
            Behavior::Sequence(values.into_iter().collect());
    }

    /// Reprogram the slot to fail every call with `err`
    pub fn fail(&self, err: E) {
        *self.behavior.lock().expect("stub lock") = Behavior::Fail(err);
    }

    /// Produce the next programmed result.
    ///
    /// Called by the stub's trait implementation after recording the call.
    ///
    /// # Panics
    ///
    /// Panics when a programmed sequence is exhausted.
    pub fn next(&self) -> Result<T, E> {
        match &mut *self.behavior.lock().expect("stub lock") {
            Behavior::Return(value) => Ok(value.clone()),
            Behavior::Sequence(values) => match values.pop_front() {
                Some(value) => Ok(value),
                None => panic!(
                    "stub operation '{}' called past the end of its sequence",
                    self.op
                ),
            },
            Behavior::Fail(err) => Err(err.clone()),
        }
    }
}

/// One recorded invocation of a stubbed operation
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Operation name
    pub op: &'static str,
    /// Arguments, JSON-encoded by the recording stub
    pub args: Value,
}

/// Order-preserving record of every call a stub received.
///
/// One log is shared by all operations of a stub, so tests can assert
/// cross-operation ordering as well as per-operation counts and arguments.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: Mutex<Vec<RecordedCall>>,
}

impl CallLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call. Invoked by stub trait implementations.
    pub fn record(&self, op: &'static str, args: Value) {
        self.calls
            .lock()
            .expect("stub lock")
            .push(RecordedCall { op, args });
    }

    /// Number of recorded calls to `op`
    pub fn count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .expect("stub lock")
            .iter()
            .filter(|call| call.op == op)
            .count()
    }

    /// Arguments of every recorded call to `op`, in order
    pub fn args_for(&self, op: &str) -> Vec<Value> {
        self.calls
            .lock()
            .expect("stub lock")
            .iter()
            .filter(|call| call.op == op)
            .map(|call| call.args.clone())
            .collect()
    }

    /// Every recorded call across all operations, in order
    pub fn all(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("stub lock").clone()
    }
}
