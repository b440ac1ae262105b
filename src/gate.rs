//! Host execution context adapter.
//!
//! The host runtime permits only one thread to run host-visible code at a
//! time. [`HostGate`] is the mutual-exclusion scope for every host-touching
//! operation: document evaluation enters the gate once, and resolution calls
//! nested inside that evaluation run directly within the already-held scope.
//! The underlying lock is reentrant, so a resolver that triggers a nested
//! evaluation on the same thread cannot deadlock.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use parking_lot::ReentrantMutex;

use crate::error::{BridgeError, Result};

/// Serializes access to the host runtime's single active execution context.
#[derive(Debug, Default)]
pub struct HostGate {
    lock: ReentrantMutex<()>,
}

impl HostGate {
    pub fn new() -> Self {
        Self {
            lock: ReentrantMutex::new(()),
        }
    }

    /// Run `f` inside the host execution context, blocking until it is
    /// available. The context is released on every exit path.
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> T {
        let _guard = self.lock.lock();
        f()
    }

    /// Like [`run`](Self::run), but gives up after `timeout` while waiting
    /// for the context and reports [`BridgeError::Timeout`]. A `None`
    /// timeout blocks indefinitely.
    pub fn run_with_deadline<T>(
        &self,
        timeout: Option<Duration>,
        f: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        match timeout {
            None => self.run(f),
            Some(limit) => match self.lock.try_lock_for(limit) {
                Some(_guard) => f(),
                None => Err(BridgeError::Timeout(format!(
                    "host execution context not acquired within {limit:?}"
                ))),
            },
        }
    }
}

/// Run host-invoked code with panic capture, so nothing unwinds across the
/// resolution/evaluation boundary.
pub fn capture_host_panic<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(BridgeError::Eval(panic_message(payload))),
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("host panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("host panic: {s}")
    } else {
        "host panic".to_string()
    }
}
