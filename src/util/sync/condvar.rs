use std::time::Instant;

use crate::util::sync::mutex::MutexGuard;

#[cfg(loom)]
pub struct Condvar {
    inner: loom::sync::Condvar,
}

#[cfg(loom)]
impl Condvar {
    pub fn new() -> Self {
        Self {
            inner: loom::sync::Condvar::new(),
        }
    }

    /// Atomically releases the guarded lock and suspends until notified, reacquiring the lock
    /// before returning. May wake spuriously.
    pub fn wait<Inner>(
        &self,
        guard: &mut MutexGuard<Inner>,
        deadline: Option<Instant>,
    ) -> WaitResult {
        debug_assert!(
            deadline.is_none(),
            "cannot wait with a deadline when using loom"
        );

        let native = guard.inner.take().unwrap();
        guard.inner = Some(self.inner.wait(native).unwrap());

        WaitResult::Woken
    }

    pub fn notify_one(&self) {
        self.inner.notify_one();
    }

    pub fn notify_all(&self) {
        self.inner.notify_all();
    }
}

#[cfg(not(loom))]
pub struct Condvar {
    inner: parking_lot::Condvar,
}

#[cfg(not(loom))]
impl Condvar {
    pub fn new() -> Self {
        Self {
            inner: parking_lot::Condvar::new(),
        }
    }

    /// Atomically releases the guarded lock and suspends until notified or until the deadline
    /// passes, reacquiring the lock before returning. May wake spuriously.
    pub fn wait<Inner>(
        &self,
        guard: &mut MutexGuard<Inner>,
        deadline: Option<Instant>,
    ) -> WaitResult {
        match deadline {
            Some(deadline) => {
                if self.inner.wait_until(&mut guard.inner, deadline).timed_out() {
                    WaitResult::TimedOut
                } else {
                    WaitResult::Woken
                }
            }
            None => {
                self.inner.wait(&mut guard.inner);
                WaitResult::Woken
            }
        }
    }

    pub fn notify_one(&self) {
        self.inner.notify_one();
    }

    pub fn notify_all(&self) {
        self.inner.notify_all();
    }
}

pub enum WaitResult {
    Woken,
    #[allow(unused)]
    TimedOut,
}
