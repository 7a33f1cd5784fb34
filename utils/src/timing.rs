//! Debounce and throttle wrappers over tokio timers.
//!
//! Each wrapper is a small object that owns its timer state outright: a
//! [`Debouncer`] holds the handle of its one pending task, a [`Throttle`] holds
//! the instant its current suppression window opened.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs the callback once calls have stopped arriving for `wait`.
///
/// Every [`call`](Self::call) cancels the pending invocation, if any, and
/// schedules a new one `wait` after itself. Only the last call of a burst
/// fires, exactly once, with that call's arguments. Dropping the debouncer
/// cancels whatever is still pending.
pub struct Debouncer<A> {
    wait: Duration,
    callback: Callback<A>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new<F>(wait: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            wait,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn call(&self, args: A) {
        // Deadline is fixed now, not when the task is first polled.
        let deadline = Instant::now() + self.wait;
        let callback = Arc::clone(&self.callback);

        let mut pending = lock(&self.pending);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            callback(args);
        }));
    }

    /// Whether a call is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        lock(&self.pending)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<A> Debouncer<A> {
    pub fn wait(&self) -> Duration {
        self.wait
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

/// Runs the callback at most once per `limit`.
///
/// The first call goes through immediately and opens a suppression window;
/// calls inside the window are dropped. The first call at or after the end of
/// the window goes through immediately and opens the next one.
pub struct Throttle<A> {
    limit: Duration,
    callback: Callback<A>,
    window_start: Mutex<Option<Instant>>,
}

impl<A> Throttle<A> {
    pub fn new<F>(limit: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            limit,
            callback: Arc::new(callback),
            window_start: Mutex::new(None),
        }
    }

    /// Returns whether the callback ran.
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();
        {
            let mut window_start = lock(&self.window_start);
            if let Some(opened) = *window_start
                && now.duration_since(opened) < self.limit
            {
                return false;
            }
            *window_start = Some(now);
        }
        (self.callback)(args);
        true
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl<A> fmt::Debug for Throttle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

/// Resolve after `ms` milliseconds.
pub async fn sleep(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
