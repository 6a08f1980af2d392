//! Trailing-edge rate limiting with call coalescing.
//!
//! [`RateLimiter`] is a value-level gate: it never runs anything itself, it
//! only decides when parked arguments are due. [`Throttled`] pairs the gate
//! with a unary function for callers that own the function outright.
//!
//! Time is supplied by the caller in milliseconds; nothing here reads a clock.

use std::fmt;

/// Arguments parked until the end of the current window.
#[derive(Debug, Clone)]
struct Pending<T> {
    deadline_ms: u64,
    args: T,
}

/// Gate allowing at most one delivery per `limit_ms` window.
///
/// The first call opens a window; calls inside it replace the parked
/// arguments. At the window boundary the most recent arguments are handed
/// back exactly once by [`RateLimiter::poll`]. With `limit_ms == 0` every
/// call passes straight through.
#[derive(Debug, Clone)]
pub struct RateLimiter<T> {
    limit_ms: u64,
    pending: Option<Pending<T>>,
}

impl<T> RateLimiter<T> {
    /// Create a gate with the given window length.
    #[must_use]
    pub const fn new(limit_ms: u64) -> Self {
        Self {
            limit_ms,
            pending: None,
        }
    }

    /// Window length in milliseconds.
    #[must_use]
    pub const fn limit_ms(&self) -> u64 {
        self.limit_ms
    }

    /// Offer a call.
    ///
    /// Returns the arguments back when they may run immediately (only when
    /// the limit is zero); otherwise parks them and returns `None`.
    /// Callers should [`poll`](Self::poll) with the same `now_ms` first so an
    /// expired window is flushed before a new one opens.
    pub fn invoke(&mut self, now_ms: u64, args: T) -> Option<T> {
        if self.limit_ms == 0 {
            return Some(args);
        }

        match &mut self.pending {
            Some(pending) => pending.args = args,
            None => {
                self.pending = Some(Pending {
                    deadline_ms: now_ms.saturating_add(self.limit_ms),
                    args,
                });
            }
        }
        None
    }

    /// Take the parked arguments if their window has closed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.deadline_ms <= now_ms => {
                self.pending.take().map(|pending| pending.args)
            }
            _ => None,
        }
    }

    /// When the parked call comes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|pending| pending.deadline_ms)
    }

    /// Check if a call is parked.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the parked call without delivering it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// A unary function behind a [`RateLimiter`].
pub struct Throttled<T, F>
where
    F: FnMut(T),
{
    limiter: RateLimiter<T>,
    func: F,
}

impl<T, F> Throttled<T, F>
where
    F: FnMut(T),
{
    /// Wrap `func` so it runs at most once per `limit_ms`.
    pub const fn new(limit_ms: u64, func: F) -> Self {
        Self {
            limiter: RateLimiter::new(limit_ms),
            func,
        }
    }

    /// Call through the limiter. Flushes an expired window first.
    pub fn call(&mut self, now_ms: u64, args: T) {
        self.poll(now_ms);
        if let Some(args) = self.limiter.invoke(now_ms, args) {
            (self.func)(args);
        }
    }

    /// Deliver the parked call if its window has closed. Returns true if it ran.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.limiter.poll(now_ms) {
            Some(args) => {
                (self.func)(args);
                true
            }
            None => false,
        }
    }

    /// When the parked call comes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.limiter.deadline()
    }

    /// Drop the parked call without running it.
    pub fn cancel(&mut self) {
        self.limiter.cancel();
    }
}

impl<T, F> fmt::Debug for Throttled<T, F>
where
    F: FnMut(T),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttled")
            .field("limit_ms", &self.limiter.limit_ms())
            .field("deadline", &self.limiter.deadline())
            .finish_non_exhaustive()
    }
}
