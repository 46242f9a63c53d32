//! Time source for the query client.
//!
//! Retry backoff, fetch timeouts and staleness all go through [`Clock`], so the
//! browser timer can be swapped for a manual one.

use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Monotonic-enough time plus an async sleep.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
    /// Resolve after `duration`.
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// `Date.now()` and `setTimeout` through `gloo-timers`.
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> Duration {
        Duration::from_secs_f64(js_sys::Date::now().max(0.0) / 1000.0)
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo_timers::future::sleep(duration))
    }
}

#[cfg(test)]
pub(crate) use manual::ManualClock;

#[cfg(test)]
mod manual {
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    use futures::future::{self, LocalBoxFuture};

    use super::Clock;

    /// Clock driven by the test: time moves only through `advance`, and
    /// sleeps complete immediately while being recorded.
    #[derive(Default)]
    pub(crate) struct ManualClock {
        now: Cell<Duration>,
        sleeps: RefCell<Vec<Duration>>,
    }

    impl ManualClock {
        pub(crate) fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }

        pub(crate) fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.borrow().clone()
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Duration {
            self.now.get()
        }

        fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
            self.sleeps.borrow_mut().push(duration);
            Box::pin(future::ready(()))
        }
    }
}
