//! Cancellable trailing-edge debounce.
//!
//! DESIGN
//! ======
//! At most one invocation is pending. `schedule` drops the previous timer
//! before arming a new one, and dropping a `gloo_timers` `Timeout` cancels
//! it, so only the last callback in a burst runs. Off-browser builds never
//! run callbacks.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

#[derive(Debug)]
pub struct Debouncer {
    delay_ms: u32,
    #[cfg(feature = "hydrate")]
    pending: Option<gloo_timers::callback::Timeout>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            #[cfg(feature = "hydrate")]
            pending: None,
        }
    }

    /// Run `f` after the delay unless another call to `schedule` or
    /// [`cancel`](Self::cancel) comes first.
    pub fn schedule<F>(&mut self, f: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();
        #[cfg(feature = "hydrate")]
        {
            self.pending = Some(gloo_timers::callback::Timeout::new(self.delay_ms, f));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.delay_ms, f);
        }
    }

    /// Drop the pending invocation, if any.
    pub fn cancel(&mut self) {
        #[cfg(feature = "hydrate")]
        if let Some(timer) = self.pending.take() {
            let _ = timer.cancel();
        }
    }
}
