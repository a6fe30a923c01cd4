use super::interfaces::DeadlineTimer;

/// Revert deadline of a transient overlay screen.
///
/// Owns the timer facility and at most one outstanding timer handle.
/// Two states: idle (`pending` is `None`) and active.
///
/// - [`rearm()`](Self::rearm) cancels the outstanding timer, if any,
///   before starting a new one, so repeated input pushes the deadline out
///   and two timers are never outstanding.
/// - [`expire()`](Self::expire) clears the handle once its timer fired,
///   so an elapsed timer is never cancelled afterwards.
/// - Dropping the overlay cancels the outstanding timer.
pub struct Overlay<T: DeadlineTimer> {
    timer: T,
    pending: Option<T::Handle>,
}

impl<T: DeadlineTimer> Overlay<T> {
    /// Wrap a timer facility, starting idle.
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            pending: None,
        }
    }

    /// Returns `true` while a revert deadline is outstanding.
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle of the outstanding timer, if any.
    pub fn pending(&self) -> Option<T::Handle> {
        self.pending
    }

    /// Cancel the outstanding timer (if any) and start a new one.
    pub fn rearm(&mut self, delay_ms: u32) {
        self.cancel();
        self.pending = Some(self.timer.start_one_shot(delay_ms));
    }

    /// Cancel the outstanding timer, returning to idle.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }
    }

    /// Record that the timer identified by `handle` fired.
    ///
    /// Returns `true` if it was the outstanding one (the overlay is now
    /// idle), `false` for a stale handle, in which case nothing changes.
    pub fn expire(&mut self, handle: T::Handle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Shared access to the timer facility.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    #[cfg(test)]
    pub(crate) fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

impl<T: DeadlineTimer> Drop for Overlay<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
