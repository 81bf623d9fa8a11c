//! Platform abstraction traits for shapeloop runtime services.
//!
//! The scheduler never waits on its own. It asks the host to run a
//! continuation after a delay and returns immediately, so the same stepping
//! logic runs under a browser timer, a `std` event loop, or a test clock.

use crate::error::ScheduleError;

/// Identifier of a timer armed on a [`TimerHost`].
pub type TimerId = u64;

/// Provides timing information for the host.
pub trait Clock {
    /// Returns the host's current time in milliseconds.
    ///
    /// Only differences and remainders of this value are meaningful to the
    /// scheduler; hosts may count from any epoch.
    fn now_millis(&self) -> u64;
}

/// Schedules deferred work on the host's single execution thread.
///
/// Implementations must run `task` no earlier than `delay_millis` after the
/// call and must never run it synchronously from inside `schedule_after`.
/// Ordering between timers with the same deadline follows arming order.
pub trait TimerHost: Clock {
    /// Arms a one-shot timer.
    fn schedule_after(
        &self,
        delay_millis: u64,
        task: Box<dyn FnOnce() + 'static>,
    ) -> Result<TimerId, ScheduleError>;

    /// Disarms a timer. Unknown or already-fired ids are ignored.
    fn cancel_timer(&self, id: TimerId);
}
