//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides concrete implementations of the platform
//! abstraction traits defined in `shapeloop-core`. Applications construct a
//! [`StdRuntime`], hand it to a [`shapeloop_core::Scheduler`] as its timer
//! host, and drive it with [`StdRuntime::run_until_idle`] or
//! [`StdRuntime::poll`].

mod sink;

pub use sink::{FileSink, StdoutSink};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use shapeloop_core::{Clock, ScheduleError, TimerHost, TimerId, TimerQueue};

/// Clock implementation backed by [`std::time`].
///
/// Reports wall-clock milliseconds since the UNIX epoch so that first-tick
/// alignment lands on wall-clock boundaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

impl Clock for StdClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|since_epoch| since_epoch.as_millis() as u64)
            .unwrap_or_default()
    }
}

impl StdClock {
    /// Returns the elapsed time as a [`Duration`] for convenience.
    pub fn elapsed(&self, since: Instant) -> Duration {
        since.elapsed()
    }
}

#[derive(Default)]
struct WakeState {
    timer_requested: Cell<bool>,
    waker: RefCell<Option<Rc<dyn Fn() + 'static>>>,
}

/// Real-time timer host.
///
/// Timers live in a [`TimerQueue`] whose timeline is the time elapsed since
/// the runtime was created. The runtime only fires timers from
/// [`run_until_idle`](Self::run_until_idle) or [`poll`](Self::poll); arming
/// a timer never runs anything.
#[derive(Clone)]
pub struct StdRuntime {
    queue: TimerQueue,
    origin: Instant,
    clock: StdClock,
    wake: Rc<WakeState>,
}

impl StdRuntime {
    /// Creates a new standard runtime instance.
    pub fn new() -> Self {
        Self {
            queue: TimerQueue::new(),
            origin: Instant::now(),
            clock: StdClock,
            wake: Rc::new(WakeState::default()),
        }
    }

    /// Returns the clock implementation.
    pub fn clock(&self) -> StdClock {
        self.clock
    }

    /// Milliseconds since the runtime was created.
    pub fn elapsed_millis(&self) -> u64 {
        self.clock.elapsed(self.origin).as_millis() as u64
    }

    pub fn pending_timers(&self) -> usize {
        self.queue.pending_timers()
    }

    /// Returns whether a timer was armed since the last call.
    pub fn take_timer_request(&self) -> bool {
        self.wake.timer_requested.replace(false)
    }

    /// Registers a waker that will be invoked whenever a timer is armed.
    pub fn set_waker(&self, waker: impl Fn() + 'static) {
        *self.wake.waker.borrow_mut() = Some(Rc::new(waker));
    }

    /// Clears any registered waker.
    pub fn clear_waker(&self) {
        *self.wake.waker.borrow_mut() = None;
    }

    /// Time until the earliest armed timer is due, `None` when idle.
    pub fn time_until_next_timer(&self) -> Option<Duration> {
        let deadline = self.queue.next_deadline()?;
        Some(Duration::from_millis(
            deadline.saturating_sub(self.elapsed_millis()),
        ))
    }

    /// Fires every timer that is already due without waiting.
    pub fn poll(&self) -> usize {
        self.queue.advance_to(self.elapsed_millis())
    }

    /// Host event loop: sleeps until the next deadline, fires due timers, and
    /// returns once no timer is armed. Returns the number of timers fired.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.queue.next_deadline() {
            let now = self.elapsed_millis();
            if deadline > now {
                std::thread::sleep(Duration::from_millis(deadline - now));
            }
            fired += self.queue.advance_to(self.elapsed_millis().max(deadline));
        }
        log::debug!("std runtime idle after firing {fired} timers");
        fired
    }

    fn wake(&self) {
        self.wake.timer_requested.set(true);
        let waker = self.wake.waker.borrow().clone();
        if let Some(waker) = waker {
            waker();
        }
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("elapsed_millis", &self.elapsed_millis())
            .field("queue", &self.queue)
            .finish()
    }
}

impl Clock for StdRuntime {
    fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }
}

impl TimerHost for StdRuntime {
    fn schedule_after(
        &self,
        delay_millis: u64,
        task: Box<dyn FnOnce() + 'static>,
    ) -> Result<TimerId, ScheduleError> {
        let deadline = self.elapsed_millis().saturating_add(delay_millis);
        let id = self.queue.schedule_at(deadline, task);
        self.wake();
        Ok(id)
    }

    fn cancel_timer(&self, id: TimerId) {
        self.queue.cancel_timer(id);
    }
}
