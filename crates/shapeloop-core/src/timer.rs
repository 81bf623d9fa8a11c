//! Deterministic timer host.
//!
//! [`TimerQueue`] keeps armed timers ordered by `(deadline, id)` and only
//! fires them when told to advance. Time never moves on its own, which makes
//! it usable both as a test clock and as the bookkeeping core of real-time
//! hosts that decide when to advance.

use std::cell::{Cell, RefCell};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::rc::Rc;

use crate::collections::IdMap;
use crate::error::ScheduleError;
use crate::platform::{Clock, TimerHost, TimerId};

type TimerTask = Box<dyn FnOnce() + 'static>;

struct TimerQueueInner {
    now: Cell<u64>,
    next_id: Cell<TimerId>,
    deadlines: RefCell<BinaryHeap<Reverse<(u64, TimerId)>>>,
    tasks: RefCell<IdMap<TimerId, TimerTask>>,
}

impl TimerQueueInner {
    fn new(now: u64) -> Self {
        Self {
            now: Cell::new(now),
            next_id: Cell::new(1),
            deadlines: RefCell::new(BinaryHeap::new()),
            tasks: RefCell::new(IdMap::default()),
        }
    }

    fn arm(&self, deadline: u64, task: TimerTask) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let deadline = deadline.max(self.now.get());
        self.deadlines.borrow_mut().push(Reverse((deadline, id)));
        self.tasks.borrow_mut().insert(id, task);
        id
    }

    fn cancel(&self, id: TimerId) {
        // The heap entry is skipped lazily when it surfaces.
        self.tasks.borrow_mut().remove(&id);
    }

    fn next_deadline(&self) -> Option<u64> {
        let mut deadlines = self.deadlines.borrow_mut();
        let tasks = self.tasks.borrow();
        while let Some(Reverse((deadline, id))) = deadlines.peek().copied() {
            if tasks.contains_key(&id) {
                return Some(deadline);
            }
            deadlines.pop();
        }
        None
    }

    /// Pops the earliest live timer due at or before `limit`.
    fn pop_due(&self, limit: u64) -> Option<(u64, TimerTask)> {
        loop {
            let mut deadlines = self.deadlines.borrow_mut();
            let Reverse((deadline, id)) = *deadlines.peek()?;
            if deadline > limit {
                return None;
            }
            deadlines.pop();
            drop(deadlines);
            if let Some(task) = self.tasks.borrow_mut().remove(&id) {
                return Some((deadline, task));
            }
        }
    }
}

/// Virtual-time timer host.
///
/// Cloning yields another handle to the same queue. Tasks run with no
/// internal borrow held, so they may arm or cancel timers on the same queue.
#[derive(Clone)]
pub struct TimerQueue {
    inner: Rc<TimerQueueInner>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a queue whose clock starts at `now_millis`.
    pub fn starting_at(now_millis: u64) -> Self {
        Self {
            inner: Rc::new(TimerQueueInner::new(now_millis)),
        }
    }

    /// Arms a timer at an absolute deadline. Past deadlines fire on the next
    /// advance.
    pub fn schedule_at(&self, deadline_millis: u64, task: Box<dyn FnOnce() + 'static>) -> TimerId {
        self.inner.arm(deadline_millis, task)
    }

    pub fn now_millis(&self) -> u64 {
        self.inner.now.get()
    }

    /// Deadline of the earliest armed timer.
    pub fn next_deadline(&self) -> Option<u64> {
        self.inner.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.tasks.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending_timers() == 0
    }

    /// Fires every timer due at or before `target_millis`, including timers
    /// armed by the fired tasks, then moves the clock to `target_millis`.
    /// Returns the number of tasks run.
    pub fn advance_to(&self, target_millis: u64) -> usize {
        let mut fired = 0;
        while let Some((deadline, task)) = self.inner.pop_due(target_millis) {
            if deadline > self.inner.now.get() {
                self.inner.now.set(deadline);
            }
            task();
            fired += 1;
        }
        if target_millis > self.inner.now.get() {
            self.inner.now.set(target_millis);
        }
        fired
    }

    pub fn advance_by(&self, delta_millis: u64) -> usize {
        self.advance_to(self.now_millis().saturating_add(delta_millis))
    }

    /// Jumps to the earliest deadline and fires the timers due there.
    /// Returns the deadline, or `None` when nothing is armed.
    pub fn fire_next(&self) -> Option<u64> {
        let deadline = self.next_deadline()?;
        self.advance_to(deadline);
        Some(deadline)
    }

    /// Fires timers until none remain armed. Returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.next_deadline() {
            fired += self.advance_to(deadline);
        }
        fired
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now_millis", &self.now_millis())
            .field("pending_timers", &self.pending_timers())
            .finish()
    }
}

impl Clock for TimerQueue {
    fn now_millis(&self) -> u64 {
        TimerQueue::now_millis(self)
    }
}

impl TimerHost for TimerQueue {
    fn schedule_after(
        &self,
        delay_millis: u64,
        task: Box<dyn FnOnce() + 'static>,
    ) -> Result<TimerId, ScheduleError> {
        let deadline = self.now_millis().saturating_add(delay_millis);
        Ok(self.inner.arm(deadline, task))
    }

    fn cancel_timer(&self, id: TimerId) {
        self.inner.cancel(id);
    }
}

#[cfg(test)]
#[path = "tests/timer_tests.rs"]
mod tests;
