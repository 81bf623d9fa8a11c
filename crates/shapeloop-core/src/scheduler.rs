//! Self-rescheduling animation loop.
//!
//! Each animation is a small state machine. A tick checks the remaining
//! budget, renders, paints, and arms exactly one host timer for the next
//! tick, so at most one tick of a given animation is ever pending. Nothing
//! here blocks: between ticks control belongs to the host.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::animation::{AnimationConfig, AnimationState, RENDER_SIZE};
use crate::error::{AnimationError, AnimationResult};
use crate::platform::{TimerHost, TimerId};
use crate::render::{PaintSink, ShapeRenderer};

/// Identifier of an animation started by a [`Scheduler`].
pub type AnimationId = u64;

/// Lifecycle of a single animation.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationStatus {
    /// A tick is pending on the host.
    Armed,
    /// The duration budget ran out.
    Finished,
    /// Stopped through [`AnimationHandle::cancel`].
    Cancelled,
    /// A tick failed; no further ticks run.
    Failed(AnimationError),
}

impl AnimationStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AnimationStatus::Armed)
    }
}

/// Owns the collaborators shared by every animation it starts.
///
/// Animations started from the same scheduler are independent: they keep
/// their own state and race on the shared sink, last paint wins.
pub struct Scheduler {
    host: Rc<dyn TimerHost>,
    renderer: Rc<dyn ShapeRenderer>,
    sink: Rc<dyn PaintSink>,
    next_animation_id: Cell<AnimationId>,
}

impl Scheduler {
    pub fn new(
        host: Rc<dyn TimerHost>,
        renderer: Rc<dyn ShapeRenderer>,
        sink: Rc<dyn PaintSink>,
    ) -> Self {
        Self {
            host,
            renderer,
            sink,
            next_animation_id: Cell::new(1),
        }
    }

    /// Starts an animation.
    ///
    /// Returns after the first tick has run (or been deferred by alignment).
    /// A non-positive `tick_interval_millis` is rejected before anything is
    /// rendered.
    pub fn start(
        &self,
        initial_parameter: f32,
        total_duration_millis: i64,
        tick_interval_millis: i64,
        parameter_step: f32,
    ) -> AnimationResult<AnimationHandle> {
        self.launch(AnimationConfig::new(
            initial_parameter,
            total_duration_millis,
            tick_interval_millis,
            parameter_step,
        ))
    }

    /// Starts an animation described by `config`.
    pub fn launch(&self, config: AnimationConfig) -> AnimationResult<AnimationHandle> {
        config.validate()?;

        let id = self.next_animation_id.get();
        self.next_animation_id.set(id + 1);

        let animation = Rc::new(Animation {
            id,
            config,
            host: Rc::clone(&self.host),
            renderer: Rc::clone(&self.renderer),
            sink: Rc::clone(&self.sink),
            status: RefCell::new(AnimationStatus::Armed),
            pending_timer: Cell::new(None),
            ticks: Cell::new(0),
        });
        log::info!(
            "animation {id}: starting at {} for {}ms every {}ms (step {})",
            config.initial_parameter,
            config.total_duration_millis,
            config.tick_interval_millis,
            config.parameter_step
        );

        let state = AnimationState::initial(&config);
        let delay = config.first_tick_delay(self.host.now_millis());
        if delay == 0 {
            Animation::tick(&animation, state);
        } else {
            log::debug!("animation {id}: first tick aligned {delay}ms ahead");
            Animation::arm(&animation, delay, state);
        }
        Ok(AnimationHandle { animation })
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("next_animation_id", &self.next_animation_id.get())
            .finish()
    }
}

struct Animation {
    id: AnimationId,
    config: AnimationConfig,
    host: Rc<dyn TimerHost>,
    renderer: Rc<dyn ShapeRenderer>,
    sink: Rc<dyn PaintSink>,
    status: RefCell<AnimationStatus>,
    pending_timer: Cell<Option<TimerId>>,
    ticks: Cell<u64>,
}

impl Animation {
    fn is_armed(&self) -> bool {
        matches!(*self.status.borrow(), AnimationStatus::Armed)
    }

    fn tick(this: &Rc<Self>, state: AnimationState) {
        this.pending_timer.set(None);
        if !this.is_armed() {
            return;
        }
        if state.is_exhausted() {
            log::info!("animation {}: finished after {} ticks", this.id, this.ticks.get());
            this.terminate(AnimationStatus::Finished);
            return;
        }

        log::debug!(
            "animation {}: tick {} at {} ({}ms left)",
            this.id,
            state.tick,
            state.parameter,
            state.remaining_duration_millis
        );
        let markup = match this.renderer.render(RENDER_SIZE, state.parameter) {
            Ok(markup) => markup,
            Err(source) => {
                this.fail(AnimationError::Render {
                    parameter: state.parameter,
                    source,
                });
                return;
            }
        };
        if let Err(err) = this.sink.set_content(&markup) {
            this.fail(err.into());
            return;
        }
        this.ticks.set(this.ticks.get() + 1);

        // A paint callback may have cancelled us.
        if !this.is_armed() {
            return;
        }
        let next = state.advance(&this.config);
        Animation::arm(this, this.config.interval_millis(), next);
    }

    fn arm(this: &Rc<Self>, delay_millis: u64, state: AnimationState) {
        let animation = Rc::clone(this);
        let task = Box::new(move || Animation::tick(&animation, state));
        match this.host.schedule_after(delay_millis, task) {
            Ok(timer) => this.pending_timer.set(Some(timer)),
            Err(err) => this.fail(err.into()),
        }
    }

    fn fail(&self, err: AnimationError) {
        log::error!("animation {}: {err}", self.id);
        self.terminate(AnimationStatus::Failed(err));
    }

    fn terminate(&self, status: AnimationStatus) {
        *self.status.borrow_mut() = status;
        if let Some(timer) = self.pending_timer.take() {
            self.host.cancel_timer(timer);
        }
    }
}

/// Observes and optionally cancels a running animation.
///
/// Dropping the handle leaves the animation running to completion.
#[derive(Clone)]
pub struct AnimationHandle {
    animation: Rc<Animation>,
}

impl AnimationHandle {
    pub fn id(&self) -> AnimationId {
        self.animation.id
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.animation.config
    }

    pub fn status(&self) -> AnimationStatus {
        self.animation.status.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.animation.is_armed()
    }

    /// Number of ticks that rendered and painted successfully.
    pub fn ticks(&self) -> u64 {
        self.animation.ticks.get()
    }

    /// Stops the animation and disarms its pending timer. No-op once the
    /// animation has terminated.
    pub fn cancel(&self) {
        if self.animation.is_armed() {
            log::info!("animation {}: cancelled", self.animation.id);
            self.animation.terminate(AnimationStatus::Cancelled);
        }
    }
}

impl fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationHandle")
            .field("id", &self.id())
            .field("status", &self.status())
            .field("ticks", &self.ticks())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
