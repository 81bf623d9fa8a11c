use std::cell::{Cell, RefCell};
use std::rc::Rc;

use shapeloop_core::{
    AnimationConfig, AnimationHandle, AnimationResult, Clock, PaintError, PaintSink, RenderError,
    ScheduleError, Scheduler, ShapeRenderer, TimerHost, TimerId, TimerQueue,
};

/// Timer host that records every requested delay and only fires when the
/// test advances it.
#[derive(Clone, Default)]
pub struct ManualTimer {
    queue: TimerQueue,
    delays: Rc<RefCell<Vec<u64>>>,
    cancelled: Rc<RefCell<Vec<TimerId>>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_millis: u64) -> Self {
        Self {
            queue: TimerQueue::starting_at(now_millis),
            ..Self::default()
        }
    }

    /// Delays passed to `schedule_after`, in call order.
    pub fn delays(&self) -> Vec<u64> {
        self.delays.borrow().clone()
    }

    /// Timer ids passed to `cancel_timer`, in call order.
    pub fn cancelled(&self) -> Vec<TimerId> {
        self.cancelled.borrow().clone()
    }

    pub fn queue(&self) -> &TimerQueue {
        &self.queue
    }

    pub fn now_millis(&self) -> u64 {
        self.queue.now_millis()
    }

    pub fn pending_timers(&self) -> usize {
        self.queue.pending_timers()
    }

    pub fn advance_by(&self, delta_millis: u64) -> usize {
        self.queue.advance_by(delta_millis)
    }

    pub fn advance_to(&self, target_millis: u64) -> usize {
        self.queue.advance_to(target_millis)
    }

    pub fn fire_next(&self) -> Option<u64> {
        self.queue.fire_next()
    }

    pub fn run_until_idle(&self) -> usize {
        self.queue.run_until_idle()
    }
}

impl Clock for ManualTimer {
    fn now_millis(&self) -> u64 {
        self.queue.now_millis()
    }
}

impl TimerHost for ManualTimer {
    fn schedule_after(
        &self,
        delay_millis: u64,
        task: Box<dyn FnOnce() + 'static>,
    ) -> Result<TimerId, ScheduleError> {
        self.delays.borrow_mut().push(delay_millis);
        self.queue.schedule_after(delay_millis, task)
    }

    fn cancel_timer(&self, id: TimerId) {
        self.cancelled.borrow_mut().push(id);
        self.queue.cancel_timer(id);
    }
}

/// Paint sink that keeps every markup string it receives.
#[derive(Debug)]
pub struct RecordingSink {
    target: String,
    paints: RefCell<Vec<String>>,
    available: Cell<bool>,
}

impl RecordingSink {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            paints: RefCell::new(Vec::new()),
            available: Cell::new(true),
        }
    }

    /// Makes subsequent paints fail with [`PaintError::TargetMissing`].
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    pub fn paints(&self) -> Vec<String> {
        self.paints.borrow().clone()
    }

    pub fn paint_count(&self) -> usize {
        self.paints.borrow().len()
    }

    /// Current content of the target: the last paint wins.
    pub fn content(&self) -> Option<String> {
        self.paints.borrow().last().cloned()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new("base_div")
    }
}

impl PaintSink for RecordingSink {
    fn set_content(&self, markup: &str) -> Result<(), PaintError> {
        if !self.available.get() {
            return Err(PaintError::TargetMissing {
                target: self.target.clone(),
            });
        }
        self.paints.borrow_mut().push(markup.to_string());
        Ok(())
    }
}

/// Renderer that records its inputs and emits a tiny marker element.
#[derive(Default)]
pub struct RecordingRenderer {
    calls: RefCell<Vec<(f32, f32)>>,
    fail_when: Option<Box<dyn Fn(f32) -> bool>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every render whose parameter satisfies `predicate`.
    pub fn failing_when(predicate: impl Fn(f32) -> bool + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_when: Some(Box::new(predicate)),
        }
    }

    /// Markup produced for `(size, parameter)`.
    pub fn markup(size: f32, parameter: f32) -> String {
        format!("<frame size=\"{size}\" parameter=\"{parameter}\"/>")
    }

    /// `(size, parameter)` of every call, failed ones included.
    pub fn calls(&self) -> Vec<(f32, f32)> {
        self.calls.borrow().clone()
    }

    pub fn parameters(&self) -> Vec<f32> {
        self.calls.borrow().iter().map(|(_, parameter)| *parameter).collect()
    }
}

impl ShapeRenderer for RecordingRenderer {
    fn render(&self, size: f32, parameter: f32) -> Result<String, RenderError> {
        self.calls.borrow_mut().push((size, parameter));
        if self.fail_when.as_ref().is_some_and(|fail| fail(parameter)) {
            return Err(RenderError::Failed(format!(
                "refusing to render parameter {parameter}"
            )));
        }
        Ok(Self::markup(size, parameter))
    }
}

/// A scheduler wired to a [`ManualTimer`], a [`RecordingRenderer`] and a
/// [`RecordingSink`].
pub struct SchedulerHarness {
    timer: ManualTimer,
    renderer: Rc<RecordingRenderer>,
    sink: Rc<RecordingSink>,
    scheduler: Scheduler,
}

impl SchedulerHarness {
    pub fn new() -> Self {
        Self::with_parts(ManualTimer::new(), RecordingRenderer::new())
    }

    pub fn starting_at(now_millis: u64) -> Self {
        Self::with_parts(ManualTimer::starting_at(now_millis), RecordingRenderer::new())
    }

    pub fn with_renderer(renderer: RecordingRenderer) -> Self {
        Self::with_parts(ManualTimer::new(), renderer)
    }

    fn with_parts(timer: ManualTimer, renderer: RecordingRenderer) -> Self {
        let renderer = Rc::new(renderer);
        let sink = Rc::new(RecordingSink::default());
        let scheduler = Scheduler::new(Rc::new(timer.clone()), renderer.clone(), sink.clone());
        Self {
            timer,
            renderer,
            sink,
            scheduler,
        }
    }

    pub fn start(
        &self,
        initial_parameter: f32,
        total_duration_millis: i64,
        tick_interval_millis: i64,
        parameter_step: f32,
    ) -> AnimationResult<AnimationHandle> {
        self.scheduler.start(
            initial_parameter,
            total_duration_millis,
            tick_interval_millis,
            parameter_step,
        )
    }

    pub fn launch(&self, config: AnimationConfig) -> AnimationResult<AnimationHandle> {
        self.scheduler.launch(config)
    }

    pub fn run_until_idle(&self) -> usize {
        self.timer.run_until_idle()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn timer(&self) -> &ManualTimer {
        &self.timer
    }

    pub fn renderer(&self) -> &RecordingRenderer {
        &self.renderer
    }

    pub fn sink(&self) -> &RecordingSink {
        &self.sink
    }
}

impl Default for SchedulerHarness {
    fn default() -> Self {
        Self::new()
    }
}
