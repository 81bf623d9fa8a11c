#![deny(missing_docs)]

//! High level utilities for running a shapeloop animation with minimal
//! boilerplate.

use std::path::PathBuf;
use std::rc::Rc;

use shapeloop_core::{
    AnimationConfig, AnimationResult, AnimationStatus, PaintSink, Scheduler,
};
use shapeloop_graphics::{Motion, SquareRenderer, SvgCanvas};
use shapeloop_runtime_std::{FileSink, StdRuntime, StdoutSink};

/// Where painted frames go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// One line per frame on standard output.
    #[default]
    Stdout,
    /// A file overwritten with every frame.
    File(PathBuf),
}

impl OutputTarget {
    fn sink(&self) -> Rc<dyn PaintSink> {
        match self {
            OutputTarget::Stdout => Rc::new(StdoutSink),
            OutputTarget::File(path) => Rc::new(FileSink::new(path.clone())),
        }
    }
}

/// Options used to configure a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeLoopOptions {
    motion: Motion,
    animation: AnimationConfig,
    canvas: SvgCanvas,
    output: OutputTarget,
}

impl Default for ShapeLoopOptions {
    fn default() -> Self {
        Self {
            motion: Motion::Rotate,
            animation: AnimationConfig::default(),
            canvas: SvgCanvas::default(),
            output: OutputTarget::default(),
        }
    }
}

impl ShapeLoopOptions {
    /// Sets how the parameter moves the square.
    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    /// Replaces the animation timing and parameter evolution.
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Sets the SVG canvas size.
    pub fn with_canvas(mut self, canvas: SvgCanvas) -> Self {
        self.canvas = canvas;
        self
    }

    /// Sets where frames are painted.
    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    /// Motion of the square.
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Animation configuration.
    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    /// Output target.
    pub fn output(&self) -> &OutputTarget {
        &self.output
    }
}

/// Builder used to configure and launch a run.
#[derive(Debug, Clone, Default)]
pub struct ShapeLoopAppBuilder {
    options: ShapeLoopOptions,
}

impl ShapeLoopAppBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how the parameter moves the square.
    pub fn motion(mut self, motion: Motion) -> Self {
        self.options.motion = motion;
        self
    }

    /// Sets the parameter rendered by the first tick.
    pub fn initial_parameter(mut self, parameter: f32) -> Self {
        self.options.animation.initial_parameter = parameter;
        self
    }

    /// Sets the total time budget in milliseconds.
    pub fn duration_millis(mut self, millis: i64) -> Self {
        self.options.animation.total_duration_millis = millis;
        self
    }

    /// Sets the delay between ticks in milliseconds.
    pub fn interval_millis(mut self, millis: i64) -> Self {
        self.options.animation.tick_interval_millis = millis;
        self
    }

    /// Sets the amount added to the parameter after each tick.
    pub fn step(mut self, step: f32) -> Self {
        self.options.animation.parameter_step = step;
        self
    }

    /// Defers the first tick to the next multiple of `millis` on the wall clock.
    pub fn align_first_tick(mut self, millis: u64) -> Self {
        self.options.animation.first_tick_alignment_millis = Some(millis);
        self
    }

    /// Sets the SVG canvas size.
    pub fn canvas(mut self, width: u32, height: u32) -> Self {
        self.options.canvas = SvgCanvas::new(width, height);
        self
    }

    /// Sets where frames are painted.
    pub fn output(mut self, output: OutputTarget) -> Self {
        self.options.output = output;
        self
    }

    /// Returns the options collected so far.
    pub fn options(&self) -> &ShapeLoopOptions {
        &self.options
    }

    /// Runs the animation to completion on the configured output.
    pub fn run(self) -> AnimationResult<RunSummary> {
        let sink = self.options.output.sink();
        run_app(&self.options, sink)
    }

    /// Runs the animation to completion, painting into `sink`.
    pub fn run_with_sink(self, sink: Rc<dyn PaintSink>) -> AnimationResult<RunSummary> {
        run_app(&self.options, sink)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Frames rendered and painted.
    pub ticks: u64,
    /// Terminal status of the animation.
    pub status: AnimationStatus,
}

/// Runs an animation described by `options` on a fresh [`StdRuntime`].
pub fn run(options: ShapeLoopOptions) -> AnimationResult<RunSummary> {
    let sink = options.output.sink();
    run_app(&options, sink)
}

fn run_app(options: &ShapeLoopOptions, sink: Rc<dyn PaintSink>) -> AnimationResult<RunSummary> {
    let runtime = StdRuntime::new();
    let renderer = SquareRenderer::new(options.motion).with_canvas(options.canvas);
    let scheduler = Scheduler::new(Rc::new(runtime.clone()), Rc::new(renderer), sink);

    let handle = scheduler.launch(options.animation)?;
    let fired = runtime.run_until_idle();
    log::debug!("{} run fired {fired} timers", options.motion);

    match handle.status() {
        AnimationStatus::Failed(err) => Err(err),
        status => Ok(RunSummary {
            ticks: handle.ticks(),
            status,
        }),
    }
}
