//! Browser host for shapeloop.
//!
//! Timers are armed with `window.setTimeout`, frames are written into a DOM
//! element's `innerHTML`, and [`WebAnimator`] exposes the scheduler to
//! JavaScript.
//!
//! ```javascript
//! import init, { WebAnimator } from 'shapeloop_web';
//!
//! await init();
//! const animator = new WebAnimator('base_div', 'rotate');
//! const animation = animator.go(0, 5000, 50, 2);
//! ```

#![allow(clippy::must_use_candidate)]

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use shapeloop_core::collections::IdMap;
use shapeloop_core::{
    AnimationConfig, AnimationError, AnimationHandle, AnimationStatus, Clock, PaintError,
    PaintSink, ScheduleError, Scheduler, TimerHost, TimerId,
};
use shapeloop_graphics::{Motion, SquareRenderer};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Element id painted by [`WebAnimator::rotating`].
pub const DEFAULT_TARGET: &str = "base_div";

/// Failure surfaced to JavaScript callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WebError {
    #[error("unknown motion `{0}`")]
    UnknownMotion(String),

    #[error("{name} must be a finite number, got {value}")]
    NonFiniteArgument { name: &'static str, value: f64 },

    #[error(transparent)]
    Animation(#[from] AnimationError),
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

struct PendingTimer<C> {
    handle: i32,
    callback: C,
}

/// Timers armed on the page, keyed by the id handed to the scheduler.
///
/// Holding the callback here lets cancellation release it along with
/// everything it captured.
pub(crate) struct TimerRegistry<C> {
    next_id: Cell<TimerId>,
    pending: RefCell<IdMap<TimerId, PendingTimer<C>>>,
}

impl<C> TimerRegistry<C> {
    pub(crate) fn reserve(&self) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    pub(crate) fn insert(&self, id: TimerId, handle: i32, callback: C) {
        self.pending
            .borrow_mut()
            .insert(id, PendingTimer { handle, callback });
    }

    /// Forgets `id`, returning its browser handle and callback.
    pub(crate) fn remove(&self, id: TimerId) -> Option<(i32, C)> {
        self.pending
            .borrow_mut()
            .remove(&id)
            .map(|timer| (timer.handle, timer.callback))
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl<C> Default for TimerRegistry<C> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(1),
            pending: RefCell::new(IdMap::default()),
        }
    }
}

/// [`TimerHost`] backed by the browser's `setTimeout`.
#[derive(Clone, Default)]
pub struct WindowTimerHost {
    timers: Rc<TimerRegistry<Closure<dyn FnMut()>>>,
}

impl WindowTimerHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

impl fmt::Debug for WindowTimerHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowTimerHost")
            .field("pending_timers", &self.pending_timers())
            .finish()
    }
}

impl Clock for WindowTimerHost {
    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

impl TimerHost for WindowTimerHost {
    fn schedule_after(
        &self,
        delay_millis: u64,
        task: Box<dyn FnOnce() + 'static>,
    ) -> Result<TimerId, ScheduleError> {
        let window = web_sys::window().ok_or_else(|| ScheduleError::new("no global window"))?;
        let id = self.timers.reserve();
        let timers = Rc::downgrade(&self.timers);
        let callback: Closure<dyn FnMut()> = Closure::once(move || {
            // The closure is released once this call returns.
            let fired = timers.upgrade().and_then(|timers| timers.remove(id));
            task();
            drop(fired);
        });
        let timeout = i32::try_from(delay_millis).unwrap_or(i32::MAX);
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(|err| ScheduleError::new(format!("setTimeout failed: {err:?}")))?;
        self.timers.insert(id, handle, callback);
        Ok(id)
    }

    fn cancel_timer(&self, id: TimerId) {
        let Some((handle, callback)) = self.timers.remove(id) else {
            return;
        };
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(handle);
        }
        drop(callback);
    }
}

/// Writes `markup` into `element`, or reports `target` as missing.
pub(crate) fn paint_into<E>(
    element: Option<E>,
    target: &str,
    markup: &str,
    write: impl FnOnce(&E, &str),
) -> Result<(), PaintError> {
    let element = element.ok_or_else(|| PaintError::TargetMissing {
        target: target.to_string(),
    })?;
    write(&element, markup);
    Ok(())
}

/// [`PaintSink`] replacing the inner HTML of the element with a given id.
///
/// The element is looked up on every paint, so removing it from the page
/// fails the next tick instead of painting a detached node.
#[derive(Debug, Clone)]
pub struct ElementSink {
    element_id: String,
}

impl ElementSink {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }
}

impl PaintSink for ElementSink {
    fn set_content(&self, markup: &str) -> Result<(), PaintError> {
        let element = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(&self.element_id));
        paint_into(element, &self.element_id, markup, |element, markup| {
            element.set_inner_html(markup)
        })
    }
}

pub(crate) fn parse_motion(name: &str) -> Result<Motion, WebError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "rotate" | "rotating" => Ok(Motion::Rotate),
        "translate" | "translating" => Ok(Motion::Translate),
        _ => Err(WebError::UnknownMotion(name.to_string())),
    }
}

/// Converts a JavaScript number of milliseconds, dropping any fraction.
/// Values beyond the `i64` range saturate.
pub(crate) fn whole_millis(name: &'static str, value: f64) -> Result<i64, WebError> {
    if !value.is_finite() {
        return Err(WebError::NonFiniteArgument { name, value });
    }
    Ok(value.trunc() as i64)
}

pub(crate) fn config_from_js(
    starting: f32,
    max_duration: f64,
    step: f64,
    o_step: f32,
    alignment: Option<f64>,
) -> Result<AnimationConfig, WebError> {
    let mut config = AnimationConfig::new(
        starting,
        whole_millis("max_duration", max_duration)?,
        whole_millis("step", step)?,
        o_step,
    );
    if let Some(alignment) = alignment {
        // Negative alignments collapse to zero and are rejected on launch.
        let alignment = whole_millis("alignment", alignment)?.max(0) as u64;
        config = config.with_first_tick_alignment(alignment);
    }
    Ok(config)
}

/// Animates a square inside one page element.
#[wasm_bindgen]
pub struct WebAnimator {
    scheduler: Scheduler,
    motion: Motion,
}

#[wasm_bindgen]
impl WebAnimator {
    /// Binds an animator to the element `element_id`. `motion` is
    /// `"rotate"` or `"translate"`.
    #[wasm_bindgen(constructor)]
    pub fn new(element_id: &str, motion: &str) -> Result<WebAnimator, JsValue> {
        let motion = parse_motion(motion)?;
        Ok(Self::with_motion(element_id, motion))
    }

    /// Rotating square painted into [`DEFAULT_TARGET`].
    pub fn rotating() -> WebAnimator {
        Self::with_motion(DEFAULT_TARGET, Motion::Rotate)
    }

    #[wasm_bindgen(getter)]
    pub fn motion(&self) -> String {
        self.motion.to_string()
    }

    /// Starts an animation. The first frame is painted before this returns.
    pub fn go(
        &self,
        starting: f32,
        max_duration: f64,
        step: f64,
        o_step: f32,
    ) -> Result<WebAnimation, JsValue> {
        let config = config_from_js(starting, max_duration, step, o_step, None)?;
        Ok(self.launch(config)?)
    }

    /// Like [`go`](Self::go), but the first frame waits for the next
    /// multiple of `alignment` milliseconds on the page clock.
    pub fn go_aligned(
        &self,
        starting: f32,
        max_duration: f64,
        step: f64,
        o_step: f32,
        alignment: f64,
    ) -> Result<WebAnimation, JsValue> {
        let config = config_from_js(starting, max_duration, step, o_step, Some(alignment))?;
        Ok(self.launch(config)?)
    }

    /// Five seconds at 50ms per frame, two units per frame.
    pub fn showme(&self) -> Result<WebAnimation, JsValue> {
        Ok(self.launch(AnimationConfig::default())?)
    }
}

impl WebAnimator {
    fn with_motion(element_id: &str, motion: Motion) -> Self {
        let scheduler = Scheduler::new(
            Rc::new(WindowTimerHost::new()),
            Rc::new(SquareRenderer::new(motion)),
            Rc::new(ElementSink::new(element_id)),
        );
        Self { scheduler, motion }
    }

    fn launch(&self, config: AnimationConfig) -> Result<WebAnimation, WebError> {
        let handle = self.scheduler.launch(config)?;
        log::debug!("{} animation {} launched", self.motion, handle.id());
        Ok(WebAnimation { handle })
    }
}

/// A running animation. Dropping it on the JavaScript side leaves the
/// animation running; call [`cancel`](Self::cancel) to stop it.
#[wasm_bindgen]
pub struct WebAnimation {
    handle: AnimationHandle,
}

#[wasm_bindgen]
impl WebAnimation {
    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> f64 {
        self.handle.ticks() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.handle.is_active()
    }

    /// Description of the terminal error, if the animation failed.
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        match self.handle.status() {
            AnimationStatus::Failed(err) => Some(err.to_string()),
            _ => None,
        }
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }
}

#[cfg(test)]
#[path = "tests/web_tests.rs"]
mod tests;
