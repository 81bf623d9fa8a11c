//! Core runtime for shapeloop.
//!
//! A [`Scheduler`] drives a bounded animation: on every tick it renders a
//! parameter through a [`ShapeRenderer`], hands the markup to a
//! [`PaintSink`], and re-arms itself on a host-provided [`TimerHost`]. The
//! crate never blocks; hosts decide how time passes. [`TimerQueue`] is a
//! deterministic host driven by explicit calls, used by tests and by the
//! `std` runtime.

pub mod animation;
pub mod collections;
pub mod error;
pub mod hash;
pub mod platform;
pub mod render;
pub mod scheduler;
pub mod timer;

pub use animation::{AnimationConfig, AnimationState, RENDER_SIZE};
pub use error::{
    AnimationError, AnimationResult, ConfigError, PaintError, RenderError, ScheduleError,
};
pub use platform::{Clock, TimerHost, TimerId};
pub use render::{PaintSink, ShapeRenderer};
pub use scheduler::{AnimationHandle, AnimationId, AnimationStatus, Scheduler};
pub use timer::TimerQueue;

pub mod prelude {
    pub use crate::animation::{AnimationConfig, AnimationState};
    pub use crate::platform::{Clock, TimerHost};
    pub use crate::render::{PaintSink, ShapeRenderer};
    pub use crate::scheduler::{AnimationHandle, AnimationStatus, Scheduler};
}
