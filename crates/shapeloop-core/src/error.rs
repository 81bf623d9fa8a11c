//! Error types for shapeloop.
//!
//! Configuration problems are reported synchronously by
//! [`Scheduler::start`](crate::Scheduler::start). Everything else happens
//! inside a tick, terminates that animation, and is recorded on its handle.

use thiserror::Error;

/// Rejected animation configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The tick interval is zero or negative.
    #[error("tick interval must be positive, got {tick_interval_millis}ms")]
    NonPositiveTickInterval {
        /// Interval that was supplied.
        tick_interval_millis: i64,
    },

    /// The initial parameter or the step is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFiniteParameter {
        /// Name of the offending field.
        field: &'static str,
        /// Value that was supplied.
        value: f32,
    },

    /// First-tick alignment of zero milliseconds.
    #[error("first tick alignment must be positive")]
    ZeroAlignment,
}

/// Failure reported by a render collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The parameter handed to the renderer is NaN or infinite.
    #[error("cannot render non-finite parameter {0}")]
    NonFiniteParameter(f32),

    /// The requested size cannot produce a drawable.
    #[error("cannot render at size {0}")]
    InvalidSize(f32),

    /// Renderer specific failure.
    #[error("{0}")]
    Failed(String),
}

/// Failure reported by a paint sink.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaintError {
    /// The output target does not exist.
    #[error("paint target `{target}` not found")]
    TargetMissing {
        /// Identifier of the missing target.
        target: String,
    },

    /// The output target exists but refused the markup.
    #[error("failed to write to `{target}`: {message}")]
    Write {
        /// Identifier of the target.
        target: String,
        /// Underlying failure description.
        message: String,
    },
}

/// The host could not arm a timer.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("host refused to schedule timer: {message}")]
pub struct ScheduleError {
    /// Host supplied description.
    pub message: String,
}

impl ScheduleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Unified error type for a single animation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnimationError {
    /// Raised synchronously by `start`; nothing was rendered or painted.
    #[error("invalid animation configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// The render collaborator failed on a tick.
    #[error("render failed at parameter {parameter}: {source}")]
    Render {
        /// Parameter of the failing tick.
        parameter: f32,
        /// Renderer failure.
        #[source]
        source: RenderError,
    },

    /// The paint sink was missing or rejected the markup.
    #[error("paint sink unavailable: {0}")]
    SinkUnavailable(#[from] PaintError),

    /// The host refused to arm the next tick.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Result type alias for shapeloop operations.
pub type AnimationResult<T> = Result<T, AnimationError>;
