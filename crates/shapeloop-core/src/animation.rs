//! Animation configuration and per-tick state.

use crate::error::ConfigError;

/// Size handed to the renderer on every tick.
pub const RENDER_SIZE: f32 = 100.0;

/// Timing and parameter evolution of one animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    /// Delay between two ticks in milliseconds. Must be positive.
    pub tick_interval_millis: i64,
    /// Total time budget in milliseconds. Zero or negative means no ticks.
    pub total_duration_millis: i64,
    /// Parameter rendered by the first tick.
    pub initial_parameter: f32,
    /// Amount added to the parameter after each tick.
    pub parameter_step: f32,
    /// Defers the first tick to the next multiple of this many milliseconds
    /// on the host clock.
    pub first_tick_alignment_millis: Option<u64>,
}

impl AnimationConfig {
    pub fn new(
        initial_parameter: f32,
        total_duration_millis: i64,
        tick_interval_millis: i64,
        parameter_step: f32,
    ) -> Self {
        Self {
            tick_interval_millis,
            total_duration_millis,
            initial_parameter,
            parameter_step,
            first_tick_alignment_millis: None,
        }
    }

    /// Aligns the first tick to the next `alignment_millis` boundary.
    pub fn with_first_tick_alignment(mut self, alignment_millis: u64) -> Self {
        self.first_tick_alignment_millis = Some(alignment_millis);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_millis <= 0 {
            return Err(ConfigError::NonPositiveTickInterval {
                tick_interval_millis: self.tick_interval_millis,
            });
        }
        if !self.initial_parameter.is_finite() {
            return Err(ConfigError::NonFiniteParameter {
                field: "initial_parameter",
                value: self.initial_parameter,
            });
        }
        if !self.parameter_step.is_finite() {
            return Err(ConfigError::NonFiniteParameter {
                field: "parameter_step",
                value: self.parameter_step,
            });
        }
        if self.first_tick_alignment_millis == Some(0) {
            return Err(ConfigError::ZeroAlignment);
        }
        Ok(())
    }

    /// Number of ticks a run of this configuration paints.
    pub fn expected_ticks(&self) -> u64 {
        if self.total_duration_millis <= 0 || self.tick_interval_millis <= 0 {
            return 0;
        }
        let total = self.total_duration_millis as u64;
        let interval = self.tick_interval_millis as u64;
        total.div_ceil(interval)
    }

    /// Delay before the first tick when the host clock reads `now_millis`.
    pub fn first_tick_delay(&self, now_millis: u64) -> u64 {
        match self.first_tick_alignment_millis {
            Some(alignment) if alignment > 0 => (alignment - now_millis % alignment) % alignment,
            _ => 0,
        }
    }

    pub(crate) fn interval_millis(&self) -> u64 {
        self.tick_interval_millis.max(1) as u64
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new(0.0, 5000, 50, 2.0)
    }
}

/// State carried from one tick to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Parameter rendered by the next tick.
    pub parameter: f32,
    /// Remaining time budget in milliseconds.
    pub remaining_duration_millis: i64,
    /// Zero-based index of the next tick.
    pub tick: u64,
}

impl AnimationState {
    pub fn initial(config: &AnimationConfig) -> Self {
        Self {
            parameter: config.initial_parameter,
            remaining_duration_millis: config.total_duration_millis,
            tick: 0,
        }
    }

    /// The loop stops once this is observed at the top of a tick.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_duration_millis <= 0
    }

    /// State after one more tick.
    ///
    /// The parameter is recomputed from the tick index rather than summed so
    /// tick `k` always renders `initial + k * step`.
    pub fn advance(&self, config: &AnimationConfig) -> Self {
        let tick = self.tick + 1;
        Self {
            parameter: config.initial_parameter + config.parameter_step * tick as f32,
            remaining_duration_millis: self
                .remaining_duration_millis
                .saturating_sub(config.tick_interval_millis),
            tick,
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
