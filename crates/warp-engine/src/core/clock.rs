use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Most fixed steps a single frame may run, however far behind the clock is.
pub const MAX_CATCH_UP_STEPS: u32 = 10;
/// Shortest accepted fixed step, in seconds.
pub const MIN_STEP: f32 = 1e-4;

/// How real frame time maps to simulation steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClockConfig {
    /// One update per animation frame, whatever the display refresh rate.
    PerFrame,
    /// Fixed-length updates accumulated from real frame time.
    Fixed {
        /// Step length in seconds.
        step: f32,
        /// Upper bound on steps run for a single frame.
        max_steps: u32,
    },
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig::PerFrame
    }
}

impl ClockConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            ClockConfig::PerFrame => Ok(()),
            ClockConfig::Fixed { step, max_steps } => {
                if !(step.is_finite() && (MIN_STEP..=1.0).contains(&step)) {
                    return Err(ConfigError::OutOfRange {
                        name: "clock.step",
                        value: step,
                        min: MIN_STEP,
                        max: 1.0,
                    });
                }
                if max_steps > MAX_CATCH_UP_STEPS {
                    return Err(ConfigError::TooLarge {
                        name: "clock.max_steps",
                        value: max_steps as usize,
                        max: MAX_CATCH_UP_STEPS as usize,
                    });
                }
                Ok(())
            }
        }
    }
}

/// Decides how many update steps each animation frame runs.
///
/// The per-frame constants (smoothing factor, drift speeds, decay rates) are tuned in
/// "units per frame", so `PerFrame` is the default. `Fixed` pins them to a 60 Hz
/// cadence on high-refresh displays.
#[derive(Debug, Clone)]
pub struct StepClock {
    config: ClockConfig,
    accumulator: f32,
    frames: u64,
}

impl StepClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
            frames: 0,
        }
    }

    pub fn per_frame() -> Self {
        Self::new(ClockConfig::PerFrame)
    }

    pub fn fixed(step: f32, max_steps: u32) -> Self {
        Self::new(ClockConfig::Fixed { step, max_steps })
    }

    /// Feed one frame's elapsed seconds. Returns the number of update steps to run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.frames += 1;
        match self.config {
            ClockConfig::PerFrame => 1,
            ClockConfig::Fixed { step, max_steps } => {
                let max_steps = max_steps.min(MAX_CATCH_UP_STEPS);
                if !(step > 0.0) {
                    return 1;
                }
                if frame_dt.is_finite() && frame_dt > 0.0 {
                    self.accumulator += frame_dt;
                }
                // Drop backlog beyond the cap instead of replaying it later.
                self.accumulator = self.accumulator.min(step * max_steps as f32);
                let steps = (self.accumulator / step) as u32;
                self.accumulator -= steps as f32 * step;
                steps
            }
        }
    }

    /// Frames observed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> ClockConfig {
        self.config
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::per_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_frame_always_one_step() {
        let mut clock = StepClock::per_frame();
        assert_eq!(clock.advance(0.001), 1);
        assert_eq!(clock.advance(0.5), 1);
        assert_eq!(clock.advance(0.0), 1);
        assert_eq!(clock.frames(), 3);
    }

    #[test]
    fn fixed_accumulates_partial_frames() {
        let mut clock = StepClock::fixed(1.0 / 60.0, 10);
        assert_eq!(clock.advance(0.008), 0);
        assert_eq!(clock.advance(0.010), 1);
    }

    #[test]
    fn fixed_caps_catch_up() {
        let mut clock = StepClock::fixed(1.0 / 60.0, 4);
        assert_eq!(clock.advance(2.0), 4);
        // The dropped backlog is not replayed.
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn fixed_ignores_bogus_deltas() {
        let mut clock = StepClock::fixed(1.0 / 60.0, 10);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(-1.0), 0);
    }

    #[test]
    fn catch_up_is_bounded_even_unvalidated() {
        let mut clock = StepClock::fixed(0.25, u32::MAX);
        assert_eq!(clock.advance(100.0), MAX_CATCH_UP_STEPS);
    }

    #[test]
    fn rejects_oversized_catch_up() {
        let tiny = ClockConfig::Fixed { step: 1e-30, max_steps: 4 };
        assert!(matches!(tiny.validate(), Err(ConfigError::OutOfRange { name: "clock.step", .. })));
        let greedy = ClockConfig::Fixed { step: 1.0 / 60.0, max_steps: u32::MAX };
        assert!(matches!(greedy.validate(), Err(ConfigError::TooLarge { name: "clock.max_steps", .. })));
        ClockConfig::Fixed { step: 1.0 / 60.0, max_steps: 10 }.validate().unwrap();
    }

    #[test]
    fn parses_from_json() {
        let fixed: ClockConfig =
            serde_json::from_str(r#"{ "mode": "fixed", "step": 0.02, "max_steps": 3 }"#).unwrap();
        assert_eq!(fixed, ClockConfig::Fixed { step: 0.02, max_steps: 3 });
        let per: ClockConfig = serde_json::from_str(r#"{ "mode": "per_frame" }"#).unwrap();
        assert_eq!(per, ClockConfig::PerFrame);
    }
}
