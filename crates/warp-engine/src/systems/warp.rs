//! Eased speed scalar driven by the warp flag.
//!
//! There is no transition state machine: flipping the flag only swaps the target,
//! and the speed relaxes toward it exponentially. It approaches the target
//! asymptotically and never overshoots.

use crate::config::WarpConfig;

#[derive(Debug, Clone)]
pub struct WarpDrive {
    speed: f32,
    config: WarpConfig,
}

impl WarpDrive {
    pub fn new(config: WarpConfig) -> Self {
        Self {
            speed: config.initial_speed,
            config,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn config(&self) -> &WarpConfig {
        &self.config
    }

    pub fn target(&self, warping: bool) -> f32 {
        if warping {
            self.config.warp_speed
        } else {
            self.config.cruise_speed
        }
    }

    /// One easing step toward the target for `warping`. Returns the new speed.
    pub fn step(&mut self, warping: bool) -> f32 {
        let target = self.target(warping);
        let next = self.speed + (target - self.speed) * self.config.smoothing;
        // Guard the no-overshoot invariant against rounding on the last ulp.
        self.speed = if (target - self.speed) * (target - next) < 0.0 {
            target
        } else {
            next
        };
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn drive(initial: f32, cruise: f32, warp: f32) -> WarpDrive {
        WarpDrive::new(WarpConfig {
            initial_speed: initial,
            cruise_speed: cruise,
            warp_speed: warp,
            smoothing: 0.05,
        })
    }

    #[test]
    fn eases_instead_of_jumping() {
        let mut d = drive(0.5, 0.5, 25.0);
        let first = d.step(true);
        assert!((first - (0.5 + 24.5 * 0.05)).abs() < 1e-5);
        assert!(first < 25.0);
    }

    #[test]
    fn warp_in_and_out_over_100_frames() {
        let mut d = drive(0.5, 0.5, 25.0);
        let gap_in = 25.0 - d.speed();
        for _ in 0..100 {
            d.step(true);
            assert_ne!(d.speed(), 25.0, "exponential approach never lands exactly");
        }
        assert!((25.0 - d.speed()) <= gap_in * 0.01, "speed {}", d.speed());

        let gap_out = d.speed() - 0.5;
        for _ in 0..100 {
            d.step(false);
            assert_ne!(d.speed(), 0.5);
        }
        assert!((d.speed() - 0.5) <= gap_out * 0.01, "speed {}", d.speed());
    }

    #[test]
    fn ninety_frames_close_ninety_nine_percent() {
        // ln(0.01) / ln(0.95) ≈ 89.8
        let mut d = drive(0.0, 0.0, 100.0);
        for _ in 0..90 {
            d.step(true);
        }
        assert!(100.0 - d.speed() <= 1.0);
    }

    #[test]
    fn constant_speed_when_already_at_target() {
        let mut d = drive(5.0, 5.0, 5.0);
        for _ in 0..10 {
            assert_eq!(d.step(false), 5.0);
        }
    }

    proptest! {
        #[test]
        fn converges_monotonically_without_overshoot(
            initial in -100.0f32..100.0,
            cruise in -50.0f32..50.0,
            warp in -50.0f32..200.0,
            warping: bool,
            steps in 1usize..400,
        ) {
            let mut d = drive(initial, cruise, warp);
            let target = d.target(warping);
            let side = (d.speed() - target).signum();
            let mut gap = (d.speed() - target).abs();
            for _ in 0..steps {
                d.step(warping);
                let next_gap = (d.speed() - target).abs();
                prop_assert!(next_gap <= gap);
                if next_gap > 0.0 {
                    prop_assert_eq!((d.speed() - target).signum(), side);
                }
                gap = next_gap;
            }
        }
    }
}
