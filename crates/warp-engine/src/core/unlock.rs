//! Passcode gate and the warp transition it triggers.
//!
//! Accepting the passcode raises the warp flag immediately; once the warp has run
//! for `warp_seconds` the flag drops and the presentation unlocks. Time comes in as
//! monotonic seconds from the host, so polling from several frame loops in the same
//! frame is harmless.

use crate::config::ExperienceConfig;
use crate::core::view_state::ViewStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Locked,
    /// Warp running; unlocks once the clock reaches `until`.
    Launching { until: f64 },
    Unlocked,
}

/// Result of one passcode submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Accepted,
    Rejected,
    /// Already launching or unlocked.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct UnlockSequence {
    passcode: String,
    warp_seconds: f64,
    error_seconds: f64,
    phase: Phase,
    error_until: Option<f64>,
}

impl UnlockSequence {
    pub fn new(passcode: &str, warp_seconds: f64, error_seconds: f64) -> Self {
        Self {
            passcode: passcode.trim().to_lowercase(),
            warp_seconds: warp_seconds.max(0.0),
            error_seconds: error_seconds.max(0.0),
            phase: Phase::Locked,
            error_until: None,
        }
    }

    pub fn from_config(config: &ExperienceConfig) -> Self {
        Self::new(&config.passcode, config.warp_seconds, config.error_seconds)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a recent rejection should still be shown.
    pub fn has_error(&self) -> bool {
        self.error_until.is_some()
    }

    pub fn submit(&mut self, input: &str, now: f64, store: &mut ViewStore) -> Attempt {
        if self.phase != Phase::Locked {
            return Attempt::Ignored;
        }
        let input = input.trim();
        if input.is_empty() {
            return Attempt::Rejected;
        }
        if input.to_lowercase() == self.passcode {
            self.phase = Phase::Launching {
                until: now + self.warp_seconds,
            };
            self.error_until = None;
            store.set_warping(true);
            log::info!("unlock: passcode accepted, warp engaged");
            Attempt::Accepted
        } else {
            self.error_until = Some(now + self.error_seconds);
            log::debug!("unlock: passcode rejected");
            Attempt::Rejected
        }
    }

    /// Advance timers. Call at least once per frame.
    pub fn poll(&mut self, now: f64, store: &mut ViewStore) {
        if self.error_until.is_some_and(|until| now >= until) {
            self.error_until = None;
        }
        if let Phase::Launching { until } = self.phase {
            if now >= until {
                self.phase = Phase::Unlocked;
                store.set_warping(false);
                store.set_unlocked(true);
                log::info!("unlock: warp complete, presentation unlocked");
            }
        }
    }
}
