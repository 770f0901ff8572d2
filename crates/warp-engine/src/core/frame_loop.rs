//! Cancellation for self-rescheduling frame loops.
//!
//! A host loop captures a [`LoopToken`] when it starts and checks it at the top of
//! every tick; a dead token means "do not run, do not reschedule". Starting again
//! invalidates the previous token, so a [`LoopControl`] never has two live loops.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct LoopControl {
    epoch: Rc<Cell<u64>>,
    running: bool,
}

/// Handle held by one running loop.
#[derive(Debug, Clone)]
pub struct LoopToken {
    epoch: u64,
    current: Rc<Cell<u64>>,
}

impl LoopToken {
    /// Whether the loop that owns this token should keep ticking.
    pub fn is_live(&self) -> bool {
        self.current.get() == self.epoch
    }
}

impl LoopControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new loop. Any earlier token stops being live.
    pub fn start(&mut self) -> LoopToken {
        let epoch = self.epoch.get() + 1;
        self.epoch.set(epoch);
        self.running = true;
        LoopToken {
            epoch,
            current: Rc::clone(&self.epoch),
        }
    }

    /// Invalidate the live token, if any. Returns whether a loop was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        if was_running {
            self.epoch.set(self.epoch.get() + 1);
            self.running = false;
        }
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_live() {
        let mut control = LoopControl::new();
        let token = control.start();
        assert!(token.is_live());
        assert!(control.is_running());
    }

    #[test]
    fn stop_kills_token() {
        let mut control = LoopControl::new();
        let token = control.start();
        assert!(control.stop());
        assert!(!token.is_live());
        assert!(!control.stop(), "second stop is a no-op");
    }

    #[test]
    fn restart_leaves_exactly_one_live_loop() {
        let mut control = LoopControl::new();
        let first = control.start();
        let second = control.start();
        assert!(!first.is_live());
        assert!(second.is_live());
    }

    #[test]
    fn cloned_token_tracks_the_same_loop() {
        let mut control = LoopControl::new();
        let token = control.start();
        let copy = token.clone();
        control.stop();
        assert!(!copy.is_live());
    }
}
