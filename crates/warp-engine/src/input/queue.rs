/// Input events the backdrop and trail layers understand.
/// Coordinates are canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The cursor or a touch moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The canvas was resized.
    Resize { width: f32, height: f32 },
}

/// Browser input waiting for the next frame.
///
/// Listeners fire between animation frames; the runner takes everything queued so far
/// at the top of a tick, so one frame sees every move since the previous one.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Take the queued events in arrival order, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
