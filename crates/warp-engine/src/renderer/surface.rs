//! Seam between the engine and a concrete drawing backend.
//!
//! The engine only produces [`DrawList`]s. A backend (Canvas 2D in the web bridge,
//! or a recorder in tests) owns one drawing surface exclusively and replays lists
//! onto it.

use super::draw::DrawList;

pub trait Surface {
    /// Backend identifier (e.g. "canvas2d").
    fn backend(&self) -> &'static str;

    /// Current drawable size in CSS pixels.
    fn size(&self) -> (f32, f32);

    /// Match the drawable to new viewport dimensions.
    fn resize(&mut self, width: f32, height: f32);

    /// Replay one frame of commands, in order.
    fn present(&mut self, list: &DrawList);
}

/// Surface that keeps the last presented frame instead of drawing it. Lets native
/// code run a full tick-and-present cycle without a browser.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub frames: usize,
    pub last: Vec<super::draw::DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

impl Surface for RecordingSurface {
    fn backend(&self) -> &'static str {
        "recording"
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn present(&mut self, list: &DrawList) {
        self.frames += 1;
        self.last.clear();
        self.last.extend_from_slice(list.commands());
    }
}
