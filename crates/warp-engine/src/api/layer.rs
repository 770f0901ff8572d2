use glam::Vec2;

use crate::core::view_state::ViewState;
use crate::renderer::draw::DrawList;

/// Everything a layer may read during one frame. Captured once at the start of the
/// frame, so a flag flipping mid-frame is only seen on the next one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frame {
    pub view: ViewState,
    /// Latest pointer or first-touch position, if the pointer has been seen.
    pub pointer: Option<Vec2>,
}

/// The contract every animated canvas layer fulfils.
///
/// A host calls `update` zero or more times per frame (see
/// [`StepClock`](crate::core::clock::StepClock)) and then `render` exactly once.
/// Layers own their particles and never write shared state.
pub trait Layer {
    /// The drawing surface changed size. Fixed-size populations rebuild here.
    fn resize(&mut self, width: f32, height: f32);

    /// Advance the simulation by one step.
    fn update(&mut self, frame: &Frame);

    /// Describe the current state as draw commands.
    fn render(&self, frame: &Frame, out: &mut DrawList);
}
