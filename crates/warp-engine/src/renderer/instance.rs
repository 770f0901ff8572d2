use bytemuck::{Pod, Zeroable};

use super::draw::{DrawCommand, DrawList};

/// Flat per-command record for hosts that render from shared memory.
/// 12 floats = 48 bytes stride.
///
/// Geometry fields by `kind`:
/// - fill / clear: unused
/// - disc: `x0, y0` centre, `size` radius
/// - line: `x0, y0` → `x1, y1`, `size` width
/// - ellipse: `x0, y0` centre, `x1, y1` radii, `size` stroke width
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    pub kind: f32,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub size: f32,
    pub rotation: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub glow: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const KIND_FILL: f32 = 0.0;
    pub const KIND_CLEAR: f32 = 1.0;
    pub const KIND_DISC: f32 = 2.0;
    pub const KIND_LINE: f32 = 3.0;
    pub const KIND_ELLIPSE: f32 = 4.0;
}

impl From<&DrawCommand> for DrawInstance {
    fn from(command: &DrawCommand) -> Self {
        let rgb = |c: &super::color::Rgba| (c.r as f32 / 255.0, c.g as f32 / 255.0, c.b as f32 / 255.0);
        match command {
            DrawCommand::Fill { color } => {
                let (r, g, b) = rgb(color);
                DrawInstance { kind: Self::KIND_FILL, r, g, b, a: color.a, ..Default::default() }
            }
            DrawCommand::Clear => DrawInstance { kind: Self::KIND_CLEAR, ..Default::default() },
            DrawCommand::Disc { center, radius, color, glow } => {
                let (r, g, b) = rgb(color);
                DrawInstance {
                    kind: Self::KIND_DISC,
                    x0: center.x,
                    y0: center.y,
                    size: *radius,
                    r, g, b,
                    a: color.a,
                    glow: *glow,
                    ..Default::default()
                }
            }
            DrawCommand::Line { from, to, width, color, glow } => {
                let (r, g, b) = rgb(color);
                DrawInstance {
                    kind: Self::KIND_LINE,
                    x0: from.x,
                    y0: from.y,
                    x1: to.x,
                    y1: to.y,
                    size: *width,
                    r, g, b,
                    a: color.a,
                    glow: *glow,
                    ..Default::default()
                }
            }
            DrawCommand::Ellipse { center, radii, rotation, width, color } => {
                let (r, g, b) = rgb(color);
                DrawInstance {
                    kind: Self::KIND_ELLIPSE,
                    x0: center.x,
                    y0: center.y,
                    x1: radii.x,
                    y1: radii.y,
                    size: *width,
                    rotation: *rotation,
                    r, g, b,
                    a: color.a,
                    ..Default::default()
                }
            }
        }
    }
}

/// Packed copy of the latest frame's draw list.
pub struct InstanceBuffer {
    instances: Vec<DrawInstance>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    /// Replace the contents with a packed copy of `list`.
    pub fn pack(&mut self, list: &DrawList) {
        self.instances.clear();
        self.instances.extend(list.commands().iter().map(DrawInstance::from));
    }

    pub fn instances(&self) -> &[DrawInstance] {
        &self.instances
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for reads from linear memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}
