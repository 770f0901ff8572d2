//! Backend-neutral draw commands.
//!
//! Layers never touch a canvas; they push commands into a [`DrawList`] and a
//! [`Surface`](super::surface::Surface) replays them. Every push is sanitised here so
//! no backend ever sees a negative radius, a non-finite coordinate or an alpha
//! outside [0, 1].

use glam::Vec2;

use super::color::{clamp_unit, Rgba};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Paint the whole surface.
    Fill { color: Rgba },
    /// Reset the whole surface to transparent.
    Clear,
    Disc {
        center: Vec2,
        radius: f32,
        color: Rgba,
        /// Shadow blur radius, 0 for none.
        glow: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
        glow: f32,
    },
    /// Stroked ellipse outline.
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        width: f32,
        color: Rgba,
    },
}

#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    skipped: usize,
}

fn finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn glow(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            skipped: 0,
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.skipped = 0;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands rejected by sanitisation since the last `clear`.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn accept(&mut self, ok: bool, command: impl FnOnce() -> DrawCommand) -> bool {
        if ok {
            self.commands.push(command());
        } else {
            self.skipped += 1;
        }
        ok
    }

    pub fn fill(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Fill {
            color: color.with_alpha(color.a),
        });
    }

    pub fn clear_surface(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    /// Filled disc. Returns false when the disc was skipped (zero or invalid size,
    /// fully transparent, or non-finite position).
    pub fn disc(&mut self, center: Vec2, radius: f32, color: Rgba, glow_radius: f32) -> bool {
        let color = color.with_alpha(color.a);
        let ok = finite(center) && positive(radius) && color.a > 0.0;
        self.accept(ok, || DrawCommand::Disc {
            center,
            radius,
            color,
            glow: glow(glow_radius),
        })
    }

    /// Straight stroke. Zero-length lines are skipped.
    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba, glow_radius: f32) -> bool {
        let color = color.with_alpha(color.a);
        let ok = finite(from) && finite(to) && from != to && positive(width) && color.a > 0.0;
        self.accept(ok, || DrawCommand::Line {
            from,
            to,
            width,
            color,
            glow: glow(glow_radius),
        })
    }

    pub fn ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, width: f32, color: Rgba) -> bool {
        let color = color.with_alpha(color.a);
        let ok = finite(center)
            && positive(radii.x)
            && positive(radii.y)
            && rotation.is_finite()
            && positive(width)
            && color.a > 0.0;
        self.accept(ok, || DrawCommand::Ellipse {
            center,
            radii,
            rotation,
            width,
            color,
        })
    }
}

impl DrawCommand {
    /// Alpha this command will be drawn with.
    pub fn alpha(&self) -> f32 {
        match self {
            DrawCommand::Clear => 0.0,
            DrawCommand::Fill { color }
            | DrawCommand::Disc { color, .. }
            | DrawCommand::Line { color, .. }
            | DrawCommand::Ellipse { color, .. } => clamp_unit(color.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_disc_is_skipped() {
        let mut list = DrawList::new();
        assert!(!list.disc(Vec2::ZERO, 0.0, Rgba::WHITE, 0.0));
        assert!(!list.disc(Vec2::ZERO, -1.0, Rgba::WHITE, 0.0));
        assert!(!list.disc(Vec2::ZERO, f32::NAN, Rgba::WHITE, 0.0));
        assert!(list.is_empty());
        assert_eq!(list.skipped(), 3);
    }

    #[test]
    fn non_finite_position_is_skipped() {
        let mut list = DrawList::new();
        assert!(!list.disc(Vec2::new(f32::INFINITY, 0.0), 1.0, Rgba::WHITE, 0.0));
        assert!(!list.line(Vec2::ZERO, Vec2::new(0.0, f32::NAN), 1.0, Rgba::WHITE, 0.0));
    }

    #[test]
    fn alpha_is_clamped_not_rejected() {
        let mut list = DrawList::new();
        let mut hot = Rgba::WHITE;
        hot.a = 1.6;
        assert!(list.disc(Vec2::ZERO, 1.0, hot, 0.0));
        assert_eq!(list.commands()[0].alpha(), 1.0);
    }

    #[test]
    fn transparent_and_degenerate_lines_are_skipped() {
        let mut list = DrawList::new();
        assert!(!list.disc(Vec2::ZERO, 1.0, Rgba::WHITE.with_alpha(0.0), 0.0));
        assert!(!list.line(Vec2::ONE, Vec2::ONE, 1.0, Rgba::WHITE, 0.0));
        assert!(list.line(Vec2::ZERO, Vec2::ONE, 1.0, Rgba::WHITE, -4.0));
        match list.commands()[0] {
            DrawCommand::Line { glow, .. } => assert_eq!(glow, 0.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn clear_resets_counters() {
        let mut list = DrawList::new();
        list.fill(Rgba::BLACK);
        list.disc(Vec2::ZERO, 0.0, Rgba::WHITE, 0.0);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.skipped(), 0);
    }
}
