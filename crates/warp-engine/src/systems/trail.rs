//! Glowing dust that follows the pointer.
//!
//! Unlike the recycling fields, the trail population is unbounded: bursts append,
//! and particles are dropped as soon as their life runs out.

use glam::{Vec2, Vec3};

use crate::api::layer::{Frame, Layer};
use crate::components::particle::Particle;
use crate::config::TrailConfig;
use crate::core::rng::Rng;
use crate::renderer::draw::DrawList;

pub struct CursorTrail {
    config: TrailConfig,
    particles: Vec<Particle>,
    last: Option<Vec2>,
    current: Option<Vec2>,
    rng: Rng,
}

impl CursorTrail {
    pub fn new(config: TrailConfig, rng: Rng) -> Self {
        Self {
            particles: Vec::new(),
            config,
            last: None,
            current: None,
            rng,
        }
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Record where the pointer is now. The first sighting only seeds the
    /// position, so the trail never streaks in from an arbitrary origin.
    pub fn point_to(&mut self, pos: Vec2) {
        if !pos.is_finite() {
            return;
        }
        if self.last.is_none() {
            self.last = Some(pos);
        }
        self.current = Some(pos);
    }

    /// Spawn particles along the segment travelled since the last emission.
    /// Returns the number spawned.
    pub fn emit(&mut self) -> usize {
        let (Some(from), Some(to)) = (self.last, self.current) else {
            return 0;
        };
        self.last = Some(to);

        let travel = to - from;
        let distance = travel.length();
        if !(distance > self.config.min_distance) {
            return 0;
        }

        let count = (distance.floor() as usize).min(self.config.cap);
        let c = self.config;
        for _ in 0..count {
            let t = self.rng.next_f32();
            let at = from + travel * t;
            let heading = Vec2::from_angle(self.rng.angle());
            let speed = self.rng.range(c.speed.min, c.speed.max);
            let particle = Particle::new(
                Vec3::new(at.x, at.y, 0.0),
                self.rng.range(c.size.min, c.size.max),
                c.color,
            )
            .with_velocity(heading * speed)
            .with_decay(self.rng.range(c.decay.min, c.decay.max));
            self.particles.push(particle);
        }
        count
    }

    /// Move and fade every particle, dropping the expired ones. Returns how many
    /// were dropped.
    pub fn fade(&mut self) -> usize {
        let before = self.particles.len();
        self.particles.retain_mut(Particle::fade_step);
        before - self.particles.len()
    }

    /// Emit draw commands: a glowing disc per particle, alpha equal to its life.
    pub fn draw(&self, out: &mut DrawList) {
        let glow = self.config.glow_factor;
        for p in &self.particles {
            out.disc(p.xy(), p.size, p.color.with_alpha(p.life()), p.size * glow);
        }
    }
}

impl Layer for CursorTrail {
    fn resize(&mut self, _width: f32, _height: f32) {}

    fn update(&mut self, frame: &Frame) {
        if let Some(pointer) = frame.pointer {
            self.point_to(pointer);
        }
        self.emit();
        self.fade();
    }

    fn render(&self, _frame: &Frame, out: &mut DrawList) {
        out.clear_surface();
        self.draw(out);
    }
}
