//! Fixed-size, recycling particle field.
//!
//! One engine covers every starfield variant: flat drifting stars, gold dust with
//! clusters, and the perspective "tunnel". The population is created on construction
//! and on every resize, and particles that leave the canvas are recycled in place.

use glam::{Vec2, Vec3};

use crate::components::particle::{ClusterRole, Particle};
use crate::config::{FieldConfig, FieldKind};
use crate::core::rng::Rng;
use crate::renderer::color::clamp_unit;
use crate::renderer::draw::DrawList;

/// Closest a depth star may get before projection, avoiding a divide by zero.
const NEAR_PLANE: f32 = 0.1;

pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    rng: Rng,
}

impl ParticleField {
    pub fn new(config: FieldConfig, width: f32, height: f32, rng: Rng) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(config.count),
            config,
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            rng,
        };
        field.populate();
        field
    }

    pub fn config(&self) -> &FieldConfig {
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

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Adopt new canvas dimensions and rebuild the whole population.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        self.populate();
    }

    fn depth(&self) -> f32 {
        self.width.max(1.0)
    }

    fn populate(&mut self) {
        self.particles.clear();
        for _ in 0..self.config.count {
            let p = self.spawn();
            self.particles.push(p);
        }
        log::debug!(
            "field: populated {} particles at {}x{}",
            self.particles.len(),
            self.width,
            self.height
        );
    }

    fn spawn(&mut self) -> Particle {
        let c = &self.config;
        let rng = &mut self.rng;

        let role = if c.cluster_enabled && rng.chance(c.cluster_chance) {
            ClusterRole::Cluster
        } else {
            ClusterRole::Single
        };
        let size = match role {
            ClusterRole::Cluster => rng.range(c.cluster_size.min, c.cluster_size.max),
            ClusterRole::Single => rng.range(c.size.min, c.size.max),
        };
        let color = c.palette[rng.next_int(c.palette.len() as u32) as usize];
        let pos = match c.kind {
            FieldKind::Drift { .. } => Vec3::new(
                rng.range(0.0, self.width),
                rng.range(0.0, self.height),
                0.0,
            ),
            FieldKind::Depth { .. } => {
                let depth = self.width.max(1.0);
                Vec3::new(
                    rng.signed(self.width / 2.0),
                    rng.signed(self.height / 2.0),
                    depth * (1.0 - rng.next_f32()),
                )
            }
        };

        Particle::new(pos, size, color)
            .with_role(role)
            .with_speed_factor(rng.range(c.speed_factor.min, c.speed_factor.max))
            .with_life(rng.range(c.opacity.min, c.opacity.max))
            .with_velocity(Vec2::new(rng.signed(c.jitter), rng.signed(c.jitter)))
            .with_spin(rng.angle(), rng.signed(c.spin))
    }

    /// Advance every particle by the shared `speed` and recycle the ones that left
    /// the canvas. Returns how many were recycled this step.
    pub fn update(&mut self, speed: f32) -> usize {
        match self.config.kind {
            FieldKind::Drift { bias } => self.update_drift(speed, bias),
            FieldKind::Depth { .. } => self.update_depth(speed),
        }
    }

    fn update_drift(&mut self, speed: f32, bias: f32) -> usize {
        let (w, h) = (self.width, self.height);
        let rng = &mut self.rng;
        let mut recycled = 0;

        for p in &mut self.particles {
            let advance = speed * p.speed_factor;
            p.pos.x += advance + p.vel.x;
            p.pos.y += advance * bias + p.vel.y;
            p.rotation += p.spin;

            let mut wrapped = false;
            // Primary axis: re-enter from the opposite edge at a fresh height.
            if !(0.0..=w).contains(&p.pos.x) {
                p.pos.x = if p.pos.x > w { 0.0 } else { w };
                p.pos.y = rng.range(0.0, h);
                wrapped = true;
            }
            if !(0.0..=h).contains(&p.pos.y) {
                p.pos.y = if p.pos.y > h { 0.0 } else { h };
                p.pos.x = rng.range(0.0, w);
                wrapped = true;
            }
            if wrapped {
                p.generation = p.generation.wrapping_add(1);
                recycled += 1;
            }
        }
        recycled
    }

    fn update_depth(&mut self, speed: f32) -> usize {
        let (w, h) = (self.width, self.height);
        let depth = self.depth();
        let rng = &mut self.rng;
        let mut recycled = 0;

        for p in &mut self.particles {
            p.pos.z -= speed * p.speed_factor;
            if !(p.pos.z > 0.0 && p.pos.z <= depth) {
                p.pos = Vec3::new(rng.signed(w / 2.0), rng.signed(h / 2.0), depth);
                p.generation = p.generation.wrapping_add(1);
                recycled += 1;
            }
        }
        recycled
    }

    /// Emit draw commands for the current positions.
    pub fn render(&self, speed: f32, warping: bool, out: &mut DrawList) {
        match self.config.kind {
            FieldKind::Drift { bias } => self.render_drift(speed, bias, warping, out),
            FieldKind::Depth { focal } => self.render_depth(speed, focal, warping, out),
        }
    }

    fn render_drift(&self, speed: f32, bias: f32, warping: bool, out: &mut DrawList) {
        let c = &self.config;
        let streak_len = (speed * c.streak_scale).max(0.0);
        let travel = Vec2::new(1.0, bias);

        for p in &self.particles {
            if p.size <= 0.0 {
                continue;
            }
            let at = p.xy();
            let color = p.color.with_alpha(p.life());

            if warping && c.streaks {
                let alpha = c.streak_alpha + p.speed_factor * c.streak_boost;
                out.line(at, at - travel * streak_len, p.size, p.color.with_alpha(alpha), 0.0);
            } else if warping {
                out.disc(at, p.size, color, 0.0);
            } else if p.is_cluster() {
                self.render_cluster(p, out);
            } else {
                out.disc(at, p.size, color, c.glow);
                if c.ring_above.is_some_and(|r| p.size > r) {
                    let radii = Vec2::new(p.size * 3.0, p.size);
                    out.ellipse(at, radii, p.rotation, 0.5, color.fade(0.3));
                }
            }
        }
    }

    /// Centre atom bonded to two smaller satellites, rotated as a rigid body.
    fn render_cluster(&self, p: &Particle, out: &mut DrawList) {
        let s = p.size;
        let center = p.xy();
        let turn = Vec2::from_angle(p.rotation);
        let first = center + turn.rotate(Vec2::new(s * 4.0, 0.0));
        let second = center + turn.rotate(Vec2::new(-s * 2.0, s * 3.0));

        let glow = self.config.cluster_glow;
        let bond = p.color.with_alpha(p.life() * 0.4);
        out.line(center, first, 1.0, bond, glow);
        out.line(center, second, 1.0, bond, glow);

        let atom = p.color.with_alpha(p.life() + 0.1);
        out.disc(center, s, atom, glow);
        out.disc(first, s * 0.7, atom, glow);
        out.disc(second, s * 0.5, atom, glow);
    }

    fn render_depth(&self, speed: f32, focal: f32, warping: bool, out: &mut DrawList) {
        let c = &self.config;
        let depth = self.depth();
        let center = Vec2::new(self.width / 2.0, self.height / 2.0);
        let project = |pos: Vec3| pos.truncate() * (focal / pos.z.max(NEAR_PLANE)) + center;
        let on_screen =
            |v: Vec2| v.x >= 0.0 && v.x <= self.width && v.y >= 0.0 && v.y <= self.height;

        for p in &self.particles {
            let nearness = clamp_unit(1.0 - p.pos.z / depth);
            let size = nearness * c.depth_size;
            let screen = project(p.pos);
            if size <= 0.0 || !on_screen(screen) {
                continue;
            }
            let color = p.color.with_alpha(nearness);
            if warping && c.streaks {
                let trail = (speed * p.speed_factor * c.streak_scale).max(0.0);
                let behind = project(p.pos + Vec3::new(0.0, 0.0, trail));
                if !out.line(behind, screen, size, color, 0.0) {
                    out.disc(screen, size, color, 0.0);
                }
            } else {
                out.disc(screen, size, color, 0.0);
            }
        }
    }
}

fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
