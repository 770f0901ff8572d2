use glam::{Vec2, Vec3};

use crate::renderer::color::{clamp_unit, Rgba};

/// Whether a dust particle draws as one atom or a bonded three-atom cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterRole {
    #[default]
    Single,
    Cluster,
}

/// One particle record shared by every field variant and the cursor trail.
///
/// Drift fields use `pos.xy` and leave `pos.z` at 0; depth fields use all three axes.
/// `life` doubles as opacity and always stays within [0, 1].
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec3,
    /// Constant per-step drift (dust jitter) or velocity (trail).
    pub vel: Vec2,
    pub size: f32,
    /// Parallax multiplier applied to the shared speed.
    pub speed_factor: f32,
    life: f32,
    /// Life lost per update; 0 for recycled fields.
    pub decay: f32,
    pub color: Rgba,
    pub role: ClusterRole,
    pub rotation: f32,
    pub spin: f32,
    /// Number of times this slot has been recycled.
    pub generation: u32,
}

impl Particle {
    pub fn new(pos: Vec3, size: f32, color: Rgba) -> Self {
        Particle {
            pos,
            vel: Vec2::ZERO,
            size: size.max(0.0),
            speed_factor: 1.0,
            life: 1.0,
            decay: 0.0,
            color,
            role: ClusterRole::Single,
            rotation: 0.0,
            spin: 0.0,
            generation: 0,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_speed_factor(mut self, factor: f32) -> Self {
        self.speed_factor = factor;
        self
    }

    pub fn with_life(mut self, life: f32) -> Self {
        self.set_life(life);
        self
    }

    pub fn with_decay(mut self, decay: f32) -> Self {
        self.decay = decay.max(0.0);
        self
    }

    pub fn with_role(mut self, role: ClusterRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_spin(mut self, rotation: f32, spin: f32) -> Self {
        self.rotation = rotation;
        self.spin = spin;
        self
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn set_life(&mut self, life: f32) {
        self.life = clamp_unit(life);
    }

    pub fn xy(&self) -> Vec2 {
        self.pos.truncate()
    }

    pub fn is_cluster(&self) -> bool {
        self.role == ClusterRole::Cluster
    }

    /// Trail step: integrate velocity and burn life. Returns false once expired.
    pub fn fade_step(&mut self) -> bool {
        self.pos.x += self.vel.x;
        self.pos.y += self.vel.y;
        let remaining = self.life - self.decay;
        self.life = remaining.max(0.0);
        remaining > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn life_is_clamped() {
        let p = Particle::new(Vec3::ZERO, 1.0, Rgba::WHITE).with_life(3.0);
        assert_eq!(p.life(), 1.0);
        let p = p.with_life(-1.0);
        assert_eq!(p.life(), 0.0);
    }

    #[test]
    fn negative_size_becomes_zero() {
        let p = Particle::new(Vec3::ZERO, -2.0, Rgba::WHITE);
        assert_eq!(p.size, 0.0);
    }

    #[test]
    fn fade_step_moves_and_expires() {
        let mut p = Particle::new(Vec3::ZERO, 1.0, Rgba::WHITE)
            .with_velocity(Vec2::new(1.0, -0.5))
            .with_decay(0.4);
        assert!(p.fade_step());
        assert!(p.fade_step());
        assert_eq!(p.xy(), Vec2::new(2.0, -1.0));
        assert!(!p.fade_step(), "third step drops life below zero");
        assert_eq!(p.life(), 0.0);
    }

    #[test]
    fn exact_zero_counts_as_expired() {
        let mut p = Particle::new(Vec3::ZERO, 1.0, Rgba::WHITE)
            .with_life(0.5)
            .with_decay(0.5);
        assert!(!p.fade_step());
    }
}
