//! Tuning for every layer, loadable from JSON.
//!
//! All structs carry `Default`s matching the shipped look, so a JSON document only
//! needs the keys it overrides.

mod error;
mod presets;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};

use crate::core::clock::ClockConfig;
use crate::renderer::color::Rgba;

/// Closed interval `[min, max]` a random attribute is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Span { min, max }
    }

    pub const fn fixed(v: f32) -> Self {
        Span { min: v, max: v }
    }

    pub fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidSpan {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Largest population a single field may hold.
pub const MAX_FIELD_COUNT: usize = 20_000;
/// Most trail particles emitted in one frame.
pub const MAX_TRAIL_CAP: usize = 64;

fn check_count(name: &'static str, value: usize, max: usize) -> Result<(), ConfigError> {
    if value <= max {
        Ok(())
    } else {
        Err(ConfigError::TooLarge { name, value, max })
    }
}

fn check_seconds(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { name, value })
    }
}

fn check(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value, min, max })
    }
}

/// Eased speed shared by every field of a backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    /// Speed at mount time, before easing starts.
    pub initial_speed: f32,
    /// Target while not warping.
    pub cruise_speed: f32,
    /// Target while warping.
    pub warp_speed: f32,
    /// Fraction of the remaining gap closed each step, in (0, 1).
    pub smoothing: f32,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            initial_speed: 0.2,
            cruise_speed: 0.5,
            warp_speed: 25.0,
            smoothing: 0.05,
        }
    }
}

impl WarpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing > 0.0 && self.smoothing < 1.0) {
            return Err(ConfigError::InvalidSmoothing(self.smoothing));
        }
        check("initial_speed", self.initial_speed, f32::MIN, f32::MAX)?;
        check("cruise_speed", self.cruise_speed, f32::MIN, f32::MAX)?;
        check("warp_speed", self.warp_speed, f32::MIN, f32::MAX)
    }
}

/// Motion model of a particle field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Flat 2D drift along +x, with `bias` of the motion applied along +y.
    Drift { bias: f32 },
    /// Stars flying toward the viewer, perspective-projected with `focal` length.
    Depth { focal: f32 },
}

/// One particle population. Every starfield variant is a choice of these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub kind: FieldKind,
    /// Population size, fixed for the field's lifetime (until the next resize).
    pub count: usize,
    /// Each particle picks one colour at spawn.
    pub palette: Vec<Rgba>,
    /// Per-particle speed multiplier. Larger reads as closer.
    pub speed_factor: Span,
    pub size: Span,
    pub opacity: Span,
    /// Half-range of the constant per-particle drift added on each axis.
    pub jitter: f32,
    /// Half-range of the per-particle rotation speed (radians per step).
    pub spin: f32,
    /// Whether some particles are drawn as three-atom clusters.
    pub cluster_enabled: bool,
    /// Probability a particle spawns as a cluster when clusters are enabled.
    pub cluster_chance: f32,
    pub cluster_size: Span,
    /// Shadow blur applied while cruising.
    pub glow: f32,
    /// Shadow blur for cluster bonds and atoms while cruising.
    pub cluster_glow: f32,
    /// Single particles larger than this get an orbital ring while cruising.
    pub ring_above: Option<f32>,
    /// Whether warp mode stretches particles into streaks.
    pub streaks: bool,
    /// Streak length per unit of speed.
    pub streak_scale: f32,
    /// Streak alpha is `streak_alpha + speed_factor * streak_boost`.
    pub streak_alpha: f32,
    pub streak_boost: f32,
    /// Largest radius a depth star reaches at the near plane.
    pub depth_size: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            kind: FieldKind::Drift { bias: 0.2 },
            count: 350,
            palette: vec![Rgba::WHITE],
            speed_factor: Span::new(0.3, 0.7),
            size: Span::new(0.0, 1.1),
            opacity: Span::fixed(1.0),
            jitter: 0.0,
            spin: 0.0,
            cluster_enabled: false,
            cluster_chance: 0.15,
            cluster_size: Span::new(2.0, 3.5),
            glow: 0.0,
            cluster_glow: 20.0,
            ring_above: None,
            streaks: true,
            streak_scale: 2.0,
            streak_alpha: 0.4,
            streak_boost: 0.4,
            depth_size: 3.0,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        check_count("count", self.count, MAX_FIELD_COUNT)?;
        match self.kind {
            FieldKind::Drift { bias } => check("bias", bias, -10.0, 10.0)?,
            FieldKind::Depth { focal } => check("focal", focal, f32::MIN_POSITIVE, f32::MAX)?,
        }
        self.speed_factor.validate("speed_factor")?;
        self.size.validate("size")?;
        self.opacity.validate("opacity")?;
        self.cluster_size.validate("cluster_size")?;
        check("cluster_chance", self.cluster_chance, 0.0, 1.0)?;
        check("jitter", self.jitter, 0.0, f32::MAX)?;
        check("spin", self.spin, 0.0, f32::MAX)?;
        check("glow", self.glow, 0.0, f32::MAX)?;
        check("cluster_glow", self.cluster_glow, 0.0, f32::MAX)?;
        check("streak_scale", self.streak_scale, 0.0, f32::MAX)?;
        check("depth_size", self.depth_size, 0.0, f32::MAX)?;
        if let Some(ring) = self.ring_above {
            check("ring_above", ring, 0.0, f32::MAX)?;
        }
        Ok(())
    }
}

/// A full-viewport animated background: shared warp drive plus stacked fields
/// (drawn back to front).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Fill drawn before the fields each frame; `None` clears to transparent.
    pub background: Option<Rgba>,
    pub warp: WarpConfig,
    pub fields: Vec<FieldConfig>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self::nebula()
    }
}

impl BackdropConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.warp.validate()?;
        self.fields.iter().try_for_each(FieldConfig::validate)
    }
}

/// Pointer-following glow trail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Most particles emitted in one frame.
    pub cap: usize,
    /// Pointer travel (per frame) at or below which nothing is emitted.
    pub min_distance: f32,
    pub speed: Span,
    /// Life lost per step, life starting at 1.
    pub decay: Span,
    pub size: Span,
    pub color: Rgba,
    /// Shadow blur per unit of particle radius.
    pub glow_factor: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            cap: 8,
            min_distance: 1.0,
            speed: Span::new(0.2, 0.7),
            decay: Span::new(0.01, 0.03),
            size: Span::new(0.5, 2.5),
            color: Rgba::WHITE,
            glow_factor: 2.0,
        }
    }
}

impl TrailConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_count("cap", self.cap, MAX_TRAIL_CAP)?;
        self.speed.validate("speed")?;
        self.decay.validate("decay")?;
        self.size.validate("size")?;
        check("min_distance", self.min_distance, 0.0, f32::MAX)?;
        check("glow_factor", self.glow_factor, 0.0, f32::MAX)?;
        // A zero decay would keep particles alive forever.
        check("decay.min", self.decay.min, f32::MIN_POSITIVE, 1.0)
    }
}

/// Playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub src: String,
    #[serde(default)]
    pub artist: String,
}

/// Top-level configuration for the whole experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceConfig {
    /// Compared case-insensitively. Not a security boundary.
    pub passcode: String,
    /// How long the warp runs before the presentation unlocks.
    pub warp_seconds: f64,
    /// How long a rejected attempt keeps the error flag raised.
    pub error_seconds: f64,
    pub tracks: Vec<Track>,
    pub backdrop: BackdropConfig,
    pub trail: TrailConfig,
    pub clock: ClockConfig,
    /// Fixed seed for reproducible fields; hosts pick one when absent.
    pub seed: Option<u64>,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            passcode: "eureka".to_string(),
            warp_seconds: 0.8,
            error_seconds: 0.5,
            tracks: Vec::new(),
            backdrop: BackdropConfig::default(),
            trail: TrailConfig::default(),
            clock: ClockConfig::default(),
            seed: None,
        }
    }
}

impl ExperienceConfig {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_seconds("warp_seconds", self.warp_seconds)?;
        check_seconds("error_seconds", self.error_seconds)?;
        self.clock.validate()?;
        self.backdrop.validate()?;
        self.trail.validate()
    }
}
