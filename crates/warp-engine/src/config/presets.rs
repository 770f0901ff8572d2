use super::{BackdropConfig, ConfigError, FieldConfig, FieldKind, Span, WarpConfig};
use crate::renderer::color::Rgba;

impl FieldConfig {
    /// Small white stars drifting right and slightly down; streaks in warp.
    pub fn stars() -> Self {
        Self::default()
    }

    /// Gold "chemistry" dust: glowing atoms, a few three-atom clusters, slow spin.
    pub fn dust() -> Self {
        Self {
            kind: FieldKind::Drift { bias: 1.0 / 3.0 },
            count: 45,
            palette: vec![Rgba::GOLD],
            speed_factor: Span::fixed(0.3),
            size: Span::new(1.0, 2.5),
            opacity: Span::new(0.2, 0.5),
            jitter: 0.15,
            spin: 0.01,
            cluster_enabled: true,
            cluster_chance: 0.15,
            cluster_size: Span::new(2.0, 3.5),
            glow: 15.0,
            cluster_glow: 20.0,
            ring_above: Some(2.0),
            streaks: false,
            ..Self::default()
        }
    }

    /// Stars rushing toward the viewer out of the screen centre.
    pub fn depth_stars() -> Self {
        Self {
            kind: FieldKind::Depth { focal: 128.0 },
            count: 1000,
            speed_factor: Span::fixed(1.0),
            size: Span::fixed(0.0),
            depth_size: 3.0,
            streak_scale: 1.0,
            ..Self::default()
        }
    }
}

impl BackdropConfig {
    pub const PRESETS: [&'static str; 2] = ["nebula", "tunnel"];

    /// Lock-screen background: gold dust behind a layer of white stars.
    pub fn nebula() -> Self {
        Self {
            background: Some(Rgba::BLACK),
            warp: WarpConfig::default(),
            fields: vec![FieldConfig::dust(), FieldConfig::stars()],
        }
    }

    /// Full-screen perspective starfield.
    pub fn tunnel() -> Self {
        Self {
            background: Some(Rgba::BLACK),
            warp: WarpConfig {
                initial_speed: 0.2,
                cruise_speed: 2.0,
                warp_speed: 40.0,
                smoothing: 0.05,
            },
            fields: vec![FieldConfig::depth_stars()],
        }
    }

    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "nebula" => Ok(Self::nebula()),
            "tunnel" => Ok(Self::tunnel()),
            _ => Err(ConfigError::UnknownPreset(name.to_string())),
        }
    }
}
