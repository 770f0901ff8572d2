use thiserror::Error;

/// Everything that can be wrong with externally supplied configuration.
/// The per-frame paths never produce errors; they clamp or skip instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`{name}` must be a finite span with min <= max, got [{min}, {max}]")]
    InvalidSpan { name: &'static str, min: f32, max: f32 },

    #[error("`{name}` must be finite and within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("`{name}` must be at most {max}, got {value}")]
    TooLarge {
        name: &'static str,
        value: usize,
        max: usize,
    },

    #[error("`{name}` must be a finite, non-negative number of seconds, got {value}")]
    InvalidDuration { name: &'static str, value: f64 },

    #[error("smoothing factor must lie strictly between 0 and 1, got {0}")]
    InvalidSmoothing(f32),

    #[error("`{0}` is not a colour; expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("field palette must contain at least one colour")]
    EmptyPalette,

    #[error("unknown backdrop preset `{0}`")]
    UnknownPreset(String),

    #[error("unknown section `{0}`")]
    UnknownSection(String),
}
