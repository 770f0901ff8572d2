pub mod api;
pub mod core;
pub mod components;
pub mod config;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::layer::{Frame, Layer};
pub use config::{
    BackdropConfig, ConfigError, ExperienceConfig, FieldConfig, FieldKind, Span, Track,
    TrailConfig, WarpConfig,
};
pub use core::clock::{ClockConfig, StepClock};
pub use core::director::Director;
pub use core::frame_loop::{LoopControl, LoopToken};
pub use core::rng::Rng;
pub use core::unlock::{Attempt, Phase, UnlockSequence};
pub use core::view_state::{Section, ViewReader, ViewState, ViewStore};
pub use components::particle::{ClusterRole, Particle};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::color::Rgba;
pub use renderer::draw::{DrawCommand, DrawList};
pub use renderer::instance::{DrawInstance, InstanceBuffer};
pub use renderer::surface::{RecordingSurface, Surface};
pub use systems::field::ParticleField;
pub use systems::starfield::Starfield;
pub use systems::trail::CursorTrail;
pub use systems::warp::WarpDrive;
