pub mod color;
pub mod draw;
pub mod instance;
pub mod surface;

// Re-export key types for convenient access
pub use draw::{DrawCommand, DrawList};
pub use surface::{RecordingSurface, Surface};
