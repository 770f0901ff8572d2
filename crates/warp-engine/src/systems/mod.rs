pub mod warp;
pub mod field;
pub mod starfield;
pub mod trail;
