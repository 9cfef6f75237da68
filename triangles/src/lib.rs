pub mod camera;
pub mod config;
pub mod pacing;
pub mod scene;
pub mod shader_source;

pub use scene::{DemoKind, Scene};
