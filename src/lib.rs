pub mod animation;
pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod input;
pub mod scene;
pub mod traits;
pub mod transform;
pub mod types;

pub use animation::{RotationAnimator, SceneAnimationState, StepMode};
pub use camera::{Camera, CameraMovement, CameraSettings};
pub use scene::{FrameMatrices, RoomScene};
pub use transform::{build_model, TransformParams};
