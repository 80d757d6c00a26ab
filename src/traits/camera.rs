use glam::{Mat4, Vec3};

/// Read side of a camera, queried once per frame by the draw stage
pub trait CameraController {
    /// Get the view matrix for rendering
    fn view_matrix(&self) -> Mat4;

    /// Get the camera position in world space
    fn position(&self) -> Vec3;

    /// Get the camera forward direction
    fn forward(&self) -> Vec3;
}
