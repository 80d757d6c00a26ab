use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Placement of one object: translation, per-axis rotation in degrees, scale.
///
/// The composed order is `T * Rx * Ry * Rz * S`, so a local point is scaled
/// first, then rotated about Z, Y, X, then translated. Every literal placement
/// in the room layout assumes this order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformParams {
    pub translate: [f32; 3],
    pub rotate: [f32; 3],
    pub scale: [f32; 3],
}

impl TransformParams {
    pub const IDENTITY: Self = Self {
        translate: [0.0; 3],
        rotate: [0.0; 3],
        scale: [1.0; 3],
    };

    /// Same argument order as [`build_model`]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        tx: f32,
        ty: f32,
        tz: f32,
        rx: f32,
        ry: f32,
        rz: f32,
        sx: f32,
        sy: f32,
        sz: f32,
    ) -> Self {
        Self {
            translate: [tx, ty, tz],
            rotate: [rx, ry, rz],
            scale: [sx, sy, sz],
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        let [tx, ty, tz] = self.translate;
        let [rx, ry, rz] = self.rotate;
        let [sx, sy, sz] = self.scale;
        build_model(tx, ty, tz, rx, ry, rz, sx, sy, sz)
    }

    /// Local-space point to world space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.to_matrix().transform_point3(point)
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Model matrix from nine scalars. Zero scale is allowed and flattens that axis.
#[allow(clippy::too_many_arguments)]
pub fn build_model(
    tx: f32,
    ty: f32,
    tz: f32,
    rx_deg: f32,
    ry_deg: f32,
    rz_deg: f32,
    sx: f32,
    sy: f32,
    sz: f32,
) -> Mat4 {
    Mat4::from_translation(Vec3::new(tx, ty, tz))
        * Mat4::from_rotation_x(rx_deg.to_radians())
        * Mat4::from_rotation_y(ry_deg.to_radians())
        * Mat4::from_rotation_z(rz_deg.to_radians())
        * Mat4::from_scale(Vec3::new(sx, sy, sz))
}

/// Rotation about `pivot` instead of the origin: `T(pivot) * R * T(-pivot)`
pub fn rotate_about(pivot: Vec3, axis: Vec3, angle_deg: f32) -> Mat4 {
    let axis = axis.try_normalize().unwrap_or(Vec3::Y);
    Mat4::from_translation(pivot)
        * Mat4::from_axis_angle(axis, angle_deg.to_radians())
        * Mat4::from_translation(-pivot)
}
