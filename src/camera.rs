use glam::{Mat4, Vec3};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::traits::CameraController;

pub const YAW: f32 = -90.0;
pub const PITCH: f32 = 0.0;
pub const SPEED: f32 = 2.5;
pub const SENSITIVITY: f32 = 0.1;
pub const ZOOM: f32 = 45.0;
pub const TURN_STEP: f32 = 0.5;

pub const PITCH_LIMIT: f32 = 89.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;

/// Discrete camera commands fed by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    RollLeft,
    RollRight,
}

impl CameraMovement {
    /// Every command, in dispatch order
    pub const ALL: [CameraMovement; 12] = [
        CameraMovement::Forward,
        CameraMovement::Backward,
        CameraMovement::Left,
        CameraMovement::Right,
        CameraMovement::Up,
        CameraMovement::Down,
        CameraMovement::PitchUp,
        CameraMovement::PitchDown,
        CameraMovement::YawLeft,
        CameraMovement::YawRight,
        CameraMovement::RollLeft,
        CameraMovement::RollRight,
    ];

    /// True for commands that move the position rather than the orientation
    pub const fn is_translation(self) -> bool {
        matches!(
            self,
            CameraMovement::Forward
                | CameraMovement::Backward
                | CameraMovement::Left
                | CameraMovement::Right
                | CameraMovement::Up
                | CameraMovement::Down
        )
    }
}

/// Tunables fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// World units per second
    pub movement_speed: f32,
    /// Degrees per pixel of mouse travel
    pub mouse_sensitivity: f32,
    /// Degrees applied per keyboard pitch/yaw/roll command
    pub turn_step: f32,
    /// Initial field of view in degrees
    pub zoom: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_speed: SPEED,
            mouse_sensitivity: SENSITIVITY,
            turn_step: TURN_STEP,
            zoom: ZOOM,
        }
    }
}

/// Euler-angle free-fly camera.
///
/// Orientation is stored as yaw/pitch in degrees and the `front`/`right`/`up`
/// basis is re-derived after every orientation change, so the basis is only
/// readable from outside. Pitch stays within +-89 degrees to keep `right`
/// well defined. Roll is tracked but does not tilt the view.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    roll: f32,
    zoom: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    turn_step: f32,
}

impl Camera {
    /// Camera at `position` with default orientation and settings
    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, Vec3::Y, YAW, PITCH)
    }

    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        Self::with_settings(position, world_up, yaw, pitch, CameraSettings::default())
    }

    pub fn with_settings(
        position: Vec3,
        world_up: Vec3,
        yaw: f32,
        pitch: f32,
        settings: CameraSettings,
    ) -> Self {
        let world_up = world_up.try_normalize().unwrap_or(Vec3::Y);
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: world_up,
            right: Vec3::X,
            world_up,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            roll: 0.0,
            zoom: settings.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            movement_speed: settings.movement_speed,
            mouse_sensitivity: settings.mouse_sensitivity,
            turn_step: settings.turn_step,
        };
        camera.update_vectors();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    /// Field of view in degrees
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    /// Look-at transform from `position` towards `position + front`
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection using `zoom` as the vertical field of view
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.zoom.to_radians(), aspect, near, far)
    }

    /// Apply one keyboard command.
    ///
    /// Translations are scaled by `movement_speed * delta_time`; rotations use
    /// the fixed `turn_step` regardless of frame time.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let delta_time = if delta_time < 0.0 {
            warn!("negative frame delta {delta_time}, treating as zero");
            0.0
        } else {
            delta_time
        };
        let velocity = self.movement_speed * delta_time;

        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Up => self.position += self.world_up * velocity,
            CameraMovement::Down => self.position -= self.world_up * velocity,
            CameraMovement::PitchUp => self.set_pitch(self.pitch + self.turn_step),
            CameraMovement::PitchDown => self.set_pitch(self.pitch - self.turn_step),
            CameraMovement::YawLeft => self.yaw -= self.turn_step,
            CameraMovement::YawRight => self.yaw += self.turn_step,
            CameraMovement::RollLeft => self.roll -= self.turn_step,
            CameraMovement::RollRight => self.roll += self.turn_step,
        }

        if !direction.is_translation() {
            self.update_vectors();
        }
    }

    /// Mouse-look from cursor offsets in pixels; positive y looks up
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        let pitch = self.pitch + y_offset * self.mouse_sensitivity;
        if constrain_pitch {
            self.set_pitch(pitch);
        } else {
            self.pitch = pitch;
        }
        self.update_vectors();
    }

    /// Scroll narrows or widens the field of view
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        // Looking straight along world_up leaves the cross product empty; keep
        // the previous right (minus any front component) or pick any perpendicular.
        self.right = self
            .front
            .cross(self.world_up)
            .try_normalize()
            .or_else(|| (self.right - self.front * self.right.dot(self.front)).try_normalize())
            .unwrap_or_else(|| self.front.any_orthonormal_vector());
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl CameraController for Camera {
    fn view_matrix(&self) -> Mat4 {
        Camera::view_matrix(self)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.front
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn assert_orthonormal(camera: &Camera) {
        let (f, r, u) = (camera.front(), camera.right(), camera.up());
        assert!((f.length() - 1.0).abs() < EPSILON, "front not unit: {f:?}");
        assert!((r.length() - 1.0).abs() < EPSILON, "right not unit: {r:?}");
        assert!((u.length() - 1.0).abs() < EPSILON, "up not unit: {u:?}");
        assert!(f.dot(r).abs() < EPSILON);
        assert!(f.dot(u).abs() < EPSILON);
        assert!(r.dot(u).abs() < EPSILON);
    }

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let camera = Camera::default();
        assert!((camera.front() - Vec3::NEG_Z).length() < EPSILON);
        assert!((camera.right() - Vec3::X).length() < EPSILON);
        assert!((camera.up() - Vec3::Y).length() < EPSILON);
        assert_eq!(camera.zoom(), ZOOM);
    }

    #[test]
    fn forward_moves_along_front() {
        let mut camera = Camera::default();
        camera.process_keyboard(CameraMovement::Forward, 1.0);
        assert!((camera.position() - Vec3::new(0.0, 0.0, -2.5)).length() < EPSILON);
    }

    #[test]
    fn translation_scales_with_delta_time() {
        let mut slow = Camera::default();
        let mut fast = Camera::default();
        slow.process_keyboard(CameraMovement::Right, 0.5);
        fast.process_keyboard(CameraMovement::Right, 1.0);
        assert!((fast.position().x - 2.0 * slow.position().x).abs() < EPSILON);
    }

    #[test]
    fn up_and_down_follow_world_up() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(0.0, 300.0, true);
        camera.process_keyboard(CameraMovement::Up, 2.0);
        assert!((camera.position() - Vec3::new(0.0, 5.0, 0.0)).length() < EPSILON);
        camera.process_keyboard(CameraMovement::Down, 2.0);
        assert!(camera.position().length() < EPSILON);
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut camera = Camera::default();
        camera.process_keyboard(CameraMovement::Forward, -1.0);
        assert_eq!(camera.position(), Vec3::ZERO);
    }

    #[test]
    fn keyboard_rotation_ignores_delta_time() {
        let mut a = Camera::default();
        let mut b = Camera::default();
        a.process_keyboard(CameraMovement::YawRight, 0.001);
        b.process_keyboard(CameraMovement::YawRight, 10.0);
        assert_eq!(a.yaw(), YAW + TURN_STEP);
        assert_eq!(a.yaw(), b.yaw());
        assert_eq!(a.front(), b.front());
    }

    #[test]
    fn keyboard_pitch_is_clamped() {
        let mut camera = Camera::default();
        for _ in 0..1000 {
            camera.process_keyboard(CameraMovement::PitchUp, 0.016);
        }
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        assert_orthonormal(&camera);
    }

    #[test]
    fn roll_accumulates_without_changing_basis() {
        let mut camera = Camera::default();
        let front = camera.front();
        camera.process_keyboard(CameraMovement::RollLeft, 0.016);
        camera.process_keyboard(CameraMovement::RollLeft, 0.016);
        assert_eq!(camera.roll(), -2.0 * TURN_STEP);
        assert_eq!(camera.front(), front);
    }

    #[test]
    fn unconstrained_pitch_can_exceed_limit() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(0.0, 1000.0, false);
        assert!(camera.pitch() > PITCH_LIMIT);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut camera = Camera::default();
        camera.process_mouse_scroll(100.0);
        assert_eq!(camera.zoom(), MIN_ZOOM);
        camera.process_mouse_scroll(-100.0);
        assert_eq!(camera.zoom(), MAX_ZOOM);
        camera.process_mouse_scroll(5.0);
        assert_eq!(camera.zoom(), 40.0);
    }

    #[test]
    fn initial_zoom_and_pitch_are_clamped() {
        let settings = CameraSettings {
            zoom: 90.0,
            ..CameraSettings::default()
        };
        let camera = Camera::with_settings(Vec3::ZERO, Vec3::Y, YAW, 120.0, settings);
        assert_eq!(camera.zoom(), MAX_ZOOM);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
    }

    #[test]
    fn view_matrix_maps_target_onto_negative_z() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        let target = camera.position() + camera.front() * 4.0;
        let in_view = camera.view_matrix().transform_point3(target);
        assert!((in_view - Vec3::new(0.0, 0.0, -4.0)).length() < EPSILON);
    }

    #[test]
    fn front_parallel_to_world_up_keeps_finite_basis() {
        let mut camera = Camera::with_orientation(Vec3::ZERO, Vec3::X, 0.0, 0.0);
        assert!((camera.front() - Vec3::X).length() < EPSILON);
        assert!(camera.right().is_finite() && camera.up().is_finite());
        assert_orthonormal(&camera);
        assert!(!camera.view_matrix().is_nan());

        camera.process_keyboard(CameraMovement::Right, 1.0);
        assert!(camera.position().is_finite());
        assert!((camera.position().length() - SPEED).abs() < EPSILON);
    }

    #[test]
    fn controller_trait_reports_live_state() {
        fn eye_ray<C: CameraController>(camera: &C) -> (Vec3, Vec3) {
            (camera.position(), camera.forward())
        }

        let mut camera = Camera::new(Vec3::new(-3.0, 2.5, 4.3));
        camera.process_mouse_movement(90.0, 0.0, true);
        let (position, forward) = eye_ray(&camera);
        assert_eq!(position, camera.position());
        assert_eq!(forward, camera.front());
        assert_eq!(CameraController::view_matrix(&camera), camera.view_matrix());
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: CameraSettings =
            serde_json::from_str(r#"{ "movement_speed": 4.0 }"#).unwrap();
        assert_eq!(settings.movement_speed, 4.0);
        assert_eq!(settings.mouse_sensitivity, SENSITIVITY);
    }
}
