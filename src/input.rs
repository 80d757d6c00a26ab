use log::info;

use crate::animation::SceneAnimationState;
use crate::camera::{Camera, CameraMovement};
use crate::core::controller::{Button, Controller};

/// Held keys that drive the camera every frame
pub const MOVEMENT_BINDINGS: [(Button, CameraMovement); 12] = [
    (Button::KeyW, CameraMovement::Forward),
    (Button::KeyS, CameraMovement::Backward),
    (Button::KeyA, CameraMovement::Left),
    (Button::KeyD, CameraMovement::Right),
    (Button::KeyE, CameraMovement::Up),
    (Button::KeyR, CameraMovement::Down),
    (Button::KeyX, CameraMovement::PitchUp),
    (Button::KeyC, CameraMovement::PitchDown),
    (Button::KeyY, CameraMovement::YawLeft),
    (Button::KeyV, CameraMovement::YawRight),
    (Button::KeyZ, CameraMovement::RollLeft),
    (Button::KeyQ, CameraMovement::RollRight),
];

pub const FAN_TOGGLE: Button = Button::KeyG;
pub const ORBIT_TOGGLE: Button = Button::KeyF;

/// Turns absolute cursor positions into look offsets.
///
/// The first sample only seeds the tracker so the view does not jump when the
/// cursor enters the window. The y offset is flipped because screen y grows
/// downward while pitch grows upward.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseLook {
    last: Option<(f32, f32)>,
}

impl MouseLook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset since the previous sample, `None` for the first one
    pub fn offset(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let previous = self.last.replace((x, y));
        previous.map(|(last_x, last_y)| (x - last_x, last_y - y))
    }

    /// Forget the previous sample, e.g. after the cursor was released
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Dispatch one frame of controller state: held keys move the camera,
/// fresh presses flip the animation toggles.
pub fn apply_input(
    controller: &dyn Controller,
    camera: &mut Camera,
    animation: &mut SceneAnimationState,
    delta_time: f32,
) {
    for (button, movement) in MOVEMENT_BINDINGS {
        if controller.is_down(button) {
            camera.process_keyboard(movement, delta_time);
        }
    }

    if controller.just_pressed(FAN_TOGGLE) {
        let on = animation.toggle_fan();
        info!("fan {}", if on { "on" } else { "off" });
    }
    if controller.just_pressed(ORBIT_TOGGLE) {
        let on = animation.toggle_orbit();
        info!("orbit {}", if on { "on" } else { "off" });
    }
}
