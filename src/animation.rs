use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::transform::rotate_about;

/// Center of the ceiling fan in room coordinates. The fan is built from the
/// 0.5-unit cube placed at x = z = 5, so its vertical axis sits at 5.25.
pub const FAN_PIVOT: Vec3 = Vec3::new(5.25, 4.225, 5.25);
pub const FAN_AXIS: Vec3 = Vec3::Y;
/// Degrees per second; one degree per frame at 60 fps, clockwise from above
pub const FAN_STEP_PER_SECOND: f32 = -60.0;
pub const FAN_STEP_PER_FRAME: f32 = -1.0;

/// How `step` is applied on each advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// `step` degrees per call, spin speed follows frame rate
    PerFrame,
    /// `step` degrees per second of frame time
    #[default]
    PerSecond,
}

/// Spins one part about a fixed pivot and axis.
///
/// The angle itself lives with the caller so a single animator can drive
/// several instances of the same part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAnimator {
    pub pivot: Vec3,
    pub axis: Vec3,
    pub step: f32,
    pub step_mode: StepMode,
}

impl RotationAnimator {
    pub fn new(pivot: Vec3, axis: Vec3, step: f32, step_mode: StepMode) -> Self {
        Self {
            pivot,
            axis,
            step,
            step_mode,
        }
    }

    /// Ceiling fan about its hanging axis
    pub fn fan(step_mode: StepMode) -> Self {
        let step = match step_mode {
            StepMode::PerFrame => FAN_STEP_PER_FRAME,
            StepMode::PerSecond => FAN_STEP_PER_SECOND,
        };
        Self::new(FAN_PIVOT, FAN_AXIS, step, step_mode)
    }

    /// Advance `angle` when `enabled` and return the pivot-centered rotation
    /// for the resulting angle. Disabled calls leave the angle frozen.
    pub fn advance(&self, angle: &mut f32, enabled: bool, delta_time: f32) -> Mat4 {
        if enabled {
            *angle += match self.step_mode {
                StepMode::PerFrame => self.step,
                StepMode::PerSecond => self.step * delta_time.max(0.0),
            };
        }
        self.transform(*angle)
    }

    /// Rotation for a given angle without advancing
    pub fn transform(&self, angle: f32) -> Mat4 {
        rotate_about(self.pivot, self.axis, angle)
    }
}

/// Per-scene animation flags and accumulators owned by the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneAnimationState {
    pub fan_spinning: bool,
    pub orbiting: bool,
    pub fan_angle: f32,
}

impl SceneAnimationState {
    pub fn toggle_fan(&mut self) -> bool {
        self.fan_spinning = !self.fan_spinning;
        self.fan_spinning
    }

    pub fn toggle_orbit(&mut self) -> bool {
        self.orbiting = !self.orbiting;
        self.orbiting
    }
}
