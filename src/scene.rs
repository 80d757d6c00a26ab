use glam::Mat4;
use log::debug;
use serde::Serialize;

use crate::animation::{RotationAnimator, SceneAnimationState};
use crate::camera::{Camera, CameraMovement};
use crate::core::window::Viewport;
use crate::transform::TransformParams;
use crate::types::DrawUniforms;

/// Colored cube variant bound for a draw; all share the 0.5-unit cube geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mesh {
    Floor,
    Ceiling,
    Wall,
    Partition,
    Shelf,
    Wood,
    Cushion,
    Trim,
    Dark,
    Lamp,
    AirConditioner,
    FanBlade,
}

/// One placed object in the room
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub name: &'static str,
    pub mesh: Mesh,
    pub params: TransformParams,
    /// Composed with the fan rotation before drawing
    pub spins_with_fan: bool,
}

const fn fixed(name: &'static str, mesh: Mesh, params: TransformParams) -> SceneObject {
    SceneObject {
        name,
        mesh,
        params,
        spins_with_fan: false,
    }
}

const fn spinning(name: &'static str, mesh: Mesh, params: TransformParams) -> SceneObject {
    SceneObject {
        name,
        mesh,
        params,
        spins_with_fan: true,
    }
}

const fn at(tx: f32, ty: f32, tz: f32, sx: f32, sy: f32, sz: f32) -> TransformParams {
    TransformParams::new(tx, ty, tz, 0.0, 0.0, 0.0, sx, sy, sz)
}

/// Two-room apartment: living room with ceiling fan, bedroom through the door
pub const ROOM_LAYOUT: &[SceneObject] = &[
    fixed("floor", Mesh::Floor, at(0.0, 0.0, 0.0, 20.0, 0.1, 20.0)),
    fixed("roof", Mesh::Ceiling, at(0.0, 5.0, 0.0, 20.0, 0.1, 20.0)),
    fixed("wall_back", Mesh::Wall, at(0.0, 0.0, 0.0, 20.0, 10.0, 0.1)),
    fixed("wall_front", Mesh::Wall, at(0.0, 0.0, 10.0, 20.0, 10.0, 0.1)),
    fixed("door_jamb", Mesh::Partition, at(10.0, 0.0, 0.0, 0.1, 10.0, 0.15)),
    fixed("door_lintel", Mesh::Partition, at(10.0, 3.355, 0.0, 0.1, 3.3, 4.2)),
    fixed("door_side_wall", Mesh::Partition, at(10.0, 0.0, 2.1, 0.1, 10.0, 15.8)),
    fixed("shelf_top", Mesh::Shelf, at(6.05, 1.0, 0.0, -6.2, 0.15, 2.12)),
    fixed("shelf_middle", Mesh::Shelf, at(6.05, 0.5, 0.0, -6.2, 0.15, 2.12)),
    fixed("shelf_bottom", Mesh::Shelf, at(6.05, 0.0, 0.0, -6.2, 0.15, 2.12)),
    fixed("tv", Mesh::Dark, at(5.6, 1.4, 0.0, -4.5, 2.75, 0.2)),
    fixed("rug", Mesh::Cushion, at(5.8, 0.0, 2.0, -8.0, 0.2, 8.0)),
    fixed("lamp_shade", Mesh::Lamp, at(8.5, 1.75, 3.5, 1.2, 2.35, 1.2)),
    fixed("lamp_stand", Mesh::Dark, at(8.8, 0.0, 3.75, 0.15, 4.0, 0.15)),
    fixed("lamp_base", Mesh::Dark, at(8.5, 0.0, 3.5, 1.2, 0.5, 1.2)),
    fixed("sofa_seat", Mesh::Cushion, at(6.6, 0.0, 10.0, -9.0, 1.5, -3.0)),
    fixed("sofa_back", Mesh::Cushion, at(6.6, 0.0, 10.0, -9.0, 4.0, -1.0)),
    fixed("sofa_arm_right", Mesh::Shelf, at(6.6, 0.0, 10.0, 1.0, 3.0, -3.0)),
    fixed("sofa_arm_left", Mesh::Shelf, at(2.1, 0.0, 10.0, -1.0, 3.0, -3.0)),
    fixed("sofa_cover", Mesh::Wall, at(6.6, 0.75, 10.0, -9.0, 0.5, -3.0)),
    fixed("fan_canopy", Mesh::Wood, at(5.0, 5.0, 5.0, 1.0, -0.2, 1.0)),
    fixed("fan_downrod", Mesh::Cushion, at(5.2125, 4.9, 5.2125, 0.15, -1.0, 0.15)),
    fixed("fan_motor", Mesh::Cushion, at(5.0, 4.4, 5.0, 1.0, -0.33, 1.0)),
    fixed("fan_cap", Mesh::Wood, at(5.0, 4.225, 5.0, 1.0, -0.05, 1.0)),
    spinning("fan_blade_x", Mesh::FanBlade, at(3.75, 4.2, 5.15, 6.0, 0.1, 0.4)),
    spinning("fan_blade_z", Mesh::FanBlade, at(5.15, 4.2, 3.75, 0.4, 0.1, 6.0)),
    fixed("bedroom_floor", Mesh::Floor, at(10.0, 0.0, 0.0, 25.0, 0.1, 20.0)),
    fixed("bedroom_roof", Mesh::Ceiling, at(10.0, 5.0, 0.0, 25.0, 0.1, 20.0)),
    fixed("bedroom_wall_far", Mesh::Partition, at(22.5, 0.0, 0.0, 0.1, 10.0, 20.0)),
    fixed("bed_frame", Mesh::Shelf, at(19.5, 0.0, 5.0, 6.0, 1.2, 6.0)),
    fixed("bed_headboard", Mesh::Shelf, at(22.5, 0.0, 5.0, -1.0, 3.0, 6.0)),
    fixed("bed_sheet", Mesh::Wood, at(19.5, 0.6, 5.0, 5.2, 0.5, 6.0)),
    fixed("pillow_left", Mesh::Trim, at(21.3, 0.6, 5.1, 1.5, 0.9, 2.0)),
    fixed("pillow_right", Mesh::Trim, at(21.3, 0.6, 6.8, 1.5, 0.9, 2.0)),
    fixed("air_conditioner", Mesh::AirConditioner, at(22.5, 4.0, 6.0, -5.0, 2.0, 6.0)),
    fixed("bedroom_lamp_shade", Mesh::Lamp, at(21.0, 1.75, 0.5, 1.2, 2.0, 1.2)),
    fixed("bedroom_lamp_stand", Mesh::Dark, at(21.25, 1.0, 0.75, 0.15, 2.0, 0.15)),
    fixed("bedroom_lamp_base", Mesh::Dark, at(21.0, 1.0, 0.5, 1.2, 0.2, 1.2)),
];

/// Model matrix for one draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub name: &'static str,
    pub mesh: Mesh,
    pub model: Mat4,
}

/// Everything the draw stage needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMatrices {
    pub projection: Mat4,
    pub view: Mat4,
    pub items: Vec<DrawItem>,
}

impl FrameMatrices {
    pub fn uniforms(&self) -> impl Iterator<Item = DrawUniforms> + '_ {
        self.items
            .iter()
            .map(|item| DrawUniforms::new(item.model, self.view, self.projection))
    }

    pub fn get(&self, name: &str) -> Option<&DrawItem> {
        self.items.iter().find(|item| item.name == name)
    }
}

/// Room layout plus the fan that spins inside it
#[derive(Debug, Clone)]
pub struct RoomScene {
    objects: Vec<SceneObject>,
    fan: RotationAnimator,
}

impl RoomScene {
    pub fn new(fan: RotationAnimator) -> Self {
        Self::with_objects(ROOM_LAYOUT.to_vec(), fan)
    }

    pub fn with_objects(objects: Vec<SceneObject>, fan: RotationAnimator) -> Self {
        Self { objects, fan }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn fan(&self) -> &RotationAnimator {
        &self.fan
    }

    /// Advance per-frame animation. Orbit mode keeps yawing the camera left;
    /// returns the fan rotation for this frame.
    pub fn step(
        &self,
        camera: &mut Camera,
        animation: &mut SceneAnimationState,
        delta_time: f32,
    ) -> Mat4 {
        if animation.orbiting {
            camera.process_keyboard(CameraMovement::YawLeft, delta_time);
        }
        self.fan
            .advance(&mut animation.fan_angle, animation.fan_spinning, delta_time)
    }

    pub fn frame_matrices(
        &self,
        camera: &Camera,
        fan_transform: Mat4,
        viewport: &Viewport,
    ) -> FrameMatrices {
        let items = self
            .objects
            .iter()
            .map(|object| {
                let model = object.params.to_matrix();
                DrawItem {
                    name: object.name,
                    mesh: object.mesh,
                    model: if object.spins_with_fan {
                        fan_transform * model
                    } else {
                        model
                    },
                }
            })
            .collect::<Vec<_>>();

        debug!("frame built with {} draws", items.len());

        FrameMatrices {
            projection: camera.projection_matrix(viewport.aspect(), viewport.near, viewport.far),
            view: camera.view_matrix(),
            items,
        }
    }
}

/// Serializable record of camera pose and frame matrices
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub camera_position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub zoom: f32,
    pub fan_angle: f32,
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub objects: Vec<ObjectSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectSnapshot {
    pub name: &'static str,
    pub mesh: Mesh,
    pub model: [[f32; 4]; 4],
}

impl FrameSnapshot {
    pub fn capture(
        frame: u64,
        camera: &Camera,
        animation: &SceneAnimationState,
        matrices: &FrameMatrices,
    ) -> Self {
        Self {
            frame,
            camera_position: camera.position().to_array(),
            yaw: camera.yaw(),
            pitch: camera.pitch(),
            roll: camera.roll(),
            zoom: camera.zoom(),
            fan_angle: animation.fan_angle,
            view: matrices.view.to_cols_array_2d(),
            projection: matrices.projection.to_cols_array_2d(),
            objects: matrices
                .items
                .iter()
                .map(|item| ObjectSnapshot {
                    name: item.name,
                    mesh: item.mesh,
                    model: item.model.to_cols_array_2d(),
                })
                .collect(),
        }
    }
}
