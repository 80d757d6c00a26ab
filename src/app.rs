use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::animation::SceneAnimationState;
use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::core::clock::{Clock, FixedStep, FrameInfo};
use crate::core::controller::Controller;
use crate::core::input_adapter::WinitController;
use crate::core::window::Viewport;
use crate::input::{apply_input, MouseLook};
use crate::scene::{FrameMatrices, FrameSnapshot, RoomScene};

const TITLE_UPDATE_INTERVAL: f32 = 0.5;
const HEADLESS_LOG_INTERVAL: u64 = 60;

/// State the render loop owns: camera, animation flags and the scene
#[derive(Debug, Clone)]
pub struct Session {
    pub camera: Camera,
    pub animation: SceneAnimationState,
    pub scene: RoomScene,
    pub viewport: Viewport,
}

impl Session {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            camera: config.build_camera(),
            animation: SceneAnimationState {
                fan_spinning: config.fan.spinning,
                ..SceneAnimationState::default()
            },
            scene: RoomScene::new(config.build_fan()),
            viewport: config.viewport(),
        }
    }

    /// Input, animation, then matrices for one frame
    pub fn frame(&mut self, controller: Option<&dyn Controller>, delta: f32) -> FrameMatrices {
        if let Some(controller) = controller {
            apply_input(controller, &mut self.camera, &mut self.animation, delta);
        }
        let fan_transform = self.scene.step(&mut self.camera, &mut self.animation, delta);
        self.scene
            .frame_matrices(&self.camera, fan_transform, &self.viewport)
    }

    pub fn snapshot(&self, frame: u64, matrices: &FrameMatrices) -> FrameSnapshot {
        FrameSnapshot::capture(frame, &self.camera, &self.animation, matrices)
    }
}

/// Fixed-step run with no window; returns the last frame
pub fn run_headless(session: &mut Session, frames: u64, dt: f32) -> Option<FrameSnapshot> {
    let mut last = None;
    for FrameInfo { number, time, delta } in FixedStep::new(dt, frames) {
        let matrices = session.frame(None, delta);
        if number % HEADLESS_LOG_INTERVAL == 0 {
            let position = session.camera.position();
            info!(
                "frame {number} t={time:.2}s camera=({:.2}, {:.2}, {:.2}) yaw={:.1} fan={:.1}",
                position.x,
                position.y,
                position.z,
                session.camera.yaw(),
                session.animation.fan_angle,
            );
        }
        last = Some(session.snapshot(number, &matrices));
    }
    last
}

pub fn write_snapshot(path: &Path, snapshot: &FrameSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize frame")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("wrote frame {} to {}", snapshot.frame, path.display());
    Ok(())
}

/// Windowed viewer. The draw stage is external; each redraw produces the
/// frame matrices and reports the camera pose in the title bar.
pub struct App {
    window: Option<Window>,
    title: String,
    session: Session,
    controller: WinitController,
    mouse: MouseLook,
    cursor_grabbed: bool,
    clock: Clock,
    frames_since_title: u32,
    title_timer: f32,
    last_frame: Option<FrameSnapshot>,
    dump: Option<PathBuf>,
}

impl App {
    pub fn new(config: &ViewerConfig, session: Session, dump: Option<PathBuf>) -> Self {
        Self {
            window: None,
            title: config.window.title.clone(),
            session,
            controller: WinitController::new(),
            mouse: MouseLook::new(),
            cursor_grabbed: false,
            clock: Clock::new(),
            frames_since_title: 0,
            title_timer: 0.0,
            last_frame: None,
            dump,
        }
    }

    fn redraw(&mut self) {
        let frame = self.clock.tick();

        let scroll = self.controller.scroll();
        if scroll != 0.0 {
            self.session.camera.process_mouse_scroll(scroll);
        }
        let matrices = self.session.frame(Some(&self.controller), frame.delta);
        self.controller.reset_deltas();

        self.update_title(frame.delta);
        if self.dump.is_some() {
            self.last_frame = Some(self.session.snapshot(frame.number, &matrices));
        }
    }

    /// Raw device motion drives the look while the cursor is grabbed, so yaw
    /// is not bounded by the window edges. Device y grows downward.
    fn on_mouse_motion(&mut self, dx: f64, dy: f64) {
        if self.cursor_grabbed {
            self.session
                .camera
                .process_mouse_movement(dx as f32, -dy as f32, true);
        }
    }

    /// Absolute cursor positions only drive the look when the grab failed
    fn on_cursor_moved(&mut self, x: f32, y: f32) {
        if self.cursor_grabbed {
            return;
        }
        if let Some((dx, dy)) = self.mouse.offset(x, y) {
            self.session.camera.process_mouse_movement(dx, dy, true);
        }
    }

    fn update_title(&mut self, delta: f32) {
        self.frames_since_title += 1;
        self.title_timer += delta;
        if self.title_timer < TITLE_UPDATE_INTERVAL {
            return;
        }

        let fps = self.frames_since_title as f32 / self.title_timer;
        self.frames_since_title = 0;
        self.title_timer = 0.0;

        if let Some(window) = &self.window {
            let camera = &self.session.camera;
            let p = camera.position();
            window.set_title(&format!(
                "{} - {fps:.0} fps - ({:.1}, {:.1}, {:.1}) yaw {:.0} pitch {:.0} fov {:.0}",
                self.title,
                p.x,
                p.y,
                p.z,
                camera.yaw(),
                camera.pitch(),
                camera.zoom(),
            ));
        }
    }

    fn grab_cursor(window: &Window) -> bool {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        window.set_cursor_visible(false);
        match grabbed {
            Ok(()) => true,
            Err(e) => {
                warn!("Cursor grab unavailable, using cursor position: {}", e);
                false
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let dimensions = self.session.viewport.dimensions;
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(self.title.as_str())
                .with_inner_size(LogicalSize::new(dimensions.width, dimensions.height)),
        ) {
            Ok(w) => w,
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.cursor_grabbed = Self::grab_cursor(&window);
        let size = window.inner_size();
        self.session.viewport.resize(size.width, size.height);
        self.clock.reset();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.controller.process_event(&event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(position.x as f32, position.y as f32)
            }
            WindowEvent::CursorLeft { .. } => self.mouse.reset(),
            WindowEvent::Resized(size) => {
                debug!("resized to {}x{}", size.width, size.height);
                self.session.viewport.resize(size.width, size.height);
            }
            WindowEvent::Focused(true) => self.clock.reset(),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.on_mouse_motion(dx, dy);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        info!("exiting after {} frames", self.clock.frame_count());
        if let (Some(path), Some(snapshot)) = (&self.dump, &self.last_frame) {
            if let Err(e) = write_snapshot(path, snapshot) {
                error!("{:#}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_run_returns_last_frame() {
        let mut session = Session::new(&ViewerConfig::default());
        session.animation.fan_spinning = true;

        let snapshot = run_headless(&mut session, 30, 0.1).unwrap();

        assert_eq!(snapshot.frame, 29);
        assert!((snapshot.fan_angle - (-60.0 * 0.1 * 30.0)).abs() < 1e-3);
        assert_eq!(snapshot.objects.len(), session.scene.objects().len());
    }

    fn app(grabbed: bool) -> App {
        let config = ViewerConfig::default();
        let mut app = App::new(&config, Session::new(&config), None);
        app.cursor_grabbed = grabbed;
        app
    }

    #[test]
    fn grabbed_motion_has_unbounded_yaw() {
        let mut app = app(true);
        let start_yaw = app.session.camera.yaw();

        // ten sweeps far wider than any window
        for _ in 0..10 {
            app.on_mouse_motion(3600.0, 0.0);
        }

        assert!((app.session.camera.yaw() - (start_yaw + 3600.0)).abs() < 1e-2);
    }

    #[test]
    fn grabbed_motion_flips_y() {
        let mut app = app(true);
        app.on_mouse_motion(0.0, -100.0);
        assert!((app.session.camera.pitch() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn grabbed_cursor_positions_are_ignored() {
        let mut app = app(true);
        app.on_cursor_moved(0.0, 0.0);
        app.on_cursor_moved(500.0, 500.0);
        assert_eq!(app.session.camera.yaw(), crate::camera::YAW);
        assert_eq!(app.session.camera.pitch(), 0.0);
    }

    #[test]
    fn ungrabbed_cursor_drives_look() {
        let mut app = app(false);
        app.on_mouse_motion(1000.0, 0.0);
        assert_eq!(app.session.camera.yaw(), crate::camera::YAW);

        app.on_cursor_moved(100.0, 100.0);
        app.on_cursor_moved(150.0, 100.0);
        assert!((app.session.camera.yaw() - (crate::camera::YAW + 5.0)).abs() < 1e-4);
    }

    #[test]
    fn redraw_keeps_snapshot_only_when_dumping() {
        let mut app = app(true);
        app.redraw();
        assert!(app.last_frame.is_none());

        app.dump = Some(PathBuf::from("frame.json"));
        app.redraw();
        assert!(app.last_frame.is_some());
    }

    #[test]
    fn headless_run_with_zero_frames_is_empty() {
        let mut session = Session::new(&ViewerConfig::default());
        assert!(run_headless(&mut session, 0, 0.016).is_none());
    }
}
