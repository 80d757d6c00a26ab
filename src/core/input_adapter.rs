use std::collections::HashSet;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};

/// Pixels of trackpad scroll that count as one wheel notch
const PIXELS_PER_LINE: f32 = 40.0;

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// Buttons that went down since the last reset
    fresh: HashSet<Button>,
    /// Vertical scroll in wheel notches since last reset
    scroll: f32,
}

impl WinitController {
    /// Create a new WinitController with no pressed keys
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.set_button(button, event.state);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    /// Record a press or release
    pub fn set_button(&mut self, button: Button, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.pressed_keys.insert(button) {
                    self.fresh.insert(button);
                }
            }
            ElementState::Released => {
                self.pressed_keys.remove(&button);
            }
        }
    }

    /// Drop every held key, e.g. when focus is lost mid-press
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
    }

    /// Reset per-frame state (fresh presses, scroll)
    /// Call this at the end of each frame after processing input
    pub fn reset_deltas(&mut self) {
        self.fresh.clear();
        self.scroll = 0.0;
    }

    /// Scroll accumulated since last reset
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::KeyE => Some(Button::KeyE),
            KeyCode::KeyR => Some(Button::KeyR),
            KeyCode::KeyX => Some(Button::KeyX),
            KeyCode::KeyC => Some(Button::KeyC),
            KeyCode::KeyY => Some(Button::KeyY),
            KeyCode::KeyV => Some(Button::KeyV),
            KeyCode::KeyZ => Some(Button::KeyZ),
            KeyCode::KeyQ => Some(Button::KeyQ),
            KeyCode::KeyG => Some(Button::KeyG),
            KeyCode::KeyF => Some(Button::KeyF),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn just_pressed(&self, button: Button) -> bool {
        self.fresh.contains(&button)
    }
}
