/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyS,
    KeyA,
    KeyD,
    KeyE,
    KeyR,
    KeyX,
    KeyC,
    KeyY,
    KeyV,
    KeyZ,
    KeyQ,
    KeyG,
    KeyF,
    Escape,
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// True only on the frame the button went down
    fn just_pressed(&self, button: Button) -> bool;
}
