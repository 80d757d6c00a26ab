use serde::{Deserialize, Serialize};

/// Window dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; a minimized window reports 1.0
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Viewport owned by the windowing layer: size plus clip planes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub dimensions: WindowDimensions,
    pub near: f32,
    pub far: f32,
}

impl Viewport {
    pub fn new(dimensions: WindowDimensions, near: f32, far: f32) -> Self {
        Self {
            dimensions,
            near,
            far,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.dimensions = WindowDimensions::new(width, height);
    }

    pub fn aspect(&self) -> f32 {
        self.dimensions.aspect()
    }
}
