use std::time::Instant;

/// Longest delta a single frame may report, in seconds. A stalled frame
/// (window drag, debugger pause) would otherwise teleport the camera.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Timing for one rendered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Frame clock for the render loop.
/// Each `tick` closes the previous frame and reports how long it took.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
    frame: u64,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            frame: 0,
        }
    }

    /// Advance to the next frame
    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let delta = now
            .duration_since(self.last_tick)
            .as_secs_f32()
            .min(MAX_FRAME_DELTA);
        self.last_tick = now;

        let info = FrameInfo::new(self.frame, now.duration_since(self.start).as_secs_f32(), delta);
        self.frame += 1;
        info
    }

    /// Forget time spent since the last tick, e.g. after the window regains focus
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-step frame source for headless runs
#[derive(Debug, Clone)]
pub struct FixedStep {
    delta: f32,
    remaining: u64,
    frame: u64,
}

impl FixedStep {
    pub fn new(delta: f32, frames: u64) -> Self {
        Self {
            delta: delta.max(0.0),
            remaining: frames,
            frame: 0,
        }
    }
}

impl Iterator for FixedStep {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let info = FrameInfo::new(self.frame, (self.frame + 1) as f32 * self.delta, self.delta);
        self.frame += 1;
        Some(info)
    }
}
