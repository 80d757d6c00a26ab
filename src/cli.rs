// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "room-viewer")]
#[command(about = "Free-fly walkthrough of a furnished two-room apartment", long_about = None)]
pub struct Cli {
    /// JSON file with window, camera and fan settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run a fixed-step simulation without opening a window
    #[arg(long)]
    pub headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Seconds per simulated frame in headless mode
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Start with the ceiling fan spinning
    #[arg(long)]
    pub fan: bool,

    /// Start with the camera orbiting in place
    #[arg(long)]
    pub orbit: bool,

    /// Write the last frame's camera pose and matrices as JSON
    #[arg(long)]
    pub dump: Option<PathBuf>,
}
