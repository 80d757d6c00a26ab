use anyhow::Result;
use clap::Parser;
use log::info;
use winit::event_loop::EventLoop;

use room_viewer::app::{run_headless, write_snapshot, App, Session};
use room_viewer::cli::Cli;
use room_viewer::config::ViewerConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ViewerConfig::load(cli.config.as_deref())?;

    let mut session = Session::new(&config);
    session.animation.fan_spinning |= cli.fan;
    session.animation.orbiting |= cli.orbit;

    if cli.headless {
        info!("simulating {} frames at dt={}", cli.frames, cli.dt);
        if let Some(snapshot) = run_headless(&mut session, cli.frames, cli.dt) {
            if let Some(path) = &cli.dump {
                write_snapshot(path, &snapshot)?;
            }
        }
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&config, session, cli.dump);

    println!(
        "Room Viewer - WASD move, E/R up/down, X/C pitch, Y/V yaw, Z/Q roll, \
         G fan, F orbit, Escape quits"
    );
    event_loop.run_app(&mut app)?;

    Ok(())
}
