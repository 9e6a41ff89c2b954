//! Cubes3D Terminal Demo - Four spinning cubes
//!
//! Controls:
//!   - P: Toggle perspective / orthographic
//!   - +/-: Move the camera orbit out / in
//!   - Q/ESC: Quit
use std::fs::File;
use std::sync::Mutex;

use clap::Parser;
use cubes3d_terminal::{Config, TerminalApp};
use tracing_subscriber::EnvFilter;

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let default = if config.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &config.log_file {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    if config.headless {
        let mut app = TerminalApp::headless(config)?;
        let frames = app.run_headless()?;
        println!("Rendered {frames} frames");
        return Ok(());
    }

    let mut app = TerminalApp::new(config)?;
    app.run()?;

    println!("Rendered {} frames", app.frames_rendered());
    Ok(())
}
