//! Example: render the scene without a terminal and watch the published frames
//!
//! Usage: cargo run --example frame_dump -- [frames]

use std::env;
use std::io;

use cubes3d_terminal::{Config, FrameSink, SharedFrame, TerminalApp};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let frames: u64 = match env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("bad frame count: {e}")))?,
        None => 60,
    };

    let config = Config {
        headless: true,
        frames: Some(frames),
        ..Config::default()
    };
    let size = config.size;

    let shared = SharedFrame::new(size.width, size.height);
    let reader = shared.reader();
    let sink: Box<dyn FrameSink> = Box::new(shared);

    let mut app = TerminalApp::headless(config)?.with_sink(sink);

    // a viewer on another thread polls the latest frame
    let viewer = std::thread::spawn(move || {
        let mut seen = 0;
        while seen < 10 {
            if reader.latest().is_some() {
                seen += 1;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        reader.latest()
    });

    let rendered = app.run_headless()?;
    let last = viewer.join().map_err(|_| "viewer thread panicked")?;

    println!("Rendered {rendered} frames at {size}");
    if let Some(frame) = last {
        let lit = frame
            .as_bytes()
            .chunks_exact(4)
            .filter(|px| *px != cubes3d_terminal::renderer::BACKGROUND)
            .count();
        println!("Viewer saw a {}x{} frame with {lit} lit pixels", frame.width(), frame.height());
    }
    Ok(())
}
