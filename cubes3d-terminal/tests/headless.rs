use cubes3d_terminal::renderer::BACKGROUND;
use cubes3d_terminal::{AppError, Config, FrameSize, SharedFrame, TerminalApp};

fn small_config() -> Config {
    Config {
        headless: true,
        frames: Some(12),
        size: FrameSize {
            width: 320,
            height: 240,
        },
        ..Config::default()
    }
}

#[test]
fn headless_run_publishes_every_frame() {
    let config = small_config();
    let shared = SharedFrame::new(config.size.width, config.size.height);
    let reader = shared.reader();

    let mut app = TerminalApp::headless(config).unwrap().with_sink(Box::new(shared));
    assert_eq!(app.renderer().width(), 40);
    assert_eq!(app.renderer().height(), 15);

    let frames = app.run_headless().unwrap();
    assert_eq!(frames, 12);
    assert_eq!(app.frames_rendered(), 12);

    let published = reader.latest().expect("a frame was published");
    assert_eq!(published, *app.frame());
    assert_eq!(published.as_bytes().len(), 320 * 240 * 4);

    let lit = published
        .as_bytes()
        .chunks_exact(4)
        .filter(|px| *px != BACKGROUND)
        .count();
    assert!(lit > 0, "cubes should be visible");
}

#[test]
fn frame_dump_file_holds_last_frame() {
    let path = std::env::temp_dir().join(format!("cubes3d-headless-{}.rgba", std::process::id()));
    let config = Config {
        frame_dump: Some(path.clone()),
        frames: Some(3),
        ..small_config()
    };

    let mut app = TerminalApp::headless(config).unwrap();
    app.run_headless().unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, app.frame().as_bytes());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn mismatched_sink_is_an_error() {
    let config = small_config();
    let mut app = TerminalApp::headless(config)
        .unwrap()
        .with_sink(Box::new(SharedFrame::new(10, 10)));
    assert!(matches!(app.step(0.01), Err(AppError::FrameSize { .. })));
}

#[test]
fn invalid_config_is_rejected() {
    let config = Config {
        fps: 0,
        ..small_config()
    };
    assert!(matches!(TerminalApp::headless(config), Err(AppError::InvalidConfig(_))));
}

#[test]
fn quit_key_stops_the_app() {
    let mut app = TerminalApp::headless(small_config()).unwrap();
    assert!(app.is_running());
    app.handle_key(crossterm::event::KeyCode::Char('p'));
    app.handle_key(crossterm::event::KeyCode::Char('q'));
    assert!(!app.is_running());
}
