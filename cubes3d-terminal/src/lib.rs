//! Terminal front end: drives the per-frame update → read back → draw cycle
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use cubes3d_core::MeshRegistry;
use std::io::{self, stdout, Write};
use std::time::Duration;
use tracing::{debug, info};

pub mod clock;
pub mod config;
pub mod error;
pub mod frame;
pub mod renderer;
pub mod scene;

pub use clock::FrameClock;
pub use config::{Config, FrameSize};
pub use error::AppError;
pub use frame::{Frame, FrameReader, FrameSink, RawFileSink, SharedFrame};
pub use renderer::AsciiRenderer;
pub use scene::CubeScene;

/// Orbit distance change per key press
const DISTANCE_STEP: f32 = 0.25;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    config: Config,
    scene: CubeScene,
    registry: MeshRegistry,
    renderer: AsciiRenderer,
    clock: FrameClock,
    frame: Frame,
    sink: Option<Box<dyn FrameSink>>,
    running: bool,
    frames_rendered: u64,
}

impl TerminalApp {
    /// Size the cell grid to the current terminal.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let (width, height) = terminal::size()?;
        // top line is the status bar
        Self::with_viewport(config, width as usize, height.saturating_sub(1).max(1) as usize)
    }

    /// Size the cell grid to cover the configured frame size.
    pub fn headless(config: Config) -> Result<Self, AppError> {
        let columns = (config.size.width / renderer::CELL_WIDTH_PX).max(1) as usize;
        let rows = (config.size.height / renderer::CELL_HEIGHT_PX).max(1) as usize;
        Self::with_viewport(config, columns, rows)
    }

    pub fn with_viewport(config: Config, columns: usize, rows: usize) -> Result<Self, AppError> {
        config.validate()?;

        let renderer = AsciiRenderer::new(columns, rows);
        let scene = CubeScene::new(&config, renderer.aspect());
        let mut registry = MeshRegistry::new();
        scene.register(&mut registry);

        let sink: Option<Box<dyn FrameSink>> = config.frame_dump.as_ref().map(|path| {
            Box::new(RawFileSink::new(path, config.size.width, config.size.height)) as Box<dyn FrameSink>
        });

        info!(columns, rows, size = %config.size, fps = config.fps, "viewport ready");

        Ok(Self {
            clock: FrameClock::new(config.fps),
            frame: Frame::new(config.size.width, config.size.height),
            scene,
            registry,
            renderer,
            sink,
            running: true,
            frames_rendered: 0,
            config,
        })
    }

    /// Publish every rendered frame to `sink`, replacing any configured one.
    pub fn with_sink(mut self, sink: Box<dyn FrameSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn scene(&self) -> &CubeScene {
        &self.scene
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    /// Last rendered frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        info!(frames = self.frames_rendered, "terminal session ended");
        result
    }

    /// Render without a terminal using a fixed time step of one target frame.
    pub fn run_headless(&mut self) -> Result<u64, AppError> {
        let frames = self.config.frames.unwrap_or(u64::from(self.config.fps));
        let dt = self.clock.target_frame_time().as_secs_f32();
        for _ in 0..frames {
            self.step(dt)?;
        }
        info!(frames, "headless run finished");
        Ok(frames)
    }

    /// Advance the scene by `dt` seconds and render one frame.
    pub fn step(&mut self, dt: f32) -> Result<(), AppError> {
        self.scene.update(dt);
        self.render_frame()
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        while self.running {
            let dt = self.clock.tick();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            self.step(dt)?;
            self.draw_terminal()?;

            if self.config.frames.is_some_and(|limit| self.frames_rendered >= limit) {
                self.running = false;
            }
            self.clock.wait();
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<(), AppError> {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                self.handle_key(code);
            }
            Event::Resize(width, height) => {
                let rows = height.saturating_sub(1).max(1) as usize;
                self.renderer.resize(width as usize, rows);
                self.scene.set_aspect(self.renderer.aspect());
                debug!(width, rows, "terminal resized");
                queue!(stdout(), terminal::Clear(terminal::ClearType::All))?;
            }
            _ => {}
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('p') => {
                self.scene.toggle_projection();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.scene.adjust_distance(DISTANCE_STEP);
            }
            KeyCode::Char('-') => {
                self.scene.adjust_distance(-DISTANCE_STEP);
            }
            _ => {}
        }
    }

    fn render_frame(&mut self) -> Result<(), AppError> {
        let view_projection = self.scene.view_projection();
        let to_light = -self.scene.camera().forward();

        self.renderer.clear();
        for mesh in self.scene.meshes() {
            let vertices = self.registry.bind(mesh)?;
            self.renderer
                .render_mesh(vertices, mesh.transform.matrix(), &view_projection, mesh.color, to_light);
        }

        self.renderer.write_frame(&mut self.frame);
        if let Some(sink) = self.sink.as_mut() {
            sink.publish(&self.frame)?;
        }
        self.frames_rendered += 1;
        Ok(())
    }

    fn draw_terminal(&mut self) -> Result<(), AppError> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Cubes3D | {} | distance {:.2} | p=Projection +/-=Distance q=Quit",
                self.clock.fps_label(),
                self.scene.distance(),
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
