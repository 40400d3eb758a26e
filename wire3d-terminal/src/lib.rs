/// Terminal host for the wireframe viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::Viewer;

pub mod cli;
pub mod keys;
pub mod logging;
pub mod renderer;

pub use renderer::CellSurface;

/// Render one frame of `viewer` onto a `width` x `height` grid and return it
/// as text.
pub fn render_snapshot(viewer: &Viewer, width: usize, height: usize) -> String {
    let mut surface = CellSurface::new(width, height, viewer.config().surface_size);
    viewer.render_frame(&mut surface);
    surface.to_text()
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    viewer: Viewer,
    surface: CellSurface,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(viewer: Viewer) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let surface = CellSurface::new(
            width as usize,
            height as usize,
            viewer.config().surface_size,
        );

        Ok(Self {
            viewer,
            surface,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        tracing::info!(
            width = self.surface.width(),
            height = self.surface.height(),
            "terminal viewer started"
        );

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        tracing::info!("terminal viewer stopped");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Apply every pending event before drawing so the frame sees a
            // fully updated camera
            while event::poll(Duration::from_millis(0))? {
                let ev = event::read()?;
                self.handle_event(ev);
            }
            if !self.running {
                break;
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, ev: Event) {
        match ev {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => {
                if code == KeyCode::Esc
                    || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
                {
                    self.running = false;
                    return;
                }
                if let Some(name) = keys::key_name(code) {
                    if !self.viewer.handle_key(&name) {
                        tracing::trace!(key = %name, "unbound key");
                    }
                }
            }
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
                self.surface = CellSurface::new(
                    width as usize,
                    height as usize,
                    self.viewer.config().surface_size,
                );
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.viewer.render_frame(&mut self.surface);

        let mut stdout = stdout();
        self.surface.draw(&mut stdout)?;

        // Draw UI overlay
        let camera = &self.viewer.camera;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(Color::White),
            SetForegroundColor(Color::DarkBlue),
            Print(format!(
                "wire3d | FPS: {:.1} | zoom {:.2} | eye ({:.0}, {:.0}, {:.0}) | Arrows/PgUp/PgDn=Move WASDQE=Rotate Z/X=Zoom Home=Reset Esc=Quit",
                self.fps,
                camera.zoom,
                camera.position.x,
                camera.position.y,
                camera.position.z,
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
