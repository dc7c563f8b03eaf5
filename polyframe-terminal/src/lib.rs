/// Terminal preview of polyhedral wireframes on a painted canvas
use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::debug;
use polyframe_core::{Colormap, Grid, Pivot, ProjectionMode};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod renderer;

pub use config::{SceneConfig, Spin};
pub use renderer::HalfBlockRenderer;

/// Terminal rows reserved above the picture
const STATUS_LINES: u16 = 1;
/// Radians per key press
const KEY_STEP: f64 = 0.1;

pub struct TerminalApp {
    scene: SceneConfig,
    grid: Grid,
    spins: Vec<Spin>,
    colormap: Colormap,
    projection: ProjectionMode,
    renderer: HalfBlockRenderer,
    running: bool,
    paused: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: SceneConfig) -> anyhow::Result<Self> {
        let (cols, lines) = terminal::size().context("Failed to query terminal size")?;
        let renderer = HalfBlockRenderer::new(STATUS_LINES);
        let (width, height) = renderer.canvas_size(cols, lines);
        let (grid, spins) = scene.build(width, height)?;
        let colormap = scene.colormap()?;

        Ok(Self {
            projection: scene.projection,
            scene,
            grid,
            spins,
            colormap,
            renderer,
            running: true,
            paused: false,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / u64::from(self.scene.fps.max(1)));

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            if !self.paused {
                self.update()?;
            }

            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> anyhow::Result<()> {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                    KeyCode::Char('w') | KeyCode::Up => self.turn([1.0, 0.0, 0.0], KEY_STEP)?,
                    KeyCode::Char('s') | KeyCode::Down => self.turn([1.0, 0.0, 0.0], -KEY_STEP)?,
                    KeyCode::Char('a') | KeyCode::Left => self.turn([0.0, 1.0, 0.0], -KEY_STEP)?,
                    KeyCode::Char('d') | KeyCode::Right => self.turn([0.0, 1.0, 0.0], KEY_STEP)?,
                    KeyCode::Char('e') => self.turn([0.0, 0.0, 1.0], KEY_STEP)?,
                    KeyCode::Char('r') => self.turn([0.0, 0.0, 1.0], -KEY_STEP)?,
                    KeyCode::Char('p') => {
                        self.projection = match self.projection {
                            ProjectionMode::Orthographic => ProjectionMode::Perspective,
                            ProjectionMode::Perspective => ProjectionMode::Orthographic,
                        };
                    }
                    KeyCode::Char(' ') => self.paused = !self.paused,
                    _ => {}
                }
            }
            Event::Resize(cols, lines) => self.resize(cols, lines)?,
            _ => {}
        }
        Ok(())
    }

    /// Rotate every mesh about its own center
    fn turn(&mut self, axis: [f64; 3], angle: f64) -> anyhow::Result<()> {
        for spin in &self.spins {
            self.grid
                .rotate_mesh_3d(&spin.name, &axis, angle, Pivot::CenterOfMass)?;
        }
        Ok(())
    }

    fn update(&mut self) -> anyhow::Result<()> {
        for spin in &self.spins {
            if spin.speed == 0.0 || spin.axis.norm() == 0.0 {
                continue;
            }
            self.grid.rotate_mesh_3d(
                &spin.name,
                spin.axis.as_slice(),
                spin.speed,
                Pivot::CenterOfMass,
            )?;
        }
        Ok(())
    }

    /// Rebuild the scene for a new terminal size. Orientation restarts.
    fn resize(&mut self, cols: u16, lines: u16) -> anyhow::Result<()> {
        let (width, height) = self.renderer.canvas_size(cols, lines);
        let (grid, spins) = self.scene.build(width, height)?;
        self.grid = grid;
        self.spins = spins;
        debug!("resized canvas to {width}x{height}");
        execute!(stdout(), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<()> {
        self.grid.draw(self.projection);

        let mut stdout = stdout();
        self.renderer
            .draw(&self.grid.image_rows(), &self.colormap, &mut stdout)?;

        let (width, height) = self.grid.dim();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Polyframe | {width}x{height} {:?} | FPS: {:.1}{} | WASD/Arrows=Rotate E/R=Roll P=Projection Space=Pause Q=Quit",
                self.projection,
                self.fps,
                if self.paused { " (paused)" } else { "" },
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
