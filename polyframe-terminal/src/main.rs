/// Polyframe terminal preview
///
/// Draws spinning polyhedral wireframes over a painted background.
/// Controls:
///   - WASD / Arrow Keys: Rotate the solids
///   - E/R: Roll rotation
///   - P: Toggle perspective
///   - Space: Pause
///   - Q/ESC: Quit
use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use polyframe_core::{PaintMode, ProjectionMode, Solid};
use polyframe_terminal::config::SolidConfig;
use polyframe_terminal::{SceneConfig, TerminalApp};

#[derive(Parser, Debug)]
#[command(author, version, about = "Polyhedral wireframes in the terminal")]
struct Cli {
    /// Scene file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Draw a single solid instead of the scene's solids
    #[arg(long)]
    solid: Option<Solid>,

    /// Seed for random orientations
    #[arg(long)]
    seed: Option<u64>,

    /// Background: gradient, radial, white, black or a shade in [0, 1]
    #[arg(long)]
    paint: Option<PaintMode>,

    /// Projection: ortho or persp
    #[arg(long)]
    projection: Option<ProjectionMode>,

    /// Target frame rate
    #[arg(long)]
    fps: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut scene = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if let Some(solid) = cli.solid {
        scene.solids = vec![SolidConfig::new(solid)];
    }
    if let Some(seed) = cli.seed {
        scene.seed = Some(seed);
    }
    if let Some(paint) = cli.paint {
        scene.paint = paint.to_string();
    }
    if let Some(projection) = cli.projection {
        scene.projection = projection;
    }
    if let Some(fps) = cli.fps {
        scene.fps = fps;
    }

    let mut app = TerminalApp::new(scene)?;
    app.run()
}
