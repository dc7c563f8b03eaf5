/// TOML scene description for the terminal preview
use std::path::Path;

use anyhow::Context;
use nalgebra::Vector3;
use polyframe_core::{parse, Colormap, Grid, Origin, PaintMode, ProjectionMode, Solid};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Deserialize;

/// Top-level scene configuration.
#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    /// Background: "gradient", "radial", "white", "black" or a shade.
    #[serde(default = "default_paint")]
    pub paint: String,
    #[serde(default)]
    pub projection: ProjectionMode,
    #[serde(default)]
    pub origin: Origin,
    /// Palette as `#rrggbb` or `r,g,b` strings. Empty means greyscale.
    #[serde(default)]
    pub colors: Vec<String>,
    pub pen_low: Option<String>,
    pub pen_high: Option<String>,
    /// Seed for random solid orientation (default: from entropy).
    pub seed: Option<u64>,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default, rename = "solid")]
    pub solids: Vec<SolidConfig>,
}

/// A single solid in the scene.
#[derive(Debug, Clone, Deserialize)]
pub struct SolidConfig {
    pub name: Option<String>,
    #[serde(flatten)]
    pub solid: Solid,
    /// Center as fractions of the canvas width and height.
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    /// Depth of the center, in pixels. Drives perspective foreshortening.
    #[serde(default)]
    pub depth: f64,
    /// Circumradius as a fraction of half the smaller canvas side.
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_shade")]
    pub shade: f64,
    #[serde(default)]
    pub random: bool,
    /// Spin axis applied every frame.
    #[serde(default = "default_spin")]
    pub spin: [f64; 3],
    /// Spin speed in radians per frame.
    #[serde(default = "default_speed")]
    pub speed: f64,
}

fn default_paint() -> String {
    "gradient".into()
}

fn default_fps() -> u32 {
    30
}

fn default_center() -> [f64; 2] {
    [0.5, 0.5]
}

fn default_radius() -> f64 {
    0.9
}

fn default_shade() -> f64 {
    1.0
}

fn default_spin() -> [f64; 3] {
    [0.3, 1.0, 0.2]
}

fn default_speed() -> f64 {
    0.03
}

impl SolidConfig {
    pub fn new(solid: Solid) -> Self {
        Self {
            name: None,
            solid,
            center: default_center(),
            depth: 0.0,
            radius: default_radius(),
            shade: default_shade(),
            random: false,
            spin: default_spin(),
            speed: default_speed(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            paint: default_paint(),
            projection: ProjectionMode::Perspective,
            origin: Origin::BottomLeft,
            colors: vec!["#003057".into(), "#0a4a7a".into()],
            pen_low: None,
            pen_high: Some("#b3a369".into()),
            seed: None,
            fps: default_fps(),
            solids: vec![SolidConfig::new(Solid::Dodecahedron)],
        }
    }
}

/// A mesh that turns about a fixed axis every frame
#[derive(Debug, Clone, PartialEq)]
pub struct Spin {
    pub name: String,
    pub axis: Vector3<f64>,
    pub speed: f64,
}

impl SceneConfig {
    /// Load and parse a scene file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text).context("Invalid scene file")?;
        Ok(config)
    }

    pub fn paint_mode(&self) -> anyhow::Result<PaintMode> {
        Ok(self.paint.parse()?)
    }

    pub fn colormap(&self) -> anyhow::Result<Colormap> {
        if self.colors.is_empty() && self.pen_low.is_none() && self.pen_high.is_none() {
            return Ok(Colormap::greys());
        }
        let colors = self
            .colors
            .iter()
            .map(|c| parse::rgb(c))
            .collect::<Result<Vec<_>, _>>()?;
        let pen_low = self.pen_low.as_deref().map(parse::rgb).transpose()?;
        let pen_high = self.pen_high.as_deref().map(parse::rgb).transpose()?;
        Ok(Colormap::build(&colors, pen_low, pen_high)?)
    }

    /// Build the painted grid and the per-mesh spins for a canvas size.
    pub fn build(&self, width: usize, height: usize) -> anyhow::Result<(Grid, Vec<Spin>)> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let half = width.min(height) as f64 / 2.0;

        let mut meshes = Vec::with_capacity(self.solids.len());
        let mut spins = Vec::with_capacity(self.solids.len());
        for (idx, cfg) in self.solids.iter().enumerate() {
            let name = cfg
                .name
                .clone()
                .unwrap_or_else(|| format!("{}-{idx}", cfg.solid));
            let center = [
                cfg.center[0] * (width - 1) as f64,
                cfg.center[1] * (height - 1) as f64,
                cfg.depth,
            ];
            let orient: Option<&mut dyn RngCore> = if cfg.random { Some(&mut rng) } else { None };
            let mesh = cfg
                .solid
                .build(&name, center, cfg.radius * half, cfg.shade, orient)
                .with_context(|| format!("Failed to build solid '{name}'"))?;
            meshes.push(mesh);
            spins.push(Spin {
                name,
                axis: Vector3::from(cfg.spin),
                speed: cfg.speed,
            });
        }

        let mut grid = Grid::new(meshes, width, height, self.origin)?;
        grid.paint(self.paint_mode()?);
        Ok((grid, spins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r##"
paint = "radial"
projection = "ortho"
origin = "top-left"
colors = ["#003057", "10, 74, 122"]
pen_high = "#b3a369"
seed = 42

[[solid]]
type = "octahedron"
isosceles = true
center = [0.25, 0.5]
radius = 0.5

[[solid]]
type = "triambic"
keep_edges = true
name = "star"
random = true
shade = 0.8
"##;

    #[test]
    fn test_parse_scene() {
        let scene = SceneConfig::from_toml(SCENE).unwrap();
        assert_eq!(scene.projection, ProjectionMode::Orthographic);
        assert_eq!(scene.origin, Origin::TopLeft);
        assert_eq!(scene.fps, 30);
        assert_eq!(scene.solids.len(), 2);
        assert_eq!(scene.solids[0].solid, Solid::Octahedron { isosceles: true });
        assert_eq!(
            scene.solids[1].solid,
            Solid::TriambicIcosahedron { keep_edges: true }
        );
        assert_eq!(scene.solids[1].center, [0.5, 0.5]);
        assert_eq!(scene.paint_mode().unwrap(), PaintMode::Radial);
    }

    #[test]
    fn test_build_scene() {
        let scene = SceneConfig::from_toml(SCENE).unwrap();
        let (grid, spins) = scene.build(80, 60).unwrap();
        let names: Vec<_> = grid.meshes().map(|m| m.name().to_string()).collect();
        assert_eq!(names, vec!["octahedron-0", "star"]);
        assert_eq!(spins.len(), 2);
        assert_eq!(grid.paint_mode(), PaintMode::Radial);
        let octa = grid.mesh("octahedron-0").unwrap();
        let com = octa.center_of_mass();
        assert!((com[0] - 0.25 * 79.0).abs() < 1e-9);
        assert!((com[1] - 0.5 * 59.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_scene_is_reproducible() {
        let scene = SceneConfig::from_toml(SCENE).unwrap();
        let (a, _) = scene.build(40, 40).unwrap();
        let (b, _) = scene.build(40, 40).unwrap();
        assert_eq!(a.mesh("star"), b.mesh("star"));
    }

    #[test]
    fn test_colormap_from_scene() {
        let scene = SceneConfig::from_toml(SCENE).unwrap();
        let cmap = scene.colormap().unwrap();
        assert_eq!(cmap.rgb8(0.0), [0, 48, 87]);
        assert_eq!(cmap.rgb8(1.0), [179, 163, 105]);

        let grey = SceneConfig::from_toml("").unwrap().colormap().unwrap();
        assert_eq!(grey, Colormap::greys());
    }

    #[test]
    fn test_bad_values_are_reported() {
        let scene = SceneConfig::from_toml("paint = \"plaid\"").unwrap();
        assert!(scene.paint_mode().is_err());
        let scene = SceneConfig::from_toml("colors = [\"#12\"]").unwrap();
        assert!(scene.colormap().is_err());
        assert!(SceneConfig::from_toml("[[solid]]\ntype = \"torus\"").is_err());
    }
}
