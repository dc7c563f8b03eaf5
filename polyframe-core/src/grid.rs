/// A grid holds meshes, a painted background canvas and the drawn raster
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::canvas::{PaintMode, ShadeField};
use crate::error::{Error, Result};
use crate::geometry::{Mesh, Pivot};
use crate::projection::{ProjectionMode, Projector};
use crate::raster;

/// Where pixel (0, 0) appears when the raster is shown as an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    #[default]
    BottomLeft,
    TopLeft,
}

/// Meshes drawn in insertion order onto a shared canvas.
///
/// `raster` is rebuilt from `canvas` on every draw; later meshes overwrite
/// earlier ones where they cross.
#[derive(Debug, Clone)]
pub struct Grid {
    meshes: IndexMap<String, Mesh>,
    canvas: ShadeField,
    raster: ShadeField,
    origin: Origin,
    paint: PaintMode,
}

impl Grid {
    pub fn new(meshes: Vec<Mesh>, width: usize, height: usize, origin: Origin) -> Result<Self> {
        let canvas = ShadeField::new(width, height)?;
        let mut grid = Self {
            meshes: IndexMap::with_capacity(meshes.len()),
            raster: canvas.clone(),
            canvas,
            origin,
            paint: PaintMode::White,
        };
        for mesh in meshes {
            grid.add_mesh(mesh);
        }
        Ok(grid)
    }

    pub fn dim(&self) -> (usize, usize) {
        self.canvas.dim()
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Paint mode last applied to the canvas
    pub fn paint_mode(&self) -> PaintMode {
        self.paint
    }

    /// Add `mesh`, replacing any mesh of the same name in its draw position
    pub fn add_mesh(&mut self, mesh: Mesh) -> Option<Mesh> {
        self.meshes.insert(mesh.name().to_string(), mesh)
    }

    pub fn remove_mesh(&mut self, name: &str) -> Result<Mesh> {
        self.meshes
            .shift_remove(name)
            .ok_or_else(|| Error::UnknownMesh(name.to_string()))
    }

    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.meshes.get(name)
    }

    pub fn mesh_mut(&mut self, name: &str) -> Result<&mut Mesh> {
        self.meshes
            .get_mut(name)
            .ok_or_else(|| Error::UnknownMesh(name.to_string()))
    }

    /// Meshes in draw order
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.meshes.values()
    }

    pub fn translate_mesh(&mut self, name: &str, direction: &[f64]) -> Result<()> {
        self.mesh_mut(name)?.translate(direction)
    }

    /// Scale a mesh about its own center of mass
    pub fn scale_mesh(&mut self, name: &str, factor: f64) -> Result<()> {
        self.mesh_mut(name)?.scale(factor, Pivot::CenterOfMass)
    }

    pub fn rotate_mesh_2d(&mut self, name: &str, origin: &[f64], angle: f64) -> Result<()> {
        self.mesh_mut(name)?.rotate_2d(origin, angle)
    }

    pub fn rotate_mesh_3d(&mut self, name: &str, axis: &[f64], angle: f64, pivot: Pivot<'_>) -> Result<()> {
        self.mesh_mut(name)?.rotate_3d(axis, angle, pivot)
    }

    pub fn paint(&mut self, mode: PaintMode) {
        self.canvas.paint(mode);
        self.paint = mode;
        debug!("painted {:?} canvas with {mode}", self.dim());
    }

    /// Rebuild the raster from the canvas and every mesh
    pub fn draw(&mut self, projection: ProjectionMode) {
        let raster = self.render(self.meshes.values(), projection);
        self.raster = raster;
    }

    /// Rebuild the raster from the canvas and the named meshes only.
    ///
    /// Meshes are drawn in the order given.
    pub fn draw_only(&mut self, names: &[&str], projection: ProjectionMode) -> Result<()> {
        let selected = names
            .iter()
            .map(|name| {
                self.meshes
                    .get(*name)
                    .ok_or_else(|| Error::UnknownMesh(name.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        let raster = self.render(selected.into_iter(), projection);
        self.raster = raster;
        Ok(())
    }

    fn render<'a>(&self, meshes: impl Iterator<Item = &'a Mesh>, projection: ProjectionMode) -> ShadeField {
        let (width, height) = self.dim();
        let projector = Projector::new(width, height, projection);
        let mut raster = self.canvas.clone();
        let mut count = 0;
        let mut dropped = 0;
        for mesh in meshes {
            dropped += raster::draw_mesh(&mut raster, mesh, &projector);
            count += 1;
        }
        debug!("drew {count} meshes ({projection:?}), {dropped} samples off-canvas");
        raster
    }

    /// The painted background
    pub fn canvas(&self) -> &ShadeField {
        &self.canvas
    }

    /// Background plus drawn edges, as of the last draw
    pub fn raster(&self) -> &ShadeField {
        &self.raster
    }

    /// The raster as image rows, top row first, oriented by `origin`
    pub fn image_rows(&self) -> Vec<Vec<f64>> {
        let (width, height) = self.dim();
        (0..height)
            .map(|row| {
                let y = match self.origin {
                    Origin::BottomLeft => height - 1 - row,
                    Origin::TopLeft => row,
                };
                (0..width)
                    .map(|x| self.raster.get(x, y).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}
