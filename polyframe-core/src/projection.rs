/// Projection of mesh vertices onto the canvas plane
use std::str::FromStr;

use nalgebra::{Point2, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Mesh;
use crate::parse;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectionMode {
    #[serde(rename = "ortho")]
    Orthographic,
    #[default]
    #[serde(rename = "persp")]
    Perspective,
}

impl FromStr for ProjectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse::projection_mode(s)
    }
}

/// Projects 3D vertices into canvas coordinates.
///
/// In perspective mode the camera sits on the z-axis at the mesh's own
/// center of mass, so every vertex is pulled towards the center by
/// `max(dim) / (max(dim) + 2|zc|)`. The center is recomputed on each call
/// and follows the mesh as it moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub width: usize,
    pub height: usize,
    pub mode: ProjectionMode,
}

impl Projector {
    pub fn new(width: usize, height: usize, mode: ProjectionMode) -> Self {
        Self {
            width,
            height,
            mode,
        }
    }

    /// Project a single vertex of `mesh`. 2D meshes pass through unchanged.
    pub fn project(&self, mesh: &Mesh, id: usize) -> Result<Point2<f64>> {
        let point = mesh.point(id).ok_or(Error::UnknownVertex(id))?;
        Ok(self.project_point(mesh, point, &mesh.com()))
    }

    /// Project every vertex of `mesh`, indexed by vertex id
    pub fn project_mesh(&self, mesh: &Mesh) -> Vec<Point2<f64>> {
        let com = mesh.com();
        mesh.points()
            .iter()
            .map(|p| self.project_point(mesh, p, &com))
            .collect()
    }

    fn project_point(&self, mesh: &Mesh, point: &Vector3<f64>, com: &Vector3<f64>) -> Point2<f64> {
        if mesh.dims() == 2 || self.mode == ProjectionMode::Orthographic {
            return Point2::new(point.x, point.y);
        }
        let scale = self.foreshortening(com.z);
        Point2::new(
            scale * (point.x - com.x) + com.x,
            scale * (point.y - com.y) + com.y,
        )
    }

    /// Shrink factor for a mesh whose center lies at depth `zc`
    pub fn foreshortening(&self, zc: f64) -> f64 {
        let extent = self.width.max(self.height) as f64;
        extent / (extent + 2.0 * zc.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(z: f64) -> Mesh {
        Mesh::from_parts(
            "bar",
            1.0,
            3,
            &[vec![10.0, 20.0, z], vec![30.0, 20.0, z]],
            &[(0, 1)],
        )
        .unwrap()
    }

    #[test]
    fn test_orthographic_drops_depth() {
        let proj = Projector::new(100, 100, ProjectionMode::Orthographic);
        let p = proj.project(&bar(50.0), 1).unwrap();
        assert_eq!(p, Point2::new(30.0, 20.0));
    }

    #[test]
    fn test_perspective_pulls_towards_center() {
        let proj = Projector::new(100, 80, ProjectionMode::Perspective);
        // center (20, 20, 25): scale = 100 / (100 + 50)
        let pts = proj.project_mesh(&bar(25.0));
        let scale = 100.0 / 150.0;
        assert!((pts[0].x - (20.0 - 10.0 * scale)).abs() < 1e-12);
        assert!((pts[1].x - (20.0 + 10.0 * scale)).abs() < 1e-12);
        assert!((pts[1].y - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_perspective_at_zero_depth_is_identity() {
        let proj = Projector::new(64, 64, ProjectionMode::Perspective);
        assert_eq!(proj.foreshortening(0.0), 1.0);
        assert_eq!(proj.project(&bar(0.0), 0).unwrap(), Point2::new(10.0, 20.0));
    }

    #[test]
    fn test_unknown_vertex() {
        let proj = Projector::new(64, 64, ProjectionMode::Perspective);
        assert_eq!(proj.project(&bar(1.0), 5), Err(Error::UnknownVertex(5)));
    }
}
