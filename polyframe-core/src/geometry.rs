/// Wireframe meshes: labelled vertices joined by undirected edges
use nalgebra::{Vector2, Vector3};

use crate::error::{Error, Result};
use crate::transform::Transform;

/// An undirected edge, stored with the smaller vertex id first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge(usize, usize);

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self(a.min(b), a.max(b))
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.0, self.1)
    }

    pub fn contains(&self, id: usize) -> bool {
        self.0 == id || self.1 == id
    }

    /// The endpoint opposite `id`, if `id` is on this edge
    pub fn other(&self, id: usize) -> Option<usize> {
        match (self.0 == id, self.1 == id) {
            (true, _) => Some(self.1),
            (_, true) => Some(self.0),
            _ => None,
        }
    }
}

/// Anchor point for scaling and 3D rotation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Pivot<'a> {
    /// The mesh's current center of mass
    #[default]
    CenterOfMass,
    /// An explicit point with one coordinate per mesh dimension
    Point(&'a [f64]),
}

/// A named polyhedral wireframe drawn with a single shade
///
/// Vertex ids are indices into the position list. Positions are kept as
/// 3-vectors; a 2D mesh keeps its z coordinate at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    name: String,
    shade: f64,
    dims: usize,
    positions: Vec<Vector3<f64>>,
    edges: Vec<Edge>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, shade: f64, dims: usize) -> Result<Self> {
        if dims != 2 && dims != 3 {
            return Err(Error::UnsupportedDims(dims));
        }
        check_shade(shade)?;
        Ok(Self {
            name: name.into(),
            shade,
            dims,
            positions: Vec::new(),
            edges: Vec::new(),
        })
    }

    /// Build a mesh from explicit positions and an edge list.
    ///
    /// Every position must have `dims` components and every edge must join
    /// two distinct listed vertices. Repeated edges are collapsed.
    pub fn from_parts(
        name: impl Into<String>,
        shade: f64,
        dims: usize,
        positions: &[Vec<f64>],
        edges: &[(usize, usize)],
    ) -> Result<Self> {
        let mut mesh = Self::new(name, shade, dims)?;
        for position in positions {
            mesh.add_vertex(position)?;
        }
        for &(a, b) in edges {
            mesh.add_edge(a, b)?;
        }
        Ok(mesh)
    }

    pub(crate) fn from_points(
        name: impl Into<String>,
        shade: f64,
        positions: Vec<Vector3<f64>>,
        edges: &[(usize, usize)],
    ) -> Result<Self> {
        let mut mesh = Self::new(name, shade, 3)?;
        mesh.positions = positions;
        for &(a, b) in edges {
            mesh.add_edge(a, b)?;
        }
        Ok(mesh)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shade(&self) -> f64 {
        self.shade
    }

    pub fn set_shade(&mut self, shade: f64) -> Result<()> {
        check_shade(shade)?;
        self.shade = shade;
        Ok(())
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Position of vertex `id`, with `dims` components
    pub fn position(&self, id: usize) -> Option<&[f64]> {
        self.positions.get(id).map(|p| &p.as_slice()[..self.dims])
    }

    /// Position of vertex `id` as a 3-vector (z is zero for 2D meshes)
    pub fn point(&self, id: usize) -> Option<&Vector3<f64>> {
        self.positions.get(id)
    }

    pub fn points(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    pub fn add_vertex(&mut self, position: &[f64]) -> Result<usize> {
        let point = self.vector(position)?;
        self.positions.push(point);
        Ok(self.positions.len() - 1)
    }

    /// Join two vertices. Returns `false` when the edge already exists.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<bool> {
        if a == b || a >= self.positions.len() || b >= self.positions.len() {
            return Err(Error::InvalidEdge(a, b));
        }
        let edge = Edge::new(a, b);
        if self.edges.contains(&edge) {
            return Ok(false);
        }
        self.edges.push(edge);
        Ok(true)
    }

    pub fn neighbors(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().filter_map(move |e| e.other(id))
    }

    pub fn degree(&self, id: usize) -> usize {
        self.edges.iter().filter(|e| e.contains(id)).count()
    }

    /// Mean vertex position, with `dims` components. Recomputed on every call.
    pub fn center_of_mass(&self) -> Vec<f64> {
        self.com().as_slice()[..self.dims].to_vec()
    }

    pub(crate) fn com(&self) -> Vector3<f64> {
        Transform::center_of_mass(&self.positions)
    }

    pub fn translate(&mut self, direction: &[f64]) -> Result<()> {
        let direction = self.vector(direction)?;
        for p in &mut self.positions {
            *p += direction;
        }
        Ok(())
    }

    /// Move every vertex to `center + factor * (p - center)`
    pub fn scale(&mut self, factor: f64, pivot: Pivot<'_>) -> Result<()> {
        if factor < 0.0 || factor.is_nan() {
            return Err(Error::NegativeScale(factor));
        }
        let center = self.pivot(pivot)?;
        for p in &mut self.positions {
            *p = Transform::scale_about(p, &center, factor);
        }
        Ok(())
    }

    /// Rotate counter-clockwise about `origin` in the xy-plane.
    ///
    /// On a 3D mesh the z coordinates are left untouched.
    pub fn rotate_2d(&mut self, origin: &[f64], angle: f64) -> Result<()> {
        if origin.len() != 2 {
            return Err(Error::DimensionMismatch {
                expected: 2,
                found: origin.len(),
            });
        }
        let origin = Vector2::new(origin[0], origin[1]);
        for p in &mut self.positions {
            let turned = Transform::rotate_point_2d(&origin, &p.xy(), angle);
            p.x = turned.x;
            p.y = turned.y;
        }
        Ok(())
    }

    /// Rotate about `axis` through `pivot`
    pub fn rotate_3d(&mut self, axis: &[f64], angle: f64, pivot: Pivot<'_>) -> Result<()> {
        if self.dims != 3 {
            return Err(Error::DimensionMismatch {
                expected: 3,
                found: self.dims,
            });
        }
        let axis = self.vector(axis)?;
        let rot = Transform::rotation_matrix(&axis, angle)?;
        let center = self.pivot(pivot)?;
        for p in &mut self.positions {
            *p = rot * (*p - center) + center;
        }
        Ok(())
    }

    fn pivot(&self, pivot: Pivot<'_>) -> Result<Vector3<f64>> {
        match pivot {
            Pivot::CenterOfMass => Ok(self.com()),
            Pivot::Point(point) => self.vector(point),
        }
    }

    /// Widen a `dims`-length slice to a 3-vector
    fn vector(&self, v: &[f64]) -> Result<Vector3<f64>> {
        if v.len() != self.dims {
            return Err(Error::DimensionMismatch {
                expected: self.dims,
                found: v.len(),
            });
        }
        Ok(Vector3::new(v[0], v[1], v.get(2).copied().unwrap_or(0.0)))
    }
}

fn check_shade(shade: f64) -> Result<()> {
    if (0.0..=1.0).contains(&shade) {
        Ok(())
    } else {
        Err(Error::ShadeOutOfRange(shade))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Mesh {
        Mesh::from_parts(
            "square",
            1.0,
            2,
            &[
                vec![0.0, 0.0],
                vec![2.0, 0.0],
                vec![2.0, 2.0],
                vec![0.0, 2.0],
            ],
            &[(0, 1), (1, 2), (2, 3), (3, 0)],
        )
        .unwrap()
    }

    fn skew_tetra() -> Mesh {
        Mesh::from_parts(
            "tetra",
            0.5,
            3,
            &[
                vec![0.0, 0.0, 0.0],
                vec![3.0, 0.5, -1.0],
                vec![0.2, 2.0, 1.0],
                vec![-1.0, 0.7, 4.0],
            ],
            &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
        )
        .unwrap()
    }

    fn distances(mesh: &Mesh) -> Vec<f64> {
        let pts = mesh.points();
        let mut out = Vec::new();
        for i in 0..pts.len() {
            for j in i + 1..pts.len() {
                out.push((pts[i] - pts[j]).norm());
            }
        }
        out
    }

    #[test]
    fn test_edges_are_undirected() {
        let mut mesh = square();
        assert!(!mesh.add_edge(1, 0).unwrap());
        assert_eq!(mesh.edge_count(), 4);
        assert_eq!(mesh.degree(0), 2);
        let mut n: Vec<_> = mesh.neighbors(0).collect();
        n.sort();
        assert_eq!(n, vec![1, 3]);
    }

    #[test]
    fn test_invalid_edges_rejected() {
        let mut mesh = square();
        assert_eq!(mesh.add_edge(2, 2), Err(Error::InvalidEdge(2, 2)));
        assert_eq!(mesh.add_edge(0, 9), Err(Error::InvalidEdge(0, 9)));
    }

    #[test]
    fn test_unsupported_dims_and_shade() {
        assert_eq!(Mesh::new("m", 1.0, 4), Err(Error::UnsupportedDims(4)));
        assert_eq!(Mesh::new("m", 1.5, 3), Err(Error::ShadeOutOfRange(1.5)));
        let mut mesh = square();
        assert!(mesh.set_shade(-0.1).is_err());
        mesh.set_shade(0.25).unwrap();
        assert_eq!(mesh.shade(), 0.25);
    }

    #[test]
    fn test_center_of_mass_has_mesh_dims() {
        assert_eq!(square().center_of_mass(), vec![1.0, 1.0]);
        assert_eq!(skew_tetra().center_of_mass().len(), 3);
    }

    #[test]
    fn test_translate() {
        let mut mesh = square();
        mesh.translate(&[1.0, -1.0]).unwrap();
        assert_eq!(mesh.position(2), Some(&[3.0, 1.0][..]));
        assert_eq!(
            mesh.translate(&[1.0, 2.0, 3.0]),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_scale_identity_and_negative() {
        let mut mesh = skew_tetra();
        let before = mesh.clone();
        mesh.scale(1.0, Pivot::CenterOfMass).unwrap();
        for (a, b) in mesh.points().iter().zip(before.points()) {
            assert!((a - b).norm() < 1e-12);
        }
        assert_eq!(mesh.scale(-2.0, Pivot::CenterOfMass), Err(Error::NegativeScale(-2.0)));
    }

    #[test]
    fn test_scale_about_point() {
        let mut mesh = square();
        mesh.scale(2.0, Pivot::Point(&[0.0, 0.0])).unwrap();
        assert_eq!(mesh.position(2), Some(&[4.0, 4.0][..]));
        mesh.scale(0.0, Pivot::CenterOfMass).unwrap();
        assert_eq!(mesh.position(0), Some(&[2.0, 2.0][..]));
    }

    #[test]
    fn test_rotate_2d_half_turn() {
        let mut mesh = square();
        mesh.rotate_2d(&[1.0, 1.0], std::f64::consts::PI).unwrap();
        let p = mesh.position(0).unwrap();
        assert!((p[0] - 2.0).abs() < 1e-12 && (p[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_3d_preserves_distances_and_com() {
        let mut mesh = skew_tetra();
        let d0 = distances(&mesh);
        let com0 = mesh.center_of_mass();
        mesh.rotate_3d(&[1.0, 2.0, -0.5], 2.1, Pivot::CenterOfMass).unwrap();
        for (a, b) in distances(&mesh).iter().zip(&d0) {
            assert!((a - b).abs() < 1e-9);
        }
        for (a, b) in mesh.center_of_mass().iter().zip(&com0) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rotate_3d_inverse() {
        let mut mesh = skew_tetra();
        let before = mesh.clone();
        let axis = [0.4, -0.1, 0.9];
        mesh.rotate_3d(&axis, 0.8, Pivot::Point(&[1.0, 1.0, 1.0])).unwrap();
        mesh.rotate_3d(&axis, -0.8, Pivot::Point(&[1.0, 1.0, 1.0])).unwrap();
        for (a, b) in mesh.points().iter().zip(before.points()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_rotate_3d_errors() {
        let mut mesh = skew_tetra();
        assert_eq!(
            mesh.rotate_3d(&[0.0, 0.0, 0.0], 1.0, Pivot::CenterOfMass),
            Err(Error::ZeroAxis)
        );
        let mut flat = square();
        assert!(flat.rotate_3d(&[0.0, 0.0, 1.0], 1.0, Pivot::CenterOfMass).is_err());
    }
}
