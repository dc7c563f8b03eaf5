/// Polyhedron factory: canonical solids, the dodecahedron as the dual of the
/// icosahedron, and the stellated (triambic) icosahedron.
///
/// Every builder centres the solid on `center`, scales it to `radius` and,
/// when a random source is supplied, applies one uniformly random rotation.
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use log::debug;
use nalgebra::Vector3;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Mesh, Pivot};

/// Golden-ratio constant of the icosahedron coordinates
fn ico_c() -> f64 {
    2.0 / (1.0 + 5f64.sqrt())
}

/// Unit-circumradius icosahedron vertices
fn icosahedron_points() -> Vec<Vector3<f64>> {
    let c = ico_c();
    let n = (1.0 + c * c).sqrt();
    [
        [0.0, c, -1.0],
        [c, 1.0, 0.0],
        [-c, 1.0, 0.0],
        [0.0, c, 1.0],
        [0.0, -c, 1.0],
        [-1.0, 0.0, c],
        [0.0, -c, -1.0],
        [1.0, 0.0, -c],
        [1.0, 0.0, c],
        [-1.0, 0.0, -c],
        [c, -1.0, 0.0],
        [-c, -1.0, 0.0],
    ]
    .iter()
    .map(|&[x, y, z]| Vector3::new(x, y, z) / n)
    .collect()
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 1, 2],
    [0, 1, 7],
    [0, 2, 9],
    [0, 6, 7],
    [0, 6, 9],
    [1, 2, 3],
    [1, 3, 8],
    [1, 7, 8],
    [2, 3, 5],
    [2, 5, 9],
    [3, 4, 5],
    [3, 4, 8],
    [4, 5, 11],
    [4, 8, 10],
    [4, 10, 11],
    [5, 9, 11],
    [6, 7, 10],
    [6, 9, 11],
    [6, 10, 11],
    [7, 8, 10],
];

const ICOSAHEDRON_EDGES: [(usize, usize); 30] = [
    (0, 1),
    (0, 2),
    (0, 6),
    (0, 7),
    (0, 9),
    (1, 2),
    (1, 3),
    (1, 7),
    (1, 8),
    (2, 3),
    (2, 5),
    (2, 9),
    (3, 4),
    (3, 5),
    (3, 8),
    (4, 5),
    (4, 8),
    (4, 10),
    (4, 11),
    (5, 9),
    (5, 11),
    (6, 7),
    (6, 9),
    (6, 10),
    (6, 11),
    (7, 8),
    (7, 10),
    (8, 10),
    (9, 11),
    (10, 11),
];

const TETRAHEDRON_EDGES: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (0, 2),
    (0, 4),
    (1, 3),
    (1, 5),
    (2, 3),
    (2, 6),
    (3, 7),
    (4, 6),
    (4, 5),
    (5, 7),
    (6, 7),
];

const OCTAHEDRON_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (0, 2),
    (0, 4),
    (0, 5),
    (1, 3),
    (1, 4),
    (1, 5),
    (2, 3),
    (2, 4),
    (2, 5),
    (3, 4),
    (3, 5),
];

/// How the canonical solid is brought to the requested size
#[derive(Debug, Clone, Copy)]
enum Sizing {
    /// Scale so vertex 0 lies `radius` from the center of mass
    Circumradius,
    /// Scale by `radius / divisor` regardless of the canonical extent
    Divisor(f64),
}

fn centroid(points: &[Vector3<f64>], face: &[usize; 3]) -> Vector3<f64> {
    (points[face[0]] + points[face[1]] + points[face[2]]) / 3.0
}

/// Translate, size and optionally orient a canonical mesh
fn finish(
    mut mesh: Mesh,
    center: [f64; 3],
    radius: f64,
    sizing: Sizing,
    rng: Option<&mut dyn RngCore>,
) -> Result<Mesh> {
    mesh.translate(&center)?;

    let factor = match sizing {
        Sizing::Circumradius => {
            let reach = match mesh.point(0) {
                Some(p) => (p - mesh.com()).norm(),
                None => 0.0,
            };
            if reach > 0.0 {
                radius / reach
            } else {
                1.0
            }
        }
        Sizing::Divisor(divisor) => radius / divisor,
    };
    mesh.scale(factor, Pivot::CenterOfMass)?;

    if let Some(rng) = rng {
        let axis = random_axis(rng);
        let angle = rng.gen_range(0.0..TAU);
        mesh.rotate_3d(axis.as_slice(), angle, Pivot::CenterOfMass)?;
    }

    debug!(
        "built '{}': {} vertices, {} edges",
        mesh.name(),
        mesh.vertex_count(),
        mesh.edge_count()
    );
    Ok(mesh)
}

/// Direction drawn uniformly from the unit sphere
fn random_axis(rng: &mut dyn RngCore) -> Vector3<f64> {
    let z: f64 = rng.gen_range(-1.0..=1.0);
    let phi = rng.gen_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vector3::new(r * phi.cos(), r * phi.sin(), z)
}

fn check_radius(radius: f64) -> Result<()> {
    if radius < 0.0 || radius.is_nan() {
        return Err(Error::NegativeRadius(radius));
    }
    Ok(())
}

pub fn tetrahedron(
    name: &str,
    center: [f64; 3],
    radius: f64,
    shade: f64,
    rng: Option<&mut dyn RngCore>,
) -> Result<Mesh> {
    check_radius(radius)?;
    let (a, b, c, d) = (1.0 / 3.0, (8.0f64 / 9.0).sqrt(), (2.0f64 / 9.0).sqrt(), (2.0f64 / 3.0).sqrt());
    let points = vec![
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(-c, d, -a),
        Vector3::new(-c, -d, -a),
        Vector3::new(b, 0.0, -a),
    ];
    let mesh = Mesh::from_points(name, shade, points, &TETRAHEDRON_EDGES)?;
    finish(mesh, center, radius, Sizing::Circumradius, rng)
}

pub fn cube(
    name: &str,
    center: [f64; 3],
    radius: f64,
    shade: f64,
    rng: Option<&mut dyn RngCore>,
) -> Result<Mesh> {
    check_radius(radius)?;
    let points = [
        [1.0, 1.0, 1.0],
        [1.0, 1.0, -1.0],
        [1.0, -1.0, 1.0],
        [1.0, -1.0, -1.0],
        [-1.0, 1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, -1.0, -1.0],
    ]
    .iter()
    .map(|&[x, y, z]| Vector3::new(x, y, z))
    .collect();
    let mesh = Mesh::from_points(name, shade, points, &CUBE_EDGES)?;
    finish(mesh, center, radius, Sizing::Circumradius, rng)
}

/// Octahedron with its square equator in the xy-plane.
///
/// The `isosceles` variant pulls the poles in to z = ±1/√2, which makes
/// the faces isosceles rather than equilateral.
pub fn octahedron(
    name: &str,
    center: [f64; 3],
    radius: f64,
    shade: f64,
    rng: Option<&mut dyn RngCore>,
    isosceles: bool,
) -> Result<Mesh> {
    check_radius(radius)?;
    let z = if isosceles {
        1.0 / 2f64.sqrt()
    } else {
        2f64.sqrt()
    };
    let points = vec![
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(1.0, -1.0, 0.0),
        Vector3::new(-1.0, 1.0, 0.0),
        Vector3::new(-1.0, -1.0, 0.0),
        Vector3::new(0.0, 0.0, z),
        Vector3::new(0.0, 0.0, -z),
    ];
    let mesh = Mesh::from_points(name, shade, points, &OCTAHEDRON_EDGES)?;
    finish(mesh, center, radius, Sizing::Circumradius, rng)
}

pub fn icosahedron(
    name: &str,
    center: [f64; 3],
    radius: f64,
    shade: f64,
    rng: Option<&mut dyn RngCore>,
) -> Result<Mesh> {
    check_radius(radius)?;
    let mesh = Mesh::from_points(name, shade, icosahedron_points(), &ICOSAHEDRON_EDGES)?;
    finish(mesh, center, radius, Sizing::Circumradius, rng)
}

/// Dodecahedron built as the face dual of the icosahedron.
///
/// One vertex per icosahedron face, placed at the face centroid pushed out
/// to the unit sphere. Two dual vertices are joined when their faces share
/// exactly two corners.
pub fn dodecahedron(
    name: &str,
    center: [f64; 3],
    radius: f64,
    shade: f64,
    rng: Option<&mut dyn RngCore>,
) -> Result<Mesh> {
    check_radius(radius)?;
    let ico = icosahedron_points();
    let points = ICOSAHEDRON_FACES
        .iter()
        .map(|face| centroid(&ico, face).normalize())
        .collect();

    let mut edges = Vec::with_capacity(30);
    for (i, a) in ICOSAHEDRON_FACES.iter().enumerate() {
        for (j, b) in ICOSAHEDRON_FACES.iter().enumerate().skip(i + 1) {
            let shared = a.iter().filter(|v| b.contains(*v)).count();
            if shared == 2 {
                edges.push((i, j));
            }
        }
    }

    let mesh = Mesh::from_points(name, shade, points, &edges)?;
    finish(mesh, center, radius, Sizing::Circumradius, rng)
}

/// Stellated ("triambic") icosahedron.
///
/// Each icosahedron face gets a spike vertex at `(1 + 2/|c|) * c`, where `c`
/// is the face centroid, joined to the three face corners. Vertices 0..12
/// are the icosahedron, 12..32 the spikes in face order. The solid is scaled
/// by `radius / 3` rather than normalised to its circumradius.
pub fn triambic_icosahedron(
    name: &str,
    center: [f64; 3],
    radius: f64,
    shade: f64,
    rng: Option<&mut dyn RngCore>,
    keep_edges: bool,
) -> Result<Mesh> {
    check_radius(radius)?;
    let mut points = icosahedron_points();
    let mut edges = Vec::with_capacity(90);

    for (idx, face) in ICOSAHEDRON_FACES.iter().enumerate() {
        let c = centroid(&points, face);
        points.push(c * (1.0 + 2.0 / c.norm()));
        edges.extend(face.iter().map(|&v| (12 + idx, v)));
    }
    if keep_edges {
        edges.extend_from_slice(&ICOSAHEDRON_EDGES);
    }

    let mesh = Mesh::from_points(name, shade, points, &edges)?;
    finish(mesh, center, radius, Sizing::Divisor(3.0), rng)
}

/// Every solid the factory can build, with its variant flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Solid {
    Tetrahedron,
    Cube,
    Octahedron {
        #[serde(default)]
        isosceles: bool,
    },
    Icosahedron,
    Dodecahedron,
    #[serde(rename = "triambic")]
    TriambicIcosahedron {
        #[serde(default)]
        keep_edges: bool,
    },
}

impl Solid {
    pub fn build(
        &self,
        name: &str,
        center: [f64; 3],
        radius: f64,
        shade: f64,
        rng: Option<&mut dyn RngCore>,
    ) -> Result<Mesh> {
        match *self {
            Solid::Tetrahedron => tetrahedron(name, center, radius, shade, rng),
            Solid::Cube => cube(name, center, radius, shade, rng),
            Solid::Octahedron { isosceles } => octahedron(name, center, radius, shade, rng, isosceles),
            Solid::Icosahedron => icosahedron(name, center, radius, shade, rng),
            Solid::Dodecahedron => dodecahedron(name, center, radius, shade, rng),
            Solid::TriambicIcosahedron { keep_edges } => {
                triambic_icosahedron(name, center, radius, shade, rng, keep_edges)
            }
        }
    }
}

impl FromStr for Solid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tetrahedron" => Ok(Solid::Tetrahedron),
            "cube" => Ok(Solid::Cube),
            "octahedron" => Ok(Solid::Octahedron { isosceles: false }),
            "icosahedron" => Ok(Solid::Icosahedron),
            "dodecahedron" => Ok(Solid::Dodecahedron),
            "triambic" => Ok(Solid::TriambicIcosahedron { keep_edges: false }),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Solid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Solid::Tetrahedron => "tetrahedron",
            Solid::Cube => "cube",
            Solid::Octahedron { .. } => "octahedron",
            Solid::Icosahedron => "icosahedron",
            Solid::Dodecahedron => "dodecahedron",
            Solid::TriambicIcosahedron { .. } => "triambic",
        };
        f.write_str(name)
    }
}
