/// Edge rasterizer: stamps a shade along sampled points of a segment
use log::trace;
use nalgebra::Point2;

use crate::canvas::ShadeField;
use crate::geometry::Mesh;
use crate::projection::Projector;

/// Above this size on both axes every sample is stamped two pixels tall
pub const THICK_STAMP_THRESHOLD: usize = 200;

/// Draw the segment `p1`-`p2` onto `field` with `shade`.
///
/// The segment is sampled at `max(width, height)` evenly spaced points,
/// endpoints included. Samples outside `[0, width-1] x [0, height-1]` are
/// dropped rather than clipped, so a segment leaving the field can show a
/// gap at the border. Returns the number of dropped samples.
pub fn draw_edge(field: &mut ShadeField, p1: &Point2<f64>, p2: &Point2<f64>, shade: f64) -> usize {
    let (width, height) = field.dim();
    let samples = width.max(height);
    let thick = width > THICK_STAMP_THRESHOLD && height > THICK_STAMP_THRESHOLD;
    let (x_max, y_max) = ((width - 1) as f64, (height - 1) as f64);
    let delta = p2 - p1;

    let mut dropped = 0;
    for i in 0..samples {
        let t = if samples > 1 {
            i as f64 / (samples - 1) as f64
        } else {
            0.0
        };
        let u = p1 + delta * t;
        if !(0.0..=x_max).contains(&u.x) || !(0.0..=y_max).contains(&u.y) {
            dropped += 1;
            continue;
        }

        let x = u.x.round_ties_even() as usize;
        if thick {
            field.set(x, u.y.ceil() as usize, shade);
            field.set(x, u.y.floor() as usize, shade);
        } else {
            field.set(x, u.y.round_ties_even() as usize, shade);
        }
    }
    dropped
}

/// Draw every edge of `mesh` in edge order. Returns the dropped sample count.
pub fn draw_mesh(field: &mut ShadeField, mesh: &Mesh, projector: &Projector) -> usize {
    let points = projector.project_mesh(mesh);
    let mut dropped = 0;
    for edge in mesh.edges() {
        let (a, b) = edge.endpoints();
        let lost = draw_edge(field, &points[a], &points[b], mesh.shade());
        trace!("{}: edge ({a}, {b}) dropped {lost} samples", mesh.name());
        dropped += lost;
    }
    dropped
}
