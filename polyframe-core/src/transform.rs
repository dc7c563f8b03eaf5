/// Vector kernel behind the mesh transforms
use nalgebra::{Matrix3, Vector2, Vector3};

use crate::error::{Error, Result};

/// Stateless helpers for translation, scaling and rotation
pub struct Transform;

impl Transform {
    /// Arithmetic mean of `points`. An empty set has its centre at the origin.
    pub fn center_of_mass(points: &[Vector3<f64>]) -> Vector3<f64> {
        if points.is_empty() {
            return Vector3::zeros();
        }
        let sum = points.iter().fold(Vector3::zeros(), |acc, p| acc + p);
        sum / points.len() as f64
    }

    /// Move `point` radially away from `center` by `factor`
    pub fn scale_about(point: &Vector3<f64>, center: &Vector3<f64>, factor: f64) -> Vector3<f64> {
        center + (point - center) * factor
    }

    /// Counter-clockwise rotation of `point` about `origin` in the plane
    pub fn rotate_point_2d(origin: &Vector2<f64>, point: &Vector2<f64>, angle: f64) -> Vector2<f64> {
        let (sin, cos) = angle.sin_cos();
        let d = point - origin;
        Vector2::new(
            origin.x + cos * d.x - sin * d.y,
            origin.y + sin * d.x + cos * d.y,
        )
    }

    /// Create a rotation matrix about an arbitrary axis (Euler-Rodrigues).
    ///
    /// The axis is normalised here, so any non-zero length works. Positive
    /// angles turn counter-clockwise when looking down the axis.
    pub fn rotation_matrix(axis: &Vector3<f64>, angle: f64) -> Result<Matrix3<f64>> {
        let norm = axis.norm();
        if norm <= f64::EPSILON || !norm.is_finite() {
            return Err(Error::ZeroAxis);
        }
        let axis = axis / norm;

        let a = (angle / 2.0).cos();
        let s = -(angle / 2.0).sin();
        let (b, c, d) = (axis.x * s, axis.y * s, axis.z * s);
        let (aa, bb, cc, dd) = (a * a, b * b, c * c, d * d);
        let (bc, ad, ac, ab, bd, cd) = (b * c, a * d, a * c, a * b, b * d, c * d);

        Ok(Matrix3::new(
            aa + bb - cc - dd,
            2.0 * (bc + ad),
            2.0 * (bd - ac),
            2.0 * (bc - ad),
            aa + cc - bb - dd,
            2.0 * (cd + ab),
            2.0 * (bd + ac),
            2.0 * (cd - ab),
            aa + dd - bb - cc,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_center_of_mass() {
        let points = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-1.0, 2.0, 0.0),
            Vector3::new(3.0, 1.0, 6.0),
        ];
        let com = Transform::center_of_mass(&points);
        assert!((com - Vector3::new(1.0, 1.0, 2.0)).norm() < 1e-12);
        assert_eq!(Transform::center_of_mass(&[]), Vector3::zeros());
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let rot = Transform::rotation_matrix(&Vector3::new(0.0, 0.0, 2.0), FRAC_PI_2).unwrap();
        let turned = rot * Vector3::new(1.0, 0.0, 0.0);
        assert!((turned - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_is_proper_orthogonal() {
        let rot = Transform::rotation_matrix(&Vector3::new(0.3, -1.2, 0.7), 1.234).unwrap();
        assert!((rot.transpose() * rot - Matrix3::identity()).norm() < 1e-12);
        assert!((rot.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_axis_rejected() {
        assert_eq!(
            Transform::rotation_matrix(&Vector3::zeros(), PI),
            Err(Error::ZeroAxis)
        );
    }

    #[test]
    fn test_rotate_point_2d() {
        let origin = Vector2::new(1.0, 1.0);
        let turned = Transform::rotate_point_2d(&origin, &Vector2::new(2.0, 1.0), PI);
        assert!((turned - Vector2::new(0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_scale_about() {
        let p = Transform::scale_about(&Vector3::new(3.0, 1.0, 1.0), &Vector3::new(1.0, 1.0, 1.0), 0.5);
        assert!((p - Vector3::new(2.0, 1.0, 1.0)).norm() < 1e-12);
    }
}
