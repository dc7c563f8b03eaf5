/// Shade fields and procedural background paint
use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::error::{Error, Result};
use crate::parse;

/// Background values are kept inside `[PAINT_FLOOR, PAINT_CEIL]` so that
/// the colormap's pen colours only ever show up under drawn edges.
pub const PAINT_FLOOR: f64 = 0.005;
pub const PAINT_CEIL: f64 = 0.995;

/// A width x height field of shades in [0, 1].
///
/// Indexed as `(x, y)` with `x < width` and `y < height`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadeField {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl ShadeField {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, 0.0)
    }

    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidGridSize { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![value; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dim(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Write one pixel. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: f64) -> bool {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
            true
        } else {
            false
        }
    }

    /// Raw values, `y`-major
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Fill every pixel from `mode`, then clamp into the paint margin
    pub fn paint(&mut self, mode: PaintMode) {
        if let PaintMode::Uniform(shade) = mode {
            if !(0.0..=1.0).contains(&shade) {
                warn!("uniform shade {shade} is outside [0, 1]; painting clamped value");
            }
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let value = mode.shade_at(x, y, self.width, self.height);
                self.data[y * self.width + x] = value.clamp(PAINT_FLOOR, PAINT_CEIL);
            }
        }
    }
}

/// Background fill for a canvas
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PaintMode {
    /// Constant shade
    Uniform(f64),
    /// Diagonal ramp from 1 at the origin corner to 0 at the far corner
    Gradient,
    /// L1 falloff from 1 at the center
    Radial,
    /// Constant 0
    #[default]
    White,
    /// Constant 1
    Black,
}

impl PaintMode {
    /// Unclamped shade of pixel `(x, y)` on a `width` x `height` field.
    /// A NaN uniform shade reads as 0.
    pub fn shade_at(&self, x: usize, y: usize, width: usize, height: usize) -> f64 {
        let (u, v) = (ratio(x, width), ratio(y, height));
        match *self {
            PaintMode::Uniform(shade) if shade.is_nan() => 0.0,
            PaintMode::Uniform(shade) => shade,
            PaintMode::Gradient => (1.0 - u - v + 1.0) / 2.0,
            PaintMode::Radial => 1.0 - (0.5 - u).abs() - (0.5 - v).abs(),
            PaintMode::White => 0.0,
            PaintMode::Black => 1.0,
        }
    }
}

/// Position of `i` along an axis of `n` pixels, in [0, 1]. A single-pixel
/// axis sits at 0.
fn ratio(i: usize, n: usize) -> f64 {
    if n > 1 {
        i as f64 / (n - 1) as f64
    } else {
        0.0
    }
}

impl FromStr for PaintMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse::paint_mode(s)
    }
}

impl fmt::Display for PaintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaintMode::Uniform(shade) => write!(f, "{shade}"),
            PaintMode::Gradient => f.write_str("gradient"),
            PaintMode::Radial => f.write_str("radial"),
            PaintMode::White => f.write_str("white"),
            PaintMode::Black => f.write_str("black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_corners() {
        let m = PaintMode::Gradient;
        assert_eq!(m.shade_at(0, 0, 2, 2), 1.0);
        assert_eq!(m.shade_at(1, 0, 2, 2), 0.5);
        assert_eq!(m.shade_at(0, 1, 2, 2), 0.5);
        assert_eq!(m.shade_at(1, 1, 2, 2), 0.0);

        let mut field = ShadeField::new(2, 2).unwrap();
        field.paint(m);
        assert_eq!(field.values(), &[PAINT_CEIL, 0.5, 0.5, PAINT_FLOOR]);
    }

    #[test]
    fn test_radial_peaks_at_center() {
        let mut field = ShadeField::new(5, 5).unwrap();
        field.paint(PaintMode::Radial);
        assert_eq!(field.get(2, 2), Some(PAINT_CEIL));
        assert_eq!(field.get(0, 0), Some(PAINT_FLOOR));
        assert_eq!(field.get(0, 2), Some(0.5));
    }

    #[test]
    fn test_constant_paints_are_clamped() {
        let mut field = ShadeField::new(3, 4).unwrap();
        field.paint(PaintMode::White);
        assert!(field.values().iter().all(|&v| v == PAINT_FLOOR));
        field.paint(PaintMode::Black);
        assert!(field.values().iter().all(|&v| v == PAINT_CEIL));
        field.paint(PaintMode::Uniform(0.3));
        assert!(field.values().iter().all(|&v| v == 0.3));
        field.paint(PaintMode::Uniform(7.0));
        assert!(field.values().iter().all(|&v| v == PAINT_CEIL));
    }

    #[test]
    fn test_non_finite_uniform_stays_in_margin() {
        let mut field = ShadeField::new(2, 2).unwrap();
        field.paint(PaintMode::Uniform(f64::NAN));
        assert!(field.values().iter().all(|&v| v == PAINT_FLOOR));
        field.paint(PaintMode::Uniform(f64::INFINITY));
        assert!(field.values().iter().all(|&v| v == PAINT_CEIL));
        field.paint(PaintMode::Uniform(f64::NEG_INFINITY));
        assert!(field.values().iter().all(|&v| v == PAINT_FLOOR));
        assert_eq!(PaintMode::default(), PaintMode::White);
    }

    #[test]
    fn test_single_pixel_axis() {
        let mut field = ShadeField::new(1, 3).unwrap();
        field.paint(PaintMode::Gradient);
        assert_eq!(field.get(0, 0), Some(PAINT_CEIL));
        assert_eq!(field.get(0, 2), Some(0.5));
    }

    #[test]
    fn test_set_out_of_range_is_ignored() {
        let mut field = ShadeField::new(2, 2).unwrap();
        assert!(!field.set(2, 0, 1.0));
        assert!(field.set(1, 1, 1.0));
        assert_eq!(field.get(1, 1), Some(1.0));
        assert_eq!(field.get(5, 5), None);
    }

    #[test]
    fn test_empty_field_rejected() {
        assert_eq!(
            ShadeField::new(0, 3),
            Err(Error::InvalidGridSize { width: 0, height: 3 })
        );
    }

    #[test]
    fn test_parse_round_trip_names() {
        assert_eq!("radial".parse::<PaintMode>(), Ok(PaintMode::Radial));
        assert_eq!(PaintMode::Gradient.to_string(), "gradient");
    }
}
