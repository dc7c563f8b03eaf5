/// Piecewise-linear shade to RGB colormaps
use crate::error::{Error, Result};

/// An 8-bit colour, one byte per channel
pub type Rgb = [u8; 3];

/// Width of the slivers at either end of the shade range reserved for pens
pub const PEN_MARGIN: f64 = 0.001;

/// A colour pinned to a shade position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub position: f64,
    /// Channels in [0, 1]
    pub color: [f64; 3],
}

/// Maps a shade in [0, 1] to a colour by interpolating between control points.
///
/// Built from an ordered palette: the palette colours are spread evenly over
/// the range with the midpoint of each neighbouring pair inserted between
/// them. Optional pen colours take the extreme ends, so only shades below
/// `PEN_MARGIN` or above `1 - PEN_MARGIN` blend towards them.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    points: Vec<ControlPoint>,
}

impl Colormap {
    pub fn build(colors: &[Rgb], pen_low: Option<Rgb>, pen_high: Option<Rgb>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        let colors: Vec<[f64; 3]> = colors.iter().map(normalize).collect();
        let low = if pen_low.is_some() { PEN_MARGIN } else { 0.0 };
        let high = if pen_high.is_some() { 1.0 - PEN_MARGIN } else { 1.0 };
        let positions = linspace(low, high, 2 * colors.len() - 1);

        let mut points = Vec::with_capacity(positions.len() + 2);
        if let Some(pen) = pen_low {
            points.push(ControlPoint {
                position: 0.0,
                color: normalize(&pen),
            });
        }
        for (idx, color) in colors.iter().enumerate() {
            points.push(ControlPoint {
                position: positions[2 * idx],
                color: *color,
            });
            if let Some(next) = colors.get(idx + 1) {
                points.push(ControlPoint {
                    position: positions[2 * idx + 1],
                    color: [
                        (color[0] + next[0]) / 2.0,
                        (color[1] + next[1]) / 2.0,
                        (color[2] + next[2]) / 2.0,
                    ],
                });
            }
        }
        if let Some(pen) = pen_high {
            points.push(ControlPoint {
                position: 1.0,
                color: normalize(&pen),
            });
        }
        Ok(Self { points })
    }

    /// White at shade 0 through black at shade 1
    pub fn greys() -> Self {
        Self {
            points: vec![
                ControlPoint {
                    position: 0.0,
                    color: [1.0, 1.0, 1.0],
                },
                ControlPoint {
                    position: 0.5,
                    color: [0.5, 0.5, 0.5],
                },
                ControlPoint {
                    position: 1.0,
                    color: [0.0, 0.0, 0.0],
                },
            ],
        }
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Colour at `shade`, channels in [0, 1]. Shades are clamped to [0, 1].
    pub fn eval(&self, shade: f64) -> [f64; 3] {
        let s = if shade.is_nan() { 0.0 } else { shade.clamp(0.0, 1.0) };
        let first = self.points[0];
        if s <= first.position {
            return first.color;
        }
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if s <= b.position {
                let span = b.position - a.position;
                if span <= 0.0 {
                    return b.color;
                }
                let t = (s - a.position) / span;
                return [
                    a.color[0] * (1.0 - t) + b.color[0] * t,
                    a.color[1] * (1.0 - t) + b.color[1] * t,
                    a.color[2] * (1.0 - t) + b.color[2] * t,
                ];
            }
        }
        self.points[self.points.len() - 1].color
    }

    /// Colour at `shade` as 8-bit channels
    pub fn rgb8(&self, shade: f64) -> Rgb {
        self.eval(shade)
            .map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::greys()
    }
}

fn normalize(color: &Rgb) -> [f64; 3] {
    color.map(|c| c as f64 / 255.0)
}

/// `n` evenly spaced values from `start` to `end` inclusive
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = [255, 0, 0];
    const GREEN: Rgb = [0, 255, 0];
    const BLUE: Rgb = [0, 0, 255];

    fn close(a: [f64; 3], b: [f64; 3], eps: f64) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < eps)
    }

    #[test]
    fn test_pen_low_red_blue() {
        let cmap = Colormap::build(&[RED, BLUE], Some(GREEN), None).unwrap();
        assert_eq!(cmap.eval(0.0), [0.0, 1.0, 0.0]);
        assert_eq!(cmap.eval(1.0), [0.0, 0.0, 1.0]);
        assert!(close(cmap.eval(0.5), [0.5, 0.0, 0.5], 1e-3));
        assert_eq!(cmap.control_points().len(), 4);
        assert_eq!(cmap.control_points()[1].position, PEN_MARGIN);
    }

    #[test]
    fn test_plateau_layout() {
        let cmap = Colormap::build(&[RED, GREEN, BLUE], None, None).unwrap();
        let pts = cmap.control_points();
        let positions: Vec<f64> = pts.iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(pts[1].color, [0.5, 0.5, 0.0]);
        assert_eq!(cmap.eval(0.5), [0.0, 1.0, 0.0]);
        assert!(close(cmap.eval(0.125), [0.75, 0.25, 0.0], 1e-12));
    }

    #[test]
    fn test_pen_high_only_reached_at_top() {
        let navy = [0, 48, 87];
        let cmap = Colormap::build(&[navy, navy], None, Some([179, 163, 105])).unwrap();
        assert_eq!(cmap.rgb8(0.3), [0, 48, 87]);
        assert_eq!(cmap.rgb8(0.995), [0, 48, 87]);
        assert_eq!(cmap.rgb8(1.0), [179, 163, 105]);
    }

    #[test]
    fn test_single_colour_ramps_into_pen() {
        let cmap = Colormap::build(&[RED], None, Some(BLUE)).unwrap();
        assert_eq!(cmap.eval(0.0), [1.0, 0.0, 0.0]);
        assert!(close(cmap.eval(0.5), [0.5, 0.0, 0.5], 1e-12));
    }

    #[test]
    fn test_out_of_range_shades_clamp() {
        let cmap = Colormap::build(&[RED, BLUE], None, None).unwrap();
        assert_eq!(cmap.eval(-3.0), cmap.eval(0.0));
        assert_eq!(cmap.eval(9.0), cmap.eval(1.0));
    }

    #[test]
    fn test_greys() {
        let cmap = Colormap::default();
        assert_eq!(cmap.rgb8(0.0), [255, 255, 255]);
        assert_eq!(cmap.rgb8(1.0), [0, 0, 0]);
    }

    #[test]
    fn test_empty_palette() {
        assert_eq!(Colormap::build(&[], None, None), Err(Error::EmptyPalette));
    }
}
