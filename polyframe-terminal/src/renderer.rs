/// Half-block colour renderer for shade rasters
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use polyframe_core::{Colormap, Rgb};
use std::io::Write;

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '\u{2580}';

/// Prints two raster rows per terminal line
pub struct HalfBlockRenderer {
    /// Terminal row of the first raster line
    top: u16,
}

impl HalfBlockRenderer {
    pub fn new(top: u16) -> Self {
        Self { top }
    }

    /// Raster size in pixels for a terminal of `cols` x `lines`
    pub fn canvas_size(&self, cols: u16, lines: u16) -> (usize, usize) {
        let usable = lines.saturating_sub(self.top).max(1);
        (cols.max(1) as usize, usable as usize * 2)
    }

    pub fn draw<W: Write>(&self, rows: &[Vec<f64>], colormap: &Colormap, writer: &mut W) -> std::io::Result<()> {
        for (line, cells) in cell_colors(rows, colormap).iter().enumerate() {
            writer.queue(cursor::MoveTo(0, self.top + line as u16))?;
            for &(upper, lower) in cells {
                writer.queue(SetForegroundColor(rgb(upper)))?;
                writer.queue(SetBackgroundColor(rgb(lower)))?;
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Colour pairs for each terminal cell: (upper pixel, lower pixel).
///
/// An odd final row is paired with itself.
pub fn cell_colors(rows: &[Vec<f64>], colormap: &Colormap) -> Vec<Vec<(Rgb, Rgb)>> {
    rows.chunks(2)
        .map(|pair| {
            let upper = &pair[0];
            let lower = pair.get(1).unwrap_or(upper);
            upper
                .iter()
                .zip(lower)
                .map(|(&u, &l)| (colormap.rgb8(u), colormap.rgb8(l)))
                .collect()
        })
        .collect()
}

fn rgb([r, g, b]: Rgb) -> Color {
    Color::Rgb { r, g, b }
}
