use image::{Rgb, RgbImage};

use crate::color::ColorScale;
use crate::data::model::Matrix;

/// Paint `matrix` as a grid of `scale`×`scale` blocks.
///
/// Row 0 is drawn at the bottom so the picture has its y axis pointing up.
pub fn render_heatmap(matrix: &Matrix, color: &ColorScale, scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let (rows, cols) = matrix.shape();
    let width = cols as u32 * scale;
    let height = rows as u32 * scale;
    let mut img = RgbImage::new(width, height);

    for (r, row) in matrix.iter_rows().enumerate() {
        let top = (rows - 1 - r) as u32 * scale;
        for (c, &value) in row.iter().enumerate() {
            let pixel = Rgb(color.rgb(value));
            let left = c as u32 * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(left + dx, top + dy, pixel);
                }
            }
        }
    }
    img
}

/// Pixel block size that brings the longer side of a field near `target`.
pub fn auto_scale(matrix: &Matrix, target: u32) -> u32 {
    let longest = matrix.rows().max(matrix.cols()).max(1) as u32;
    (target / longest).max(1)
}
