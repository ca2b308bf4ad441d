//! Resampling pixel data to the glyph grid.

use super::pixels::{PixelGrid, Rgb};

/// Resample an image to `char_width` x `char_height` cells.
///
/// Each cell's color is the integer mean of the source pixels it covers.
/// Cell bounds use integer arithmetic so the result is identical across
/// platforms. When a cell is narrower than one source pixel (upscaling) it
/// covers exactly one pixel, which makes enlargement nearest-neighbour.
///
/// # Returns
/// `char_width * char_height` colors in row-major order, or an empty vector
/// if either the image or the target has no area.
pub fn resample(frame: &PixelGrid, char_width: u32, char_height: u32) -> Vec<Rgb> {
    let img_width = frame.width();
    let img_height = frame.height();

    if char_width == 0 || char_height == 0 || img_width == 0 || img_height == 0 {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(char_width as usize * char_height as usize);

    for cy in 0..char_height {
        let (start_y, end_y) = cell_span(cy, char_height, img_height);
        for cx in 0..char_width {
            let (start_x, end_x) = cell_span(cx, char_width, img_width);

            let mut sum_r = 0u64;
            let mut sum_g = 0u64;
            let mut sum_b = 0u64;
            let mut count = 0u64;

            for py in start_y..end_y {
                for px in start_x..end_x {
                    let p = frame.rgb_at(px, py);
                    sum_r += p.r as u64;
                    sum_g += p.g as u64;
                    sum_b += p.b as u64;
                    count += 1;
                }
            }

            result.push(Rgb::new(
                (sum_r / count) as u8,
                (sum_g / count) as u8,
                (sum_b / count) as u8,
            ));
        }
    }

    result
}

/// Source pixel range `[start, end)` covered by output cell `cell`.
/// Never empty and never past `source_len`.
fn cell_span(cell: u32, cells: u32, source_len: u32) -> (u32, u32) {
    let start = (cell as u64 * source_len as u64 / cells as u64) as u32;
    let end = ((cell as u64 + 1) * source_len as u64 / cells as u64) as u32;
    let start = start.min(source_len - 1);
    (start, end.max(start + 1))
}
