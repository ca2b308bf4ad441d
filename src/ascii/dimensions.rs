//! Output grid dimensions.

/// Number of glyph rows for an image scaled to `target_width` columns.
///
/// Preserves the source aspect ratio: `floor(target_width * height / width)`,
/// never less than one row. A zero-width source yields one row; callers
/// reject such images before getting here.
///
/// # Example
/// ```ignore
/// // 512x512 source at 100 columns -> 100 rows
/// assert_eq!(output_height(512, 512, 100), 100);
/// // very wide source still gets a row
/// assert_eq!(output_height(1000, 1, 10), 1);
/// ```
pub fn output_height(img_width: u32, img_height: u32, target_width: u32) -> u32 {
    if img_width == 0 {
        return 1;
    }
    let rows = target_width as u64 * img_height as u64 / img_width as u64;
    rows.clamp(1, u32::MAX as u64) as u32
}
