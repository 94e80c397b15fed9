//! Text measurement heuristics.
//!
//! Badges are assembled without a font rasterizer, so every component that reserves space for
//! text goes through the same average-glyph-width estimate.

/// Font stack the consumer is expected to render labels with.
pub const FONT_FAMILY: &str = "Verdana,Helvetica,sans-serif";

/// Average glyph advance of [`FONT_FAMILY`] at 11px (1x scale), in pixels.
pub const AVG_GLYPH_WIDTH: f64 = 6.625;

/// Heuristic: estimate the pixel width of `char_count` characters plus `extra_chars` of padding.
///
/// Returns `ceil((char_count + extra_chars) * AVG_GLYPH_WIDTH * scale)`. An empty label is
/// always zero wide, even when padding was requested. Negative or non-finite scales count as 0.
pub fn estimate_width(char_count: usize, scale: f64, extra_chars: usize) -> u32 {
    if char_count == 0 {
        return 0;
    }
    let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
    let chars = (char_count + extra_chars) as f64;
    (chars * AVG_GLYPH_WIDTH * scale).ceil() as u32
}

/// Same as [`estimate_width`] for a concrete label, counting Unicode scalar values.
pub fn estimate_text_width(text: &str, scale: f64) -> u32 {
    estimate_width(text.chars().count(), scale, 0)
}
