//! Small numeric helpers shared by the layout builders: rounding, pixel snapping, coercion.

/// Round to one decimal place; integral values pass through unchanged.
#[inline]
pub fn round1(v: f64) -> f64 {
    round_to(v, 1)
}

/// Round to `decimals` places (half away from zero).
pub fn round_to(v: f64, decimals: u32) -> f64 {
    if v.fract() == 0.0 {
        return v;
    }
    let p = 10f64.powi(decimals as i32);
    (v * p).round() / p
}

/// Snap an x coordinate to the nearest half pixel at or right of it, so 1px strokes land
/// crisply on the pixel grid.
pub fn pix_snap(v: f64) -> f64 {
    let floor = v.floor();
    if v < floor + 0.5 {
        floor + 0.5
    } else {
        floor + 1.5
    }
}

/// Coerce a caller-supplied numeric option: non-numeric text becomes 0, fractions are
/// rounded and the sign is dropped.
pub fn coerce_abs_int(raw: &str) -> u32 {
    let v: f64 = raw.trim().parse().unwrap_or(0.0);
    if !v.is_finite() {
        return 0;
    }
    let v = v.round().abs();
    if v > f64::from(u32::MAX) {
        u32::MAX
    } else {
        v as u32
    }
}

/// Format a coordinate for path data: `16` rather than `16.0`, one decimal otherwise.
pub fn fmt_coord(v: f64) -> String {
    format!("{}", round1(v))
}
