//! Display hues for timeline parts.
//!
//! Parts cut from the same source position get the same hue so they can be
//! visually grouped. The hue is purely cosmetic: it is derived on demand from
//! `(source id, from)` and never persisted.

use crate::source_id::SourceId;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Derive the stable display hue, in `[0, 1)`, for a part.
pub fn part_hue(source_id: &SourceId, from: f64) -> f64 {
    let mut hasher = DefaultHasher::new();
    source_id.as_str().hash(&mut hasher);
    from.to_bits().hash(&mut hasher);
    (hasher.finish() % 360) as f64 / 360.0
}

/// Convert an HSV color (all components in `[0, 1]`) to 8-bit RGB.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    (
        (r * 255.0).floor() as u8,
        (g * 255.0).floor() as u8,
        (b * 255.0).floor() as u8,
    )
}
