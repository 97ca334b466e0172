//! The shared magnitude/vigor/intensity window primitive.
//!
//! Length change, area change and displacement all decompose the same way
//! over a trailing window: the peak per-frame difference (magnitude), the
//! peak divided by the time remaining from the peak to the window's end
//! (vigor), and the window-mean rate (intensity).

/// Magnitude/vigor/intensity triple for one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakProfile {
    pub magnitude: f64,
    pub vigor: f64,
    pub intensity: f64,
}

/// Index and value of the first maximum, or `None` for an empty slice.
pub(crate) fn argmax(values: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, bv)) if v <= bv => {}
            _ => best = Some((i, v)),
        }
    }
    best
}

/// Index and value of the first minimum, or `None` for an empty slice.
pub(crate) fn argmin(values: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, bv)) if v >= bv => {}
            _ => best = Some((i, v)),
        }
    }
    best
}

/// Compute the triple from per-frame differences over one window. `diffs`
/// holds one value per window frame, oldest first. Returns `None` unless the
/// peak is strictly positive.
pub fn peak_profile(diffs: &[f64], fps: f64) -> Option<PeakProfile> {
    let window_len = diffs.len();
    let (peak_offset, magnitude) = argmax(diffs)?;
    if !(magnitude > 0.0) {
        return None;
    }
    // Time from the peak to the window's end; the peak at the last offset
    // still leaves one frame interval.
    let to_end = (window_len - peak_offset) as f64 / fps;
    let vigor = magnitude / to_end;
    let intensity = diffs.iter().sum::<f64>() / (window_len as f64 / fps);
    Some(PeakProfile {
        magnitude,
        vigor,
        intensity,
    })
}
