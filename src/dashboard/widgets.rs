//! Text primitives for terminal debug output.

#![allow(missing_docs)]

/// Block glyph ramp, lowest to highest.
pub const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render a normalized sparkline from `0.0..=1.0` values.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sparkline(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| {
            let idx = (value.clamp(0.0, 1.0) * 7.0).round() as usize;
            SPARK_CHARS[idx.min(7)]
        })
        .collect()
}

/// Render raw values scaled against their maximum, matching the geometry
/// baseline rule: a zero or non-finite maximum draws a flat bottom row.
#[must_use]
pub fn sparkline_text(values: &[f64]) -> String {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(max.is_finite() && max != 0.0) {
        return sparkline(&vec![0.0; values.len()]);
    }
    let normalized: Vec<f64> = values.iter().map(|v| v / max).collect();
    sparkline(&normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_clamps_out_of_range_values() {
        let line = sparkline(&[-9.0, 0.0, 0.5, 1.0, 7.5]);
        assert_eq!(line.chars().count(), 5);
        assert_eq!(line.chars().next(), Some('▁'));
        assert_eq!(line.chars().last(), Some('█'));
    }

    #[test]
    fn text_scales_against_max() {
        assert_eq!(sparkline_text(&[0.0, 5.0, 10.0]), "▁▅█");
        assert_eq!(sparkline_text(&[0.0, 0.0]), "▁▁");
        assert_eq!(sparkline_text(&[]), "");
    }
}
