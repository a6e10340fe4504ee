//! Sparkline geometry: ordered values → polyline inside a `W × H` box.
//!
//! `x[i] = W·i/(n−1)` and `y[i] = H − v[i]·(H/max)`. Fewer than two values
//! produce an empty path. A zero (or non-finite) maximum collapses the line
//! onto the baseline `y = H` instead of dividing by zero.

use serde::Serialize;

/// One polyline vertex in renderer coordinates (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Stateless projection of a value sequence into a bounding box.
///
/// Borrowing the values keeps the projection lazy: every call to
/// [`points`](Self::points) starts a fresh pass.
#[derive(Debug, Clone, Copy)]
pub struct SparklineGeometry<'a> {
    values: &'a [f64],
    width: f64,
    height: f64,
}

impl<'a> SparklineGeometry<'a> {
    #[must_use]
    pub const fn new(values: &'a [f64], width: f64, height: f64) -> Self {
        Self {
            values,
            width,
            height,
        }
    }

    /// Whether a line can be drawn at all.
    #[must_use]
    pub const fn is_drawable(&self) -> bool {
        self.values.len() >= 2
    }

    /// Number of points the path will contain.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.is_drawable() {
            self.values.len()
        } else {
            0
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Restartable iterator over the path vertices.
    #[must_use]
    pub fn points(&self) -> SparklinePoints<'a> {
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let scale = if max.is_finite() && max != 0.0 {
            Some(self.height / max)
        } else {
            None
        };
        SparklinePoints {
            values: if self.is_drawable() { self.values } else { &[] },
            width: self.width,
            height: self.height,
            scale,
            index: 0,
        }
    }
}

impl<'a> IntoIterator for &SparklineGeometry<'a> {
    type Item = Point;
    type IntoIter = SparklinePoints<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.points()
    }
}

/// Iterator produced by [`SparklineGeometry::points`].
#[derive(Debug, Clone)]
pub struct SparklinePoints<'a> {
    values: &'a [f64],
    width: f64,
    height: f64,
    /// `H / max`, or `None` for the degenerate flat-baseline case.
    scale: Option<f64>,
    index: usize,
}

impl Iterator for SparklinePoints<'_> {
    type Item = Point;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<Point> {
        let value = *self.values.get(self.index)?;
        let last = (self.values.len() - 1) as f64;
        let x = self.width * self.index as f64 / last;
        let y = self
            .scale
            .map_or(self.height, |scale| self.height - value * scale);
        self.index += 1;
        Some(Point { x, y })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SparklinePoints<'_> {}

/// Collect a sparkline into an owned path.
#[must_use]
pub fn sparkline_path(values: &[f64], width: f64, height: f64) -> Vec<Point> {
    SparklineGeometry::new(values, width, height).points().collect()
}
