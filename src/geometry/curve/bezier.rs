use crate::error::{EvaluationError, Result};
use crate::math::{distance, lerp, normalize, polygon_length, Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// Evaluates the Bézier curve with the given control points at `t` using
/// De Casteljau's algorithm.
///
/// `buffer` is the working row of the triangle. It is cleared and refilled on
/// every call so one allocation can serve a whole parameter sequence.
/// An empty `points` slice evaluates to the origin.
#[must_use]
pub fn de_casteljau(points: &[Point3], t: f64, buffer: &mut Vec<Point3>) -> Point3 {
    buffer.clear();
    buffer.extend_from_slice(points);
    for len in (1..buffer.len()).rev() {
        for i in 0..len {
            buffer[i] = lerp(&buffer[i], &buffer[i + 1], t);
        }
    }
    buffer.first().copied().unwrap_or_else(Point3::origin)
}

/// Runs De Casteljau reduction on `points` until two points remain and
/// returns that pair.
///
/// The pair spans the tangent of the curve at `t`: for a curve of degree `n`
/// the derivative is `n * (pair.1 - pair.0)`. Inputs with fewer than two
/// points return their only point twice (or the origin when empty).
#[must_use]
pub fn reduce_to_pair(points: &[Point3], t: f64, buffer: &mut Vec<Point3>) -> (Point3, Point3) {
    buffer.clear();
    buffer.extend_from_slice(points);
    for len in (2..buffer.len()).rev() {
        for i in 0..len {
            buffer[i] = lerp(&buffer[i], &buffer[i + 1], t);
        }
    }
    match buffer.as_slice() {
        [a, b, ..] => (*a, *b),
        [a] => (*a, *a),
        [] => (Point3::origin(), Point3::origin()),
    }
}

/// Splits a Bézier control polygon at `t` using De Casteljau's triangle.
///
/// The left polygon is the leading diagonal of the triangle, the right
/// polygon is the trailing diagonal read back to front, so both halves keep
/// the forward orientation of the input. The two halves share the split
/// point exactly.
#[must_use]
pub fn split_control_points(points: &[Point3], t: f64) -> (Vec<Point3>, Vec<Point3>) {
    let n = points.len();
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);
    let mut row = points.to_vec();

    for len in (1..=n).rev() {
        left.push(row[0]);
        right.push(row[len - 1]);
        for i in 0..len - 1 {
            row[i] = lerp(&row[i], &row[i + 1], t);
        }
    }

    right.reverse();
    (left, right)
}

/// Gravesen's arc-length error estimate for a Bézier control polygon.
///
/// `E = (n - 1) / (n + 1) * (Lp - Lc)` where `n` is the degree, `Lp` the
/// polygon length and `Lc` the chord length. Zero for lines.
#[must_use]
pub fn gravesen_error(points: &[Point3]) -> f64 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    #[allow(clippy::cast_precision_loss)]
    let degree = points.len().saturating_sub(1) as f64;
    let polygon = polygon_length(points);
    let chord = distance(first, last);
    (degree - 1.0) / (degree + 1.0) * (polygon - chord)
}

/// A Bézier curve of arbitrary degree.
///
/// The parametric form over `[0, 1]` is the Bernstein combination of the
/// control points, evaluated here by repeated linear interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve {
    control_points: Vec<Point3>,
}

impl BezierCurve {
    /// Creates a Bézier curve from its control points.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 control points are given.
    pub fn new(control_points: Vec<Point3>) -> Result<Self> {
        EvaluationError::require_points("Bezier curve", &control_points, 2)?;
        Ok(Self { control_points })
    }

    /// Returns the control points.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Returns the degree (control point count minus one).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.control_points.len() - 1
    }

    /// Splits the curve at `t` into two curves of the same degree.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let (left, right) = split_control_points(&self.control_points, t);
        (
            Self {
                control_points: left,
            },
            Self {
                control_points: right,
            },
        )
    }

    /// Gravesen's arc-length error estimate for this curve.
    #[must_use]
    pub fn flatness_error(&self) -> f64 {
        gravesen_error(&self.control_points)
    }

    /// Derivative (not normalized) at `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector3 {
        let mut buffer = Vec::with_capacity(self.control_points.len());
        let (a, b) = reduce_to_pair(&self.control_points, t, &mut buffer);
        #[allow(clippy::cast_precision_loss)]
        let degree = self.degree() as f64;
        (b - a) * degree
    }
}

impl Curve for BezierCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let mut buffer = Vec::with_capacity(self.control_points.len());
        Ok(de_casteljau(&self.control_points, t, &mut buffer))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        normalize(&self.derivative(t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn is_closed(&self) -> bool {
        match (self.control_points.first(), self.control_points.last()) {
            (Some(first), Some(last)) => distance(first, last) < TOLERANCE,
            _ => false,
        }
    }
}
