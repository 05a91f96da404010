use serde::{Deserialize, Serialize};

use crate::error::{EvaluationError, Result};
use crate::math::{distance, lerp, normalize, Point3, Vector3, TOLERANCE};

use super::bezier::{de_casteljau, reduce_to_pair};
use super::{Curve, CurveDomain};

/// Reduction depth of a uniform B-spline evaluated by repeated interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BSplineDegree {
    /// Degree `n - 1` for `n` control points; reduces all the way to one point.
    #[default]
    Uniform,
    /// Reduces to a pair and keeps its second point.
    Quadratic,
}

impl BSplineDegree {
    /// Minimum number of control points the evaluator accepts.
    #[must_use]
    pub fn min_points(self) -> usize {
        match self {
            Self::Uniform => 2,
            Self::Quadratic => 3,
        }
    }

    /// Name used in error messages and logs.
    #[must_use]
    pub fn algorithm(self) -> &'static str {
        match self {
            Self::Uniform => "uniform B-spline",
            Self::Quadratic => "quadratic uniform B-spline",
        }
    }

    /// Evaluates `points` at `t`, reusing `buffer` as the working row.
    ///
    /// The caller guarantees at least [`min_points`](Self::min_points)
    /// control points.
    pub(crate) fn reduce(self, points: &[Point3], t: f64, buffer: &mut Vec<Point3>) -> Point3 {
        match self {
            Self::Uniform => de_casteljau(points, t, buffer),
            Self::Quadratic => quadratic_reduce(points, t, buffer),
        }
    }
}

/// Pairwise interpolation until two points remain, with at least two rounds.
/// The second of the surviving pair is the result; three control points
/// reduce all the way to a single point, which is returned instead.
fn quadratic_reduce(points: &[Point3], t: f64, buffer: &mut Vec<Point3>) -> Point3 {
    buffer.clear();
    buffer.extend_from_slice(points);
    let mut len = buffer.len();
    let mut rounds = 0;
    while len > 1 && (len > 2 || rounds < 2) {
        for i in 0..len - 1 {
            buffer[i] = lerp(&buffer[i], &buffer[i + 1], t);
        }
        len -= 1;
        rounds += 1;
    }
    buffer[..len]
        .get(1)
        .or_else(|| buffer.first())
        .copied()
        .unwrap_or_else(Point3::origin)
}

/// Index of the first control point feeding the quadratic evaluator's
/// result. With four or more points the second survivor depends only on
/// `p1..`.
fn quadratic_window_start(point_count: usize) -> usize {
    usize::from(point_count > 3)
}

/// A uniform B-spline evaluated by repeated linear interpolation of its
/// control points.
#[derive(Debug, Clone, PartialEq)]
pub struct BSplineCurve {
    control_points: Vec<Point3>,
    degree: BSplineDegree,
}

impl BSplineCurve {
    /// Creates a B-spline of the given degree kind.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer control points are given than the degree
    /// requires (2 for uniform, 3 for quadratic).
    pub fn new(control_points: Vec<Point3>, degree: BSplineDegree) -> Result<Self> {
        EvaluationError::require_points(degree.algorithm(), &control_points, degree.min_points())?;
        Ok(Self {
            control_points,
            degree,
        })
    }

    /// Returns the control points.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Returns the degree kind.
    #[must_use]
    pub fn degree(&self) -> BSplineDegree {
        self.degree
    }

    /// Derivative (not normalized) at `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector3 {
        let (window, order) = match self.degree {
            BSplineDegree::Uniform => (&self.control_points[..], self.control_points.len() - 1),
            BSplineDegree::Quadratic => {
                let start = quadratic_window_start(self.control_points.len());
                let window = &self.control_points[start..];
                (window, window.len() - 1)
            }
        };
        let mut buffer = Vec::with_capacity(window.len());
        let (a, b) = reduce_to_pair(window, t, &mut buffer);
        #[allow(clippy::cast_precision_loss)]
        let order = order as f64;
        (b - a) * order
    }
}

impl Curve for BSplineCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let mut buffer = Vec::with_capacity(self.control_points.len());
        Ok(self.degree.reduce(&self.control_points, t, &mut buffer))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        normalize(&self.derivative(t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn is_closed(&self) -> bool {
        let (Ok(start), Ok(end)) = (self.evaluate(0.0), self.evaluate(1.0)) else {
            return false;
        };
        distance(&start, &end) < TOLERANCE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hook() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn quadratic_three_points_hand_computed() {
        let mut buffer = Vec::new();
        let p = BSplineDegree::Quadratic.reduce(&hook(), 0.5, &mut buffer);
        assert_relative_eq!(p, Point3::new(1.0, 0.25, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn quadratic_three_points_is_nested_lerp() {
        let pts = hook();
        let mut buffer = Vec::new();
        for t in [0.0, 0.2, 0.7, 1.0] {
            let expected = lerp(&lerp(&pts[0], &pts[1], t), &lerp(&pts[1], &pts[2], t), t);
            let p = BSplineDegree::Quadratic.reduce(&pts, t, &mut buffer);
            assert_relative_eq!(p, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn quadratic_four_points_returns_second_of_pair() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(4.0, 1.0, 2.0),
        ];
        let mut buffer = Vec::new();
        let t = 0.5;
        let p = BSplineDegree::Quadratic.reduce(&pts, t, &mut buffer);
        // Second of the pair: quadratic blend of p1, p2, p3.
        let expected = lerp(&lerp(&pts[1], &pts[2], t), &lerp(&pts[2], &pts[3], t), t);
        assert_relative_eq!(p, expected, epsilon = 1e-12);
        // Full reduction lands elsewhere.
        let full = BSplineDegree::Uniform.reduce(&pts, t, &mut buffer);
        assert!(distance(&p, &full) > 1e-3);
    }

    #[test]
    fn uniform_matches_full_reduction() {
        let pts = hook();
        let mut buffer = Vec::new();
        let p = BSplineDegree::Uniform.reduce(&pts, 0.5, &mut buffer);
        assert_relative_eq!(p, Point3::new(1.0, 0.25, 0.0), epsilon = 1e-12);
        let two = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0)];
        let mid = BSplineDegree::Uniform.reduce(&two, 0.5, &mut buffer);
        assert_eq!(mid, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn new_checks_minimum_per_degree() {
        let two = hook()[..2].to_vec();
        assert!(BSplineCurve::new(two.clone(), BSplineDegree::Uniform).is_ok());
        assert!(BSplineCurve::new(two, BSplineDegree::Quadratic).is_err());
        assert!(BSplineCurve::new(hook(), BSplineDegree::Quadratic).is_ok());
    }

    #[test]
    fn quadratic_derivative_matches_finite_difference() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(4.0, 1.0, 2.0),
        ];
        let curve = BSplineCurve::new(pts, BSplineDegree::Quadratic).unwrap();
        let h = 1e-6;
        let t = 0.4;
        let fd = (curve.evaluate(t + h).unwrap() - curve.evaluate(t - h).unwrap()) / (2.0 * h);
        assert_relative_eq!(curve.derivative(t), fd, epsilon = 1e-6);
    }

    #[test]
    fn uniform_tangent_is_unit() {
        let curve = BSplineCurve::new(hook(), BSplineDegree::Uniform).unwrap();
        assert_relative_eq!(curve.tangent(0.5).unwrap().norm(), 1.0, epsilon = 1e-12);
        assert!(!curve.is_closed());
    }

    fn long_polygon(count: usize) -> Vec<Point3> {
        (0..count)
            .map(|i| {
                let x = f64::from(u32::try_from(i).unwrap());
                Point3::new(x, 0.1 * x * x, 0.0)
            })
            .collect()
    }

    #[test]
    fn quadratic_second_of_pair_blends_tail() {
        let mut buffer = Vec::new();
        for count in [5, 8] {
            let pts = long_polygon(count);
            for t in [0.0, 0.3, 0.5, 0.9, 1.0] {
                let p = BSplineDegree::Quadratic.reduce(&pts, t, &mut buffer);
                let expected = de_casteljau(&pts[1..], t, &mut Vec::new());
                assert_relative_eq!(p, expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn quadratic_depends_on_trailing_points() {
        let mut buffer = Vec::new();
        for count in [5, 8] {
            let a = long_polygon(count);
            let mut b = a.clone();
            for p in &mut b[4..] {
                p.y = 100.0;
                p.z = -50.0;
            }
            for t in [0.3, 0.5, 0.9, 1.0] {
                let pa = BSplineDegree::Quadratic.reduce(&a, t, &mut buffer);
                let pb = BSplineDegree::Quadratic.reduce(&b, t, &mut buffer);
                assert!(distance(&pa, &pb) > 1e-6, "count {count}, t {t}");
            }
        }
    }

    #[test]
    fn quadratic_derivative_matches_finite_difference_long() {
        let curve = BSplineCurve::new(long_polygon(7), BSplineDegree::Quadratic).unwrap();
        let h = 1e-6;
        let t = 0.6;
        let fd = (curve.evaluate(t + h).unwrap() - curve.evaluate(t - h).unwrap()) / (2.0 * h);
        assert_relative_eq!(curve.derivative(t), fd, epsilon = 1e-5);
    }

    #[test]
    fn degree_serializes_camel_case() {
        let json = serde_json::to_string(&BSplineDegree::Quadratic).unwrap();
        assert_eq!(json, "\"quadratic\"");
        let back: BSplineDegree = serde_json::from_str("\"uniform\"").unwrap();
        assert_eq!(back, BSplineDegree::Uniform);
    }
}
