use tracing::debug;

use crate::error::{EvaluationError, Result};
use crate::geometry::curve::BSplineDegree;
use crate::math::Point3;

use super::{evaluate_each, Polyline};

/// Samples a uniform B-spline at an explicit parameter sequence by repeated
/// pairwise interpolation.
#[derive(Debug, Clone, Copy)]
pub struct EvaluateBSpline<'a> {
    control_points: &'a [Point3],
    params: &'a [f64],
    degree: BSplineDegree,
}

impl<'a> EvaluateBSpline<'a> {
    /// Creates a new B-spline evaluation.
    #[must_use]
    pub fn new(control_points: &'a [Point3], params: &'a [f64], degree: BSplineDegree) -> Self {
        Self {
            control_points,
            params,
            degree,
        }
    }

    /// Executes the evaluation, returning one point per parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer control points than the degree
    /// needs (2 for uniform, 3 for quadratic).
    pub fn execute(&self) -> Result<Polyline> {
        let degree = self.degree;
        EvaluationError::require_points(
            degree.algorithm(),
            self.control_points,
            degree.min_points(),
        )?;

        let control_points = self.control_points;
        let points = evaluate_each(self.params, control_points.len(), |t, buffer| {
            degree.reduce(control_points, t, buffer)
        });

        debug!(
            ?degree,
            control_points = control_points.len(),
            samples = points.len(),
            "evaluated B-spline"
        );
        Ok(Polyline { points })
    }
}

/// Evaluates the degree `n - 1` uniform B-spline through full reduction.
///
/// # Errors
///
/// Returns an error if fewer than 2 control points are provided.
pub fn uniform_b_spline(control_points: &[Point3], params: &[f64]) -> Result<Polyline> {
    EvaluateBSpline::new(control_points, params, BSplineDegree::Uniform).execute()
}

/// Evaluates the quadratic uniform B-spline.
///
/// # Errors
///
/// Returns an error if fewer than 3 control points are provided.
pub fn quadratic_uniform_b_spline(control_points: &[Point3], params: &[f64]) -> Result<Polyline> {
    EvaluateBSpline::new(control_points, params, BSplineDegree::Quadratic).execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SplineError;
    use crate::tessellation::{evaluate_bezier_curve, uniform_parameters};
    use approx::assert_relative_eq;

    fn hook() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn quadratic_hand_computed() {
        let out = quadratic_uniform_b_spline(&hook(), &[0.5]).unwrap();
        assert_relative_eq!(out.points[0], Point3::new(1.0, 0.25, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn one_point_per_parameter() {
        let params = uniform_parameters(16);
        assert_eq!(uniform_b_spline(&hook(), &params).unwrap().len(), 17);
        assert_eq!(quadratic_uniform_b_spline(&hook(), &params).unwrap().len(), 17);
    }

    #[test]
    fn uniform_agrees_with_bezier_reduction() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 3.0, 0.0),
            Point3::new(3.0, -1.0, 2.0),
            Point3::new(4.0, 1.0, 2.0),
            Point3::new(6.0, 0.0, 0.0),
        ];
        let params = uniform_parameters(12);
        let spline = uniform_b_spline(&pts, &params).unwrap();
        let bezier = evaluate_bezier_curve(&pts, &params).unwrap();
        assert_eq!(spline, bezier);
    }

    #[test]
    fn quadratic_differs_from_uniform_beyond_three_points() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 3.0, 0.0),
            Point3::new(3.0, -1.0, 2.0),
            Point3::new(4.0, 1.0, 2.0),
        ];
        let quad = quadratic_uniform_b_spline(&pts, &[0.5]).unwrap();
        let full = uniform_b_spline(&pts, &[0.5]).unwrap();
        assert_ne!(quad, full);
    }

    #[test]
    fn minimum_point_counts() {
        let pts = hook();
        let two = &pts[..2];
        assert!(uniform_b_spline(two, &[0.5]).is_ok());
        let err = quadratic_uniform_b_spline(two, &[0.5]).unwrap_err();
        assert!(matches!(
            err,
            SplineError::Evaluation(EvaluationError::InsufficientControlPoints {
                required: 3,
                actual: 2,
                ..
            })
        ));
        assert!(uniform_b_spline(&hook()[..1], &[0.5]).is_err());
    }
}
