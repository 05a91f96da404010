use tracing::debug;

use crate::error::{EvaluationError, Result};
use crate::geometry::curve::de_casteljau;
use crate::math::Point3;

use super::{evaluate_each, Polyline};

/// Samples a Bézier curve at an explicit parameter sequence using
/// De Casteljau's algorithm.
#[derive(Debug, Clone, Copy)]
pub struct EvaluateBezier<'a> {
    control_points: &'a [Point3],
    params: &'a [f64],
}

impl<'a> EvaluateBezier<'a> {
    /// Creates a new Bézier evaluation.
    #[must_use]
    pub fn new(control_points: &'a [Point3], params: &'a [f64]) -> Self {
        Self {
            control_points,
            params,
        }
    }

    /// Executes the evaluation, returning one point per parameter in
    /// parameter order.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 control points are provided.
    pub fn execute(&self) -> Result<Polyline> {
        EvaluationError::require_points("Bezier evaluation", self.control_points, 2)?;

        let control_points = self.control_points;
        let points = evaluate_each(self.params, control_points.len(), |t, buffer| {
            de_casteljau(control_points, t, buffer)
        });

        debug!(
            degree = control_points.len() - 1,
            samples = points.len(),
            "evaluated Bezier curve"
        );
        Ok(Polyline { points })
    }
}

/// Samples the Bézier curve defined by `control_points` at every value of
/// `params`.
///
/// # Errors
///
/// Returns an error if fewer than 2 control points are provided.
pub fn evaluate_bezier_curve(control_points: &[Point3], params: &[f64]) -> Result<Polyline> {
    EvaluateBezier::new(control_points, params).execute()
}
