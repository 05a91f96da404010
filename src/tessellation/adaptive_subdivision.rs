use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EvaluationError, Result};
use crate::geometry::curve::{gravesen_error, split_control_points};
use crate::math::Point3;

use super::Polyline;

/// Gravesen error below which a Bézier piece is emitted as a single chord.
pub const DEFAULT_FLATNESS_TOLERANCE: f64 = 1e-5;

/// Bisection depth after which a piece is emitted regardless of its error.
pub const DEFAULT_MAX_DEPTH: u32 = 16;

/// Parameters controlling adaptive subdivision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdaptiveParams {
    /// Maximum Gravesen arc-length error of an emitted piece.
    pub tolerance: f64,
    /// Maximum number of bisections applied to any piece. Bounds the output
    /// to `2^max_depth + 1` points.
    pub max_depth: u32,
}

impl Default for AdaptiveParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_FLATNESS_TOLERANCE,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AdaptiveParams {
    fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(EvaluationError::InvalidParameters(format!(
                "flatness tolerance must be finite and non-negative, got {}",
                self.tolerance
            ))
            .into());
        }
        Ok(())
    }
}

/// A Bézier piece waiting on the work stack.
struct Piece {
    control_points: Vec<Point3>,
    depth: u32,
}

/// Flattens a Bézier curve into a polyline whose vertex density follows the
/// curvature, bisecting pieces until Gravesen's arc-length error estimate
/// drops below the tolerance.
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveSubdivision<'a> {
    control_points: &'a [Point3],
    params: AdaptiveParams,
}

impl<'a> AdaptiveSubdivision<'a> {
    /// Creates a new adaptive subdivision.
    #[must_use]
    pub fn new(control_points: &'a [Point3], params: AdaptiveParams) -> Self {
        Self {
            control_points,
            params,
        }
    }

    /// Executes the subdivision.
    ///
    /// The first vertex is the first control point; every processed piece
    /// then contributes its last control point, so vertices come out in
    /// increasing curve parameter and the last vertex is the last control
    /// point.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 control points are provided or the
    /// tolerance is negative or not finite.
    pub fn execute(&self) -> Result<Polyline> {
        EvaluationError::require_points("adaptive subdivision", self.control_points, 2)?;
        self.params.validate()?;

        let mut points = Vec::with_capacity(self.control_points.len() * 4);
        points.extend(self.control_points.first().copied());

        // Right halves are pushed before left halves so the left one pops first.
        let mut stack = vec![Piece {
            control_points: self.control_points.to_vec(),
            depth: 0,
        }];
        let mut capped = 0usize;

        while let Some(piece) = stack.pop() {
            EvaluationError::require_points("adaptive subdivision", &piece.control_points, 2)?;
            let Some(&last) = piece.control_points.last() else {
                continue;
            };

            if piece.control_points.len() > 2
                && gravesen_error(&piece.control_points) > self.params.tolerance
            {
                if piece.depth < self.params.max_depth {
                    let (left, right) = split_control_points(&piece.control_points, 0.5);
                    let depth = piece.depth + 1;
                    stack.push(Piece {
                        control_points: right,
                        depth,
                    });
                    stack.push(Piece {
                        control_points: left,
                        depth,
                    });
                    continue;
                }
                capped += 1;
            }

            points.push(last);
        }

        if capped > 0 {
            warn!(
                capped,
                max_depth = self.params.max_depth,
                "adaptive subdivision hit the depth limit"
            );
        }
        debug!(
            degree = self.control_points.len() - 1,
            samples = points.len(),
            "adaptively subdivided Bezier curve"
        );
        Ok(Polyline { points })
    }
}

/// Adaptively flattens the Bézier curve defined by `control_points` with the
/// default tolerance and depth limit.
///
/// # Errors
///
/// Returns an error if fewer than 2 control points are provided.
pub fn adaptive_subdivision(control_points: &[Point3]) -> Result<Polyline> {
    AdaptiveSubdivision::new(control_points, AdaptiveParams::default()).execute()
}
