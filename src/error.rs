use thiserror::Error;

use crate::geometry::curve::KnotParametrization;

/// Top-level error type for the splinekit evaluators.
#[derive(Debug, Error)]
pub enum SplineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// Errors related to the geometry of the control points.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate {parametrization} Catmull-Rom segment {segment}: coincident control points")]
    DegenerateSegment {
        segment: usize,
        parametrization: KnotParametrization,
    },
}

/// Errors related to the inputs of an evaluation.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("{algorithm} requires at least {required} control points, got {actual}")]
    InsufficientControlPoints {
        algorithm: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("invalid evaluation parameters: {0}")]
    InvalidParameters(String),
}

impl EvaluationError {
    /// Checks that `points` holds at least `required` control points.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::InsufficientControlPoints`] when it does not.
    pub(crate) fn require_points<T>(
        algorithm: &'static str,
        points: &[T],
        required: usize,
    ) -> std::result::Result<(), Self> {
        if points.len() < required {
            return Err(Self::InsufficientControlPoints {
                algorithm,
                required,
                actual: points.len(),
            });
        }
        Ok(())
    }
}

/// Convenience type alias for results using [`SplineError`].
pub type Result<T> = std::result::Result<T, SplineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_points_message() {
        let err: SplineError = EvaluationError::InsufficientControlPoints {
            algorithm: "Bezier evaluation",
            required: 2,
            actual: 1,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Bezier evaluation requires at least 2 control points, got 1"
        );
    }

    #[test]
    fn require_points_accepts_minimum() {
        assert!(EvaluationError::require_points("test", &[1, 2], 2).is_ok());
        assert!(matches!(
            EvaluationError::require_points("test", &[1], 2),
            Err(EvaluationError::InsufficientControlPoints {
                required: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn degenerate_segment_names_parametrization() {
        let err = GeometryError::DegenerateSegment {
            segment: 3,
            parametrization: KnotParametrization::Centripetal,
        };
        assert!(err.to_string().contains("centripetal"));
        assert!(err.to_string().contains('3'));
    }
}
