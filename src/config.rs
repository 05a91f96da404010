//! Serializable evaluation settings.
//!
//! A [`CurveConfig`] names an evaluator, its control points and its
//! parameters, and can be deserialized from the same JSON records a curve
//! editor keeps per curve. Display-only fields such as `showControlPoints`
//! are ignored.
//!
//! ```
//! use splinekit::config::CurveConfig;
//!
//! let config: CurveConfig = serde_json::from_str(
//!     r#"{
//!         "tag": "catmullRom",
//!         "controlPoints": [[0, 0, 0], [1, 2, 0], [3, 2, 0], [4, 0, 0]],
//!         "knotParametrization": { "uniform": true, "centripetal": true },
//!         "showControlPoints": true
//!     }"#,
//! )
//! .unwrap();
//!
//! let curves = config.sample().unwrap();
//! assert_eq!(curves.len(), 2);
//! assert_eq!(curves[1].label, "centripetal");
//! assert_eq!(curves[1].polyline.len(), 21);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::curve::BSplineDegree;
use crate::math::Point3;
use crate::tessellation::{
    uniform_parameters, AdaptiveParams, AdaptiveSubdivision, CatmullRomParams, CatmullRomSpline,
    EvaluateBSpline, EvaluateBezier, KnotSelection, Polyline,
};

/// Step count used when a record does not specify `nSteps`.
pub const DEFAULT_N_STEPS: usize = 50;

fn default_n_steps() -> usize {
    DEFAULT_N_STEPS
}

/// Evaluation settings for one curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "camelCase")]
pub enum CurveConfig {
    /// A Bézier curve, sampled uniformly or adaptively.
    #[serde(rename_all = "camelCase")]
    Bezier {
        control_points: Vec<Point3>,
        #[serde(default = "default_n_steps")]
        n_steps: usize,
        /// Ignore `n_steps` and flatten by arc-length error instead.
        #[serde(default)]
        adaptive_subdivision: bool,
        #[serde(default)]
        adaptive: AdaptiveParams,
    },
    /// A uniform or quadratic uniform B-spline.
    #[serde(rename_all = "camelCase")]
    BSpline {
        control_points: Vec<Point3>,
        #[serde(default = "default_n_steps")]
        n_steps: usize,
        #[serde(default)]
        degree: BSplineDegree,
    },
    /// A Catmull-Rom spline under one or more knot parametrizations.
    #[serde(rename_all = "camelCase")]
    CatmullRom {
        control_points: Vec<Point3>,
        #[serde(default)]
        knot_parametrization: KnotSelection,
        #[serde(default)]
        params: CatmullRomParams,
    },
}

/// One sampled curve produced from a [`CurveConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct SampledCurve {
    /// Which evaluation produced the polyline.
    pub label: &'static str,
    /// The sampled points.
    pub polyline: Polyline,
}

impl CurveConfig {
    /// Control points of the configured curve.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        match self {
            Self::Bezier { control_points, .. }
            | Self::BSpline { control_points, .. }
            | Self::CatmullRom { control_points, .. } => control_points,
        }
    }

    /// Runs the configured evaluator.
    ///
    /// Bézier and B-spline records yield one polyline; Catmull-Rom records
    /// yield one per selected knot parametrization, labelled by its name.
    ///
    /// # Errors
    ///
    /// Propagates the evaluator's error, e.g. too few control points.
    pub fn sample(&self) -> Result<Vec<SampledCurve>> {
        match self {
            Self::Bezier {
                control_points,
                n_steps,
                adaptive_subdivision,
                adaptive,
            } => {
                let (label, polyline) = if *adaptive_subdivision {
                    (
                        "adaptive",
                        AdaptiveSubdivision::new(control_points, *adaptive).execute()?,
                    )
                } else {
                    let params = uniform_parameters(*n_steps);
                    ("bezier", EvaluateBezier::new(control_points, &params).execute()?)
                };
                Ok(vec![SampledCurve { label, polyline }])
            }
            Self::BSpline {
                control_points,
                n_steps,
                degree,
            } => {
                let params = uniform_parameters(*n_steps);
                let polyline = EvaluateBSpline::new(control_points, &params, *degree).execute()?;
                let label = match degree {
                    BSplineDegree::Uniform => "uniformBSpline",
                    BSplineDegree::Quadratic => "quadraticBSpline",
                };
                Ok(vec![SampledCurve { label, polyline }])
            }
            Self::CatmullRom {
                control_points,
                knot_parametrization,
                params,
            } => {
                let samples =
                    CatmullRomSpline::new(control_points, *knot_parametrization, *params).execute()?;
                Ok(samples
                    .into_vec()
                    .into_iter()
                    .map(|(kind, polyline)| SampledCurve {
                        label: kind.name(),
                        polyline,
                    })
                    .collect())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bezier_defaults() {
        let config: CurveConfig = serde_json::from_str(
            r#"{"tag": "bezier", "controlPoints": [[0, 0, 0], [1, 1, 0], [2, 0, 0]]}"#,
        )
        .unwrap();
        let CurveConfig::Bezier {
            n_steps,
            adaptive_subdivision,
            adaptive,
            ..
        } = &config
        else {
            panic!("expected a Bezier record");
        };
        assert_eq!(*n_steps, DEFAULT_N_STEPS);
        assert!(!*adaptive_subdivision);
        assert_eq!(*adaptive, AdaptiveParams::default());

        let curves = config.sample().unwrap();
        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].label, "bezier");
        assert_eq!(curves[0].polyline.len(), DEFAULT_N_STEPS + 1);
    }

    #[test]
    fn adaptive_bezier() {
        let config: CurveConfig = serde_json::from_str(
            r#"{
                "tag": "bezier",
                "controlPoints": [[0, 0, 0], [1, 2, 0], [3, 2, 0], [4, 0, 0]],
                "nSteps": 4,
                "adaptiveSubdivision": true,
                "showSamplePoints": false
            }"#,
        )
        .unwrap();
        let curves = config.sample().unwrap();
        assert_eq!(curves[0].label, "adaptive");
        assert!(curves[0].polyline.len() > 5);
    }

    #[test]
    fn quadratic_bspline_record() {
        let config: CurveConfig = serde_json::from_str(
            r#"{
                "tag": "bSpline",
                "controlPoints": [[0, 0, 0], [1, 0, 0], [2, 1, 0]],
                "nSteps": 2,
                "degree": "quadratic"
            }"#,
        )
        .unwrap();
        assert_eq!(config.control_points().len(), 3);
        let curves = config.sample().unwrap();
        assert_eq!(curves[0].label, "quadraticBSpline");
        assert_eq!(curves[0].polyline.points[1], Point3::new(1.0, 0.25, 0.0));
    }

    #[test]
    fn catmull_rom_errors_propagate() {
        let config = CurveConfig::CatmullRom {
            control_points: vec![Point3::origin(); 3],
            knot_parametrization: KnotSelection::all(),
            params: CatmullRomParams::default(),
        };
        assert!(config.sample().is_err());
    }

    #[test]
    fn serializes_with_tag() {
        let config = CurveConfig::BSpline {
            control_points: vec![Point3::new(1.0, 2.0, 3.0), Point3::origin()],
            n_steps: 8,
            degree: BSplineDegree::Uniform,
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["tag"], "bSpline");
        assert_eq!(json["nSteps"], 8);
        assert_eq!(json["controlPoints"][0], serde_json::json!([1.0, 2.0, 3.0]));
        let back: CurveConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
