use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::{distance, normalize, Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// Knot spacing used when weighting Catmull-Rom tangents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KnotParametrization {
    /// Equal knot spacing, `alpha = 0`.
    Uniform,
    /// Knots spaced by chord length, `alpha = 1`.
    Chordal,
    /// Knots spaced by the square root of chord length, `alpha = 0.5`.
    Centripetal,
}

impl KnotParametrization {
    /// All parametrizations, in output order.
    pub const ALL: [Self; 3] = [Self::Uniform, Self::Chordal, Self::Centripetal];

    /// Exponent applied to inter-point distances.
    #[must_use]
    pub fn alpha(self) -> f64 {
        match self {
            Self::Uniform => 0.0,
            Self::Chordal => 1.0,
            Self::Centripetal => 0.5,
        }
    }

    /// Stable lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Chordal => "chordal",
            Self::Centripetal => "centripetal",
        }
    }
}

impl fmt::Display for KnotParametrization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Knot intervals `(t01, t12, t23)` of a four-point window.
fn knot_intervals(window: &[Point3; 4], alpha: f64) -> (f64, f64, f64) {
    let [p0, p1, p2, p3] = window;
    (
        distance(p0, p1).powf(alpha),
        distance(p1, p2).powf(alpha),
        distance(p2, p3).powf(alpha),
    )
}

/// `v / denom`, or zero when `denom` vanishes.
fn ratio(v: Vector3, denom: f64) -> Vector3 {
    if denom.abs() < TOLERANCE {
        Vector3::zeros()
    } else {
        v / denom
    }
}

/// One cubic segment of a Catmull-Rom spline, running from `p1` to `p2` of
/// its four-point window.
///
/// Stored in Hermite power form `((a t + b) t + c) t + d` over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatmullRomSegment {
    a: Vector3,
    b: Vector3,
    c: Vector3,
    d: Point3,
}

impl CatmullRomSegment {
    /// Builds the segment for `window = [p0, p1, p2, p3]`.
    ///
    /// `alpha` sets the knot spacing (see [`KnotParametrization::alpha`]) and
    /// `tension` scales both tangents by `1 - tension`. Tangent terms whose
    /// knot denominator vanishes contribute nothing, so coincident control
    /// points never yield NaN; use [`is_degenerate`](Self::is_degenerate) to
    /// detect that case beforehand.
    #[must_use]
    pub fn new(window: &[Point3; 4], alpha: f64, tension: f64) -> Self {
        let [p0, p1, p2, p3] = window;
        let (t01, t12, t23) = knot_intervals(window, alpha);
        let scale = 1.0 - tension;

        let chord = p2 - p1;
        let m1 = (chord + (ratio(p1 - p0, t01) - ratio(p2 - p0, t01 + t12)) * t12) * scale;
        let m2 = (chord + (ratio(p3 - p2, t23) - ratio(p3 - p1, t12 + t23)) * t12) * scale;

        let back = p1 - p2;
        Self {
            a: back * 2.0 + m1 + m2,
            b: back * -3.0 - m1 - m1 - m2,
            c: m1,
            d: *p1,
        }
    }

    /// Whether any tangent denominator of `window` vanishes under `alpha`.
    ///
    /// Only non-zero `alpha` can be degenerate: with `alpha = 0` every knot
    /// interval is 1.
    #[must_use]
    pub fn is_degenerate(window: &[Point3; 4], alpha: f64) -> bool {
        let (t01, t12, t23) = knot_intervals(window, alpha);
        [t01, t23, t01 + t12, t12 + t23]
            .iter()
            .any(|d| d.abs() < TOLERANCE)
    }

    /// Position at `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.d + ((self.a * t + self.b) * t + self.c) * t
    }

    /// Derivative (not normalized) at `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector3 {
        (self.a * (3.0 * t) + self.b * 2.0) * t + self.c
    }

    /// Appends `intervals + 1` samples at `t = i / intervals` to `out`.
    pub fn sample_into(&self, intervals: usize, out: &mut Vec<Point3>) {
        #[allow(clippy::cast_precision_loss)]
        let step = intervals as f64;
        out.extend((0..=intervals).map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / step;
            self.point_at(t)
        }));
    }
}

impl Curve for CatmullRomSegment {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.point_at(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        normalize(&self.derivative(t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn is_closed(&self) -> bool {
        distance(&self.point_at(0.0), &self.point_at(1.0)) < TOLERANCE
    }
}
