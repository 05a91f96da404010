use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EvaluationError, GeometryError, Result};
use crate::geometry::curve::{CatmullRomSegment, KnotParametrization};
use crate::math::Point3;

use super::Polyline;

/// Intervals each segment is sampled with; every segment yields one more
/// sample than this.
pub const DEFAULT_SAMPLES_PER_SEGMENT: usize = 20;

/// Which knot parametrizations to build. Each active flag yields its own
/// independent polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnotSelection {
    /// Build the uniform (alpha 0) curve.
    pub uniform: bool,
    /// Build the chordal (alpha 1) curve.
    pub chordal: bool,
    /// Build the centripetal (alpha 0.5) curve.
    pub centripetal: bool,
}

impl Default for KnotSelection {
    fn default() -> Self {
        Self::only(KnotParametrization::Uniform)
    }
}

impl KnotSelection {
    /// Selects every parametrization.
    #[must_use]
    pub fn all() -> Self {
        Self {
            uniform: true,
            chordal: true,
            centripetal: true,
        }
    }

    /// Selects a single parametrization.
    #[must_use]
    pub fn only(kind: KnotParametrization) -> Self {
        Self {
            uniform: kind == KnotParametrization::Uniform,
            chordal: kind == KnotParametrization::Chordal,
            centripetal: kind == KnotParametrization::Centripetal,
        }
    }

    /// Whether `kind` is selected.
    #[must_use]
    pub fn is_active(&self, kind: KnotParametrization) -> bool {
        match kind {
            KnotParametrization::Uniform => self.uniform,
            KnotParametrization::Chordal => self.chordal,
            KnotParametrization::Centripetal => self.centripetal,
        }
    }

    /// Selected parametrizations in output order.
    pub fn active(&self) -> impl Iterator<Item = KnotParametrization> + '_ {
        KnotParametrization::ALL
            .into_iter()
            .filter(move |kind| self.is_active(*kind))
    }
}

/// What to do with a window whose tangent denominators vanish because
/// consecutive control points coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DegenerateSegments {
    /// Drop the tangent terms with a zero denominator and keep the segment.
    #[default]
    ZeroContribution,
    /// Fail with [`GeometryError::DegenerateSegment`].
    Reject,
}

/// Parameters controlling Catmull-Rom construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatmullRomParams {
    /// Tangent scale is `1 - tension`.
    pub tension: f64,
    /// Sampling intervals per segment.
    pub samples_per_segment: usize,
    /// Handling of coincident control points.
    pub degenerate: DegenerateSegments,
}

impl Default for CatmullRomParams {
    fn default() -> Self {
        Self {
            tension: 0.0,
            samples_per_segment: DEFAULT_SAMPLES_PER_SEGMENT,
            degenerate: DegenerateSegments::default(),
        }
    }
}

impl CatmullRomParams {
    fn validate(&self) -> Result<()> {
        if self.samples_per_segment == 0 {
            return Err(EvaluationError::InvalidParameters(
                "samples per segment must be at least 1".to_owned(),
            )
            .into());
        }
        if !self.tension.is_finite() {
            return Err(EvaluationError::InvalidParameters(format!(
                "tension must be finite, got {}",
                self.tension
            ))
            .into());
        }
        Ok(())
    }
}

/// Sampled Catmull-Rom splines, one per selected parametrization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatmullRomSamples {
    /// Uniform curve, if selected.
    pub uniform: Option<Polyline>,
    /// Chordal curve, if selected.
    pub chordal: Option<Polyline>,
    /// Centripetal curve, if selected.
    pub centripetal: Option<Polyline>,
}

impl CatmullRomSamples {
    /// The polyline built for `kind`, if it was selected.
    #[must_use]
    pub fn get(&self, kind: KnotParametrization) -> Option<&Polyline> {
        match kind {
            KnotParametrization::Uniform => self.uniform.as_ref(),
            KnotParametrization::Chordal => self.chordal.as_ref(),
            KnotParametrization::Centripetal => self.centripetal.as_ref(),
        }
    }

    fn slot(&mut self, kind: KnotParametrization) -> &mut Option<Polyline> {
        match kind {
            KnotParametrization::Uniform => &mut self.uniform,
            KnotParametrization::Chordal => &mut self.chordal,
            KnotParametrization::Centripetal => &mut self.centripetal,
        }
    }

    /// Built polylines in output order.
    pub fn iter(&self) -> impl Iterator<Item = (KnotParametrization, &Polyline)> + '_ {
        KnotParametrization::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|polyline| (kind, polyline)))
    }

    /// Consumes the samples, yielding polylines in output order.
    #[must_use]
    pub fn into_vec(self) -> Vec<(KnotParametrization, Polyline)> {
        [
            (KnotParametrization::Uniform, self.uniform),
            (KnotParametrization::Chordal, self.chordal),
            (KnotParametrization::Centripetal, self.centripetal),
        ]
        .into_iter()
        .filter_map(|(kind, polyline)| polyline.map(|p| (kind, p)))
        .collect()
    }
}

/// Builds piecewise-cubic Catmull-Rom splines through a control polygon.
///
/// Every window of four consecutive control points contributes one cubic
/// Hermite segment from its second to its third point. Each segment is
/// sampled at a fixed number of evenly spaced local parameters, whatever its
/// length; the knot parametrization only changes the tangents.
#[derive(Debug, Clone, Copy)]
pub struct CatmullRomSpline<'a> {
    control_points: &'a [Point3],
    selection: KnotSelection,
    params: CatmullRomParams,
}

impl<'a> CatmullRomSpline<'a> {
    /// Creates a new Catmull-Rom construction.
    #[must_use]
    pub fn new(
        control_points: &'a [Point3],
        selection: KnotSelection,
        params: CatmullRomParams,
    ) -> Self {
        Self {
            control_points,
            selection,
            params,
        }
    }

    /// Executes the construction for every selected parametrization.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 4 control points are provided, the
    /// parameters are invalid, or a window is degenerate under
    /// [`DegenerateSegments::Reject`].
    pub fn execute(&self) -> Result<CatmullRomSamples> {
        EvaluationError::require_points("Catmull-Rom spline", self.control_points, 4)?;
        self.params.validate()?;

        let mut samples = CatmullRomSamples::default();
        for kind in self.selection.active() {
            *samples.slot(kind) = Some(self.build(kind)?);
        }
        Ok(samples)
    }

    /// Builds the polyline for a single parametrization.
    ///
    /// # Errors
    ///
    /// Same conditions as [`execute`](Self::execute).
    pub fn build(&self, kind: KnotParametrization) -> Result<Polyline> {
        EvaluationError::require_points("Catmull-Rom spline", self.control_points, 4)?;
        self.params.validate()?;

        let alpha = kind.alpha();
        let intervals = self.params.samples_per_segment;
        let segments = self.control_points.len() - 3;
        let mut points = Vec::with_capacity(segments * (intervals + 1));
        let mut degenerate = 0usize;

        for (index, window) in self.control_points.windows(4).enumerate() {
            let &[p0, p1, p2, p3] = window else {
                continue;
            };
            let window = [p0, p1, p2, p3];

            if CatmullRomSegment::is_degenerate(&window, alpha) {
                if self.params.degenerate == DegenerateSegments::Reject {
                    return Err(GeometryError::DegenerateSegment {
                        segment: index,
                        parametrization: kind,
                    }
                    .into());
                }
                degenerate += 1;
            }

            CatmullRomSegment::new(&window, alpha, self.params.tension)
                .sample_into(intervals, &mut points);
        }

        if degenerate > 0 {
            warn!(
                parametrization = %kind,
                degenerate,
                "coincident control points; dropped zero-denominator tangent terms"
            );
        }
        debug!(
            parametrization = %kind,
            segments,
            samples = points.len(),
            "built Catmull-Rom spline"
        );
        Ok(Polyline { points })
    }
}

/// Builds a cubic Catmull-Rom spline with tension 0 and 21 samples per
/// segment for each parametrization in `selection`.
///
/// # Errors
///
/// Returns an error if fewer than 4 control points are provided.
pub fn cubic_catmull_rom_spline(
    control_points: &[Point3],
    selection: KnotSelection,
) -> Result<CatmullRomSamples> {
    CatmullRomSpline::new(control_points, selection, CatmullRomParams::default()).execute()
}
