mod adaptive_subdivision;
mod catmull_rom_spline;
mod evaluate_bezier;
mod evaluate_bspline;
mod parameters;

pub use adaptive_subdivision::{adaptive_subdivision, AdaptiveParams, AdaptiveSubdivision};
pub use catmull_rom_spline::{
    cubic_catmull_rom_spline, CatmullRomParams, CatmullRomSamples, CatmullRomSpline,
    DegenerateSegments, KnotSelection,
};
pub use evaluate_bezier::{evaluate_bezier_curve, EvaluateBezier};
pub use evaluate_bspline::{quadratic_uniform_b_spline, uniform_b_spline, EvaluateBSpline};
pub use parameters::uniform_parameters;

pub use crate::geometry::curve::KnotParametrization;

use crate::math::Point3;

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

impl Polyline {
    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polyline has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Point3>> for Polyline {
    fn from(points: Vec<Point3>) -> Self {
        Self { points }
    }
}

/// Evaluates `eval` once per parameter, handing each call a working buffer
/// with room for `capacity` points.
///
/// With the `parallel` feature the parameters are split across the rayon
/// pool, one buffer per worker. Output order follows `params` either way.
#[cfg(feature = "parallel")]
fn evaluate_each<F>(params: &[f64], capacity: usize, eval: F) -> Vec<Point3>
where
    F: Fn(f64, &mut Vec<Point3>) -> Point3 + Send + Sync,
{
    use rayon::prelude::*;

    params
        .par_iter()
        .map_init(|| Vec::with_capacity(capacity), |buffer, &t| eval(t, buffer))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_each<F>(params: &[f64], capacity: usize, eval: F) -> Vec<Point3>
where
    F: Fn(f64, &mut Vec<Point3>) -> Point3,
{
    let mut buffer = Vec::with_capacity(capacity);
    params.iter().map(|&t| eval(t, &mut buffer)).collect()
}
