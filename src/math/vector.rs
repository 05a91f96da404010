use crate::error::{GeometryError, Result};

use super::{Point3, Vector3, TOLERANCE};

/// Linear interpolation `(1 - t) * a + t * b`, evaluated per component.
///
/// `t` is not clamped; values outside `[0, 1]` extrapolate along the line.
#[inline]
#[must_use]
pub fn lerp(a: &Point3, b: &Point3, t: f64) -> Point3 {
    let s = 1.0 - t;
    Point3::new(
        s * a.x + t * b.x,
        s * a.y + t * b.y,
        s * a.z + t * b.z,
    )
}

/// Euclidean distance between two points.
#[inline]
#[must_use]
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// Length of the open polygon through `points`.
///
/// Returns `0.0` for fewer than two points.
#[must_use]
pub fn polygon_length(points: &[Point3]) -> f64 {
    points.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

/// Returns `v` scaled to unit length.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if `v` is shorter than [`TOLERANCE`].
pub fn normalize(v: &Vector3) -> Result<Vector3> {
    let len = v.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v / len)
}
