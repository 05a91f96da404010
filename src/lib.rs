//! Sampling of parametric curves from 3D control points.
//!
//! Every evaluator is a pure function: it reads a slice of control points
//! (and, where relevant, a parameter sequence) and returns a freshly
//! allocated [`Polyline`].
//!
//! ```
//! use splinekit::{evaluate_bezier_curve, uniform_parameters, Point3};
//!
//! let control = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 2.0, 0.0),
//!     Point3::new(3.0, 2.0, 0.0),
//!     Point3::new(4.0, 0.0, 0.0),
//! ];
//! let samples = evaluate_bezier_curve(&control, &uniform_parameters(10)).unwrap();
//! assert_eq!(samples.len(), 11);
//! assert_eq!(samples.points[10], control[3]);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod tessellation;

pub use error::{Result, SplineError};
pub use math::{Point3, Vector3};
pub use tessellation::{
    adaptive_subdivision, cubic_catmull_rom_spline, evaluate_bezier_curve,
    quadratic_uniform_b_spline, uniform_b_spline, uniform_parameters, CatmullRomSamples,
    KnotParametrization, KnotSelection, Polyline,
};
