pub mod curve;

pub use curve::{
    BSplineCurve, BSplineDegree, BezierCurve, CatmullRomSegment, Curve, CurveDomain,
    KnotParametrization,
};
