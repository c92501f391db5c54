pub mod curve;

pub use curve::{CatmullRomCurve, Curve, CurveDomain, HermiteSegment, Line};
