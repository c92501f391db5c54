use thiserror::Error;

/// Top-level error type for the cablecar crate.
#[derive(Debug, Error)]
pub enum CableCarError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Errors related to curve evaluation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("curve needs at least {required} control points, has {actual}")]
    InsufficientControlPoints { required: usize, actual: usize },

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to simulation and viewport configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Errors related to scene bookkeeping.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("track not found")]
    TrackNotFound,
}

/// Convenience type alias for results using [`CableCarError`].
pub type Result<T> = std::result::Result<T, CableCarError>;
