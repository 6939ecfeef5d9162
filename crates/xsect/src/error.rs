//! Result and Error types for n2n-xsect

/// Type alias for `Result<T, xsect::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `n2n-xsect` crate
///
/// Everything other than the file and serde variants is a domain error for
/// the row being calculated. Nothing is ever replaced with a default value.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("counting rate undefined for a zero clock time")]
    ZeroClockTime,

    #[error("counting rate undefined for a zero live fraction")]
    ZeroLiveFraction,

    #[error("solid angle undefined for a zero distance")]
    ZeroDistance,

    #[error("{0} is zero")]
    ZeroQuantity(&'static str),

    #[error("counting efficiency must be > 0 (found {0})")]
    InvalidEfficiency(f64),

    #[error("half life must be > 0 (found {0})")]
    InvalidHalfLife(f64),

    #[error("saturation factor {saturation:e} is too small (activation time {time} s)")]
    SaturationTooSmall { saturation: f64, time: f64 },

    #[error("inconsistent interpolation nodes (found {x} x values, {y} y values)")]
    NodeLengthMismatch { x: usize, y: usize },

    #[error("invalid interpolation nodes")]
    InvalidNodes(#[from] n2n_utils::Error),

    #[error("failed uncertainty propagation")]
    Uncertain(#[from] n2n_uncertain::Error),

    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to (de)serialise")]
    FailedSerde(#[from] serde_json::Error),
}
