//! Result and Error types for n2n-uncertain

/// Type alias for `Result<T, uncertain::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `n2n-uncertain` crate
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Relative uncertainty or division needs a non-zero nominal value
    #[error("{operation} is undefined for a zero nominal value")]
    ZeroNominalValue { operation: &'static str },

    /// Standard uncertainties can never be negative
    #[error("uncertainty must be >= 0 (found {0})")]
    NegativeUncertainty(f64),

    /// Counted quantities must be >= 0
    #[error("counts must be >= 0 (found {0})")]
    NegativeCounts(f64),

    /// NAN or INFINITY in either the value or the uncertainty
    #[error("value {value} +/- {uncertainty} is not finite")]
    NonFiniteValue { value: f64, uncertainty: f64 },

    /// Logarithm of a zero or negative nominal value
    #[error("logarithm is undefined for {0}")]
    NonPositiveLogarithm(f64),
}
