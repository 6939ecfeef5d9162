//! Result and Error types for n2n-decay

/// Type alias for `Result<T, decay::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `n2n-decay` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("no [DATA] section found in decay curve")]
    MissingDataSection,

    #[error("failed to parse decay sample from \"{0}\"")]
    ParseError(String),

    #[error("not enough samples to fit (found {found}, minimum {minimum})")]
    InsufficientSamples { found: usize, minimum: usize },

    #[error("normal equations are singular, samples cannot constrain the fit")]
    SingularFit,

    #[error("decay rate must be > 0 (found {0})")]
    InvalidDecayRate(f64),

    #[error("counting efficiency must be > 0 (found {0})")]
    InvalidEfficiency(f64),

    #[error("failed uncertainty propagation")]
    Uncertain(#[from] n2n_uncertain::Error),
}
