//! Result and Error types for n2n-summary

/// Type alias for `Result<T, summary::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `n2n-summary` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("run {run} not found in the run summary")]
    RunNotFound { run: u32 },

    #[error("run {run} appears more than once in the run summary")]
    DuplicateRun { run: u32 },

    #[error("run {run} has no value for \"{field}\"")]
    MissingField { run: u32, field: &'static str },

    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to read or write csv")]
    CsvError(#[from] csv::Error),

    #[error("failed uncertainty propagation")]
    Uncertain(#[from] n2n_uncertain::Error),

    #[error("failed cross section calculation")]
    Xsect(#[from] n2n_xsect::Error),

    #[error("failed decay curve analysis")]
    Decay(#[from] n2n_decay::Error),

    #[error("failed proton telescope analysis")]
    Telescope(#[from] n2n_telescope::Error),
}
