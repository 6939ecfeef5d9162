//! Result and Error types for n2n-telescope

/// Type alias for `Result<T, telescope::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `n2n-telescope` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("not a valid histogram file, expected \"[DISPLAY]\" (found \"{0}\")")]
    InvalidDataFile(String),

    #[error("not a valid MPA file, expected \"[MPA4A]\" (found \"{0}\")")]
    InvalidHeaderFile(String),

    #[error("no {0} section found")]
    MissingSection(&'static str),

    #[error("no \"{0}\" entry in the [MAP0] section")]
    MissingHeaderField(&'static str),

    #[error("expected [MAP0] to be a2 x a1 with \"param=1\" (found \"{0}\")")]
    UnexpectedParameter(String),

    #[error("x dimension of the map must be > 0")]
    ZeroDimension,

    #[error("failed to parse \"{0}\"")]
    ParseError(String),

    #[error("channel ({x}, {y}) is outside the {size}x{size} histogram")]
    ChannelOutOfRange { x: u32, y: u32, size: u32 },

    #[error("region x {min_x}..={max_x}, y {min_y}..={max_y} is empty or outside the histogram")]
    InvalidRegion {
        min_x: u32,
        max_x: u32,
        min_y: u32,
        max_y: u32,
    },
}
