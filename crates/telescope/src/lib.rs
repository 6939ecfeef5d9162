//! Proton telescope counts for neutron flux normalisation
//!
//! Recoil protons from the CH2 target are identified in a ΔE-E telescope.
//! The coincidence map of the two ADCs (a2 x a1) is exported as a list of
//! channel counts, and the proton band is marked as a region of interest in
//! the MPA header.
//!
//! - [read_histogram()] parses the exported list into a [Histogram]
//! - [read_region()] parses the `[MAP0]` region of interest into a [Region]
//! - [CountInRegion] integrates the counts, bounds inclusive
//!
//! ```rust, no_run
//! # use n2n_telescope::{read_histogram, read_region, CountInRegion};
//! let histogram = read_histogram("Proton Telescope/Run012_1x2.csv").unwrap();
//! let region = read_region("Proton Telescope/Run012.mpa").unwrap();
//!
//! let protons = histogram.count_in_region(&region).unwrap();
//! ```

// Modules
mod error;
mod histogram;
mod parsers;
mod region;

// Re-exports of anything important with in-lined documentation for simplicity
#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use histogram::{read_histogram, CountInRegion, Histogram, CHANNELS};

#[doc(inline)]
pub use region::{read_region, Region};
