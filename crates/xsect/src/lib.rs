//! Neutron flux and (n,2n) activation cross sections
//!
//! Reduces the measured quantities of a ¹²C(n,2n)¹¹C activation run into
//! physical results, propagating every uncertainty along the way.
//!
//! The calculation runs in one direction:
//!
//! 1. [proton_flux()] from the foreground and background proton telescope
//!    counts, corrected for live time
//! 2. [np_cross_section()] at the neutron energy, interpolated from tabulated
//!    elastic n-p data
//! 3. [neutron_flux()] through the hydrogen in the CH2 target and the solid
//!    angles of the target and detector
//! 4. [activation_cross_section()] for each target from its ¹¹C decay count,
//!    including the saturation factor of the irradiation
//!
//! The [Calculator] wraps the whole chain for a single [RowInput].
//!
//! ## Units
//!
//! Number thicknesses are in nuclei per barn, n-p cross sections in
//! mbarn/sr and activation cross sections in mbarn. Times are in seconds
//! except for half lives, which are quoted in minutes.
//!
//! ## Example
//!
//! ```rust
//! # use n2n_xsect::{proton_flux, CountingRun};
//! let foreground = CountingRun::new(1000.0, 100.0, 1.0).unwrap();
//! let background = CountingRun::new(100.0, 100.0, 1.0).unwrap();
//!
//! let flux = proton_flux(&foreground, &background).unwrap();
//! assert_eq!(flux.value(), 9.0);
//! ```
//!
//! Every failure is a typed [Error] for the row being calculated. Nothing is
//! silently replaced with zero or infinity.

// Modules
mod config;
mod cross_section;
mod error;
mod flux;
mod interpolate;
mod pipeline;
mod target;

pub mod constants;

// Re-exports of anything important with in-lined documentation for simplicity
#[doc(inline)]
pub use config::{Config, Efficiency, Geometry};

#[doc(inline)]
pub use cross_section::{
    activation_cross_section, apply_efficiency, decay_constant, saturation, Activation,
};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use flux::{neutron_flux, proton_flux, CountingRun};

#[doc(inline)]
pub use interpolate::{np_cross_section, np_elastic_spline, CubicSpline, Interpolate};

#[doc(inline)]
pub use pipeline::{Calculator, RowInput, RowResult};

#[doc(inline)]
pub use target::{number_thickness, solid_angle, Aperture, Material, Target, TargetGeometry, TargetKind};
