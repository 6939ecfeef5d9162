//! Decay curves of activated targets
//!
//! Turns the counts recorded while an activated target decays into the
//! number of ¹¹C nuclei present at the end of the irradiation.
//!
//! 1. [read_decay_curve()] parses the `[DATA]` section of an MPA list file
//!    into a [DecayCurve] of `time counts` samples
//! 2. a [FitDecayCurve] implementation fits `N0·exp(-λt) + A`
//! 3. [activated_nuclei()] corrects the fitted amplitude for the transit
//!    time, decay rate and counting efficiency
//!
//! The standard fitter is [FixedRateFit], which holds λ at the ¹¹C value and
//! solves for N0 and A directly.
//!
//! ```rust, no_run
//! # use n2n_decay::{activated_nuclei, read_decay_curve, FitDecayCurve, FixedRateFit};
//! let curve = read_decay_curve("Decay Curves/Run012_puck.csv").unwrap();
//! let fit = FixedRateFit::default().fit(&curve).unwrap();
//!
//! // 3 minute transit counted at 12% efficiency
//! let nuclei = activated_nuclei(&fit, 3.0, 0.12).unwrap();
//! println!("{nuclei}");
//! ```
//!
//! Times are in minutes throughout to match the counting files.

// Modules
mod counts;
mod curve;
mod error;
mod fit;
mod parsers;

// Re-exports of anything important with in-lined documentation for simplicity
#[doc(inline)]
pub use counts::{activated_nuclei, COUNTING_EFFICIENCY};

#[doc(inline)]
pub use curve::{read_decay_curve, DecayCurve, Sample};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use fit::{DecayFit, FitDecayCurve, FixedRateFit};
