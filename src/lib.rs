//! `n2n` reduces ¹²C(n,2n)¹¹C activation measurements into neutron fluxes
//! and cross sections with propagated uncertainties
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of the analysis crates.
#[doc(inline)]
pub use n2n_uncertain as uncertain;

#[doc(inline)]
pub use n2n_xsect as xsect;

#[cfg(feature = "decay")]
#[cfg_attr(docsrs, doc(cfg(feature = "decay")))]
#[doc(inline)]
pub use n2n_decay as decay;

#[cfg(feature = "summary")]
#[cfg_attr(docsrs, doc(cfg(feature = "summary")))]
#[doc(inline)]
pub use n2n_summary as summary;

#[cfg(feature = "telescope")]
#[cfg_attr(docsrs, doc(cfg(feature = "telescope")))]
#[doc(inline)]
pub use n2n_telescope as telescope;
