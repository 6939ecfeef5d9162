//! Run summary and cross section tables
//!
//! Bookkeeping for an activation experiment lives in two flat CSV tables:
//!
//! - the run summary, one [RunRecord] per run with timing, neutron energy,
//!   proton counts and ¹¹C decay counts
//! - the cross section requests, one [Request] per foreground/background
//!   pair to calculate
//!
//! The run summary is completed from the raw data files with
//! [RunSummary::update()], then every request is resolved against it and
//! calculated with [calculate_rows()].
//!
//! ```rust, no_run
//! # use n2n_summary::{calculate_rows, read_requests_file, read_summary, write_results_file};
//! # use n2n_xsect::Config;
//! let config = Config::default();
//!
//! let mut summary = read_summary("Run_Summary.csv").unwrap();
//! summary.update("path/to/data", &config).unwrap();
//!
//! let requests = read_requests_file("Cross_Sections.csv").unwrap();
//! let outcomes = calculate_rows(&summary, &requests, &config).unwrap();
//! write_results_file("results.csv", &outcomes).unwrap();
//! ```
//!
//! Columns are matched by header name, so their order in the files does not
//! matter. Empty cells are read as missing values and are never treated as
//! zero.

// Modules
mod error;
mod record;
mod table;
mod update;

// Re-exports of anything important with in-lined documentation for simplicity
#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use record::{read_summary, RunRecord, RunSummary};

#[doc(inline)]
pub use table::{
    calculate_rows, describe, read_requests, read_requests_file, write_results,
    write_results_file, Request, ResultRecord, RowOutcome,
};

#[doc(inline)]
pub use update::{UpdateReport, DECAY_DIR, TELESCOPE_DIR};
