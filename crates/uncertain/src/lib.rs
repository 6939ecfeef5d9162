//! Values with standard uncertainties and linearised error propagation
//!
//! Every measured or derived quantity in the cross section analysis carries a
//! standard uncertainty. The [Uncertain] type keeps the two together and
//! propagates the uncertainty through arithmetic using first-order Gaussian
//! error propagation for independent quantities.
//!
//! | Operation              | Propagation                                  |
//! | ---------------------- | -------------------------------------------- |
//! | `a + b`, `a - b`       | `δ = sqrt(δa² + δb²)`                        |
//! | `a * b`, `a / b`       | `δ/abs(f) = sqrt((δa/a)² + (δb/b)²)`            |
//! | `a.scale(k)`           | `δ = abs(k)·δa`                                 |
//! | `a.powf(n)`            | `δ = abs(n·aⁿ⁻¹)·δa`                            |
//! | `a.exp()`, `a.ln()`    | derivative weighted                          |
//!
//! Where a formula has correlated inputs, such as a decay constant that
//! appears in both the numerator and the saturation factor, build the result
//! directly from the partial derivatives with
//! [from_partials()](Uncertain::from_partials).
//!
//! ## Quickstart example
//!
//! ```rust
//! # use n2n_uncertain::Uncertain;
//! // Poisson counts over a measured live time
//! let counts = Uncertain::poisson(1000.0).unwrap();
//! let live = Uncertain::new(100.0, 0.0).unwrap();
//!
//! let rate = counts.checked_div(live).unwrap();
//! assert_eq!(rate.value(), 10.0);
//! assert!((rate.uncertainty() - 1000_f64.sqrt() / 100.0).abs() < 1e-12);
//! ```

mod error;
mod uncertain;

#[doc(inline)]
pub use uncertain::Uncertain;

#[doc(inline)]
pub use error::{Error, Result};
