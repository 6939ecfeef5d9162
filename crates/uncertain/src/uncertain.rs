// standard library
use std::ops::{Add, Mul, Neg, Sub};

// crate modules
use crate::error::{Error, Result};

// n2n modules
use n2n_utils::{f, ValueExt};

// external crates
use serde::{Deserialize, Serialize};

/// A value paired with its standard uncertainty
///
/// Every operation returns a new [Uncertain] and propagates the uncertainty
/// to first order, assuming the operands are independent:
///
/// ```text
/// δf = sqrt( Σ (∂f/∂xᵢ · δxᵢ)² )
/// ```
///
/// The uncertainty is never negative. [new()](Uncertain::new) and the
/// fallible operations also reject anything that is not finite, while the
/// operators assume finite operands and do not check for overflow.
///
/// Addition, subtraction, negation and multiplication are always defined and
/// implemented as operators. Anything that divides by a nominal value is
/// fallible and returns a [Result] instead, for example
/// [checked_div()](Uncertain::checked_div).
///
/// ```rust
/// # use n2n_uncertain::Uncertain;
/// let a = Uncertain::new(10.0, 3.0).unwrap();
/// let b = Uncertain::new(4.0, 4.0).unwrap();
///
/// // Uncertainties combine in quadrature for sums and differences
/// let diff = a - b;
/// assert_eq!(diff.value(), 6.0);
/// assert!((diff.uncertainty() - 5.0).abs() < 1e-12);
///
/// // Relative uncertainties combine in quadrature for products
/// let product = a * b;
/// assert_eq!(product.value(), 40.0);
/// assert!((product.relative().unwrap() - 0.3_f64.hypot(1.0)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawUncertain")]
pub struct Uncertain {
    value: f64,
    uncertainty: f64,
}

impl Uncertain {
    /// Create a new value with a standard uncertainty
    ///
    /// Fails for negative uncertainties and for anything that is not finite.
    ///
    /// ```rust
    /// # use n2n_uncertain::{Error, Uncertain};
    /// assert!(Uncertain::new(1.0, 0.1).is_ok());
    /// assert_eq!(
    ///     Uncertain::new(1.0, -0.1),
    ///     Err(Error::NegativeUncertainty(-0.1))
    /// );
    /// ```
    pub fn new(value: f64, uncertainty: f64) -> Result<Self> {
        if !value.is_finite() || !uncertainty.is_finite() {
            return Err(Error::NonFiniteValue { value, uncertainty });
        }

        if uncertainty < 0.0 {
            return Err(Error::NegativeUncertainty(uncertainty));
        }

        Ok(Self { value, uncertainty })
    }

    /// A value known exactly, with zero uncertainty
    ///
    /// Used for physical constants and fixed instrument geometry, so the
    /// value is expected to be finite.
    pub fn exact(value: f64) -> Self {
        debug_assert!(value.is_finite(), "exact value {value} is not finite");
        Self {
            value,
            uncertainty: 0.0,
        }
    }

    /// A counted quantity with Poisson uncertainty, `δN = sqrt(N)`
    ///
    /// ```rust
    /// # use n2n_uncertain::Uncertain;
    /// let counts = Uncertain::poisson(400.0).unwrap();
    /// assert_eq!(counts.uncertainty(), 20.0);
    /// assert!(Uncertain::poisson(-1.0).is_err());
    /// ```
    pub fn poisson(counts: f64) -> Result<Self> {
        if counts < 0.0 {
            return Err(Error::NegativeCounts(counts));
        }
        Self::new(counts, counts.sqrt())
    }

    /// Build a result from its nominal value and partial derivatives
    ///
    /// Each term is a pair of `(∂f/∂x, δx)` for one independent input, and
    /// the resulting uncertainty is the root-sum-square of their products.
    ///
    /// ```rust
    /// # use n2n_uncertain::Uncertain;
    /// // f = x*y at x = 2 +/- 0.3, y = 5 +/- 0.4
    /// let f = Uncertain::from_partials(10.0, &[(5.0, 0.3), (2.0, 0.4)]).unwrap();
    /// assert!((f.uncertainty() - 1.7).abs() < 1e-12);
    /// ```
    pub fn from_partials(value: f64, terms: &[(f64, f64)]) -> Result<Self> {
        let uncertainty = terms
            .iter()
            .map(|(partial, delta)| (partial * delta).powi(2))
            .sum::<f64>()
            .sqrt();
        Self::new(value, uncertainty)
    }

    /// Nominal value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Standard uncertainty, always `>= 0`
    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    /// True if the uncertainty is exactly zero
    pub fn is_exact(&self) -> bool {
        self.uncertainty == 0.0
    }

    /// Relative uncertainty `δx/|x|`
    ///
    /// Undefined for a zero nominal value.
    pub fn relative(&self) -> Result<f64> {
        if self.value == 0.0 {
            return Err(Error::ZeroNominalValue {
                operation: "relative uncertainty",
            });
        }
        Ok(self.uncertainty / self.value.abs())
    }

    /// Multiply by an exact constant
    ///
    /// The uncertainty scales with `|k|`, so a negative constant never makes
    /// the uncertainty negative.
    ///
    /// ```rust
    /// # use n2n_uncertain::Uncertain;
    /// let x = Uncertain::new(2.0, 0.5).unwrap().scale(-3.0);
    /// assert_eq!(x.value(), -6.0);
    /// assert_eq!(x.uncertainty(), 1.5);
    /// ```
    pub fn scale(self, k: f64) -> Self {
        Self {
            value: self.value * k,
            uncertainty: self.uncertainty * k.abs(),
        }
    }

    /// Division with relative uncertainties combined in quadrature
    ///
    /// Dividing by a zero nominal value is a domain error rather than an
    /// infinity.
    ///
    /// ```rust
    /// # use n2n_uncertain::{Error, Uncertain};
    /// let a = Uncertain::new(9.0, 0.9).unwrap();
    /// let b = Uncertain::new(3.0, 0.0).unwrap();
    /// let ratio = a.checked_div(b).unwrap();
    /// assert_eq!(ratio.value(), 3.0);
    ///
    /// assert!(matches!(
    ///     a.checked_div(Uncertain::exact(0.0)),
    ///     Err(Error::ZeroNominalValue { .. })
    /// ));
    /// ```
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        if rhs.value == 0.0 {
            return Err(Error::ZeroNominalValue {
                operation: "division",
            });
        }

        // absolute form stays defined for a zero numerator
        let value = self.value / rhs.value;
        let uncertainty = (self.uncertainty / rhs.value)
            .hypot(self.value * rhs.uncertainty / (rhs.value * rhs.value));

        Self::new(value, uncertainty.abs())
    }

    /// Reciprocal `1/x`
    pub fn recip(self) -> Result<Self> {
        Self::exact(1.0).checked_div(self)
    }

    /// Raise to a real power, `δ(xⁿ) = |n·xⁿ⁻¹|·δx`
    ///
    /// ```rust
    /// # use n2n_uncertain::Uncertain;
    /// // distance enters a solid angle squared, doubling its relative uncertainty
    /// let d = Uncertain::new(10.0, 0.1).unwrap();
    /// let d2 = d.powf(2.0).unwrap();
    /// assert_eq!(d2.value(), 100.0);
    /// assert!((d2.relative().unwrap() - 0.02).abs() < 1e-12);
    /// ```
    pub fn powf(self, n: f64) -> Result<Self> {
        let value = self.value.powf(n);
        if self.is_exact() {
            return Self::new(value, 0.0);
        }

        if self.value == 0.0 && n < 1.0 {
            return Err(Error::ZeroNominalValue { operation: "power" });
        }

        let derivative = if n == 0.0 {
            0.0
        } else {
            n * self.value.powf(n - 1.0)
        };

        Self::new(value, (derivative * self.uncertainty).abs())
    }

    /// Natural exponential, `δ(eˣ) = eˣ·δx`
    ///
    /// ```rust
    /// # use n2n_uncertain::Uncertain;
    /// let x = Uncertain::new(0.0, 0.1).unwrap().exp().unwrap();
    /// assert_eq!(x.value(), 1.0);
    /// assert_eq!(x.uncertainty(), 0.1);
    /// ```
    pub fn exp(self) -> Result<Self> {
        let value = self.value.exp();
        Self::new(value, value * self.uncertainty)
    }

    /// Natural logarithm, `δ(ln x) = δx/x`
    pub fn ln(self) -> Result<Self> {
        if self.value <= 0.0 {
            return Err(Error::NonPositiveLogarithm(self.value));
        }
        Self::new(self.value.ln(), self.uncertainty / self.value)
    }
}

impl Add for Uncertain {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value + rhs.value,
            uncertainty: self.uncertainty.hypot(rhs.uncertainty),
        }
    }
}

impl Sub for Uncertain {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value - rhs.value,
            uncertainty: self.uncertainty.hypot(rhs.uncertainty),
        }
    }
}

impl Neg for Uncertain {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            value: -self.value,
            uncertainty: self.uncertainty,
        }
    }
}

impl Mul for Uncertain {
    type Output = Self;

    /// Same as combining relative uncertainties in quadrature, but written
    /// in absolute terms so a zero operand is still well defined
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value * rhs.value,
            uncertainty: (rhs.value * self.uncertainty)
                .hypot(self.value * rhs.uncertainty)
                .abs(),
        }
    }
}

impl Mul<f64> for Uncertain {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl From<f64> for Uncertain {
    fn from(value: f64) -> Self {
        Self::exact(value)
    }
}

impl std::fmt::Display for Uncertain {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            f!("{} +/- {}", self.value.sci(5, 2), self.uncertainty.sci(2, 2))
        )
    }
}

/// Unchecked form used to validate deserialised values
#[derive(Deserialize)]
struct RawUncertain {
    value: f64,
    uncertainty: f64,
}

impl TryFrom<RawUncertain> for Uncertain {
    type Error = Error;

    fn try_from(raw: RawUncertain) -> Result<Self> {
        Self::new(raw.value, raw.uncertainty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_operand_product() {
        let a = Uncertain::new(0.0, 0.25).unwrap();
        let b = Uncertain::new(5.0, 1.0).unwrap();
        let c = a * b;
        assert_eq!(c.value(), 0.0);
        assert_eq!(c.uncertainty(), 1.25);
    }

    #[test]
    fn zero_numerator_division() {
        let a = Uncertain::new(0.0, 2.0).unwrap();
        let b = Uncertain::new(4.0, 1.0).unwrap();
        let c = a.checked_div(b).unwrap();
        assert_eq!(c.value(), 0.0);
        assert_eq!(c.uncertainty(), 0.5);
    }

    #[test]
    fn relative_of_zero() {
        assert!(matches!(
            Uncertain::exact(0.0).relative(),
            Err(Error::ZeroNominalValue { .. })
        ));
    }

    #[test]
    fn logarithm_domain() {
        assert_eq!(
            Uncertain::exact(-1.0).ln(),
            Err(Error::NonPositiveLogarithm(-1.0))
        );
        let x = Uncertain::new(2.0, 0.2).unwrap().ln().unwrap();
        assert!((x.uncertainty() - 0.1).abs() < 1e-15);
    }

    #[test]
    fn power_of_zero() {
        let x = Uncertain::new(0.0, 0.1).unwrap();
        assert!(x.powf(0.5).is_err());
        assert_eq!(x.powf(2.0).unwrap(), Uncertain::exact(0.0));
    }

    #[test]
    fn non_finite_rejected() {
        assert!(Uncertain::new(f64::NAN, 0.0).is_err());
        assert!(Uncertain::new(1.0, f64::INFINITY).is_err());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not finite")]
    fn exact_must_be_finite() {
        let _ = Uncertain::exact(f64::NAN);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not finite")]
    fn from_must_be_finite() {
        let _: Uncertain = f64::INFINITY.into();
    }

    #[test]
    fn display() {
        let x = Uncertain::new(1234.5, 12.0).unwrap();
        assert_eq!(x.to_string(), "1.23450e+03 +/- 1.20e+01");
    }
}
