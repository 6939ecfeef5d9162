//! Interpolation of tabulated reference data

// standard library
use std::sync::OnceLock;

// crate modules
use crate::constants::NP_ELASTIC;
use crate::error::{Error, Result};

// n2n modules
use n2n_uncertain::Uncertain;
use n2n_utils::SliceExt;

// external crates
use log::trace;

/// Anything that can be evaluated between tabulated nodes
///
/// This is the narrow capability the flux calculation depends on, so any
/// smooth interpolation scheme can be swapped in.
pub trait Interpolate {
    /// Interpolated value at `x`
    fn eval(&self, x: f64) -> Result<f64>;

    /// First derivative at `x`
    fn derivative(&self, x: f64) -> Result<f64>;

    /// Interpolated value with the uncertainty of `x` carried through the slope
    ///
    /// The nodes themselves are treated as exact.
    fn eval_uncertain(&self, x: Uncertain) -> Result<Uncertain> {
        let value = self.eval(x.value())?;
        let slope = self.derivative(x.value())?;
        Ok(Uncertain::new(value, (slope * x.uncertainty()).abs())?)
    }
}

/// Natural cubic spline through a set of nodes
///
/// The second derivative is zero at both end nodes. Each segment is stored as
/// a cubic in the offset from its lower node,
///
/// ```text
/// S(x) = yᵢ + bᵢt + cᵢt² + dᵢt³,  t = x - xᵢ
/// ```
///
/// so every node except the last is reproduced exactly. Values outside the
/// node range are extrapolated with the outermost segment.
///
/// ```rust
/// # use n2n_xsect::{CubicSpline, Interpolate};
/// let spline = CubicSpline::natural(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]).unwrap();
/// assert_eq!(spline.eval(1.0).unwrap(), 1.0);
/// assert!(spline.eval(0.5).unwrap() > 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
}

impl CubicSpline {
    /// Build a natural spline through `(x, y)` pairs
    ///
    /// The `x` values must be finite and strictly increasing, with at least
    /// two nodes.
    pub fn natural(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::NodeLengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        if x.len() < 2 {
            return Err(n2n_utils::Error::BelowMinimumSliceLength {
                length: x.len(),
                minimum_required: 2,
            }
            .into());
        }

        x.check_ascending()?;
        if y.iter().any(|v| !v.is_finite()) {
            return Err(n2n_utils::Error::SliceContainsUndefinedValues.into());
        }

        Ok(Self::solve(x, y))
    }

    /// Solve the tridiagonal system for the second derivatives
    ///
    /// Nodes are assumed to be validated already.
    fn solve(x: &[f64], y: &[f64]) -> Self {
        let n = x.len();
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

        // Thomas algorithm with natural end conditions M[0] = M[n-1] = 0
        let mut c_prime = vec![0.0; n];
        let mut d_prime = vec![0.0; n];
        for i in 1..n - 1 {
            let lower = h[i - 1];
            let diag = 2.0 * (h[i - 1] + h[i]);
            let rhs = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
            let m = diag - lower * c_prime[i - 1];
            c_prime[i] = h[i] / m;
            d_prime[i] = (rhs - lower * d_prime[i - 1]) / m;
        }

        let mut second = vec![0.0; n];
        for i in (1..n - 1).rev() {
            second[i] = d_prime[i] - c_prime[i] * second[i + 1];
        }

        // polynomial coefficients per segment
        let mut b = Vec::with_capacity(n - 1);
        let mut c = Vec::with_capacity(n - 1);
        let mut d = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            b.push((y[i + 1] - y[i]) / h[i] - h[i] * (2.0 * second[i] + second[i + 1]) / 6.0);
            c.push(second[i] / 2.0);
            d.push((second[i + 1] - second[i]) / (6.0 * h[i]));
        }

        Self {
            x: x.to_vec(),
            y: y.to_vec(),
            b,
            c,
            d,
        }
    }

    /// Segment index and offset from its lower node
    fn locate(&self, x: f64) -> Result<(usize, f64)> {
        let i = self.x.find_segment(x)?;
        Ok((i, x - self.x[i]))
    }

    /// Lowest and highest node
    pub fn range(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }
}

impl Interpolate for CubicSpline {
    fn eval(&self, x: f64) -> Result<f64> {
        let (i, t) = self.locate(x)?;
        Ok(self.y[i] + t * (self.b[i] + t * (self.c[i] + t * self.d[i])))
    }

    fn derivative(&self, x: f64) -> Result<f64> {
        let (i, t) = self.locate(x)?;
        Ok(self.b[i] + t * (2.0 * self.c[i] + 3.0 * self.d[i] * t))
    }
}

// Only ever solve the reference spline once on first use
static NP_SPLINE: OnceLock<CubicSpline> = OnceLock::new();

/// Reference spline through the elastic n-p cross section table
///
/// See [NP_ELASTIC](crate::constants::NP_ELASTIC) for the nodes.
pub fn np_elastic_spline() -> &'static CubicSpline {
    NP_SPLINE.get_or_init(|| {
        let (x, y): (Vec<f64>, Vec<f64>) = NP_ELASTIC.iter().copied().unzip();
        CubicSpline::solve(&x, &y)
    })
}

/// Elastic (n,p) cross section at a neutron energy, σ_np(T) (mbarn/sr)
///
/// Interpolates the reference table with a natural cubic spline. An exact
/// energy gives an exact cross section. Any energy uncertainty is carried
/// through the local slope of the spline.
///
/// ```rust
/// # use n2n_xsect::np_cross_section;
/// # use n2n_uncertain::Uncertain;
/// let sigma = np_cross_section(Uncertain::exact(24.0)).unwrap();
/// assert_eq!(sigma.value(), 128.0);
/// assert!(sigma.is_exact());
/// ```
pub fn np_cross_section(energy: Uncertain) -> Result<Uncertain> {
    let spline = np_elastic_spline();

    let (low, high) = spline.range();
    if energy.value() < low || energy.value() > high {
        trace!(
            "Extrapolating n-p cross section to {} MeV",
            energy.value()
        );
    }

    spline.eval_uncertain(energy)
}
