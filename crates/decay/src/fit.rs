// standard library
use std::f64::consts::LN_2;

// crate modules
use crate::curve::DecayCurve;
use crate::error::{Error, Result};

// n2n modules
use n2n_uncertain::Uncertain;
use n2n_xsect::constants::C11_HALF_LIFE;

// external crates
use log::{debug, warn};
use nalgebra::{Matrix2, Vector2};

/// Anything that can fit `N0·exp(-λt) + A` to a decay curve
pub trait FitDecayCurve {
    /// Fit the curve and return the parameters with standard errors
    fn fit(&self, curve: &DecayCurve) -> Result<DecayFit>;
}

/// Fitted parameters of `N0·exp(-λt) + A`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayFit {
    /// Counts per bin at t = 0, N0
    pub amplitude: Uncertain,
    /// Decay rate, λ (min⁻¹)
    pub decay_rate: Uncertain,
    /// Constant background per bin, A
    pub background: Uncertain,
    /// Weighted sum of squared residuals
    pub chi_squared: f64,
    /// Number of samples less the number of free parameters
    pub degrees_of_freedom: usize,
}

impl DecayFit {
    /// Fitted model at time `t`
    pub fn model(&self, t: f64) -> f64 {
        self.amplitude.value() * (-self.decay_rate.value() * t).exp() + self.background.value()
    }
}

/// Weighted least squares fit with the decay rate held fixed
///
/// Fixing λ leaves a model that is linear in N0 and A, so the fit is the
/// exact solution of the 2x2 normal equations rather than an iterative
/// search. Each sample is weighted by `1/δN²`, and the standard errors are
/// taken from the diagonal of the inverse normal matrix.
///
/// ```rust
/// # use n2n_decay::{DecayCurve, FitDecayCurve, FixedRateFit, Sample};
/// let fitter = FixedRateFit::default();
/// let lambda = fitter.decay_rate();
///
/// let samples = (0..30)
///     .map(|i| {
///         let t = 2.0 * i as f64;
///         Sample::new(t, 1000.0 * (-lambda * t).exp() + 20.0).unwrap()
///     })
///     .collect();
///
/// let fit = fitter.fit(&DecayCurve { samples }).unwrap();
/// assert!((fit.amplitude.value() - 1000.0).abs() < 1e-6);
/// assert!((fit.background.value() - 20.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRateFit {
    decay_rate: f64,
}

impl Default for FixedRateFit {
    /// Fixed to the decay rate of 11C
    fn default() -> Self {
        Self {
            decay_rate: LN_2 / C11_HALF_LIFE,
        }
    }
}

impl FixedRateFit {
    /// Fit with a given decay rate (min⁻¹)
    pub fn new(decay_rate: f64) -> Result<Self> {
        if decay_rate <= 0.0 || !decay_rate.is_finite() {
            return Err(Error::InvalidDecayRate(decay_rate));
        }
        Ok(Self { decay_rate })
    }

    /// Fit with the decay rate of a half life (min)
    pub fn from_half_life(half_life: f64) -> Result<Self> {
        Self::new(LN_2 / half_life)
    }

    /// The fixed decay rate (min⁻¹)
    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }
}

impl FitDecayCurve for FixedRateFit {
    fn fit(&self, curve: &DecayCurve) -> Result<DecayFit> {
        if curve.len() < 2 {
            return Err(Error::InsufficientSamples {
                found: curve.len(),
                minimum: 2,
            });
        }

        // accumulate the normal equations for the basis [exp(-λt), 1]
        let mut normal = Matrix2::<f64>::zeros();
        let mut rhs = Vector2::<f64>::zeros();
        for sample in &curve.samples {
            let basis = Vector2::new((-self.decay_rate * sample.time).exp(), 1.0);
            let weight = sample.counts.uncertainty().powi(2).recip();
            normal += basis * basis.transpose() * weight;
            rhs += basis * (weight * sample.counts.value());
        }

        // identical times make the two columns degenerate
        let scale = normal[(0, 0)] * normal[(1, 1)];
        if normal.determinant().abs() <= 1e-12 * scale {
            return Err(Error::SingularFit);
        }

        let covariance = normal.try_inverse().ok_or(Error::SingularFit)?;
        let parameters = covariance * rhs;

        let fit = DecayFit {
            amplitude: Uncertain::new(parameters[0], covariance[(0, 0)].sqrt())?,
            decay_rate: Uncertain::exact(self.decay_rate),
            background: Uncertain::new(parameters[1], covariance[(1, 1)].sqrt())?,
            chi_squared: 0.0,
            degrees_of_freedom: curve.len() - 2,
        };

        let chi_squared = curve
            .samples
            .iter()
            .map(|s| ((s.counts.value() - fit.model(s.time)) / s.counts.uncertainty()).powi(2))
            .sum::<f64>();

        if fit.amplitude.value() <= 0.0 {
            warn!("Decay fit gave a non-positive amplitude {}", fit.amplitude);
        }

        debug!(
            "Decay fit N0 = {}, A = {}, chi2/ndf = {chi_squared:.3}/{}",
            fit.amplitude, fit.background, fit.degrees_of_freedom
        );

        Ok(DecayFit { chi_squared, ..fit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Sample;

    fn curve(times: &[f64], lambda: f64) -> DecayCurve {
        let samples = times
            .iter()
            .map(|t| Sample::new(*t, 500.0 * (-lambda * t).exp() + 5.0).unwrap())
            .collect();
        DecayCurve { samples }
    }

    #[test]
    fn exact_model_has_zero_residual() {
        let fitter = FixedRateFit::default();
        let times: Vec<f64> = (0..20).map(|i| i as f64 * 3.0).collect();
        let fit = fitter.fit(&curve(&times, fitter.decay_rate())).unwrap();

        assert!((fit.amplitude.value() - 500.0).abs() < 1e-8);
        assert!((fit.background.value() - 5.0).abs() < 1e-8);
        assert!(fit.chi_squared < 1e-12);
        assert_eq!(fit.degrees_of_freedom, 18);
        assert!(fit.decay_rate.is_exact());
    }

    #[test]
    fn two_samples_are_enough() {
        let fitter = FixedRateFit::default();
        let fit = fitter.fit(&curve(&[0.0, 40.0], fitter.decay_rate())).unwrap();
        assert!((fit.amplitude.value() - 500.0).abs() < 1e-8);
        assert!(fit.amplitude.uncertainty() > 0.0);
    }

    #[test]
    fn too_few_samples() {
        let fitter = FixedRateFit::default();
        assert!(matches!(
            fitter.fit(&curve(&[1.0], fitter.decay_rate())),
            Err(Error::InsufficientSamples { found: 1, .. })
        ));
    }

    #[test]
    fn repeated_time_is_singular() {
        let fitter = FixedRateFit::default();
        assert!(matches!(
            fitter.fit(&curve(&[5.0, 5.0, 5.0], fitter.decay_rate())),
            Err(Error::SingularFit)
        ));
    }

    #[test]
    fn default_rate_follows_configured_half_life() {
        let half_life = n2n_xsect::Config::default().half_life.value();
        assert_eq!(
            FixedRateFit::default(),
            FixedRateFit::from_half_life(half_life).unwrap()
        );
    }

    #[test]
    fn invalid_rate() {
        assert!(FixedRateFit::new(0.0).is_err());
        assert!(FixedRateFit::from_half_life(-1.0).is_err());
    }
}
