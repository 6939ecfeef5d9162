// crate modules
use crate::error::{Error, Result};
use crate::fit::DecayFit;

// n2n modules
use n2n_uncertain::Uncertain;

// external crates
use log::trace;

/// Efficiency of the standard decay counting station
pub const COUNTING_EFFICIENCY: f64 = 0.12;

/// Number of activated nuclei at the end of the irradiation
///
/// The fitted amplitude is the count rate per unit time at the start of
/// counting. Correcting back over the transit time and dividing by the decay
/// rate and efficiency gives the total number of nuclei,
///
/// ```text
/// N = N0·exp(λ·t) / (λ·ε)
/// ```
///
/// where the transit time `t` is in the same unit of time as `1/λ`.
///
/// ```rust
/// # use n2n_decay::{activated_nuclei, DecayFit};
/// # use n2n_uncertain::Uncertain;
/// let fit = DecayFit {
///     amplitude: Uncertain::new(120.0, 12.0).unwrap(),
///     decay_rate: Uncertain::exact(0.5),
///     background: Uncertain::exact(0.0),
///     chi_squared: 0.0,
///     degrees_of_freedom: 10,
/// };
///
/// // no transit time and perfect counting
/// let n = activated_nuclei(&fit, 0.0, 1.0).unwrap();
/// assert_eq!(n.value(), 240.0);
/// assert_eq!(n.uncertainty(), 24.0);
/// ```
pub fn activated_nuclei(fit: &DecayFit, transit_time: f64, efficiency: f64) -> Result<Uncertain> {
    if efficiency <= 0.0 || !efficiency.is_finite() {
        return Err(Error::InvalidEfficiency(efficiency));
    }

    let lambda = fit.decay_rate.value();
    if lambda <= 0.0 {
        return Err(Error::InvalidDecayRate(lambda));
    }

    let correction = (lambda * transit_time).exp() / (lambda * efficiency);
    let n = fit.amplitude.value() * correction;

    let nuclei = Uncertain::from_partials(
        n,
        &[
            (correction, fit.amplitude.uncertainty()),
            (n * (transit_time - lambda.recip()), fit.decay_rate.uncertainty()),
        ],
    )?;

    trace!("Activated nuclei {nuclei} after {transit_time} transit");
    Ok(nuclei)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(lambda: Uncertain) -> DecayFit {
        DecayFit {
            amplitude: Uncertain::new(100.0, 5.0).unwrap(),
            decay_rate: lambda,
            background: Uncertain::exact(2.0),
            chi_squared: 1.0,
            degrees_of_freedom: 1,
        }
    }

    #[test]
    fn transit_correction() {
        let lambda = 2.0_f64.ln() / 20.334;
        let n = activated_nuclei(&fit(Uncertain::exact(lambda)), 20.334, COUNTING_EFFICIENCY)
            .unwrap();

        // one half life of transit doubles the count
        let expected = 2.0 * 100.0 / (lambda * COUNTING_EFFICIENCY);
        assert!((n.value() - expected).abs() < 1e-9 * expected);
        assert!((n.relative().unwrap() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn decay_rate_uncertainty() {
        let n = activated_nuclei(&fit(Uncertain::new(0.5, 0.01).unwrap()), 0.0, 1.0).unwrap();
        // N = N0/λ so the relative uncertainties add in quadrature
        assert!((n.relative().unwrap() - 0.05_f64.hypot(0.02)).abs() < 1e-12);
    }

    #[test]
    fn bad_inputs() {
        let f = fit(Uncertain::exact(0.5));
        assert!(matches!(
            activated_nuclei(&f, 1.0, 0.0),
            Err(Error::InvalidEfficiency(_))
        ));
        assert!(matches!(
            activated_nuclei(&fit(Uncertain::exact(0.0)), 1.0, 1.0),
            Err(Error::InvalidDecayRate(_))
        ));
    }
}
