//! Activation cross section from decay counts

// crate modules
use crate::constants::{MBARN, SATURATION_EPSILON, SECONDS_PER_MINUTE};
use crate::error::{Error, Result};

// n2n modules
use n2n_uncertain::Uncertain;

// external crates
use log::trace;

/// Decay constant in s⁻¹ from a half life in minutes
///
/// ```rust
/// # use n2n_xsect::decay_constant;
/// # use n2n_uncertain::Uncertain;
/// let lambda = decay_constant(Uncertain::exact(20.334)).unwrap();
/// assert!((lambda.value() - 2.0_f64.ln() / 1220.04).abs() < 1e-15);
/// ```
pub fn decay_constant(half_life: Uncertain) -> Result<Uncertain> {
    if half_life.value() <= 0.0 {
        return Err(Error::InvalidHalfLife(half_life.value()));
    }
    let seconds = half_life.scale(SECONDS_PER_MINUTE);
    Ok(seconds.recip()?.scale(std::f64::consts::LN_2))
}

/// Fraction of the saturation activity reached after irradiating for `time`
///
/// `S = 1 - exp(-λt)`, evaluated without cancellation for small `λt`.
pub fn saturation(decay_constant: f64, time: f64) -> f64 {
    -(-decay_constant * time).exp_m1()
}

/// Correct a counted number of decays for the counting efficiency
///
/// ```rust
/// # use n2n_xsect::apply_efficiency;
/// # use n2n_uncertain::Uncertain;
/// let counts = Uncertain::new(583.0, 58.3).unwrap();
/// let corrected = apply_efficiency(counts, 5.83).unwrap();
/// assert!((corrected.value() - 100.0).abs() < 1e-12);
///
/// assert!(apply_efficiency(counts, 0.0).is_err());
/// ```
pub fn apply_efficiency(decay_count: Uncertain, efficiency: f64) -> Result<Uncertain> {
    if efficiency <= 0.0 || !efficiency.is_finite() {
        return Err(Error::InvalidEfficiency(efficiency));
    }
    Ok(decay_count.scale(efficiency.recip()))
}

/// Irradiation timing of a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activation {
    /// Decay constant of the activation product (s⁻¹)
    pub decay_constant: Uncertain,
    /// Irradiation time (s)
    pub time: Uncertain,
}

impl Activation {
    /// Saturation factor at the nominal values
    pub fn saturation(&self) -> f64 {
        saturation(self.decay_constant.value(), self.time.value())
    }
}

/// Activation cross section (mbarn)
///
/// ```text
/// σ = N·λ / (N_C · Ω · Φn · 1e-3 · (1 - exp(-λt)))
/// ```
///
/// The decay constant appears in the numerator and in the saturation factor,
/// so the uncertainty is built from the partial derivatives of σ rather than
/// from chained operators:
///
/// ```text
/// ∂(ln σ)/∂λ = 1/λ - t·exp(-λt)/S
/// ∂(ln σ)/∂t = -λ·exp(-λt)/S
/// ```
///
/// A saturation factor below `1e-9`, for example from a zero irradiation
/// time, is a domain error instead of an infinite cross section.
///
/// ```rust
/// # use n2n_xsect::{activation_cross_section, Activation};
/// # use n2n_uncertain::Uncertain;
/// let activation = Activation {
///     decay_constant: Uncertain::exact(1.0e-3),
///     time: Uncertain::exact(0.0),
/// };
/// let sigma = activation_cross_section(
///     Uncertain::exact(1.0e4),
///     Uncertain::exact(0.1),
///     Uncertain::exact(0.2),
///     Uncertain::exact(1.0e6),
///     &activation,
/// );
/// assert!(sigma.is_err());
/// ```
pub fn activation_cross_section(
    decay_count: Uncertain,
    number_thickness: Uncertain,
    solid_angle: Uncertain,
    neutron_flux: Uncertain,
    activation: &Activation,
) -> Result<Uncertain> {
    for (name, quantity) in [
        ("target number thickness", number_thickness),
        ("target solid angle", solid_angle),
        ("neutron flux", neutron_flux),
    ] {
        if quantity.value() == 0.0 {
            return Err(Error::ZeroQuantity(name));
        }
    }

    let lambda = activation.decay_constant.value();
    let time = activation.time.value();
    let s = activation.saturation();
    if !s.is_finite() || s < SATURATION_EPSILON {
        return Err(Error::SaturationTooSmall {
            saturation: s,
            time,
        });
    }

    let n = decay_count.value();
    let denominator =
        number_thickness.value() * solid_angle.value() * neutron_flux.value() * MBARN * s;
    let sigma = n * lambda / denominator;

    // exp(-λt)/S, shared by both timing partials
    let decay_ratio = (-lambda * time).exp() / s;

    let partials = [
        (lambda / denominator, decay_count.uncertainty()),
        (-sigma / number_thickness.value(), number_thickness.uncertainty()),
        (-sigma / solid_angle.value(), solid_angle.uncertainty()),
        (-sigma / neutron_flux.value(), neutron_flux.uncertainty()),
        (
            sigma * (1.0 / lambda - time * decay_ratio),
            activation.decay_constant.uncertainty(),
        ),
        (-sigma * lambda * decay_ratio, activation.time.uncertainty()),
    ];

    let cross_section = Uncertain::from_partials(sigma, &partials)?;
    trace!("Activation cross section {cross_section} mbarn (S = {s:e})");
    Ok(cross_section)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activation(time: f64) -> Activation {
        Activation {
            decay_constant: Uncertain::exact(2.0_f64.ln() / 100.0),
            time: Uncertain::exact(time),
        }
    }

    #[test]
    fn one_half_life() {
        // S = 1/2 after one half life, so σ = 2·N·λ/(NΩΦ·1e-3)
        let sigma = activation_cross_section(
            Uncertain::exact(1000.0),
            Uncertain::exact(0.1),
            Uncertain::exact(0.1),
            Uncertain::exact(1.0e3),
            &activation(100.0),
        )
        .unwrap();

        let expected = 2.0 * 1000.0 * (2.0_f64.ln() / 100.0) / (10.0 * 1.0e-3);
        assert!((sigma.value() - expected).abs() < 1e-9 * expected);
        assert!(sigma.is_exact());
    }

    #[test]
    fn relative_uncertainties_add_in_quadrature() {
        let sigma = activation_cross_section(
            Uncertain::new(1000.0, 30.0).unwrap(),
            Uncertain::exact(0.1),
            Uncertain::exact(0.1),
            Uncertain::new(1.0e3, 40.0).unwrap(),
            &activation(100.0),
        )
        .unwrap();
        assert!((sigma.relative().unwrap() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn timing_partials_match_finite_difference() {
        let lambda = 2.0_f64.ln() / 100.0;
        let time = 50.0;
        let sigma_at = |l: f64, t: f64| {
            let s = saturation(l, t);
            1000.0 * l / (0.01 * 1.0e3 * MBARN * s)
        };

        let with = |dl: f64, dt: f64| {
            let activation = Activation {
                decay_constant: Uncertain::new(lambda, dl).unwrap(),
                time: Uncertain::new(time, dt).unwrap(),
            };
            activation_cross_section(
                Uncertain::exact(1000.0),
                Uncertain::exact(0.1),
                Uncertain::exact(0.1),
                Uncertain::exact(1.0e3),
                &activation,
            )
            .unwrap()
        };

        let h = 1.0e-7;
        let d_lambda = (sigma_at(lambda * (1.0 + h), time) - sigma_at(lambda * (1.0 - h), time))
            / (2.0 * lambda * h);
        let d_time = (sigma_at(lambda, time + 1.0e-4) - sigma_at(lambda, time - 1.0e-4)) / 2.0e-4;

        let by_lambda = with(1.0e-5, 0.0).uncertainty();
        assert!((by_lambda - (d_lambda * 1.0e-5).abs()).abs() < 1e-6 * by_lambda);

        let by_time = with(0.0, 0.5).uncertainty();
        assert!((by_time - (d_time * 0.5).abs()).abs() < 1e-6 * by_time);
    }

    #[test]
    fn zero_activation_time() {
        let result = activation_cross_section(
            Uncertain::exact(1000.0),
            Uncertain::exact(0.1),
            Uncertain::exact(0.1),
            Uncertain::exact(1.0e3),
            &activation(0.0),
        );
        assert!(matches!(result, Err(Error::SaturationTooSmall { .. })));
    }

    #[test]
    fn negative_activation_time() {
        let result = activation_cross_section(
            Uncertain::exact(1000.0),
            Uncertain::exact(0.1),
            Uncertain::exact(0.1),
            Uncertain::exact(1.0e3),
            &activation(-10.0),
        );
        assert!(matches!(result, Err(Error::SaturationTooSmall { .. })));
    }

    #[test]
    fn bad_half_life() {
        assert!(matches!(
            decay_constant(Uncertain::exact(0.0)),
            Err(Error::InvalidHalfLife(_))
        ));
    }

    #[test]
    fn half_life_uncertainty() {
        let lambda = decay_constant(Uncertain::new(20.0, 0.2).unwrap()).unwrap();
        assert!((lambda.relative().unwrap() - 0.01).abs() < 1e-12);
    }
}
