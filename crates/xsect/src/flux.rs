//! Proton and neutron flux

// crate modules
use crate::constants::MBARN;
use crate::error::{Error, Result};

// n2n modules
use n2n_uncertain::Uncertain;

// external crates
use log::trace;

/// Counts collected by the proton telescope over one run
///
/// The clock time and live fraction may carry their own uncertainties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountingRun {
    /// Gross counts in the region of interest
    pub counts: Uncertain,
    /// Clock (wall) time of the run (s)
    pub clock_time: Uncertain,
    /// Fraction of the clock time the acquisition was live
    pub live_fraction: Uncertain,
}

impl CountingRun {
    /// Counting run with Poisson counts and exact timing
    ///
    /// ```rust
    /// # use n2n_xsect::CountingRun;
    /// let run = CountingRun::new(1000.0, 100.0, 1.0).unwrap();
    /// assert_eq!(run.counts.uncertainty(), 1000_f64.sqrt());
    /// assert_eq!(run.rate().unwrap().value(), 10.0);
    /// ```
    pub fn new(counts: f64, clock_time: f64, live_fraction: f64) -> Result<Self> {
        Ok(Self {
            counts: Uncertain::poisson(counts)?,
            clock_time: Uncertain::exact(clock_time),
            live_fraction: Uncertain::exact(live_fraction),
        })
    }

    /// Live-time corrected counting rate, `N/(t·f)` (counts/s)
    ///
    /// The relative uncertainties of the counts, clock time and live
    /// fraction combine in quadrature.
    pub fn rate(&self) -> Result<Uncertain> {
        if self.clock_time.value() == 0.0 {
            return Err(Error::ZeroClockTime);
        }

        if self.live_fraction.value() == 0.0 {
            return Err(Error::ZeroLiveFraction);
        }

        let live_time = self.clock_time * self.live_fraction;
        Ok(self.counts.checked_div(live_time)?)
    }
}

/// Net proton counting rate, foreground minus background (protons/s)
///
/// The two runs are independent so their rate uncertainties add in
/// quadrature.
///
/// ```rust
/// # use n2n_xsect::{proton_flux, CountingRun};
/// let fg = CountingRun::new(1000.0, 100.0, 1.0).unwrap();
/// let bg = CountingRun::new(100.0, 100.0, 1.0).unwrap();
///
/// let flux = proton_flux(&fg, &bg).unwrap();
/// assert_eq!(flux.value(), 9.0);
/// assert!((flux.uncertainty() - 0.1_f64.hypot(0.1 * 10_f64.sqrt())).abs() < 1e-12);
/// ```
pub fn proton_flux(foreground: &CountingRun, background: &CountingRun) -> Result<Uncertain> {
    let flux = foreground.rate()? - background.rate()?;
    trace!("Proton flux {flux} protons/s");
    Ok(flux)
}

/// Neutron flux through the n-p scattering geometry (neutrons/s/sr)
///
/// ```text
/// Φn = Φp / (σnp · N_H · Ω_CH2 · Ω_det · 1e-3)
/// ```
///
/// with σnp in mbarn/sr and N_H in nuclei/barn. All relative uncertainties
/// combine in quadrature.
///
/// ```rust
/// # use n2n_xsect::neutron_flux;
/// # use n2n_uncertain::Uncertain;
/// let flux = neutron_flux(
///     Uncertain::exact(2.0),
///     Uncertain::exact(100.0),
///     Uncertain::exact(0.01),
///     Uncertain::exact(0.1),
///     Uncertain::exact(0.02),
/// )
/// .unwrap();
/// assert!((flux.value() - 1.0e6).abs() < 1e-6);
/// ```
pub fn neutron_flux(
    proton_flux: Uncertain,
    sigma_np: Uncertain,
    hydrogen_thickness: Uncertain,
    ch2_solid_angle: Uncertain,
    detector_solid_angle: Uncertain,
) -> Result<Uncertain> {
    for (name, quantity) in [
        ("n-p cross section", sigma_np),
        ("hydrogen number thickness", hydrogen_thickness),
        ("CH2 solid angle", ch2_solid_angle),
        ("detector solid angle", detector_solid_angle),
    ] {
        if quantity.value() == 0.0 {
            return Err(Error::ZeroQuantity(name));
        }
    }

    let denominator =
        (sigma_np * hydrogen_thickness * ch2_solid_angle * detector_solid_angle).scale(MBARN);
    let flux = proton_flux.checked_div(denominator)?;
    trace!("Neutron flux {flux} neutrons/s/sr");
    Ok(flux)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timing() {
        let run = CountingRun::new(10.0, 0.0, 1.0).unwrap();
        assert!(matches!(run.rate(), Err(Error::ZeroClockTime)));

        let run = CountingRun::new(10.0, 10.0, 0.0).unwrap();
        assert!(matches!(run.rate(), Err(Error::ZeroLiveFraction)));
    }

    #[test]
    fn live_fraction_uncertainty() {
        let run = CountingRun {
            counts: Uncertain::exact(400.0),
            clock_time: Uncertain::exact(10.0),
            live_fraction: Uncertain::new(0.8, 0.08).unwrap(),
        };
        let rate = run.rate().unwrap();
        assert!((rate.value() - 50.0).abs() < 1e-12);
        assert!((rate.relative().unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn neutron_flux_relative_uncertainty() {
        let flux = neutron_flux(
            Uncertain::new(2.0, 0.2).unwrap(),
            Uncertain::exact(100.0),
            Uncertain::new(0.01, 0.001).unwrap(),
            Uncertain::exact(0.1),
            Uncertain::exact(0.02),
        )
        .unwrap();
        let expected = 0.1_f64.hypot(0.1);
        assert!((flux.relative().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn graphite_cannot_normalise() {
        let result = neutron_flux(
            Uncertain::exact(2.0),
            Uncertain::exact(100.0),
            Uncertain::exact(0.0),
            Uncertain::exact(0.1),
            Uncertain::exact(0.02),
        );
        assert!(matches!(
            result,
            Err(Error::ZeroQuantity("hydrogen number thickness"))
        ));
    }
}
