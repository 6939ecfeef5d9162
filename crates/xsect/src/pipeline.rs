//! Full calculation for one foreground/background run pair

// crate modules
use crate::config::{Config, Efficiency, Geometry};
use crate::cross_section::{
    activation_cross_section, apply_efficiency, decay_constant, saturation, Activation,
};
use crate::error::{Error, Result};
use crate::flux::{neutron_flux, proton_flux, CountingRun};
use crate::interpolate::np_cross_section;
use crate::target::{Target, TargetGeometry, TargetKind};

// n2n modules
use n2n_uncertain::Uncertain;

// external crates
use log::debug;

/// Measured inputs for a single cross section row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowInput {
    /// Foreground run number
    pub foreground_number: u32,
    /// Background run number
    pub background_number: u32,
    /// Neutron energy of the foreground run (MeV)
    pub neutron_energy: Uncertain,
    /// Proton telescope counts with the target in place
    pub foreground: CountingRun,
    /// Proton telescope counts without the target
    pub background: CountingRun,
    /// Geometry used for this row
    pub geometry: Geometry,
    /// Activated ¹¹C nuclei in the CH2 target
    pub ch2_decay: Uncertain,
    /// Activated ¹¹C nuclei in the graphite target
    pub graphite_decay: Uncertain,
}

impl RowInput {
    /// Irradiation time of both targets, the foreground clock time (s)
    pub fn activation_time(&self) -> Uncertain {
        self.foreground.clock_time
    }

    /// Decay count for one of the targets
    pub fn decay_count(&self, kind: TargetKind) -> Uncertain {
        match kind {
            TargetKind::Ch2 => self.ch2_decay,
            TargetKind::Graphite => self.graphite_decay,
        }
    }
}

/// Calculated quantities for a single cross section row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowResult {
    /// Net proton counting rate (protons/s)
    pub proton_flux: Uncertain,
    /// Elastic n-p cross section at the neutron energy (mbarn/sr)
    pub sigma_np: Uncertain,
    /// Neutron flux (neutrons/s/sr)
    pub neutron_flux: Uncertain,
    /// (n,2n) cross section from the CH2 target (mbarn)
    pub ch2_cross_section: Uncertain,
    /// (n,2n) cross section from the graphite target (mbarn)
    pub graphite_cross_section: Uncertain,
}

impl RowResult {
    /// Cross section from one of the targets
    pub fn cross_section(&self, kind: TargetKind) -> Uncertain {
        match kind {
            TargetKind::Ch2 => self.ch2_cross_section,
            TargetKind::Graphite => self.graphite_cross_section,
        }
    }
}

/// Stateless calculator for cross section rows
///
/// Holds only the values derived once from a [Config], so every row is an
/// independent pure calculation.
///
/// ```rust
/// # use n2n_xsect::{Calculator, Config, CountingRun, RowInput};
/// # use n2n_uncertain::Uncertain;
/// let config = Config::default();
/// let calculator = Calculator::new(&config).unwrap();
///
/// let row = RowInput {
///     foreground_number: 12,
///     background_number: 13,
///     neutron_energy: Uncertain::exact(24.0),
///     foreground: CountingRun::new(25000.0, 1800.0, 0.95).unwrap(),
///     background: CountingRun::new(1200.0, 1800.0, 0.97).unwrap(),
///     geometry: config.geometry,
///     ch2_decay: Uncertain::new(2.0e4, 400.0).unwrap(),
///     graphite_decay: Uncertain::new(6.0e4, 900.0).unwrap(),
/// };
///
/// let result = calculator.calculate(&row).unwrap();
/// assert_eq!(result.sigma_np.value(), 128.0);
/// assert!(result.graphite_cross_section.value() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculator {
    decay_constant: Uncertain,
    efficiency: Efficiency,
}

impl Calculator {
    /// Derive the decay constant and efficiencies from a configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            decay_constant: decay_constant(config.half_life)?,
            efficiency: config.efficiency,
        })
    }

    /// Decay constant of the activation product (s⁻¹)
    pub fn decay_constant(&self) -> Uncertain {
        self.decay_constant
    }

    /// Run the full chain from proton counts to both activation cross sections
    pub fn calculate(&self, row: &RowInput) -> Result<RowResult> {
        let proton_flux = proton_flux(&row.foreground, &row.background)?;

        let detector_solid_angle = row.geometry.detector.solid_angle()?;
        let ch2 = self.target(row, TargetKind::Ch2)?;
        let graphite = self.target(row, TargetKind::Graphite)?;

        let sigma_np = np_cross_section(row.neutron_energy)?;
        let neutron_flux = neutron_flux(
            proton_flux,
            sigma_np,
            ch2.hydrogen_thickness()?,
            ch2.solid_angle()?,
            detector_solid_angle,
        )?;

        let activation = Activation {
            decay_constant: self.decay_constant,
            time: row.activation_time(),
        };

        let shared = shared_terms(row, proton_flux, sigma_np, &activation)?;
        let ch2_cross_section =
            Self::cross_section(&ch2, &ch2, neutron_flux, &activation, &shared)?;
        let graphite_cross_section =
            Self::cross_section(&graphite, &ch2, neutron_flux, &activation, &shared)?;

        debug!(
            "Run {}/{}: proton flux {proton_flux}, neutron flux {neutron_flux}",
            row.foreground_number, row.background_number
        );

        Ok(RowResult {
            proton_flux,
            sigma_np,
            neutron_flux,
            ch2_cross_section,
            graphite_cross_section,
        })
    }

    /// Target with its efficiency corrected decay count
    fn target(&self, row: &RowInput, kind: TargetKind) -> Result<Target> {
        let decay_count = apply_efficiency(row.decay_count(kind), self.efficiency.target(kind))?;
        Ok(Target::new(kind, row.geometry.target(kind), decay_count))
    }

    /// Cross section with every measured input propagated once
    ///
    /// The CH2 geometry enters the neutron flux and, for the CH2 target, the
    /// cross section itself, where it cancels. The foreground clock time sets
    /// both the proton rate and the irradiation time. The uncertainty is
    /// therefore built from the partials with respect to the measured inputs
    /// rather than from the chained results.
    fn cross_section(
        target: &Target,
        ch2: &Target,
        neutron_flux: Uncertain,
        activation: &Activation,
        shared: &[(f64, f64)],
    ) -> Result<Uncertain> {
        // cross section per activated nucleus, also checks the domain
        let per_nucleus = activation_cross_section(
            Uncertain::exact(1.0),
            target.carbon_thickness()?,
            target.solid_angle()?,
            neutron_flux,
            activation,
        )?
        .value();
        let value = target.decay_count.value() * per_nucleus;

        let mut terms = vec![(per_nucleus, target.decay_count.uncertainty())];
        terms.extend(shared.iter().map(|(g, delta)| (value * g, *delta)));

        if target.kind != TargetKind::Ch2 {
            let relative = geometry_terms(&ch2.geometry, 1.0)
                .into_iter()
                .chain(geometry_terms(&target.geometry, -1.0));
            terms.extend(relative.map(|(g, delta)| (value * g, delta)));
        }

        let cross_section = Uncertain::from_partials(value, &terms)?;
        debug!("{} cross section {cross_section} mbarn", target.kind);
        Ok(cross_section)
    }
}

/// Relative partials `(∂(ln σ)/∂x, δx)` common to both targets
///
/// Covers the decay constant, the proton telescope runs, the n-p cross
/// section and the detector aperture.
fn shared_terms(
    row: &RowInput,
    proton_flux: Uncertain,
    sigma_np: Uncertain,
    activation: &Activation,
) -> Result<Vec<(f64, f64)>> {
    let phi = proton_flux.value();
    if phi == 0.0 {
        return Err(Error::ZeroQuantity("proton flux"));
    }

    let fg = &row.foreground;
    let bg = &row.background;
    let (fg_time, fg_live) = (fg.clock_time.value(), fg.live_fraction.value());
    let (bg_time, bg_live) = (bg.clock_time.value(), bg.live_fraction.value());
    let fg_rate = fg.rate()?.value();
    let bg_rate = bg.rate()?.value();

    let lambda = activation.decay_constant.value();
    let time = activation.time.value();
    let decay_ratio = (-lambda * time).exp() / saturation(lambda, time);

    let detector = &row.geometry.detector;

    Ok(vec![
        (
            1.0 / lambda - time * decay_ratio,
            activation.decay_constant.uncertainty(),
        ),
        (-1.0 / (fg_time * fg_live * phi), fg.counts.uncertainty()),
        // irradiation time and foreground rate share the clock
        (
            fg_rate / (fg_time * phi) - lambda * decay_ratio,
            fg.clock_time.uncertainty(),
        ),
        (fg_rate / (fg_live * phi), fg.live_fraction.uncertainty()),
        (1.0 / (bg_time * bg_live * phi), bg.counts.uncertainty()),
        (-bg_rate / (bg_time * phi), bg.clock_time.uncertainty()),
        (-bg_rate / (bg_live * phi), bg.live_fraction.uncertainty()),
        (1.0 / sigma_np.value(), sigma_np.uncertainty()),
        (1.0 / detector.area.value(), detector.area.uncertainty()),
        (-2.0 / detector.distance.value(), detector.distance.uncertainty()),
    ])
}

/// Relative partials of a solid angle and number thickness, `sign` for
/// whether they multiply or divide the cross section
fn geometry_terms(geometry: &TargetGeometry, sign: f64) -> [(f64, f64); 3] {
    [
        (sign / geometry.area.value(), geometry.area.uncertainty()),
        (-2.0 * sign / geometry.distance.value(), geometry.distance.uncertainty()),
        (sign / geometry.thickness.value(), geometry.thickness.uncertainty()),
    ]
}
