//! Physical constants and material data
//!
//! Number thicknesses are expressed in nuclei per barn. Since 1 u is
//! 1.6605389e-24 g and 1 barn is 1e-24 cm², the powers of ten cancel and a
//! mass thickness in g/cm² divided by a molar mass in u and by
//! [ATOMIC_MASS_UNIT] is directly in molecules/barn. This is the only unit
//! convention used anywhere in the crate.

/// Atomic mass unit, in units of 1e-24 g
pub const ATOMIC_MASS_UNIT: f64 = 1.6605389;

/// Conversion from mbarn to barn
pub const MBARN: f64 = 1.0e-3;

/// Seconds in a minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Half life of 11C (min)
pub const C11_HALF_LIFE: f64 = 20.334;

/// Smallest saturation factor `1 - exp(-λt)` accepted before a cross section
/// is considered undefined
pub const SATURATION_EPSILON: f64 = 1.0e-9;

/// Atomic mass of 1H (u)
pub const HYDROGEN_MASS: f64 = 1.007825;

/// Atomic mass of 12C (u)
pub const CARBON_MASS: f64 = 12.0;

/// Density of polyethylene (g/cm³)
pub const CH2_DENSITY: f64 = 0.89;

/// Density of graphite (g/cm³)
pub const GRAPHITE_DENSITY: f64 = 2.276;

/// Elastic n-p cross section nodes as (energy MeV, mbarn/sr), lab frame
///
/// Data from <http://nn-online.org/>.
pub const NP_ELASTIC: [(f64, f64); 5] = [
    (20.0, 153.0),
    (22.0, 139.0),
    (24.0, 128.0),
    (26.0, 119.0),
    (28.0, 111.0),
];
