//! Target and detector geometry

// crate modules
use crate::constants::{
    ATOMIC_MASS_UNIT, CARBON_MASS, CH2_DENSITY, GRAPHITE_DENSITY, HYDROGEN_MASS,
};
use crate::error::{Error, Result};

// n2n modules
use n2n_uncertain::Uncertain;

// external crates
use serde::{Deserialize, Serialize};

/// Solid angle subtended by a flat area at a distance, `Ω = A/d²` (sr)
///
/// The distance enters squared, so its relative uncertainty counts twice.
///
/// ```rust
/// # use n2n_xsect::solid_angle;
/// # use n2n_uncertain::Uncertain;
/// let omega = solid_angle(Uncertain::exact(5.067075), Uncertain::exact(6.46)).unwrap();
/// assert!((omega.value() - 0.12142).abs() < 1e-5);
/// ```
pub fn solid_angle(area: Uncertain, distance: Uncertain) -> Result<Uncertain> {
    if distance.value() == 0.0 {
        return Err(Error::ZeroDistance);
    }
    Ok(area.checked_div(distance.powf(2.0)?)?)
}

/// Number thickness of one element in a target (nuclei/barn)
///
/// `atoms · th · ρ / (M · u)` with the thickness in cm, density in g/cm³ and
/// molar mass in u. Only the thickness is uncertain, the material constants
/// are taken as exact.
///
/// ```rust
/// # use n2n_xsect::number_thickness;
/// # use n2n_uncertain::Uncertain;
/// // 12 g/cm² of carbon is 1/u molecules per barn
/// let n = number_thickness(Uncertain::exact(12.0), 1.0, 12.0, 1.0).unwrap();
/// assert!((n.value() - 1.0 / 1.6605389).abs() < 1e-12);
/// ```
pub fn number_thickness(
    thickness: Uncertain,
    density: f64,
    molar_mass: f64,
    atoms: f64,
) -> Result<Uncertain> {
    if molar_mass == 0.0 {
        return Err(Error::ZeroQuantity("molar mass"));
    }
    Ok(thickness.scale(atoms * density / (molar_mass * ATOMIC_MASS_UNIT)))
}

/// Composition and density of a target material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Density (g/cm³)
    pub density: f64,
    /// Molar mass of one molecule (u)
    pub molar_mass: f64,
    /// Carbon atoms per molecule
    pub carbon_atoms: f64,
    /// Hydrogen atoms per molecule
    pub hydrogen_atoms: f64,
}

/// Type of activation target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Polyethylene, counted with the plastic scintillator setup
    Ch2,
    /// Graphite, counted with the puck setup
    Graphite,
}

impl TargetKind {
    /// Material constants for the target type
    ///
    /// ```rust
    /// # use n2n_xsect::TargetKind;
    /// let ch2 = TargetKind::Ch2.material();
    /// assert_eq!(ch2.hydrogen_atoms, 2.0);
    /// assert_eq!(TargetKind::Graphite.material().hydrogen_atoms, 0.0);
    /// ```
    pub fn material(self) -> Material {
        match self {
            Self::Ch2 => Material {
                density: CH2_DENSITY,
                molar_mass: 2.0 * HYDROGEN_MASS + CARBON_MASS,
                carbon_atoms: 1.0,
                hydrogen_atoms: 2.0,
            },
            Self::Graphite => Material {
                density: GRAPHITE_DENSITY,
                molar_mass: CARBON_MASS,
                carbon_atoms: 1.0,
                hydrogen_atoms: 0.0,
            },
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ch2 => write!(f, "CH2"),
            Self::Graphite => write!(f, "graphite"),
        }
    }
}

/// Flat detector aperture at a distance from the neutron source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aperture {
    /// Area (cm²)
    pub area: Uncertain,
    /// Distance from the source (cm)
    pub distance: Uncertain,
}

impl Aperture {
    /// Solid angle of the aperture (sr)
    pub fn solid_angle(&self) -> Result<Uncertain> {
        solid_angle(self.area, self.distance)
    }
}

/// Physical dimensions of a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetGeometry {
    /// Face area (cm²)
    pub area: Uncertain,
    /// Distance of the front face from the source (cm)
    pub distance: Uncertain,
    /// Thickness (cm)
    pub thickness: Uncertain,
}

/// An activated target for a single run
///
/// ```rust
/// # use n2n_xsect::{Target, TargetGeometry, TargetKind};
/// # use n2n_uncertain::Uncertain;
/// let geometry = TargetGeometry {
///     area: Uncertain::exact(43.20869),
///     distance: Uncertain::exact(14.52),
///     thickness: Uncertain::exact(0.889),
/// };
/// let target = Target::new(TargetKind::Graphite, geometry, Uncertain::exact(1.0e4));
///
/// assert!((target.carbon_thickness().unwrap().value() - 0.1015415).abs() < 1e-6);
/// assert_eq!(target.hydrogen_thickness().unwrap().value(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub kind: TargetKind,
    pub geometry: TargetGeometry,
    /// Activated ¹¹C nuclei at the end of the irradiation, after any
    /// efficiency correction
    pub decay_count: Uncertain,
}

impl Target {
    pub fn new(kind: TargetKind, geometry: TargetGeometry, decay_count: Uncertain) -> Self {
        Self {
            kind,
            geometry,
            decay_count,
        }
    }

    /// Solid angle subtended by the target face (sr)
    pub fn solid_angle(&self) -> Result<Uncertain> {
        solid_angle(self.geometry.area, self.geometry.distance)
    }

    /// Carbon number thickness, N_C (nuclei/barn)
    pub fn carbon_thickness(&self) -> Result<Uncertain> {
        let material = self.kind.material();
        number_thickness(
            self.geometry.thickness,
            material.density,
            material.molar_mass,
            material.carbon_atoms,
        )
    }

    /// Hydrogen number thickness, N_H (nuclei/barn)
    ///
    /// Graphite carries no hydrogen and always gives an exact zero.
    pub fn hydrogen_thickness(&self) -> Result<Uncertain> {
        let material = self.kind.material();
        if material.hydrogen_atoms == 0.0 {
            return Ok(Uncertain::exact(0.0));
        }
        number_thickness(
            self.geometry.thickness,
            material.density,
            material.molar_mass,
            material.hydrogen_atoms,
        )
    }
}
