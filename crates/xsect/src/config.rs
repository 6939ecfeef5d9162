//! Instrument configuration

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// crate modules
use crate::constants::C11_HALF_LIFE;
use crate::error::Result;
use crate::target::{Aperture, TargetGeometry, TargetKind};

// n2n modules
use n2n_uncertain::Uncertain;

// external crates
use log::info;
use serde::{Deserialize, Serialize};

/// Everything about the experiment that does not change from run to run
///
/// Every field has a default, so a JSON file only needs to list what differs
/// from the standard setup.
///
/// ```rust
/// # use n2n_xsect::Config;
/// let config: Config = serde_json::from_str(
///     r#"{ "efficiency": { "ch2": 5.83 } }"#
/// ).unwrap();
///
/// assert_eq!(config.efficiency.ch2, 5.83);
/// assert_eq!(config.efficiency.graphite, 1.0);
/// assert_eq!(config.half_life.value(), 20.334);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Detector and target geometry
    pub geometry: Geometry,
    /// Per-target efficiency applied to the decay counts
    pub efficiency: Efficiency,
    /// Half life of the activation product (min)
    pub half_life: Uncertain,
    /// Efficiency of the decay counting setup used to reconstruct ¹¹C counts
    pub counting_efficiency: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            efficiency: Efficiency::default(),
            half_life: Uncertain::exact(C11_HALF_LIFE),
            counting_efficiency: 0.12,
        }
    }
}

impl Config {
    /// Read a configuration from a JSON file
    ///
    /// ```rust, no_run
    /// # use n2n_xsect::Config;
    /// let config = Config::from_json("path/to/config.json").unwrap();
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path: &Path = path.as_ref();
        info!("Reading configuration from {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Fixed instrument geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Proton telescope aperture
    pub detector: Aperture,
    /// Polyethylene target
    pub ch2: TargetGeometry,
    /// Graphite target
    pub graphite: TargetGeometry,
}

impl Geometry {
    /// Geometry of a given target type
    pub fn target(&self, kind: TargetKind) -> TargetGeometry {
        match kind {
            TargetKind::Ch2 => self.ch2,
            TargetKind::Graphite => self.graphite,
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            detector: Aperture {
                area: Uncertain::exact(0.7133),
                distance: Uncertain::exact(12.07),
            },
            ch2: TargetGeometry {
                area: Uncertain::exact(5.067075),
                distance: Uncertain::exact(6.46),
                thickness: Uncertain::exact(0.164),
            },
            graphite: TargetGeometry {
                area: Uncertain::exact(43.20869),
                distance: Uncertain::exact(14.52),
                thickness: Uncertain::exact(0.889),
            },
        }
    }
}

/// Multiplicative counting efficiency for each target
///
/// The decay count of a target is divided by its efficiency before the cross
/// section is calculated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Efficiency {
    pub ch2: f64,
    pub graphite: f64,
}

impl Efficiency {
    /// Plastic scintillator for CH2 and puck for graphite
    pub fn plastic_and_puck() -> Self {
        Self {
            ch2: 5.83,
            graphite: 1.0,
        }
    }

    /// Efficiency of a given target type
    pub fn target(&self, kind: TargetKind) -> f64 {
        match kind {
            TargetKind::Ch2 => self.ch2,
            TargetKind::Graphite => self.graphite,
        }
    }
}

impl Default for Efficiency {
    fn default() -> Self {
        Self {
            ch2: 1.0,
            graphite: 1.0,
        }
    }
}
