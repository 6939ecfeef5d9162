// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::parsers;

// external crates
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Rectangular region of interest, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl Region {
    /// Region from the corners of an MPA map, stored as linear channel indices
    ///
    /// A linear index `i` in a map `xdim` channels wide is the channel
    /// `(i mod xdim, i div xdim)`.
    ///
    /// ```rust
    /// # use n2n_telescope::Region;
    /// let region = Region::from_linear(204_800 + 40, 307_200 + 600, 1024).unwrap();
    /// assert_eq!(region, Region { min_x: 40, max_x: 600, min_y: 200, max_y: 300 });
    /// ```
    pub fn from_linear(min: u32, max: u32, xdim: u32) -> Result<Self> {
        if xdim == 0 {
            return Err(Error::ZeroDimension);
        }

        Ok(Self {
            min_x: min % xdim,
            max_x: max % xdim,
            min_y: min / xdim,
            max_y: max / xdim,
        })
    }

    /// True if the minimum bounds do not exceed the maximum bounds
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Parse the text of an MPA header file
    ///
    /// The file must start with `[MPA4A]`, and the region is read from the
    /// `xdim=` and `roi=` entries of the `[MAP0]` section. The map must be
    /// the a2 x a1 coincidence map, `param=1`.
    ///
    /// ```rust
    /// # use n2n_telescope::Region;
    /// let text = "[MPA4A]\ncmline0=\n[MAP0]\nparam=1\nxdim=1024\nroi=2058 5130\n[MAP1]\n";
    /// let region = Region::parse(text).unwrap();
    /// assert_eq!(region, Region { min_x: 10, max_x: 10, min_y: 2, max_y: 5 });
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_lines(text.lines().map(|l| Ok(l.to_string())))
    }

    fn from_lines<I>(mut lines: I) -> Result<Self>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        let first = lines.next().transpose()?.unwrap_or_default();
        if !parsers::is_mpa_tag(&first) {
            return Err(Error::InvalidHeaderFile(first));
        }

        loop {
            let Some(line) = lines.next() else {
                return Err(Error::MissingSection("[MAP0]"));
            };
            if parsers::is_map_tag(&line?) {
                break;
            }
        }

        let mut xdim = None;
        let mut roi = None;
        for line in lines {
            let line = line?;
            let line = line.trim_end();

            if parsers::is_section_tag(line) {
                break;
            }

            if let Ok((_, p)) = parsers::param(line) {
                if p.trim() != "1" {
                    return Err(Error::UnexpectedParameter(line.to_string()));
                }
            } else if let Ok((_, x)) = parsers::xdim(line) {
                xdim = Some(x);
            } else if line.starts_with("roi=") {
                let (_, r) =
                    parsers::roi(line).map_err(|_| Error::ParseError(line.to_string()))?;
                roi = Some(r);
            }
        }

        let xdim = xdim.ok_or(Error::MissingHeaderField("xdim"))?;
        let (min, max) = roi.ok_or(Error::MissingHeaderField("roi"))?;
        let region = Self::from_linear(min, max, xdim)?;

        debug!("Region of interest {region:?}");
        Ok(region)
    }
}

/// Read the region of interest from an MPA header file
///
/// ```rust, no_run
/// # use n2n_telescope::read_region;
/// let region = read_region("Proton Telescope/Run012.mpa").unwrap();
/// ```
pub fn read_region<P: AsRef<Path>>(path: P) -> Result<Region> {
    let path: &Path = path.as_ref();
    info!("Reading region of interest from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    Region::from_lines(reader.lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_mpa_tag() {
        assert!(matches!(
            Region::parse("[MPA3]\n[MAP0]\n"),
            Err(Error::InvalidHeaderFile(_))
        ));
    }

    #[test]
    fn wrong_map_parameter() {
        let text = "[MPA4A]\n[MAP0]\nparam=2\nxdim=1024\nroi=0 10\n";
        assert!(matches!(
            Region::parse(text),
            Err(Error::UnexpectedParameter(_))
        ));
    }

    #[test]
    fn missing_fields() {
        assert!(matches!(
            Region::parse("[MPA4A]\n[MAP0]\nparam=1\nroi=0 10\n"),
            Err(Error::MissingHeaderField("xdim"))
        ));
        assert!(matches!(
            Region::parse("[MPA4A]\n[MAP0]\nxdim=1024\n[MAP1]\nroi=0 10\n"),
            Err(Error::MissingHeaderField("roi"))
        ));
        assert!(matches!(
            Region::parse("[MPA4A]\n[MAP1]\n"),
            Err(Error::MissingSection("[MAP0]"))
        ));
    }

    #[test]
    fn zero_width_map() {
        assert!(matches!(
            Region::from_linear(0, 10, 0),
            Err(Error::ZeroDimension)
        ));
    }
}
