// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::parsers;
use crate::region::Region;

// external crates
use log::{debug, info};

/// Number of channels along each axis of the telescope ADCs
pub const CHANNELS: u32 = 1024;

/// Anything that can integrate counts over a rectangular region
pub trait CountInRegion {
    /// Total counts in the region, bounds inclusive
    fn count_in_region(&self, region: &Region) -> Result<u64>;
}

/// Square 2D histogram of ΔE (a2) against E (a1) channel counts
///
/// ```rust
/// # use n2n_telescope::{CountInRegion, Histogram, Region};
/// let mut histogram = Histogram::new(8);
/// histogram.fill(2, 3, 10).unwrap();
/// histogram.fill(5, 5, 1).unwrap();
///
/// let region = Region { min_x: 2, max_x: 4, min_y: 0, max_y: 7 };
/// assert_eq!(histogram.count_in_region(&region).unwrap(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    size: u32,
    /// Row-major counts, index `y * size + x`
    counts: Vec<u64>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new(CHANNELS)
    }
}

impl Histogram {
    /// Empty histogram of `size` x `size` channels
    pub fn new(size: u32) -> Self {
        Self {
            size,
            counts: vec![0; (size as usize) * (size as usize)],
        }
    }

    /// Number of channels along each axis
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Add counts to a channel
    pub fn fill(&mut self, x: u32, y: u32, count: u64) -> Result<()> {
        let index = self.index(x, y)?;
        self.counts[index] += count;
        Ok(())
    }

    /// Counts in a single channel
    pub fn get(&self, x: u32, y: u32) -> Result<u64> {
        Ok(self.counts[self.index(x, y)?])
    }

    /// Sum of every channel
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    fn index(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.size || y >= self.size {
            return Err(Error::ChannelOutOfRange {
                x,
                y,
                size: self.size,
            });
        }
        Ok(y as usize * self.size as usize + x as usize)
    }

    /// Parse the text of an exported `[DISPLAY]` list file
    ///
    /// The first line must be the `[DISPLAY]` tag, and the counts follow the
    /// `[DATA]` tag as `a2 a1 value` triples.
    ///
    /// ```rust
    /// # use n2n_telescope::Histogram;
    /// let text = "[DISPLAY]\nsize=1024\n[DATA]\n10 12 4\n10 12 1\n900 3 2\n";
    /// let histogram = Histogram::parse(text).unwrap();
    /// assert_eq!(histogram.get(10, 12).unwrap(), 5);
    /// assert_eq!(histogram.total(), 7);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_lines(text.lines().map(|l| Ok(l.to_string())))
    }

    fn from_lines<I>(mut lines: I) -> Result<Self>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        let first = lines.next().transpose()?.unwrap_or_default();
        if !parsers::is_display_tag(&first) {
            return Err(Error::InvalidDataFile(first));
        }

        // skip any other sections before the data
        loop {
            let Some(line) = lines.next() else {
                return Err(Error::MissingSection("[DATA]"));
            };
            if parsers::is_data_tag(&line?) {
                break;
            }
        }

        let mut histogram = Self::default();
        let mut entries = 0;
        for line in lines {
            let line = line?;
            let line = line.trim_end();

            if line.is_empty() {
                continue;
            }

            if parsers::is_section_tag(line) {
                break;
            }

            let (_, (x, y, count)) =
                parsers::channel_count(line).map_err(|_| Error::ParseError(line.to_string()))?;
            histogram.fill(x, y, count)?;
            entries += 1;
        }

        debug!("Filled {entries} histogram entries");
        Ok(histogram)
    }
}

impl CountInRegion for Histogram {
    fn count_in_region(&self, region: &Region) -> Result<u64> {
        if !region.is_valid() || region.max_x >= self.size || region.max_y >= self.size {
            return Err(Error::InvalidRegion {
                min_x: region.min_x,
                max_x: region.max_x,
                min_y: region.min_y,
                max_y: region.max_y,
            });
        }

        let size = self.size as usize;
        let (min_x, max_x) = (region.min_x as usize, region.max_x as usize);
        let total = (region.min_y as usize..=region.max_y as usize)
            .map(|y| self.counts[y * size + min_x..=y * size + max_x].iter().sum::<u64>())
            .sum();

        Ok(total)
    }
}

/// Read a proton telescope histogram from an exported list file
///
/// ```rust, no_run
/// # use n2n_telescope::read_histogram;
/// let histogram = read_histogram("Proton Telescope/Run012_1x2.csv").unwrap();
/// ```
pub fn read_histogram<P: AsRef<Path>>(path: P) -> Result<Histogram> {
    let path: &Path = path.as_ref();
    info!("Reading proton histogram {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    Histogram::from_lines(reader.lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_display_tag() {
        assert!(matches!(
            Histogram::parse("[DATA]\n1 1 1\n"),
            Err(Error::InvalidDataFile(_))
        ));
        assert!(matches!(
            Histogram::parse(""),
            Err(Error::InvalidDataFile(_))
        ));
    }

    #[test]
    fn requires_data_tag() {
        assert!(matches!(
            Histogram::parse("[DISPLAY]\nsize=1024\n"),
            Err(Error::MissingSection("[DATA]"))
        ));
    }

    #[test]
    fn channel_outside_histogram() {
        assert!(matches!(
            Histogram::parse("[DISPLAY]\n[DATA]\n1024 0 1\n"),
            Err(Error::ChannelOutOfRange { x: 1024, .. })
        ));
    }

    #[test]
    fn region_bounds_are_inclusive() {
        let mut histogram = Histogram::new(4);
        for x in 0..4 {
            for y in 0..4 {
                histogram.fill(x, y, 1).unwrap();
            }
        }
        let region = Region {
            min_x: 1,
            max_x: 2,
            min_y: 0,
            max_y: 3,
        };
        assert_eq!(histogram.count_in_region(&region).unwrap(), 8);

        let outside = Region { max_y: 4, ..region };
        assert!(histogram.count_in_region(&outside).is_err());
    }
}
