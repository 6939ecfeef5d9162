// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::parsers;

// n2n modules
use n2n_uncertain::Uncertain;

// external crates
use log::{debug, info};

/// A single point on a decay curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Time since the end of the transit to the counting station (min)
    pub time: f64,
    /// Counts recorded in the time bin
    pub counts: Uncertain,
}

impl Sample {
    /// Sample with a Poisson uncertainty on the counts
    ///
    /// Empty bins are given an uncertainty of one count so that every sample
    /// keeps a finite weight in a fit.
    ///
    /// ```rust
    /// # use n2n_decay::Sample;
    /// assert_eq!(Sample::new(1.0, 100.0).unwrap().counts.uncertainty(), 10.0);
    /// assert_eq!(Sample::new(1.0, 0.0).unwrap().counts.uncertainty(), 1.0);
    /// ```
    pub fn new(time: f64, counts: f64) -> Result<Self> {
        Ok(Self {
            time,
            counts: Uncertain::new(counts, counts.max(1.0).sqrt())?,
        })
    }
}

/// Counts against time for an activated target
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecayCurve {
    pub samples: Vec<Sample>,
}

impl DecayCurve {
    /// Parse the text of an MPA list file
    ///
    /// Everything before the `[DATA]` tag is header information and ignored.
    /// The data section ends at the next section tag or the end of the text.
    ///
    /// ```rust
    /// # use n2n_decay::DecayCurve;
    /// let text = "[SETTINGS]\nrange=4096\n[DATA]\n0 400\n1 380\n\n2 361\n";
    /// let curve = DecayCurve::parse(text).unwrap();
    /// assert_eq!(curve.len(), 3);
    /// assert_eq!(curve.samples[2].counts.value(), 361.0);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_lines(text.lines().map(|l| Ok(l.to_string())))
    }

    fn from_lines<I>(mut lines: I) -> Result<Self>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        // skip the header
        loop {
            let Some(line) = lines.next() else {
                return Err(Error::MissingDataSection);
            };
            if parsers::is_data_tag(&line?) {
                break;
            }
        }

        let mut samples = Vec::new();
        for line in lines {
            let line = line?;
            let line = line.trim_end();

            if line.is_empty() {
                continue;
            }

            if parsers::is_section_tag(line) {
                break;
            }

            let (_, (time, counts)) =
                parsers::sample(line).map_err(|_| Error::ParseError(line.to_string()))?;
            samples.push(Sample::new(time, counts)?);
        }

        debug!("Parsed {} decay samples", samples.len());
        Ok(Self { samples })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if there are no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterator over the sample times
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.time)
    }
}

/// Read a decay curve from an MPA list file
///
/// ```rust, no_run
/// # use n2n_decay::read_decay_curve;
/// let curve = read_decay_curve("Decay Curves/Run012_puck.csv").unwrap();
/// ```
pub fn read_decay_curve<P: AsRef<Path>>(path: P) -> Result<DecayCurve> {
    let path: &Path = path.as_ref();
    info!("Reading decay curve {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    DecayCurve::from_lines(reader.lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_data_tag() {
        assert!(matches!(
            DecayCurve::parse("[SETTINGS]\n0 100\n"),
            Err(Error::MissingDataSection)
        ));
    }

    #[test]
    fn stops_at_next_section() {
        let curve = DecayCurve::parse("[DATA]\n0 100\n1 90\n[CHN]\nnot a sample\n").unwrap();
        assert_eq!(curve.len(), 2);
    }

    #[test]
    fn malformed_sample() {
        assert!(matches!(
            DecayCurve::parse("[DATA]\n0 100\n1 ninety\n"),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn windows_line_endings() {
        let curve = DecayCurve::parse("[DATA]\r\n0 100\r\n1 81\r\n").unwrap();
        assert_eq!(curve.samples[1].counts.uncertainty(), 9.0);
    }
}
