// standard library
use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};

// n2n modules
use n2n_uncertain::Uncertain;
use n2n_xsect::{CountingRun, TargetKind};

// external crates
use log::info;
use serde::{Deserialize, Serialize};

/// One run of the experiment as recorded in the run summary
///
/// Anything that has not been measured or calculated yet is left empty in the
/// file and read as `None`. Accessors that need a value return
/// [Error::MissingField] rather than assuming zero. A cell that is filled in
/// but cannot be read as its type fails the whole file with
/// [Error::CsvError].
///
/// ```rust
/// # use n2n_summary::RunRecord;
/// let record = RunRecord {
///     run: 12,
///     clock_time: Some(1800.0),
///     live_fraction: Some(0.95),
///     protons: Some(25000),
///     ..Default::default()
/// };
///
/// let counting = record.counting_run().unwrap();
/// assert_eq!(counting.counts.uncertainty(), 25000_f64.sqrt());
///
/// // the neutron energy has not been recorded
/// assert!(record.neutron_energy().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct RunRecord {
    /// Run number
    pub run: u32,

    /// Date of the run
    #[serde(default)]
    pub date: Option<String>,

    /// Neutron energy (MeV)
    #[serde(default)]
    pub neutron_energy: Option<f64>,

    /// Uncertainty in the neutron energy (MeV)
    #[serde(default)]
    pub neutron_energy_err: Option<f64>,

    /// Clock time (s)
    #[serde(default)]
    pub clock_time: Option<f64>,

    /// Live fraction of the proton telescope
    #[serde(default)]
    pub live_fraction: Option<f64>,

    /// Transit time from the end of irradiation to the start of counting (s)
    #[serde(default)]
    pub transit_time: Option<f64>,

    /// Region of interest, minimum x channel
    #[serde(default)]
    pub roi_min_x: Option<u32>,

    /// Region of interest, maximum x channel
    #[serde(default)]
    pub roi_max_x: Option<u32>,

    /// Region of interest, minimum y channel
    #[serde(default)]
    pub roi_min_y: Option<u32>,

    /// Region of interest, maximum y channel
    #[serde(default)]
    pub roi_max_y: Option<u32>,

    /// Gross protons in the region of interest (counts)
    #[serde(default)]
    pub protons: Option<u64>,

    /// Activated ¹¹C nuclei in the CH2 target
    #[serde(default)]
    pub ch2_decay: Option<f64>,

    /// Uncertainty in the CH2 decay count
    #[serde(default)]
    pub ch2_decay_err: Option<f64>,

    /// Activated ¹¹C nuclei in the graphite target
    #[serde(default)]
    pub graphite_decay: Option<f64>,

    /// Uncertainty in the graphite decay count
    #[serde(default)]
    pub graphite_decay_err: Option<f64>,

    /// Free text
    #[serde(default)]
    pub notes: Option<String>,
}

impl RunRecord {
    fn required<T>(&self, value: Option<T>, field: &'static str) -> Result<T> {
        value.ok_or(Error::MissingField {
            run: self.run,
            field,
        })
    }

    /// Neutron energy, exact unless an uncertainty was recorded (MeV)
    pub fn neutron_energy(&self) -> Result<Uncertain> {
        let energy = self.required(self.neutron_energy, "neutron_energy")?;
        Ok(Uncertain::new(
            energy,
            self.neutron_energy_err.unwrap_or_default(),
        )?)
    }

    /// Proton telescope counts with Poisson uncertainty
    pub fn counting_run(&self) -> Result<CountingRun> {
        let protons = self.required(self.protons, "protons")?;
        let clock_time = self.required(self.clock_time, "clock_time")?;
        let live_fraction = self.required(self.live_fraction, "live_fraction")?;
        Ok(CountingRun::new(protons as f64, clock_time, live_fraction)?)
    }

    /// Activated ¹¹C nuclei in a target
    pub fn decay_count(&self, kind: TargetKind) -> Result<Uncertain> {
        let (value, error) = match kind {
            TargetKind::Ch2 => (
                self.required(self.ch2_decay, "ch2_decay")?,
                self.required(self.ch2_decay_err, "ch2_decay_err")?,
            ),
            TargetKind::Graphite => (
                self.required(self.graphite_decay, "graphite_decay")?,
                self.required(self.graphite_decay_err, "graphite_decay_err")?,
            ),
        };
        Ok(Uncertain::new(value, error)?)
    }

    /// Store the activated ¹¹C nuclei for a target
    pub fn set_decay_count(&mut self, kind: TargetKind, count: Uncertain) {
        let (value, error) = match kind {
            TargetKind::Ch2 => (&mut self.ch2_decay, &mut self.ch2_decay_err),
            TargetKind::Graphite => (&mut self.graphite_decay, &mut self.graphite_decay_err),
        };
        *value = Some(count.value());
        *error = Some(count.uncertainty());
    }
}

/// Every run of the experiment, in file order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub runs: Vec<RunRecord>,
}

impl RunSummary {
    /// Read a run summary from any CSV source with a header row
    ///
    /// ```rust
    /// # use n2n_summary::RunSummary;
    /// let text = "run,neutron_energy,clock_time,protons\n1,24.0,1800,\n2, 22.5 ,1500,3000\n";
    /// let summary = RunSummary::from_reader(text.as_bytes()).unwrap();
    ///
    /// assert_eq!(summary.run(1).unwrap().protons, None);
    /// assert_eq!(summary.run(2).unwrap().neutron_energy, Some(22.5));
    /// assert!(summary.run(3).is_err());
    /// ```
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let runs = reader
            .deserialize::<RunRecord>()
            .collect::<std::result::Result<Vec<RunRecord>, csv::Error>>()?;

        let mut seen = HashSet::new();
        if let Some(record) = runs.iter().find(|r| !seen.insert(r.run)) {
            return Err(Error::DuplicateRun { run: record.run });
        }

        Ok(Self { runs })
    }

    /// Write the run summary as CSV with a header row
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for record in &self.runs {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the run summary to a file
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path: &Path = path.as_ref();
        info!("Writing run summary to {}", path.display());
        self.to_writer(std::fs::File::create(path)?)
    }

    /// Find a run by number
    pub fn run(&self, number: u32) -> Result<&RunRecord> {
        self.runs
            .iter()
            .find(|r| r.run == number)
            .ok_or(Error::RunNotFound { run: number })
    }

    /// Find a run by number for modification
    pub fn run_mut(&mut self, number: u32) -> Result<&mut RunRecord> {
        self.runs
            .iter_mut()
            .find(|r| r.run == number)
            .ok_or(Error::RunNotFound { run: number })
    }

    /// Number of runs
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// True if there are no runs
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Read a run summary CSV file
///
/// ```rust, no_run
/// # use n2n_summary::read_summary;
/// let summary = read_summary("Run_Summary.csv").unwrap();
/// println!("{} runs", summary.len());
/// ```
pub fn read_summary<P: AsRef<Path>>(path: P) -> Result<RunSummary> {
    let path: &Path = path.as_ref();
    info!("Reading run summary {}", path.display());
    RunSummary::from_reader(std::fs::File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_runs() {
        let text = "run\n1\n2\n1\n";
        assert!(matches!(
            RunSummary::from_reader(text.as_bytes()),
            Err(Error::DuplicateRun { run: 1 })
        ));
    }

    #[test]
    fn missing_field_names_the_run() {
        let record = RunRecord {
            run: 7,
            ch2_decay: Some(100.0),
            ..Default::default()
        };
        assert!(matches!(
            record.decay_count(TargetKind::Ch2),
            Err(Error::MissingField {
                run: 7,
                field: "ch2_decay_err"
            })
        ));
    }

    #[test]
    fn write_then_read() {
        let mut record = RunRecord {
            run: 3,
            notes: Some("beam unstable, see log".to_string()),
            ..Default::default()
        };
        record.set_decay_count(TargetKind::Graphite, Uncertain::new(5.0e4, 700.0).unwrap());
        let summary = RunSummary {
            runs: vec![record.clone()],
        };

        let mut buffer = Vec::new();
        summary.to_writer(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("run,date,neutron_energy,"));

        let read = RunSummary::from_reader(text.as_bytes()).unwrap();
        assert_eq!(read.runs[0], record);
    }

    #[test]
    fn energy_defaults_to_exact() {
        let record = RunRecord {
            run: 1,
            neutron_energy: Some(24.0),
            ..Default::default()
        };
        assert!(record.neutron_energy().unwrap().is_exact());
    }
}
