// standard library
use std::io::{Read, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::record::RunSummary;

// n2n modules
use n2n_uncertain::Uncertain;
use n2n_xsect::{Calculator, Config, Geometry, RowInput, RowResult, TargetKind};

// external crates
use log::{error, info};
use serde::{Deserialize, Serialize};

/// A foreground and background run pair to calculate
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// Run number with the target in place
    pub foreground: u32,
    /// Run number without the target
    pub background: u32,
}

/// Read the run pairs to calculate from any CSV source with a header row
///
/// ```rust
/// # use n2n_summary::{read_requests, Request};
/// let requests = read_requests("foreground,background\n12,13\n14, 13\n".as_bytes()).unwrap();
/// assert_eq!(requests[1], Request { foreground: 14, background: 13 });
/// ```
pub fn read_requests<R: Read>(reader: R) -> Result<Vec<Request>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    Ok(reader
        .deserialize::<Request>()
        .collect::<std::result::Result<Vec<Request>, csv::Error>>()?)
}

/// Read the run pairs to calculate from a CSV file
pub fn read_requests_file<P: AsRef<Path>>(path: P) -> Result<Vec<Request>> {
    let path: &Path = path.as_ref();
    info!("Reading cross section requests {}", path.display());
    read_requests(std::fs::File::open(path)?)
}

impl RunSummary {
    /// Collect the inputs for one cross section row
    ///
    /// Both runs must exist in the summary. The neutron energy, decay counts
    /// and activation time come from the foreground run, and proton counts
    /// are taken as Poisson.
    pub fn row_input(&self, request: &Request, geometry: &Geometry) -> Result<RowInput> {
        let fg = self.run(request.foreground)?;
        let bg = self.run(request.background)?;

        Ok(RowInput {
            foreground_number: request.foreground,
            background_number: request.background,
            neutron_energy: fg.neutron_energy()?,
            foreground: fg.counting_run()?,
            background: bg.counting_run()?,
            geometry: *geometry,
            ch2_decay: fg.decay_count(TargetKind::Ch2)?,
            graphite_decay: fg.decay_count(TargetKind::Graphite)?,
        })
    }
}

/// Result of calculating a single requested row
#[derive(Debug)]
pub struct RowOutcome {
    pub request: Request,
    pub result: Result<(RowInput, RowResult)>,
}

/// Calculate every requested row
///
/// A row that fails is logged and kept as an error in its [RowOutcome], the
/// rest of the table is still calculated.
pub fn calculate_rows(
    summary: &RunSummary,
    requests: &[Request],
    config: &Config,
) -> Result<Vec<RowOutcome>> {
    let calculator = Calculator::new(config)?;

    let outcomes: Vec<RowOutcome> = requests
        .iter()
        .map(|request| {
            let result = summary
                .row_input(request, &config.geometry)
                .and_then(|input| Ok((input, calculator.calculate(&input)?)));

            if let Err(e) = &result {
                error!(
                    "Row {}/{} failed: {}",
                    request.foreground,
                    request.background,
                    describe(e)
                );
            }

            RowOutcome {
                request: *request,
                result,
            }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!("Calculated {} of {} rows", outcomes.len() - failed, outcomes.len());
    Ok(outcomes)
}

/// Full error message including every underlying cause
pub fn describe(error: &Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// One line of the cross section results table
///
/// Failed rows keep their run numbers and the reason, with every calculated
/// column left empty.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ResultRecord {
    pub foreground: u32,
    pub background: u32,
    pub neutron_energy: Option<f64>,
    pub proton_flux: Option<f64>,
    pub proton_flux_err: Option<f64>,
    pub neutron_flux: Option<f64>,
    pub neutron_flux_err: Option<f64>,
    pub ch2_xsect: Option<f64>,
    pub ch2_xsect_err: Option<f64>,
    pub graphite_xsect: Option<f64>,
    pub graphite_xsect_err: Option<f64>,
    pub error: Option<String>,
}

fn split(value: Uncertain) -> (Option<f64>, Option<f64>) {
    (Some(value.value()), Some(value.uncertainty()))
}

impl From<&RowOutcome> for ResultRecord {
    fn from(outcome: &RowOutcome) -> Self {
        let base = Self {
            foreground: outcome.request.foreground,
            background: outcome.request.background,
            ..Default::default()
        };

        match &outcome.result {
            Ok((input, result)) => {
                let (proton_flux, proton_flux_err) = split(result.proton_flux);
                let (neutron_flux, neutron_flux_err) = split(result.neutron_flux);
                let (ch2_xsect, ch2_xsect_err) = split(result.ch2_cross_section);
                let (graphite_xsect, graphite_xsect_err) = split(result.graphite_cross_section);
                Self {
                    neutron_energy: Some(input.neutron_energy.value()),
                    proton_flux,
                    proton_flux_err,
                    neutron_flux,
                    neutron_flux_err,
                    ch2_xsect,
                    ch2_xsect_err,
                    graphite_xsect,
                    graphite_xsect_err,
                    ..base
                }
            }
            Err(e) => Self {
                error: Some(describe(e)),
                ..base
            },
        }
    }
}

/// Write the results table as CSV with a header row
pub fn write_results<W: Write>(writer: W, outcomes: &[RowOutcome]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for outcome in outcomes {
        writer.serialize(ResultRecord::from(outcome))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the results table to a file
pub fn write_results_file<P: AsRef<Path>>(path: P, outcomes: &[RowOutcome]) -> Result<()> {
    let path: &Path = path.as_ref();
    info!("Writing cross sections to {}", path.display());
    write_results(std::fs::File::create(path)?, outcomes)
}
