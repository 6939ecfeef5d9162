// standard library
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::record::{RunRecord, RunSummary};

// n2n modules
use n2n_decay::{activated_nuclei, read_decay_curve, FitDecayCurve, FixedRateFit};
use n2n_telescope::{read_histogram, read_region, CountInRegion};
use n2n_utils::f;
use n2n_xsect::{constants::SECONDS_PER_MINUTE, Config, TargetKind};

// external crates
use log::{info, warn};

/// Directory of the exported decay curves
pub const DECAY_DIR: &str = "Decay Curves";

/// Directory of the exported proton telescope data
pub const TELESCOPE_DIR: &str = "Proton Telescope";

/// What an update managed to fill in
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateReport {
    /// Number of decay curves fitted
    pub decay_curves: usize,
    /// Number of runs with proton counts
    pub telescope_runs: usize,
}

/// Decay curve file suffix for each target
fn decay_suffix(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Ch2 => "plastic",
        TargetKind::Graphite => "puck",
    }
}

impl RunSummary {
    /// Fill in decay counts and proton counts from the raw data files
    ///
    /// For every run the data directory is searched for
    ///
    /// - `Decay Curves/RunNNN_puck.csv` for the graphite target
    /// - `Decay Curves/RunNNN_plastic.csv` for the CH2 target
    /// - `Proton Telescope/RunNNN_1x2.csv` and `Proton Telescope/RunNNN.mpa`
    ///
    /// Runs without data files are left untouched. A file that exists but
    /// cannot be analysed is an error.
    ///
    /// ```rust, no_run
    /// # use n2n_summary::read_summary;
    /// # use n2n_xsect::Config;
    /// let mut summary = read_summary("Run_Summary.csv").unwrap();
    /// let report = summary.update("path/to/data", &Config::default()).unwrap();
    /// summary.write("Run_Summary.csv").unwrap();
    /// ```
    pub fn update<P: AsRef<Path>>(&mut self, data_dir: P, config: &Config) -> Result<UpdateReport> {
        let data_dir: &Path = data_dir.as_ref();
        let fitter = FixedRateFit::from_half_life(config.half_life.value())?;
        let mut report = UpdateReport::default();

        for record in &mut self.runs {
            for kind in [TargetKind::Graphite, TargetKind::Ch2] {
                if update_decay(record, &data_dir.join(DECAY_DIR), kind, &fitter, config)? {
                    report.decay_curves += 1;
                }
            }

            if update_protons(record, &data_dir.join(TELESCOPE_DIR))? {
                report.telescope_runs += 1;
            }
        }

        info!(
            "Updated {} decay curves and {} telescope runs",
            report.decay_curves, report.telescope_runs
        );
        Ok(report)
    }
}

/// Fit a decay curve for one target of a run, if the file exists
fn update_decay<F: FitDecayCurve>(
    record: &mut RunRecord,
    dir: &Path,
    kind: TargetKind,
    fitter: &F,
    config: &Config,
) -> Result<bool> {
    let path = dir.join(f!("Run{:03}_{}.csv", record.run, decay_suffix(kind)));
    if !path.is_file() {
        warn!("Run {}: no {kind} decay curve at {}", record.run, path.display());
        return Ok(false);
    }

    let transit_time = record.transit_time.ok_or(Error::MissingField {
        run: record.run,
        field: "transit_time",
    })?;

    let curve = read_decay_curve(&path)?;
    let fit = fitter.fit(&curve)?;
    let nuclei = activated_nuclei(
        &fit,
        transit_time / SECONDS_PER_MINUTE,
        config.counting_efficiency,
    )?;

    info!("Run {}: {nuclei} activated nuclei in {kind}", record.run);
    record.set_decay_count(kind, nuclei);
    Ok(true)
}

/// Count protons in the region of interest of a run, if the files exist
fn update_protons(record: &mut RunRecord, dir: &Path) -> Result<bool> {
    let data = dir.join(f!("Run{:03}_1x2.csv", record.run));
    let header = dir.join(f!("Run{:03}.mpa", record.run));
    if !data.is_file() || !header.is_file() {
        warn!("Run {}: no proton telescope data in {}", record.run, dir.display());
        return Ok(false);
    }

    let histogram = read_histogram(&data)?;
    let region = read_region(&header)?;
    let protons = histogram.count_in_region(&region)?;

    info!("Run {}: {protons} protons in region of interest", record.run);
    record.roi_min_x = Some(region.min_x);
    record.roi_max_x = Some(region.max_x);
    record.roi_min_y = Some(region.min_y);
    record.roi_max_y = Some(region.max_y);
    record.protons = Some(protons);
    Ok(true)
}
