//! Command line tool for the (n,2n) activation analysis
//!
//! Two steps are run on the experiment tables:
//!
//! - `update` fills the run summary from the raw decay curve and proton
//!   telescope files
//! - `calculate` produces the neutron flux and cross section table for a list
//!   of foreground/background run pairs

// standard library
use std::path::PathBuf;
use std::process::ExitCode;

// n2n modules
use n2n::summary::{self, calculate_rows, read_requests_file, read_summary, write_results_file};
use n2n::xsect::{Config, Efficiency};

// external crates
use clap::{Args, Parser, Subcommand};
use log::{error, info};

#[derive(Parser, Debug)]
#[command(name = "n2n", version, about = "(n,2n) activation cross section analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    options: Options,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill the run summary from the raw decay curves and telescope data
    Update {
        /// Run summary CSV, updated in place
        summary: PathBuf,
        /// Directory containing `Decay Curves` and `Proton Telescope`
        data_dir: PathBuf,
    },
    /// Calculate the neutron flux and cross sections for pairs of runs
    Calculate {
        /// Run summary CSV
        summary: PathBuf,
        /// Foreground and background run pairs CSV
        requests: PathBuf,
        /// Output results CSV
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct Options {
    /// JSON configuration with the geometry, efficiencies and half life
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use the efficiencies measured for the plastic and puck targets
    #[arg(long, global = true)]
    plastic_and_puck: bool,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

impl Options {
    fn config(&self) -> Result<Config, n2n::xsect::Error> {
        let mut config = match &self.config {
            Some(path) => Config::from_json(path)?,
            None => Config::default(),
        };

        if self.plastic_and_puck {
            config.efficiency = Efficiency::plastic_and_puck();
        }
        Ok(config)
    }
}

fn init_logging(options: &Options) {
    // warn by default, each -v adds a level
    let verbosity = if options.quiet {
        0
    } else {
        1 + options.verbose as usize
    };

    // logging may already be set up, nothing useful to do about it
    let _ = stderrlog::new()
        .module(module_path!())
        .module("n2n_decay")
        .module("n2n_summary")
        .module("n2n_telescope")
        .module("n2n_xsect")
        .verbosity(verbosity)
        .timestamp(stderrlog::Timestamp::Off)
        .init();
}

fn update(summary: PathBuf, data_dir: PathBuf, config: &Config) -> summary::Result<()> {
    let mut runs = read_summary(&summary)?;
    runs.update(&data_dir, config)?;
    runs.write(&summary)
}

fn calculate(
    summary: PathBuf,
    requests: PathBuf,
    output: PathBuf,
    config: &Config,
) -> summary::Result<usize> {
    let runs = read_summary(&summary)?;
    let requests = read_requests_file(&requests)?;
    let outcomes = calculate_rows(&runs, &requests, config)?;
    write_results_file(&output, &outcomes)?;
    Ok(outcomes.iter().filter(|o| o.result.is_err()).count())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.options);

    let config = match cli.options.config() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = match cli.command {
        Command::Update { summary, data_dir } => update(summary, data_dir, &config).map(|_| 0),
        Command::Calculate {
            summary,
            requests,
            output,
        } => calculate(summary, requests, output, &config),
    };

    match outcome {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            info!("{failed} rows could not be calculated");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{}", summary::describe(&e));
            ExitCode::FAILURE
        }
    }
}
