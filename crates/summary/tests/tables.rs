//! Integration tests for the run summary and cross section tables

use n2n_decay::{activated_nuclei, read_decay_curve, FitDecayCurve, FixedRateFit};
use n2n_summary::{
    calculate_rows, read_requests_file, read_summary, write_results, Error, Request,
    ResultRecord, RunSummary,
};
use n2n_xsect::{Calculator, Config, TargetKind};
use n2n_utils::f;
use rstest::{fixture, rstest};

#[fixture]
fn config() -> Config {
    Config::default()
}

#[fixture]
fn summary() -> RunSummary {
    read_summary("./data/Run_Summary.csv").unwrap()
}

#[fixture]
fn updated(config: Config) -> RunSummary {
    let mut summary = read_summary("./data/Run_Summary.csv").unwrap();
    summary.update("./data/raw", &config).unwrap();
    summary
}

#[rstest]
fn reads_summary(summary: RunSummary) {
    assert_eq!(summary.len(), 3);
    assert_eq!(
        summary.run(13).unwrap().notes.as_deref(),
        Some("background, target out")
    );
    assert_eq!(summary.run(12).unwrap().protons, None);
    assert_eq!(summary.run(14).unwrap().clock_time, None);
}

#[rstest]
#[case("12,24.0,,18OO,0.95,15000")] // clock time typo
#[case("12,24.0,0.3x,1800,0.95,15000")] // energy uncertainty
#[case("12,24.0,,1800,0.95,1.5e4")] // protons are whole counts
#[case("12,24.0,,1800,0.95,-3")]
fn malformed_cell_fails_read(#[case] row: &str) {
    let text = f!("run,neutron_energy,neutron_energy_err,clock_time,live_fraction,protons\n{row}\n");
    assert!(matches!(
        RunSummary::from_reader(text.as_bytes()),
        Err(Error::CsvError(_))
    ));
}

#[test]
fn empty_cells_are_missing() {
    let text = "run,neutron_energy,neutron_energy_err,clock_time,live_fraction,protons\n12,24.0,,,0.95,\n";
    let summary = RunSummary::from_reader(text.as_bytes()).unwrap();
    let run = summary.run(12).unwrap();

    assert_eq!(run.clock_time, None);
    assert_eq!(run.protons, None);
    assert!(run.neutron_energy().unwrap().is_exact());
    assert!(matches!(
        run.counting_run(),
        Err(Error::MissingField {
            run: 12,
            field: "protons"
        })
    ));
}

#[rstest]
fn update_fills_run_with_data(config: Config) {
    let mut summary = read_summary("./data/Run_Summary.csv").unwrap();
    let report = summary.update("./data/raw", &config).unwrap();
    assert_eq!(report.decay_curves, 2);
    assert_eq!(report.telescope_runs, 1);

    let run = summary.run(12).unwrap();
    assert_eq!(run.protons, Some(135));
    assert_eq!(run.roi_min_x, Some(102));
    assert_eq!(run.roi_max_y, Some(203));

    // same chain by hand for the graphite puck
    let curve = read_decay_curve("./data/raw/Decay Curves/Run012_puck.csv").unwrap();
    let fit = FixedRateFit::default().fit(&curve).unwrap();
    let expected = activated_nuclei(&fit, 2.5, 0.12).unwrap();
    let graphite = run.decay_count(TargetKind::Graphite).unwrap();
    assert!((graphite.value() - expected.value()).abs() < 1e-9 * expected.value());

    assert!(run.decay_count(TargetKind::Ch2).unwrap().value() > 0.0);
}

#[rstest]
fn update_leaves_other_runs(summary: RunSummary, updated: RunSummary) {
    assert_eq!(summary.run(13).unwrap(), updated.run(13).unwrap());
    assert_eq!(summary.run(14).unwrap(), updated.run(14).unwrap());
}

#[rstest]
fn row_input_resolves_runs(config: Config, updated: RunSummary) {
    let request = Request {
        foreground: 12,
        background: 13,
    };
    let input = updated.row_input(&request, &config.geometry).unwrap();

    assert_eq!(input.foreground.counts.value(), 135.0);
    assert_eq!(input.background.counts.value(), 20.0);
    assert_eq!(input.background.counts.uncertainty(), 20_f64.sqrt());
    assert_eq!(input.neutron_energy.value(), 24.0);
    assert_eq!(input.activation_time().value(), 1800.0);
}

#[rstest]
#[case(99, 13, 99)] // missing foreground
#[case(12, 98, 98)] // missing background
fn unknown_run_is_lookup_error(
    config: Config,
    updated: RunSummary,
    #[case] foreground: u32,
    #[case] background: u32,
    #[case] missing: u32,
) {
    let request = Request {
        foreground,
        background,
    };
    match updated.row_input(&request, &config.geometry) {
        Err(Error::RunNotFound { run }) => assert_eq!(run, missing),
        other => panic!("expected a missing run, got {other:?}"),
    }
}

#[rstest]
fn failed_rows_are_reported(config: Config, updated: RunSummary) {
    let requests = read_requests_file("./data/Cross_Sections.csv").unwrap();
    let outcomes = calculate_rows(&updated, &requests, &config).unwrap();
    assert_eq!(outcomes.len(), 3);

    // first row matches the calculator directly
    let (input, result) = outcomes[0].result.as_ref().unwrap();
    let direct = Calculator::new(&config).unwrap().calculate(input).unwrap();
    assert_eq!(*result, direct);

    assert!(matches!(
        outcomes[1].result,
        Err(Error::RunNotFound { run: 99 })
    ));
    assert!(matches!(
        outcomes[2].result,
        Err(Error::MissingField {
            run: 14,
            field: "clock_time"
        })
    ));
}

#[rstest]
fn results_never_zero_filled(config: Config, updated: RunSummary) {
    let requests = read_requests_file("./data/Cross_Sections.csv").unwrap();
    let outcomes = calculate_rows(&updated, &requests, &config).unwrap();

    let mut buffer = Vec::new();
    write_results(&mut buffer, &outcomes).unwrap();

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let records: Vec<ResultRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 3);

    assert!(records[0].error.is_none());
    assert!(records[0].graphite_xsect.unwrap() > 0.0);
    assert!(records[0].graphite_xsect_err.unwrap() > 0.0);

    for failed in &records[1..] {
        assert!(failed.proton_flux.is_none());
        assert!(failed.graphite_xsect.is_none());
        assert!(failed.error.is_some());
    }
    assert!(records[1]
        .error
        .as_deref()
        .unwrap()
        .contains("run 99 not found"));
}
