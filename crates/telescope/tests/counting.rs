//! Integration tests for proton counting in a region of interest

use n2n_telescope::{read_histogram, read_region, CountInRegion, Histogram, Region, CHANNELS};
use rstest::{fixture, rstest};

#[fixture]
fn histogram() -> Histogram {
    read_histogram("./data/Run012_1x2.csv").unwrap()
}

#[fixture]
fn region() -> Region {
    read_region("./data/Run012.mpa").unwrap()
}

#[rstest]
fn histogram_from_file(histogram: Histogram) {
    assert_eq!(histogram.size(), CHANNELS);
    assert_eq!(histogram.total(), 1375);
    assert_eq!(histogram.get(900, 900).unwrap(), 1000);
    assert_eq!(histogram.get(109, 204).unwrap(), 14);
}

#[rstest]
fn region_from_header(region: Region) {
    assert_eq!(
        region,
        Region {
            min_x: 102,
            max_x: 107,
            min_y: 201,
            max_y: 203
        }
    );
}

#[rstest]
fn protons_in_region(histogram: Histogram, region: Region) {
    assert_eq!(histogram.count_in_region(&region).unwrap(), 135);
}

#[rstest]
#[case(Region { min_x: 0, max_x: 1023, min_y: 0, max_y: 1023 }, 1375)] // everything
#[case(Region { min_x: 100, max_x: 100, min_y: 200, max_y: 200 }, 1)] // single channel
#[case(Region { min_x: 0, max_x: 99, min_y: 0, max_y: 1023 }, 0)] // nothing
fn region_cases(histogram: Histogram, #[case] region: Region, #[case] expected: u64) {
    assert_eq!(histogram.count_in_region(&region).unwrap(), expected);
}

#[rstest]
fn inverted_region_is_rejected(histogram: Histogram) {
    let region = Region {
        min_x: 10,
        max_x: 5,
        min_y: 0,
        max_y: 0,
    };
    assert!(histogram.count_in_region(&region).is_err());
}
