//! Library of parser functions

// nom parser combinators
use nom::character::complete::{space0, space1};
use nom::combinator::all_consuming;
use nom::number::complete::double;
use nom::sequence::{delimited, separated_pair};
use nom::IResult;

/// Check for the `[DATA]` section tag
pub fn is_data_tag(i: &str) -> bool {
    i.trim() == "[DATA]"
}

/// Check for the start of any `[SECTION]`
pub fn is_section_tag(i: &str) -> bool {
    i.trim_start().starts_with('[')
}

/// Parse a whitespace separated `time counts` pair
///
/// e.g.
/// ```text
/// 12.5    1043
/// ```
pub fn sample(i: &str) -> IResult<&str, (f64, f64)> {
    all_consuming(delimited(
        space0,
        separated_pair(double, space1, double),
        space0,
    ))(i)
}
