//! Library of parser functions

// nom parser combinators
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, space0, space1, u32, u64};
use nom::combinator::{all_consuming, value};
use nom::sequence::{delimited, preceded, separated_pair, tuple};
use nom::IResult;

// ! Boolean checks
/// Check for the start of any `[SECTION]`
pub fn is_section_tag(i: &str) -> bool {
    i.starts_with('[')
}

/// Check for lines starting `[DISPLAY]`
pub fn is_display_tag(i: &str) -> bool {
    i.starts_with("[DISPLAY]")
}

/// Check for lines starting `[MPA4A]`
pub fn is_mpa_tag(i: &str) -> bool {
    i.starts_with("[MPA4A]")
}

/// Check for lines starting `[MAP0]`
pub fn is_map_tag(i: &str) -> bool {
    i.starts_with("[MAP0]")
}

/// Check for the exact `[DATA]` tag
pub fn is_data_tag(i: &str) -> bool {
    i.trim_end() == "[DATA]"
}

// ! Parsers
/// Separator between list values, a comma or plain whitespace
fn separator(i: &str) -> IResult<&str, ()> {
    alt((
        value((), delimited(space0, char(','), space0)),
        value((), space1),
    ))(i)
}

/// Parse an `a2 a1 value` triple from the histogram data list
///
/// e.g.
/// ```text
/// 412 388 17
/// 412,389,3
/// ```
pub fn channel_count(i: &str) -> IResult<&str, (u32, u32, u64)> {
    let (i, (_, x, _, y, _, count, _)) = all_consuming(tuple((
        space0, u32, separator, u32, separator, u64, space0,
    )))(i)?;
    Ok((i, (x, y, count)))
}

/// Parse `param=<n>`
pub fn param(i: &str) -> IResult<&str, &str> {
    preceded(tag("param="), nom::character::complete::not_line_ending)(i)
}

/// Parse `xdim=<n>`
pub fn xdim(i: &str) -> IResult<&str, u32> {
    preceded(tag("xdim="), u32)(i)
}

/// Parse `roi=<min> <max>`
pub fn roi(i: &str) -> IResult<&str, (u32, u32)> {
    preceded(tag("roi="), separated_pair(u32, space1, u32))(i)
}
