/// Parsers for paint modes, projection modes and colours given as text
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while_m_n},
    character::complete::{char, space0, u8 as dec_u8},
    combinator::{all_consuming, map, map_res, value},
    number::complete::double,
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::canvas::PaintMode;
use crate::colormap::Rgb;
use crate::error::{Error, Result};
use crate::projection::ProjectionMode;

/// Parse `gradient`, `radial`, `white`, `black` or a uniform shade such as `0.4`
pub fn paint_mode(input: &str) -> Result<PaintMode> {
    match all_consuming(delimited(space0, paint_mode_impl, space0))(input) {
        Ok((_, PaintMode::Uniform(shade))) if !shade.is_finite() => {
            Err(Error::UnknownMode(input.to_string()))
        }
        Ok((_, mode)) => Ok(mode),
        Err(_) => Err(Error::UnknownMode(input.to_string())),
    }
}

fn paint_mode_impl(input: &str) -> IResult<&str, PaintMode> {
    alt((
        value(PaintMode::Gradient, tag_no_case("gradient")),
        value(PaintMode::Radial, tag_no_case("radial")),
        value(PaintMode::White, tag_no_case("white")),
        value(PaintMode::Black, tag_no_case("black")),
        map(double, PaintMode::Uniform),
    ))(input)
}

/// Parse `persp`/`perspective` or `ortho`/`orthographic`
pub fn projection_mode(input: &str) -> Result<ProjectionMode> {
    all_consuming(delimited(space0, projection_mode_impl, space0))(input)
        .map(|(_, mode)| mode)
        .map_err(|_| Error::UnknownMode(input.to_string()))
}

fn projection_mode_impl(input: &str) -> IResult<&str, ProjectionMode> {
    alt((
        value(ProjectionMode::Perspective, tag_no_case("perspective")),
        value(ProjectionMode::Perspective, tag_no_case("persp")),
        value(ProjectionMode::Orthographic, tag_no_case("orthographic")),
        value(ProjectionMode::Orthographic, tag_no_case("ortho")),
    ))(input)
}

/// Parse a colour written as `#rrggbb` or `r, g, b` with 0-255 channels
pub fn rgb(input: &str) -> Result<Rgb> {
    all_consuming(delimited(space0, alt((hex_rgb, decimal_rgb)), space0))(input)
        .map(|(_, color)| color)
        .map_err(|_| Error::InvalidColor(input.to_string()))
}

fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}

fn hex_rgb(input: &str) -> IResult<&str, Rgb> {
    map(
        preceded(char('#'), tuple((hex_byte, hex_byte, hex_byte))),
        |(r, g, b)| [r, g, b],
    )(input)
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(space0, char(','), space0)(input)
}

fn decimal_rgb(input: &str) -> IResult<&str, Rgb> {
    map(
        tuple((dec_u8, comma, dec_u8, comma, dec_u8)),
        |(r, _, g, _, b)| [r, g, b],
    )(input)
}
