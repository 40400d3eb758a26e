/// Color label parsing
///
/// Lines carry their color as an opaque label so that surfaces which accept
/// CSS-style strings (a canvas) can use it verbatim. Surfaces that need
/// numeric channels parse the label here.
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while_m_n},
    combinator::{all_consuming, map, map_res, opt},
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{Error, Result};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a color label such as `black`, `#fff`, `#b5d5aa` or `#b5d5aaff`.
    pub fn parse(label: &str) -> Result<Self> {
        let trimmed = label.trim();
        match all_consuming(color)(trimmed) {
            Ok((_, rgba)) => Ok(rgba),
            Err(_) => Err(Error::InvalidColor(label.to_string())),
        }
    }
}

fn color(input: &str) -> IResult<&str, Rgba> {
    alt((hex_long, hex_short, named))(input)
}

fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, is_hex), |s| u8::from_str_radix(s, 16))(input)
}

fn hex_nibble(input: &str) -> IResult<&str, u8> {
    // `#abc` expands each digit to a doubled byte: a -> aa
    map_res(take_while_m_n(1, 1, is_hex), |s| {
        u8::from_str_radix(s, 16).map(|v| v * 17)
    })(input)
}

fn hex_long(input: &str) -> IResult<&str, Rgba> {
    map(
        preceded(tag("#"), tuple((hex_byte, hex_byte, hex_byte, opt(hex_byte)))),
        |(r, g, b, a)| Rgba::rgba(r, g, b, a.unwrap_or(255)),
    )(input)
}

fn hex_short(input: &str) -> IResult<&str, Rgba> {
    map(
        preceded(tag("#"), tuple((hex_nibble, hex_nibble, hex_nibble))),
        |(r, g, b)| Rgba::rgb(r, g, b),
    )(input)
}

/// Color names match regardless of case, as in CSS.
fn named(input: &str) -> IResult<&str, Rgba> {
    alt((
        map(tag_no_case("black"), |_| Rgba::BLACK),
        map(tag_no_case("white"), |_| Rgba::WHITE),
        map(tag_no_case("red"), |_| Rgba::rgb(255, 0, 0)),
        map(tag_no_case("green"), |_| Rgba::rgb(0, 128, 0)),
        map(tag_no_case("blue"), |_| Rgba::rgb(0, 0, 255)),
        map(tag_no_case("yellow"), |_| Rgba::rgb(255, 255, 0)),
        map(tag_no_case("cyan"), |_| Rgba::rgb(0, 255, 255)),
        map(tag_no_case("magenta"), |_| Rgba::rgb(255, 0, 255)),
        map(alt((tag_no_case("gray"), tag_no_case("grey"))), |_| Rgba::rgb(128, 128, 128)),
    ))(input)
}
