/// URL query string parsing for slice requests
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while, take_while_m_n},
    character::complete::char,
    combinator::{all_consuming, map, map_res, opt, value},
    multi::{many0, separated_list0},
    sequence::preceded,
    IResult,
};

use crate::constants::HEIGHT_PARAM;
use crate::error::{SceneError, SceneResult};

/// Read the requested slice height from a raw query string.
///
/// Accepts `zVal=5.0` as well as `?other=1&zVal=5.0`. A repeated parameter
/// is joined with `,` before parsing and therefore rejected.
pub fn parse_height(query: &str) -> SceneResult<f64> {
    let values = query_values(query, HEIGHT_PARAM)?;
    if values.is_empty() {
        return Err(SceneError::invalid_height(format!(
            "missing {HEIGHT_PARAM} parameter"
        )));
    }

    let raw = values.join(",");
    let z: f64 = raw.parse().map_err(|_| {
        SceneError::invalid_height(format!("{HEIGHT_PARAM}={raw:?} is not a number"))
    })?;

    if !z.is_finite() {
        return Err(SceneError::invalid_height(format!(
            "{HEIGHT_PARAM}={raw:?} is not a finite number"
        )));
    }

    Ok(z)
}

/// All decoded values of parameter `name`, in query order.
///
/// A bare `name` with no `=` counts as an empty value. Pairs whose key
/// cannot be decoded are skipped.
pub fn query_values(query: &str, name: &str) -> SceneResult<Vec<String>> {
    let (_, pairs) = all_consuming(parse_pairs)(query)
        .map_err(|_| SceneError::invalid_height("malformed query string"))?;

    let mut values = Vec::new();
    for (key, raw_value) in pairs {
        let Ok(key) = decode_component(key) else {
            continue;
        };
        if key == name {
            values.push(decode_component(raw_value.unwrap_or(""))?);
        }
    }
    Ok(values)
}

fn parse_pairs(input: &str) -> IResult<&str, Vec<(&str, Option<&str>)>> {
    let (input, _) = opt(tag("?"))(input)?;
    separated_list0(tag("&"), parse_pair)(input)
}

fn parse_pair(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, key) = take_while(|c: char| c != '=' && c != '&')(input)?;
    let (input, value) = opt(preceded(tag("="), take_while(|c: char| c != '&')))(input)?;
    Ok((input, (key, value)))
}

#[derive(Debug, Clone, Copy)]
enum Piece<'a> {
    Byte(u8),
    Text(&'a str),
}

fn parse_piece(input: &str) -> IResult<&str, Piece<'_>> {
    alt((
        map_res(
            preceded(char('%'), take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit())),
            |hex: &str| u8::from_str_radix(hex, 16).map(Piece::Byte),
        ),
        value(Piece::Byte(b' '), char('+')),
        map(is_not("%+"), Piece::Text),
    ))(input)
}

/// Undo form encoding: `+` is a space and `%xx` is a raw byte
fn decode_component(raw: &str) -> SceneResult<String> {
    let (_, pieces) = all_consuming(many0(parse_piece))(raw)
        .map_err(|_| SceneError::invalid_height(format!("bad percent escape in {raw:?}")))?;

    let mut bytes = Vec::with_capacity(raw.len());
    for piece in pieces {
        match piece {
            Piece::Byte(b) => bytes.push(b),
            Piece::Text(text) => bytes.extend_from_slice(text.as_bytes()),
        }
    }

    String::from_utf8(bytes)
        .map_err(|_| SceneError::invalid_height(format!("{raw:?} is not valid UTF-8")))
}
