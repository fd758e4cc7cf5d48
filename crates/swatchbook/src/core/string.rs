use crate::error::ColorFormatError;
use crate::Float;

/// A successfully parsed color notation.
///
/// The variants preserve the notation's own scale, so that the caller can
/// route each one through the matching [`Color`](crate::Color) factory and
/// get that factory's sanitization.
#[derive(Debug, PartialEq)]
pub(crate) enum ParsedNotation {
    /// A hashed hexadecimal color, e.g., `#ffca00` or `#fc0`.
    Hex([u8; 3]),
    /// An `rgb()` color with coordinates in `0..=255`.
    Rgb255([Float; 3]),
    /// An `hsl()` color.
    Hsl([Float; 3]),
    /// An `hwb()` color.
    Hwb([Float; 3]),
    /// An `oklch()` color.
    Oklch([Float; 3]),
}

/// Parse a 24-bit color in hashed hexadecimal format. If successful, this
/// function returns the three coordinates as unsigned bytes. It
/// transparently handles single-digit coordinates.
fn parse_hashed(s: &str) -> Result<[u8; 3], ColorFormatError> {
    if !s.starts_with('#') {
        return Err(ColorFormatError::UnknownFormat);
    } else if s.len() != 4 && s.len() != 7 {
        return Err(ColorFormatError::UnexpectedCharacters);
    }

    fn parse_coordinate(s: &str, index: usize) -> Result<u8, ColorFormatError> {
        let factor = s.len() / 3;
        let t = s
            .get(1 + factor * index..1 + factor * (index + 1))
            .ok_or(ColorFormatError::UnexpectedCharacters)?;
        let n = u8::from_str_radix(t, 16).map_err(|_| ColorFormatError::MalformedHex)?;

        Ok(if factor == 1 { 16 * n + n } else { n })
    }

    let c1 = parse_coordinate(s, 0)?;
    let c2 = parse_coordinate(s, 1)?;
    let c3 = parse_coordinate(s, 2)?;
    Ok([c1, c2, c3])
}

/// Parse a color in functional notation, i.e., `rgb()`, `hsl()`, `hwb()`,
/// or `oklch()` with three space-separated coordinates. Coordinates must
/// not have units including `%`: `rgb()` takes `0..=255`, the saturation,
/// lightness, whiteness, and blackness of `hsl()`/`hwb()` are fractions in
/// `0..=1`, and so are Oklch lightness and chroma.
fn parse_functional(s: &str) -> Result<ParsedNotation, ColorFormatError> {
    // Munge function name
    let (name, rest) = ["rgb", "hsl", "hwb", "oklch"]
        .iter()
        .filter_map(|name| s.strip_prefix(name).map(|rest| (*name, rest)))
        .next()
        .ok_or(ColorFormatError::UnknownFormat)?;

    // Munge parentheses after trimming leading whitespace
    let body = rest
        .trim_start()
        .strip_prefix('(')
        .ok_or(ColorFormatError::NoOpeningParenthesis)
        .and_then(|rest| {
            rest.strip_suffix(')')
                .ok_or(ColorFormatError::NoClosingParenthesis)
        })?;

    #[inline]
    fn parse_coordinate(s: Option<&str>) -> Result<Float, ColorFormatError> {
        s.ok_or(ColorFormatError::MissingCoordinate)
            .and_then(|t| t.parse().map_err(|_| ColorFormatError::MalformedFloat))
    }

    // Munge coordinates. Iterator eats all leading or trailing white space.
    let mut iter = body.split_whitespace();
    let c1 = parse_coordinate(iter.next())?;
    let c2 = parse_coordinate(iter.next())?;
    let c3 = parse_coordinate(iter.next())?;
    if iter.next().is_some() {
        return Err(ColorFormatError::TooManyCoordinates);
    }

    let coordinates = [c1, c2, c3];
    Ok(match name {
        "rgb" => ParsedNotation::Rgb255(coordinates),
        "hsl" => ParsedNotation::Hsl(coordinates),
        "hwb" => ParsedNotation::Hwb(coordinates),
        _ => ParsedNotation::Oklch(coordinates),
    })
}

/// Parse the string into a color notation.
///
/// This function recognizes the three and six digit hashed hexadecimal
/// format as well as the `rgb()`, `hsl()`, `hwb()`, and `oklch()` functional
/// forms with space-separated, unitless coordinates. Before trying to parse
/// either of these formats, it trims leading and trailing white space and
/// converts ASCII letters to lowercase.
pub(crate) fn parse(s: &str) -> Result<ParsedNotation, ColorFormatError> {
    let lowercase = s.trim().to_ascii_lowercase(); // Keep around for fn scope
    let s = lowercase.as_str();

    if s.starts_with('#') {
        parse_hashed(s).map(ParsedNotation::Hex)
    } else {
        parse_functional(s)
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// Format the coordinates as a functional color notation.
///
/// This function renders `prefix(c1 c2 c3)` with every coordinate rounded to
/// the given number of digits past the decimal and trailing zeros trimmed.
/// A not-a-number coordinate—the powerless hue of an achromatic color—is
/// rendered as 0. Rounding here is strictly a display concern; the color
/// value type itself never rounds.
pub(crate) fn format(prefix: &str, coordinates: &[Float; 3], precision: usize) -> String {
    let mut result = String::with_capacity(prefix.len() + 24);
    result.push_str(prefix);
    result.push('(');

    let factor = (10.0 as Float).powi(precision as i32);
    for (index, coordinate) in coordinates.iter().enumerate() {
        if index > 0 {
            result.push(' ');
        }

        let c = if coordinate.is_nan() {
            0.0
        } else {
            (coordinate * factor).round() / factor
        };

        // Rounding avoids trailing zeros, for the most part. If the
        // fractional part is zero, we do need an explicit precision---of
        // zero!
        if c == c.trunc() {
            result.push_str(&format!("{:.0}", c));
        } else {
            result.push_str(&format!("{}", c));
        }
    }

    result.push(')');
    result
}

// ====================================================================================================================
