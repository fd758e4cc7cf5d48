//! Utility module with swatchbook's errors.

/// An erroneous color format.
///
/// Parsing never mutates any state: a malformed notation string aborts the
/// whole operation and it is the caller's job to surface the problem to the
/// user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorFormatError {
    /// A color format that does not start with a known prefix such as `#`,
    /// `rgb`, `hsl`, `hwb`, or `oklch`.
    UnknownFormat,

    /// A color format with unexpected characters or an unexpected number of
    /// characters. For example, `#00` is missing a hexadecimal digit,
    /// whereas `#💩00` has the correct length but contains an unsuitable
    /// character.
    UnexpectedCharacters,

    /// A functional color format without the opening parenthesis. For
    /// example, `hsl 0 0 0)` is missing the opening parenthesis.
    NoOpeningParenthesis,

    /// A functional color format without the closing parenthesis. For
    /// example, `oklch(1 2 3` is missing the closing parenthesis.
    NoClosingParenthesis,

    /// A color format that is missing a coordinate. For example, `rgb(0 0)`
    /// has only two.
    MissingCoordinate,

    /// A color format with a malformed hexadecimal number. For example,
    /// `#efg` has a malformed third coordinate.
    MalformedHex,

    /// A color format with a coordinate that is not a valid floating point
    /// number. For example, `hsl(120 50% 50%)` carries units, which are not
    /// supported.
    MalformedFloat,

    /// A color format with more than three coordinates. For example,
    /// `rgb(1 2 3 4)` has one coordinate too many.
    TooManyCoordinates,
}

impl std::fmt::Display for ColorFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ColorFormatError::*;

        match *self {
            UnknownFormat => f.write_str(
                "color format should start with `#`, `rgb()`, `hsl()`, `hwb()`, or `oklch()`",
            ),
            UnexpectedCharacters => {
                f.write_str("color format should contain only expected characters")
            }
            NoOpeningParenthesis => {
                f.write_str("color format should include an opening parenthesis")
            }
            NoClosingParenthesis => {
                f.write_str("color format should include a closing parenthesis")
            }
            MissingCoordinate => f.write_str("color format should have 3 coordinates"),
            MalformedHex => {
                f.write_str("color format coordinates should be valid hexadecimal numbers")
            }
            MalformedFloat => {
                f.write_str("color format coordinates should be valid, unitless numbers")
            }
            TooManyCoordinates => f.write_str("color format should have no more than 3 coordinates"),
        }
    }
}

impl std::error::Error for ColorFormatError {}
