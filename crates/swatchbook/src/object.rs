use crate::core::{
    contrast_ratio, convert, format, from_24bit, parse, relative_luminance, to_24bit,
    to_eq_coordinates, ColorSpace, ParsedNotation,
};
use crate::{Bits, Float};

/// A palette color.
///
/// # Canonical Coordinates
///
/// Every color is stored as three floating point coordinates in CIE XYZ with
/// the D65 standard illuminant, no matter which notation it was created
/// from. The coordinates never change after construction; all conversions
/// are pure views computed on demand. That makes XYZ the single source of
/// truth and the conversion chain the single source of conversion error.
///
/// # Factories
///
/// Calling code never assembles a color from raw coordinates. Instead, the
/// named factories sanitize their inputs: components are clamped to their
/// valid interval and a not-a-number component maps to the interval's lower
/// bound, or to 0 for a hue. Construction therefore never produces
/// not-a-number canonical coordinates. The one exception is
/// [`Color::from_xyz`], which passes coordinates through untouched and
/// exists for deserializing values this type produced earlier; routing
/// persisted data through a notation factory would re-clamp already-valid
/// coordinates.
///
/// # Equality Testing and Hashing
///
/// Comparisons and hashes operate on normalized coordinates: not-a-numbers
/// are zeroed, the least significant digit is rounded away, and negative
/// zeros drop their sign. Two colors created from the same notation inputs
/// therefore compare equal and hash identically, which is also what anchors
/// content-derived palette identifiers.
///
/// ```
/// # use swatchbook::Color;
/// let sky = Color::from_rgb255(51.0, 102.0, 153.0);
/// assert_eq!(sky.to_hex_string(), "#336699");
/// assert_eq!(sky, "#369".parse()?);
/// # Ok::<(), swatchbook::error::ColorFormatError>(())
/// ```
/// <div class=color-swatch>
/// <div style="background-color: #336699;"></div>
/// </div>
#[derive(Clone)]
pub struct Color {
    coordinates: [Float; 3],
}

/// The number of digits past the decimal in display strings.
const DISPLAY_PRECISION: usize = 2;

#[inline]
fn sanitize_unit(value: Float) -> Float {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[inline]
fn sanitize_hue(value: Float) -> Float {
    if value.is_nan() {
        0.0
    } else {
        value.rem_euclid(360.0)
    }
}

impl Color {
    #[inline]
    const fn new(coordinates: [Float; 3]) -> Self {
        Self { coordinates }
    }

    /// Instantiate a new color from gamma-corrected sRGB coordinates, each
    /// in `0..=1`.
    ///
    /// Out-of-range coordinates are clamped to the unit interval and
    /// not-a-numbers map to 0.
    ///
    /// ```
    /// # use swatchbook::Color;
    /// let red = Color::from_rgb(1.0, 0.0, 0.0);
    /// let still_red = Color::from_rgb(1.7, -0.2, f64::NAN);
    /// assert_eq!(red, still_red);
    /// ```
    /// <div class=color-swatch>
    /// <div style="background-color: #ff0000;"></div>
    /// </div>
    pub fn from_rgb(r: Float, g: Float, b: Float) -> Self {
        let srgb = [sanitize_unit(r), sanitize_unit(g), sanitize_unit(b)];
        Self::new(convert(ColorSpace::Srgb, ColorSpace::Xyz, &srgb))
    }

    /// Instantiate a new color from sRGB coordinates on the 8-bit scale,
    /// each in `0..=255`.
    ///
    /// The coordinates are rounded to the nearest integer first and then
    /// delegated to [`Color::from_rgb`] after scaling by 1/255, so the
    /// same clamping applies.
    ///
    /// ```
    /// # use swatchbook::Color;
    /// let tangerine = Color::from_rgb255(255.0, 147.2, 0.0);
    /// assert_eq!(tangerine.to_rgb255(), [0xff, 0x93, 0x00]);
    /// ```
    /// <div class=color-swatch>
    /// <div style="background-color: #ff9300;"></div>
    /// </div>
    pub fn from_rgb255(r: Float, g: Float, b: Float) -> Self {
        Self::from_rgb(r.round() / 255.0, g.round() / 255.0, b.round() / 255.0)
    }

    /// Instantiate a new color from HSL coordinates.
    ///
    /// The hue is taken modulo 360 with negative values wrapping into
    /// `0..360`; a not-a-number hue maps to 0. Saturation and lightness are
    /// clamped to `0..=1` with not-a-numbers mapping to 0.
    pub fn from_hsl(h: Float, s: Float, l: Float) -> Self {
        let hsl = [sanitize_hue(h), sanitize_unit(s), sanitize_unit(l)];
        Self::new(convert(ColorSpace::Hsl, ColorSpace::Xyz, &hsl))
    }

    /// Instantiate a new color from HWB coordinates.
    ///
    /// The hue is taken modulo 360 with negative values wrapping into
    /// `0..360`; a not-a-number hue maps to 0. Whiteness and blackness are
    /// clamped to `0..=1` with not-a-numbers mapping to 0.
    pub fn from_hwb(h: Float, w: Float, b: Float) -> Self {
        let hwb = [sanitize_hue(h), sanitize_unit(w), sanitize_unit(b)];
        Self::new(convert(ColorSpace::Hwb, ColorSpace::Xyz, &hwb))
    }

    /// Instantiate a new color from Oklch coordinates.
    ///
    /// Lightness and chroma are clamped to `0..=1` with not-a-numbers
    /// mapping to 0. The hue is taken modulo 360 with negative values
    /// wrapping into `0..360`; a not-a-number hue maps to 0.
    pub fn from_oklch(l: Float, c: Float, h: Float) -> Self {
        let oklch = [sanitize_unit(l), sanitize_unit(c), sanitize_hue(h)];
        Self::new(convert(ColorSpace::Oklch, ColorSpace::Xyz, &oklch))
    }

    /// Instantiate a new color directly from XYZ D65 coordinates.
    ///
    /// This factory performs no sanitization whatsoever. It is intended for
    /// reconstructing colors from their persisted representation, i.e., the
    /// value of [`Color::to_xyz`], which is trusted as-is.
    #[inline]
    pub const fn from_xyz(x: Float, y: Float, z: Float) -> Self {
        Self::new([x, y, z])
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Access the canonical XYZ D65 coordinates.
    #[inline]
    pub const fn to_xyz(&self) -> [Float; 3] {
        self.coordinates
    }

    /// Derive the gamma-corrected sRGB coordinates for this color.
    ///
    /// Out-of-gamut colors are pinned to the nearest sRGB cube surface, so
    /// the result always ranges `0..=1` per channel.
    #[inline]
    pub fn to_rgb(&self) -> [Float; 3] {
        convert(ColorSpace::Xyz, ColorSpace::Srgb, &self.coordinates)
    }

    /// Derive the 8-bit sRGB coordinates for this color.
    #[inline]
    pub fn to_rgb255(&self) -> [u8; 3] {
        to_24bit(&self.to_rgb())
    }

    /// Derive the HSL coordinates for this color.
    ///
    /// The hue is not-a-number if this color is achromatic.
    #[inline]
    pub fn to_hsl(&self) -> [Float; 3] {
        convert(ColorSpace::Xyz, ColorSpace::Hsl, &self.coordinates)
    }

    /// Derive the HWB coordinates for this color.
    ///
    /// The hue is not-a-number if this color is achromatic.
    #[inline]
    pub fn to_hwb(&self) -> [Float; 3] {
        convert(ColorSpace::Xyz, ColorSpace::Hwb, &self.coordinates)
    }

    /// Derive the Oklch coordinates for this color.
    ///
    /// The hue is not-a-number if this color is achromatic.
    #[inline]
    pub fn to_oklch(&self) -> [Float; 3] {
        convert(ColorSpace::Xyz, ColorSpace::Oklch, &self.coordinates)
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Format this color in hashed hexadecimal notation, e.g., `#ffca00`.
    pub fn to_hex_string(&self) -> String {
        let [r, g, b] = self.to_rgb255();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Format this color in `rgb()` notation on the 8-bit scale.
    pub fn to_rgb_string(&self) -> String {
        let [r, g, b] = self.to_rgb255();
        format!("rgb({} {} {})", r, g, b)
    }

    /// Format this color in `hsl()` notation, rounded for display.
    ///
    /// Like all string accessors, this method rounds to two digits past the
    /// decimal and renders a powerless hue as 0. Rounding is strictly a
    /// display concern; the underlying coordinates stay exact.
    pub fn to_hsl_string(&self) -> String {
        format("hsl", &self.to_hsl(), DISPLAY_PRECISION)
    }

    /// Format this color in `hwb()` notation, rounded for display.
    pub fn to_hwb_string(&self) -> String {
        format("hwb", &self.to_hwb(), DISPLAY_PRECISION)
    }

    /// Format this color in `oklch()` notation, rounded for display.
    pub fn to_oklch_string(&self) -> String {
        format("oklch", &self.to_oklch(), DISPLAY_PRECISION)
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Compute the WCAG 2.x relative luminance of this color.
    ///
    /// The result ranges `0..=1`, from black to white.
    #[inline]
    pub fn luminance(&self) -> Float {
        let [r, g, b] = self.to_rgb();
        relative_luminance(r, g, b)
    }

    /// Compute the WCAG 2.x contrast ratio between this color and another.
    ///
    /// The ratio ranges from 1 to 21 and is symmetric in its operands.
    ///
    /// ```
    /// # use swatchbook::{wcag_category, Color, WcagCategory};
    /// let black = Color::from_rgb(0.0, 0.0, 0.0);
    /// let white = Color::from_rgb(1.0, 1.0, 1.0);
    /// let ratio = black.contrast_against(&white);
    /// assert!((ratio - 21.0).abs() < 1e-9);
    /// assert_eq!(wcag_category(ratio), WcagCategory::Aaa);
    /// ```
    #[inline]
    pub fn contrast_against(&self, other: &Self) -> Float {
        contrast_ratio(self.luminance(), other.luminance())
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Access the normalized bit pattern of the canonical coordinates.
    ///
    /// This is the exact quantity equality testing and hashing operate on.
    /// It is stable across construction paths, which makes it suitable as
    /// the input of a content-derived identifier.
    #[inline]
    pub fn to_eq_bits(&self) -> [Bits; 3] {
        to_eq_coordinates(ColorSpace::Xyz, &self.coordinates)
    }
}

impl Default for Color {
    /// Create an instance of the default color, the origin of the XYZ color
    /// space, i.e., pitch black.
    #[inline]
    fn default() -> Self {
        Self::new([0.0, 0.0, 0.0])
    }
}

impl std::str::FromStr for Color {
    type Err = crate::error::ColorFormatError;

    /// Instantiate a color from its string representation.
    ///
    /// This method recognizes the hashed hexadecimal notation with three or
    /// six digits as well as the `rgb()`, `hsl()`, `hwb()`, and `oklch()`
    /// functional forms with space-separated, unitless coordinates. Leading
    /// and trailing white space is trimmed and ASCII letters are treated
    /// case-insensitively. Each recognized notation routes through the
    /// matching factory, so out-of-range coordinates are sanitized rather
    /// than rejected; only malformed strings are errors.
    ///
    /// ```
    /// # use swatchbook::Color;
    /// use std::str::FromStr;
    ///
    /// let navy = Color::from_str("#336699")?;
    /// assert_eq!(navy, "rgb(51 102 153)".parse()?);
    /// let lime: Color = str::parse("hsl(120 1 0.5)")?;
    /// assert_eq!(lime.to_rgb255(), [0x00_u8, 0xff, 0x00]);
    /// # Ok::<(), swatchbook::error::ColorFormatError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match parse(s)? {
            ParsedNotation::Hex([r, g, b]) => {
                let [r, g, b] = from_24bit(r, g, b);
                Self::from_rgb(r, g, b)
            }
            ParsedNotation::Rgb255([r, g, b]) => Self::from_rgb255(r, g, b),
            ParsedNotation::Hsl([h, s, l]) => Self::from_hsl(h, s, l),
            ParsedNotation::Hwb([h, w, b]) => Self::from_hwb(h, w, b),
            ParsedNotation::Oklch([l, c, h]) => Self::from_oklch(l, c, h),
        })
    }
}

impl TryFrom<&str> for Color {
    type Error = crate::error::ColorFormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl AsRef<[Float; 3]> for Color {
    fn as_ref(&self) -> &[Float; 3] {
        &self.coordinates
    }
}

impl std::ops::Index<usize> for Color {
    type Output = Float;

    /// Access the canonical coordinate with the given index.
    ///
    /// # Panics
    ///
    /// This method panics if the index is larger than 2.
    fn index(&self, index: usize) -> &Self::Output {
        &self.coordinates[index]
    }
}

impl std::hash::Hash for Color {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for bits in self.to_eq_bits() {
            state.write_u64(bits);
        }
    }
}

impl PartialEq for Color {
    /// Determine whether this color equals the other color, comparing the
    /// normalized bit patterns of the canonical coordinates.
    fn eq(&self, other: &Self) -> bool {
        self.to_eq_bits() == other.to_eq_bits()
    }
}

impl Eq for Color {}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [x, y, z] = self.coordinates;
        f.write_fmt(format_args!("Color(xyz {:?} {:?} {:?})", x, y, z))
    }
}

impl std::fmt::Display for Color {
    /// Format this color's canonical coordinates, e.g., `xyz(0.62 0.64 0.09)`.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&format("xyz", &self.coordinates, 5))
    }
}

// ====================================================================================================================
