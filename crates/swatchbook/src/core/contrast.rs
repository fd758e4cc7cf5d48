use crate::core::conversion::rgb_to_linear_rgb;
use crate::Float;

/// The coefficients for computing relative luminance from linear sRGB
/// coordinates, i.e., the Y row of the sRGB-to-XYZ matrix rounded to the
/// values given by WCAG 2.x.
const SRGB_LUMINANCE: &[Float; 3] = &[0.2126, 0.7152, 0.0722];

/// Compute the relative luminance of the given gamma-corrected sRGB
/// coordinates.
///
/// This function linearizes the coordinates with sRGB's gamma and then
/// weighs the channels with the WCAG 2.x luminance coefficients. For
/// in-gamut inputs, the result ranges `0..=1`, with 0 for black and 1 for
/// white. Like all conversion-level functions, it performs no input
/// validation; sanitization is the [`Color`](crate::Color) factories' job.
///
/// ```
/// # use swatchbook::relative_luminance;
/// assert_eq!(relative_luminance(0.0, 0.0, 0.0), 0.0);
/// assert_eq!(relative_luminance(1.0, 1.0, 1.0), 1.0);
/// assert_eq!(relative_luminance(1.0, 0.0, 0.0), 0.2126);
/// ```
pub fn relative_luminance(r: Float, g: Float, b: Float) -> Float {
    let [r, g, b] = rgb_to_linear_rgb(&[r, g, b]);
    let [c1, c2, c3] = *SRGB_LUMINANCE;

    r.mul_add(c1, g.mul_add(c2, b * c3))
}

/// Compute the WCAG 2.x contrast ratio between two relative luminances.
///
/// The result ranges from 1 (identical luminance) to 21 (black against
/// white). The arguments are interchangeable; the ratio puts whichever
/// luminance is lighter on top.
///
/// ```
/// # use swatchbook::contrast_ratio;
/// assert_eq!(contrast_ratio(0.0, 1.0), 21.0);
/// assert_eq!(contrast_ratio(1.0, 0.0), 21.0);
/// assert_eq!(contrast_ratio(0.5, 0.5), 1.0);
/// ```
pub fn contrast_ratio(luminance1: Float, luminance2: Float) -> Float {
    let (lighter, darker) = if luminance1 < luminance2 {
        (luminance2, luminance1)
    } else {
        (luminance1, luminance2)
    };

    (lighter + 0.05) / (darker + 0.05)
}

/// The WCAG 2.x conformance bucket for a contrast ratio.
///
/// The buckets correspond to the fixed thresholds 7.0, 4.5, and 3.0, i.e.,
/// AAA for normal text, AA for normal text, AA for large text, and failing
/// all three.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WcagCategory {
    Aaa,
    Aa,
    A,
    Fail,
}

impl std::fmt::Display for WcagCategory {
    /// Format this category the way contrast badges spell it.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match *self {
            WcagCategory::Aaa => "AAA",
            WcagCategory::Aa => "AA",
            WcagCategory::A => "A",
            WcagCategory::Fail => "FAIL",
        })
    }
}

/// Categorize the given contrast ratio into its WCAG 2.x bucket.
///
/// ```
/// # use swatchbook::{wcag_category, WcagCategory};
/// assert_eq!(wcag_category(21.0), WcagCategory::Aaa);
/// assert_eq!(wcag_category(4.5), WcagCategory::Aa);
/// assert_eq!(wcag_category(1.0), WcagCategory::Fail);
/// ```
pub fn wcag_category(ratio: Float) -> WcagCategory {
    if ratio >= 7.0 {
        WcagCategory::Aaa
    } else if ratio >= 4.5 {
        WcagCategory::Aa
    } else if ratio >= 3.0 {
        WcagCategory::A
    } else {
        WcagCategory::Fail
    }
}

#[cfg(test)]
mod test {
    use super::{contrast_ratio, relative_luminance, wcag_category, WcagCategory};
    use crate::assert_close_enough;

    #[test]
    fn test_relative_luminance() {
        // The luminance of a full channel is exactly its coefficient.
        assert_close_enough!(relative_luminance(1.0, 0.0, 0.0), 0.2126);
        assert_close_enough!(relative_luminance(0.0, 1.0, 0.0), 0.7152);
        assert_close_enough!(relative_luminance(0.0, 0.0, 1.0), 0.0722);

        // Medium gray, #767676, is the canonical 4.5:1 partner of white.
        let gray = relative_luminance(118.0 / 255.0, 118.0 / 255.0, 118.0 / 255.0);
        let ratio = contrast_ratio(gray, 1.0);
        assert!((ratio - 4.54).abs() < 0.01, "ratio was {}", ratio);
    }

    #[test]
    fn test_contrast_symmetry() {
        let red = relative_luminance(1.0, 0.0, 0.0);
        let blue = relative_luminance(0.0, 0.0, 1.0);
        assert_eq!(contrast_ratio(red, blue), contrast_ratio(blue, red));
        assert_eq!(contrast_ratio(0.0, 1.0), 21.0);
    }

    #[test]
    fn test_wcag_boundaries() {
        assert_eq!(wcag_category(7.0), WcagCategory::Aaa);
        assert_eq!(wcag_category(6.999), WcagCategory::Aa);
        assert_eq!(wcag_category(4.5), WcagCategory::Aa);
        assert_eq!(wcag_category(4.499), WcagCategory::A);
        assert_eq!(wcag_category(3.0), WcagCategory::A);
        assert_eq!(wcag_category(2.99), WcagCategory::Fail);
        assert_eq!(wcag_category(1.0), WcagCategory::Fail);
    }
}
