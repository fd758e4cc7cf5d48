/// The enumeration of supported color spaces and renotations.
///
/// # RGB
///
/// [sRGB](https://en.wikipedia.org/wiki/SRGB) is the color space palette
/// entries are displayed in, in both its gamma-corrected and its linear form.
/// In-gamut coordinates range from 0 to 1, inclusive.
///
/// [HSL](https://en.wikipedia.org/wiki/HSL_and_HSV) and
/// [HWB](https://en.wikipedia.org/wiki/HWB_color_model) are *renotations* of
/// gamma-corrected sRGB, not distinct color spaces: they re-parameterize the
/// same cube into hue/saturation/lightness and hue/whiteness/blackness
/// coordinates. Conversions for both operate on gamma-corrected values.
///
/// # Oklab/Oklch
///
/// [Oklab/Oklch](https://bottosson.github.io/posts/oklab/) are the same
/// perceptually uniform color space in Cartesian and polar coordinates,
/// respectively. Lightness is limited to `0..=1`; chroma is non-negative and
/// in practice bounded by 0.4.
///
/// # XYZ
///
/// [XYZ](https://en.wikipedia.org/wiki/CIE_1931_color_space) with the D65
/// standard illuminant serves as the foundational color space: all
/// conversions between unrelated spaces go through XYZ, never directly to
/// each other.
///
/// # Hue
///
/// The hue of a polar space or renotation may be not-a-number, which
/// indicates a powerless component, i.e., an achromatic color. In that case
/// the associated saturation or chroma must necessarily be zero. Note that
/// hue comes *first* for HSL/HWB but *last* for Oklch; [`ColorSpace::hue_index`]
/// abstracts over the difference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    Srgb,
    LinearSrgb,
    Hsl,
    Hwb,
    Oklab,
    Oklch,
    Xyz,
}

impl ColorSpace {
    /// Determine whether this color space uses polar coordinates, i.e., has
    /// a hue coordinate.
    #[inline]
    pub const fn is_polar(&self) -> bool {
        matches!(
            *self,
            ColorSpace::Hsl | ColorSpace::Hwb | ColorSpace::Oklch
        )
    }

    /// Determine the index of the hue coordinate, if this color space has
    /// one. HSL and HWB lead with their hue, whereas Oklch trails with it.
    #[inline]
    pub const fn hue_index(&self) -> Option<usize> {
        match *self {
            ColorSpace::Hsl | ColorSpace::Hwb => Some(0),
            ColorSpace::Oklch => Some(2),
            _ => None,
        }
    }

    /// Determine whether this color space is one of the Oklab variations.
    #[inline]
    pub const fn is_ok(&self) -> bool {
        matches!(*self, ColorSpace::Oklab | ColorSpace::Oklch)
    }

    /// Determine whether this color space is gamma-corrected sRGB or one of
    /// its renotations.
    #[inline]
    pub const fn is_rgb_notation(&self) -> bool {
        matches!(
            *self,
            ColorSpace::Srgb | ColorSpace::Hsl | ColorSpace::Hwb
        )
    }
}

impl std::fmt::Display for ColorSpace {
    /// Format a human-readable name for this color space.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ColorSpace::*;

        f.write_str(match *self {
            Srgb => "sRGB",
            LinearSrgb => "linear sRGB",
            Hsl => "HSL",
            Hwb => "HWB",
            Oklab => "Oklab",
            Oklch => "Oklch",
            Xyz => "XYZ D65",
        })
    }
}

#[cfg(test)]
mod test {
    use super::ColorSpace::*;

    #[test]
    fn test_hue_index() {
        assert_eq!(Hsl.hue_index(), Some(0));
        assert_eq!(Hwb.hue_index(), Some(0));
        assert_eq!(Oklch.hue_index(), Some(2));
        assert_eq!(Srgb.hue_index(), None);
        assert_eq!(Xyz.hue_index(), None);

        for space in [Srgb, LinearSrgb, Hsl, Hwb, Oklab, Oklch, Xyz] {
            assert_eq!(space.is_polar(), space.hue_index().is_some());
        }
    }
}
