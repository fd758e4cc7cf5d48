use super::ColorSpace;
use crate::core::math::FloatExt;
use crate::{Bits, Float};

/// Test macro for asserting the equality of floating point numbers.
///
/// This macro relies on [`to_eq_bits`] to normalize the two floating point
/// numbers by zeroing out not-a-numbers, reducing resolution, and dropping
/// the sign of negative zeros and then compares the resulting bit strings.
///
/// # Panics
///
/// This macro panics if the normalized bit strings are not identical.
#[macro_export]
macro_rules! assert_close_enough {
    ($f1:expr, $f2:expr $(,)?) => {
        let (f1, f2) = ($f1, $f2);
        let bits1 = $crate::to_eq_bits(f1);
        let bits2 = $crate::to_eq_bits(f2);
        assert_eq!(bits1, bits2, "quantities differ:\n{:?}\n{:?}", f1, f2);
    };
}

/// Test macro for asserting that two color coordinate slices describe the
/// same color.
///
/// Given a color space and two coordinate arrays, this macro normalizes the
/// coordinates by zeroing out not-a-numbers, scaling the hue into unit range,
/// reducing resolution, and dropping the sign of negative zeros before
/// comparing the resulting bit strings.
///
/// # Panics
///
/// This macro panics if the normalized bit strings are not identical.
#[cfg(test)]
macro_rules! assert_same_coordinates {
    ($space:expr , $cs1:expr , $cs2:expr $(,)?) => {
        let (space, cs1, cs2) = ($space, $cs1, $cs2);
        let bits1 = $crate::core::to_eq_coordinates(space, cs1);
        let bits2 = $crate::core::to_eq_coordinates(space, cs2);
        assert_eq!(
            bits1, bits2,
            "color coordinates differ:\n{:?}\n{:?}",
            cs1, cs2
        );
    };
}

#[cfg(test)]
pub(crate) use assert_same_coordinates;

// --------------------------------------------------------------------------------------------------------------------

/// Normalize the color coordinates.
///
/// This function ensures that coordinates are well-formed. In particular, it
/// replaces not-a-number coordinates with zero. If the hue of an HSL or Oklch
/// color is not-a-number, it also zeroes out the saturation or chroma, which
/// keeps the color achromatic. For the Oklab variations, it further clamps
/// lightness to `0..=1` and chroma to `0..`.
#[inline]
pub(crate) fn normalize(space: ColorSpace, coordinates: &[Float; 3]) -> [Float; 3] {
    let mut coordinates = *coordinates;

    if let Some(index) = space.hue_index() {
        // A powerless hue means the color has no colorness to rotate. HWB
        // needs no coupling since its gray axis is spanned by w and b.
        if coordinates[index].is_nan() && space != ColorSpace::Hwb {
            coordinates[1] = 0.0;
        }
    }

    for coordinate in coordinates.iter_mut() {
        if coordinate.is_nan() {
            *coordinate = 0.0;
        }
    }

    if space.is_ok() {
        coordinates[0] = coordinates[0].clamp(0.0, 1.0);
        if space == ColorSpace::Oklch {
            coordinates[1] = coordinates[1].max(0.0);
        }
    }

    coordinates
}

/// Normalize coordinates for equality testing and hashing.
#[must_use = "function returns new color coordinates and does not mutate original value"]
pub(crate) fn to_eq_coordinates(space: ColorSpace, coordinates: &[Float; 3]) -> [Bits; 3] {
    // Zero out not-a-numbers and couple powerless hues.
    let mut coordinates = normalize(space, coordinates);

    // Normalize rotation and scale to unit range.
    if let Some(index) = space.hue_index() {
        coordinates[index] = coordinates[index].rem_euclid(360.0) / 360.0;
    }

    let mut bits = [0; 3];
    for (coordinate, eq_bits) in coordinates.iter().zip(bits.iter_mut()) {
        // Reduce precision.
        let mut c = (coordinate * <Float as FloatExt>::ROUNDING_FACTOR).round();

        // Prevent too much negativity.
        if c == -0.0 {
            c = 0.0;
        }

        *eq_bits = c.to_bits();
    }

    bits
}

// --------------------------------------------------------------------------------------------------------------------

/// Helper function to normalize a floating point number before hashing or
/// equality testing.
///
/// This function zeros out not-a-number, reduces significant digits after
/// the decimal, and drops the sign of negative zero and returns the result
/// as a bit string. It is only public because the [`assert_close_enough`]
/// test macro uses it.
#[doc(hidden)]
#[inline]
pub fn to_eq_bits(f: Float) -> Bits {
    // Eliminate not-a-number.
    let mut f = if f.is_nan() { 0.0 } else { f };

    // Reduce precision.
    f = (<Float as FloatExt>::ROUNDING_FACTOR * f).round();

    // Too much negativity!
    if f == -0.0 {
        f = 0.0
    }

    f.to_bits()
}

#[cfg(test)]
mod test {
    use super::{normalize, to_eq_coordinates};
    use crate::core::ColorSpace::*;
    use crate::Float;

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize(Hsl, &[Float::NAN, 0.8, 0.5]),
            [0.0, 0.0, 0.5],
            "powerless HSL hue must zero saturation"
        );
        assert_eq!(
            normalize(Oklch, &[0.5, 0.2, Float::NAN]),
            [0.5, 0.0, 0.0],
            "powerless Oklch hue must zero chroma"
        );
        assert_eq!(
            normalize(Hwb, &[Float::NAN, 0.6, 0.4]),
            [0.0, 0.6, 0.4],
            "HWB whiteness survives a powerless hue"
        );
        assert_eq!(normalize(Oklab, &[1.5, 0.1, -0.1]), [1.0, 0.1, -0.1]);
    }

    #[test]
    fn test_eq_coordinates() {
        // Full rotations are equal, as are hues shifted by less than the
        // rounding resolution.
        assert_eq!(
            to_eq_coordinates(Oklch, &[0.5, 0.1, 400.0]),
            to_eq_coordinates(Oklch, &[0.5, 0.1, 40.0]),
        );
        assert_eq!(
            to_eq_coordinates(Hsl, &[-120.0, 1.0, 0.5]),
            to_eq_coordinates(Hsl, &[240.0, 1.0, 0.5]),
        );
        assert_ne!(
            to_eq_coordinates(Hsl, &[120.0, 1.0, 0.5]),
            to_eq_coordinates(Hsl, &[240.0, 1.0, 0.5]),
        );
        assert_eq!(
            to_eq_coordinates(Xyz, &[-0.0, 0.5, 1.0]),
            to_eq_coordinates(Xyz, &[0.0, 0.5, 1.0]),
        );
    }
}
