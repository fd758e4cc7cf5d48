use super::{normalize, ColorSpace};
use crate::core::math::multiply_vector;
use crate::Float;

/// Convert the given 24-bit RGB coordinates to floating point coordinates.
#[inline]
pub(crate) fn from_24bit(r: u8, g: u8, b: u8) -> [Float; 3] {
    [r as Float / 255.0, g as Float / 255.0, b as Float / 255.0]
}

/// Convert the color coordinates to 24-bit representation.
///
/// This function assumes that the coordinates are gamma-corrected sRGB. Even
/// if a coordinate strays outside `0..=1`, the conversion clamps to the range
/// `0x00..=0xff`.
pub(crate) fn to_24bit(coordinates: &[Float; 3]) -> [u8; 3] {
    let [r, g, b] = normalize(ColorSpace::Srgb, coordinates);
    [
        (r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (b.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert coordinates from gamma-corrected RGB to linear RGB using sRGB's
/// gamma. This is a one-hop, direct conversion.
///
/// Each channel is independent and the sign is preserved, so out-of-gamut
/// negative excursions survive the round trip.
pub(crate) fn rgb_to_linear_rgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        let magnitude = value.abs();
        if magnitude <= 0.04045 {
            value / 12.92
        } else {
            ((magnitude + 0.055) / 1.055).powf(2.4).copysign(value)
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

/// Convert coordinates from linear RGB to gamma-corrected RGB using sRGB's
/// gamma. This is a one-hop, direct conversion.
pub(crate) fn linear_rgb_to_rgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        let magnitude = value.abs();
        if magnitude <= 0.0031308 {
            value * 12.92
        } else {
            magnitude
                .powf(1.0 / 2.4)
                .mul_add(1.055, -0.055)
                .copysign(value)
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

// --------------------------------------------------------------------------------------------------------------------
// https://github.com/color-js/color.js/blob/a77e080a070039c534dda3965a769675aac5f75e/src/spaces/srgb-linear.js

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_SRGB_TO_XYZ: [[Float; 3]; 3] = [
    [ 0.41239079926595934, 0.357584339383878,   0.1804807884018343  ],
    [ 0.21263900587151027, 0.715168678767756,   0.07219231536073371 ],
    [ 0.01933081871559182, 0.11919477979462598, 0.9505321522496607  ],
];

/// Convert coordinates for linear sRGB to XYZ. This is a one-hop, direct
/// conversion.
fn linear_srgb_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    multiply_vector(&LINEAR_SRGB_TO_XYZ, value)
}

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_LINEAR_SRGB: [[Float; 3]; 3] = [
    [  3.2409699419045226,  -1.537383177570094,   -0.4986107602930034  ],
    [ -0.9692436362808796,   1.8759675015077202,   0.04155505740717559 ],
    [  0.05563007969699366, -0.20397695888897652,  1.0569715142428786  ],
];

/// Convert coordinates for XYZ to linear sRGB. This is a one-hop, direct
/// conversion.
///
/// The resulting channels are clipped to `0..=1`: out-of-gamut XYZ maps onto
/// the nearest representable sRGB edge, which is lossy but not an error.
fn xyz_to_linear_srgb(value: &[Float; 3]) -> [Float; 3] {
    let [r, g, b] = multiply_vector(&XYZ_TO_LINEAR_SRGB, value);
    [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
}

// --------------------------------------------------------------------------------------------------------------------

/// Determine the shared HSL/HWB hue for gamma-corrected RGB coordinates, in
/// degrees within `0..360`. The caller is responsible for handling the
/// achromatic case, i.e., a zero `delta`.
#[inline]
fn rgb_hue(value: &[Float; 3], max: Float, delta: Float) -> Float {
    let [r, g, b] = *value;

    if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    }
}

/// Convert coordinates for gamma-corrected sRGB to HSL. This is a one-hop,
/// direct renotation, not a change of color space.
///
/// The hue is not-a-number for achromatic inputs.
pub(crate) fn srgb_to_hsl(value: &[Float; 3]) -> [Float; 3] {
    let [r, g, b] = *value;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = 0.5 * (max + min);
    let delta = max - min;

    if delta == 0.0 {
        return [Float::NAN, 0.0, lightness];
    }

    let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());
    [rgb_hue(value, max, delta), saturation, lightness]
}

/// Convert coordinates for HSL to gamma-corrected sRGB. This is a one-hop,
/// direct renotation using the CSS Color 4 algorithm.
pub(crate) fn hsl_to_srgb(value: &[Float; 3]) -> [Float; 3] {
    let [h, s, l] = *value;

    if h.is_nan() {
        return [l, l, l];
    }

    let h = h.rem_euclid(360.0);

    #[inline]
    fn channel(n: Float, h: Float, s: Float, l: Float) -> Float {
        let k = (n + h / 30.0).rem_euclid(12.0);
        let a = s * l.min(1.0 - l);
        l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    }

    [
        channel(0.0, h, s, l),
        channel(8.0, h, s, l),
        channel(4.0, h, s, l),
    ]
}

/// Convert coordinates for gamma-corrected sRGB to HWB. This is a one-hop,
/// direct renotation: whiteness is the smallest channel, blackness the
/// complement of the largest, and the hue is shared with HSL.
pub(crate) fn srgb_to_hwb(value: &[Float; 3]) -> [Float; 3] {
    let [r, g, b] = *value;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        Float::NAN
    } else {
        rgb_hue(value, max, delta)
    };

    [hue, min, 1.0 - max]
}

/// Convert coordinates for HWB to gamma-corrected sRGB. This is a one-hop,
/// direct renotation.
///
/// If whiteness and blackness sum to one or more, the color is a gray and
/// the hue is powerless.
pub(crate) fn hwb_to_srgb(value: &[Float; 3]) -> [Float; 3] {
    let [h, w, b] = *value;

    if w + b >= 1.0 {
        let gray = w / (w + b);
        return [gray, gray, gray];
    }

    let [r1, g1, b1] = hsl_to_srgb(&[h, 1.0, 0.5]);
    let scale = 1.0 - w - b;
    [
        r1.mul_add(scale, w),
        g1.mul_add(scale, w),
        b1.mul_add(scale, w),
    ]
}

// --------------------------------------------------------------------------------------------------------------------

const ACHROMATIC_EPSILON: Float = 0.0002;

/// Convert coordinates for Oklch to Oklab. This is a one-hop, direct
/// conversion.
#[allow(non_snake_case)]
pub(crate) fn oklch_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [L, C, h] = *value;

    if h.is_nan() {
        [L, 0.0, 0.0]
    } else {
        let hue_radian = h.to_radians();
        [L, C * hue_radian.cos(), C * hue_radian.sin()]
    }
}

/// Convert coordinates for Oklab to Oklch. This is a one-hop, direct
/// conversion.
///
/// The hue is `atan2(b, a)` in degrees, normalized to `0..360`; it is
/// not-a-number for near-achromatic colors.
#[allow(non_snake_case)]
pub(crate) fn oklab_to_oklch(value: &[Float; 3]) -> [Float; 3] {
    let [L, a, b] = *value;

    let a_m = a.abs();
    if a_m < ACHROMATIC_EPSILON && b.abs() < ACHROMATIC_EPSILON {
        return [L, 0.0, Float::NAN];
    }

    // per herbie 2.1
    let C = if a_m < b { b.hypot(a_m) } else { a_m.hypot(b) };

    let h = b.atan2(a).to_degrees();
    let h = if h.is_sign_negative() { h + 360.0 } else { h };

    [L, C, h]
}

// --------------------------------------------------------------------------------------------------------------------
// https://github.com/color-js/color.js/blob/a77e080a070039c534dda3965a769675aac5f75e/src/spaces/oklab.js

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLAB_TO_OKLMS: [[Float; 3]; 3] = [
    [ 1.0000000000000000,  0.3963377773761749,  0.2158037573099136 ],
    [ 1.0000000000000000, -0.1055613458156586, -0.0638541728258133 ],
    [ 1.0000000000000000, -0.0894841775298119, -1.2914855480194092 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLMS_TO_XYZ: [[Float; 3]; 3] = [
    [  1.2268798758459243, -0.5578149944602171,  0.2813910456659647 ],
    [ -0.0405757452148008,  1.1122868032803170, -0.0717110580655164 ],
    [ -0.0763729366746601, -0.4214933324022432,  1.5869240198367816 ],
];

/// Convert coordinates for Oklab to XYZ. This is a one-hop, direct
/// conversion, even though it requires two matrix multiplications and a
/// coordinate-wise cube.
fn oklab_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply_vector(&OKLAB_TO_OKLMS, value);
    multiply_vector(&OKLMS_TO_XYZ, &[l.powi(3), m.powi(3), s.powi(3)])
}

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_OKLMS: [[Float; 3]; 3] = [
    [ 0.8190224379967030, 0.3619062600528904, -0.1288737815209879 ],
    [ 0.0329836539323885, 0.9292868615863434,  0.0361446663506424 ],
    [ 0.0481771893596242, 0.2642395317527308,  0.6335478284694309 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLMS_TO_OKLAB: [[Float; 3]; 3] = [
    [ 0.2104542683093140,  0.7936177747023054, -0.0040720430116193 ],
    [ 1.9779985324311684, -2.4285922420485799,  0.4505937096174110 ],
    [ 0.0259040424655478,  0.7827717124575296, -0.8086757549230774 ],
];

/// Convert coordinates for XYZ to Oklab. This is a one-hop, direct
/// conversion, even though it requires two matrix multiplications and a
/// coordinate-wise cube root.
fn xyz_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply_vector(&XYZ_TO_OKLMS, value);
    multiply_vector(&OKLMS_TO_OKLAB, &[l.cbrt(), m.cbrt(), s.cbrt()])
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert coordinates for sRGB to XYZ. This is a two-hop conversion.
#[inline]
fn srgb_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    let linear_srgb = rgb_to_linear_rgb(value);
    linear_srgb_to_xyz(&linear_srgb)
}

/// Convert coordinates for XYZ to sRGB. This is a two-hop conversion.
#[inline]
fn xyz_to_srgb(value: &[Float; 3]) -> [Float; 3] {
    let linear_srgb = xyz_to_linear_srgb(value);
    linear_rgb_to_rgb(&linear_srgb)
}

/// Convert coordinates for HSL to XYZ. This is a three-hop conversion.
#[inline]
fn hsl_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    let srgb = hsl_to_srgb(value);
    srgb_to_xyz(&srgb)
}

/// Convert coordinates for XYZ to HSL. This is a three-hop conversion.
#[inline]
fn xyz_to_hsl(value: &[Float; 3]) -> [Float; 3] {
    let srgb = xyz_to_srgb(value);
    srgb_to_hsl(&srgb)
}

/// Convert coordinates for HWB to XYZ. This is a three-hop conversion.
#[inline]
fn hwb_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    let srgb = hwb_to_srgb(value);
    srgb_to_xyz(&srgb)
}

/// Convert coordinates for XYZ to HWB. This is a three-hop conversion.
#[inline]
fn xyz_to_hwb(value: &[Float; 3]) -> [Float; 3] {
    let srgb = xyz_to_srgb(value);
    srgb_to_hwb(&srgb)
}

/// Convert coordinates for Oklch to XYZ. This is a two-hop conversion.
#[inline]
fn oklch_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    let oklab = oklch_to_oklab(value);
    oklab_to_xyz(&oklab)
}

/// Convert coordinates for XYZ to Oklch. This is a two-hop conversion.
#[inline]
fn xyz_to_oklch(value: &[Float; 3]) -> [Float; 3] {
    let oklab = xyz_to_oklab(value);
    oklab_to_oklch(&oklab)
}

/// Convert coordinates for HSL to HWB. This is a two-hop conversion within
/// the sRGB branch.
#[inline]
fn hsl_to_hwb(value: &[Float; 3]) -> [Float; 3] {
    let srgb = hsl_to_srgb(value);
    srgb_to_hwb(&srgb)
}

/// Convert coordinates for HWB to HSL. This is a two-hop conversion within
/// the sRGB branch.
#[inline]
fn hwb_to_hsl(value: &[Float; 3]) -> [Float; 3] {
    let srgb = hwb_to_srgb(value);
    srgb_to_hsl(&srgb)
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert the coordinates from one color space to another.
///
/// This function normalizes not-a-number coordinates to zero and then
/// converts them to the targeted color space, which may be the same as the
/// original color space. Conversions within the sRGB branch or between the
/// Oklab variations take direct shortcuts; everything else goes through the
/// XYZ D65 pivot.
#[must_use = "function returns new color coordinates and does not mutate original value"]
pub(crate) fn convert(
    from_space: ColorSpace,
    to_space: ColorSpace,
    coordinates: &[Float; 3],
) -> [Float; 3] {
    use ColorSpace::*;

    // 1. Normalize coordinates. Be done if color spaces are the same.
    let coordinates = normalize(from_space, coordinates);
    if from_space == to_space {
        return coordinates;
    }

    // 2. Handle in-branch conversions that don't go through root XYZ
    match (from_space, to_space) {
        // Single-hop sRGB branch conversions
        (Srgb, LinearSrgb) => return rgb_to_linear_rgb(&coordinates),
        (LinearSrgb, Srgb) => return linear_rgb_to_rgb(&coordinates),
        (Srgb, Hsl) => return srgb_to_hsl(&coordinates),
        (Hsl, Srgb) => return hsl_to_srgb(&coordinates),
        (Srgb, Hwb) => return srgb_to_hwb(&coordinates),
        (Hwb, Srgb) => return hwb_to_srgb(&coordinates),

        // Two-hop sRGB branch conversions
        (Hsl, Hwb) => return hsl_to_hwb(&coordinates),
        (Hwb, Hsl) => return hwb_to_hsl(&coordinates),
        (Hsl, LinearSrgb) => return rgb_to_linear_rgb(&hsl_to_srgb(&coordinates)),
        (LinearSrgb, Hsl) => return srgb_to_hsl(&linear_rgb_to_rgb(&coordinates)),
        (Hwb, LinearSrgb) => return rgb_to_linear_rgb(&hwb_to_srgb(&coordinates)),
        (LinearSrgb, Hwb) => return srgb_to_hwb(&linear_rgb_to_rgb(&coordinates)),

        // Single-hop Oklab variation conversions
        (Oklch, Oklab) => return oklch_to_oklab(&coordinates),
        (Oklab, Oklch) => return oklab_to_oklch(&coordinates),
        _ => (),
    };

    // 3a. Convert from source color space to root XYZ
    let intermediate = match from_space {
        Srgb => srgb_to_xyz(&coordinates),
        LinearSrgb => linear_srgb_to_xyz(&coordinates),
        Hsl => hsl_to_xyz(&coordinates),
        Hwb => hwb_to_xyz(&coordinates),
        Oklab => oklab_to_xyz(&coordinates),
        Oklch => oklch_to_xyz(&coordinates),
        Xyz => coordinates,
    };

    // 3b. Convert from root XYZ to target color space on different branch
    match to_space {
        Srgb => xyz_to_srgb(&intermediate),
        LinearSrgb => xyz_to_linear_srgb(&intermediate),
        Hsl => xyz_to_hsl(&intermediate),
        Hwb => xyz_to_hwb(&intermediate),
        Oklab => xyz_to_oklab(&intermediate),
        Oklch => xyz_to_oklch(&intermediate),
        Xyz => intermediate,
    }
}

#[cfg(test)]
#[allow(clippy::excessive_precision)]
mod test {
    use super::*;
    use crate::core::{assert_same_coordinates, ColorSpace::*};
    use crate::Float;

    struct Representations {
        srgb: [Float; 3],
        linear_srgb: [Float; 3],
        oklch: [Float; 3],
        oklab: [Float; 3],
        xyz: [Float; 3],
    }

    const BLACK: Representations = Representations {
        // #000000
        srgb: [0.0, 0.0, 0.0],
        linear_srgb: [0.0, 0.0, 0.0],
        oklch: [0.0, 0.0, Float::NAN],
        oklab: [0.0, 0.0, 0.0],
        xyz: [0.0, 0.0, 0.0],
    };

    const YELLOW: Representations = Representations {
        // #ffca00
        srgb: [1.0, 0.792156862745098, 0.0],
        linear_srgb: [1.0, 0.5906188409193369, 0.0],
        oklch: [0.8613332073307732, 0.1760097742886813, 89.440876452466],
        oklab: [
            0.8613332073307732,
            0.0017175723640959761,
            0.17600139371700052,
        ],
        xyz: [0.6235868473237722, 0.635031101987136, 0.08972950140152941],
    };

    const BLUE: Representations = Representations {
        // #3178ea
        srgb: [0.19215686274509805, 0.47058823529411764, 0.9176470588235294],
        linear_srgb: [
            0.030713443732993635,
            0.18782077230067787,
            0.8227857543962835,
        ],
        oklch: [0.5909012953108558, 0.18665606306724153, 259.66681920272595],
        oklab: [
            0.5909012953108558,
            -0.03348086515869664,
            -0.1836287492414715,
        ],
        xyz: [0.22832473003420622, 0.20025321836938534, 0.80506528557483],
    };

    const WHITE: Representations = Representations {
        // #ffffff
        srgb: [1.0, 1.0, 1.0],
        linear_srgb: [1.0, 1.0, 1.0],
        oklch: [1.0000000000000002, 0.0, Float::NAN],
        oklab: [1.0000000000000002, -4.996003610813204e-16, 0.0],
        xyz: [0.9504559270516717, 1.0, 1.0890577507598784],
    };

    #[test]
    fn test_conversions() {
        for color in [&BLACK, &YELLOW, &BLUE, &WHITE] {
            // Test all one-hop conversions along the pivot path
            let linear_srgb = rgb_to_linear_rgb(&color.srgb);
            assert_same_coordinates!(LinearSrgb, &linear_srgb, &color.linear_srgb);

            let srgb = linear_rgb_to_rgb(&linear_srgb);
            assert_same_coordinates!(Srgb, &srgb, &color.srgb);

            let xyz = linear_srgb_to_xyz(&linear_srgb);
            assert_same_coordinates!(Xyz, &xyz, &color.xyz);

            let also_linear_srgb = xyz_to_linear_srgb(&xyz);
            assert_same_coordinates!(LinearSrgb, &also_linear_srgb, &linear_srgb);

            let oklab = xyz_to_oklab(&xyz);
            assert_same_coordinates!(Oklab, &oklab, &color.oklab);

            let and_again_xyz = oklab_to_xyz(&oklab);
            assert_same_coordinates!(Xyz, &and_again_xyz, &xyz);

            let oklch = oklab_to_oklch(&oklab);
            assert_same_coordinates!(Oklch, &oklch, &color.oklch);

            let also_oklab = oklch_to_oklab(&oklch);
            assert_same_coordinates!(Oklab, &also_oklab, &oklab);

            // The renotations must round-trip through gamma-corrected sRGB.
            let hsl = srgb_to_hsl(&color.srgb);
            assert_same_coordinates!(Srgb, &hsl_to_srgb(&hsl), &color.srgb);

            let hwb = srgb_to_hwb(&color.srgb);
            assert_same_coordinates!(Srgb, &hwb_to_srgb(&hwb), &color.srgb);
        }
    }

    #[test]
    fn test_srgb_xyz_roundtrip_grid() {
        let steps = [0.0, 0.25, 0.5, 0.75, 1.0];
        for r in steps {
            for g in steps {
                for b in steps {
                    let srgb = [r, g, b];
                    let [r2, g2, b2] = xyz_to_srgb(&srgb_to_xyz(&srgb));
                    for (before, after) in [(r, r2), (g, g2), (b, b2)] {
                        assert!(
                            (before - after).abs() < 1e-9,
                            "sRGB {:?} came back as {:?}",
                            srgb,
                            [r2, g2, b2]
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_oklch_xyz_roundtrip_grid() {
        for l in [0.05, 0.25, 0.5, 0.75, 0.95] {
            for c in [0.05, 0.1, 0.25, 0.5, 1.0] {
                for h in [0.0, 30.0, 90.0, 179.5, 240.0, 359.0] {
                    let oklch = [l, c, h];
                    let [l2, c2, h2] = xyz_to_oklch(&oklch_to_xyz(&oklch));
                    assert!((l - l2).abs() < 1e-6, "lightness drifted for {:?}", oklch);
                    assert!((c - c2).abs() < 1e-6, "chroma drifted for {:?}", oklch);
                    // Hue is circular: 0 and 360 are the same angle.
                    let hue_drift = (h - h2).abs();
                    let hue_drift = hue_drift.min(360.0 - hue_drift);
                    assert!(hue_drift < 1e-6, "hue drifted for {:?}", oklch);
                }
            }
        }

        // The hue of a near-achromatic color is undefined and must not be
        // asserted; chroma still collapses cleanly.
        let [l2, c2, h2] = xyz_to_oklch(&oklch_to_xyz(&[0.5, 0.0, 123.0]));
        assert!((l2 - 0.5).abs() < 1e-6);
        assert!(c2.abs() < 1e-6);
        assert!(h2.is_nan());
    }

    #[test]
    fn test_hsl_notation() {
        // Primaries have exact hues 120 degrees apart.
        assert_same_coordinates!(Hsl, &srgb_to_hsl(&[1.0, 0.0, 0.0]), &[0.0, 1.0, 0.5]);
        assert_same_coordinates!(Hsl, &srgb_to_hsl(&[0.0, 1.0, 0.0]), &[120.0, 1.0, 0.5]);
        assert_same_coordinates!(Hsl, &srgb_to_hsl(&[0.0, 0.0, 1.0]), &[240.0, 1.0, 0.5]);
        assert_same_coordinates!(Hsl, &srgb_to_hsl(&[0.0, 1.0, 1.0]), &[180.0, 1.0, 0.5]);

        // Achromatic colors have a powerless, not-a-number hue.
        let [h, s, l] = srgb_to_hsl(&[0.5, 0.5, 0.5]);
        assert!(h.is_nan());
        assert_eq!(s, 0.0);
        assert_eq!(l, 0.5);

        // Negative hues wrap around the circle.
        assert_same_coordinates!(
            Srgb,
            &hsl_to_srgb(&[-240.0, 1.0, 0.5]),
            &hsl_to_srgb(&[120.0, 1.0, 0.5]),
        );
    }

    #[test]
    fn test_hwb_notation() {
        assert_same_coordinates!(Hwb, &srgb_to_hwb(&[1.0, 0.0, 0.0]), &[0.0, 0.0, 0.0]);
        assert_same_coordinates!(
            Hwb,
            &srgb_to_hwb(&[0.25, 1.0, 0.25]),
            &[120.0, 0.25, 0.0],
        );

        // Whiteness and blackness summing to one or more denote a gray; the
        // hue is powerless.
        assert_same_coordinates!(Srgb, &hwb_to_srgb(&[77.0, 1.0, 1.0]), &[0.5, 0.5, 0.5]);
        assert_same_coordinates!(Srgb, &hwb_to_srgb(&[77.0, 3.0, 1.0]), &[0.75, 0.75, 0.75]);

        let [h, w, b] = srgb_to_hwb(&[0.25, 0.25, 0.25]);
        assert!(h.is_nan());
        assert_eq!(w, 0.25);
        assert_eq!(b, 0.75);
    }

    #[test]
    fn test_gamma_sign_preservation() {
        let [r, g, b] = rgb_to_linear_rgb(&[-0.5, -0.01, 0.5]);
        assert!(r < 0.0);
        assert!(g < 0.0);
        assert!(b > 0.0);

        let back = linear_rgb_to_rgb(&[r, g, b]);
        assert_same_coordinates!(Srgb, &back, &[-0.5, -0.01, 0.5]);
    }

    #[test]
    fn test_out_of_gamut_clipping() {
        // A highly chromatic green in Oklch lands outside the sRGB gamut;
        // the conversion pins every channel to the cube.
        let xyz = oklch_to_xyz(&[0.9, 0.4, 150.0]);
        let [r, g, b] = xyz_to_linear_srgb(&xyz);
        for channel in [r, g, b] {
            assert!((0.0..=1.0).contains(&channel), "channel {} out of range", channel);
        }
    }

    #[test]
    fn test_convert_via_pivot() {
        // HSL to Oklch crosses from the sRGB branch through XYZ.
        let oklch = convert(Hsl, Oklch, &[0.0, 1.0, 0.5]);
        let srgb = convert(Oklch, Srgb, &oklch);
        assert_same_coordinates!(Srgb, &srgb, &[1.0, 0.0, 0.0]);

        // Normalization zeroes a not-a-number hue before converting.
        let gray = convert(Hsl, Srgb, &[Float::NAN, 0.7, 0.25]);
        assert_same_coordinates!(Srgb, &gray, &[0.25, 0.25, 0.25]);
    }
}
