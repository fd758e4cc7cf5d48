//! # Swatchbook
//!
//! Swatchbook is the color engine behind a palette editor: exact conversions
//! between the notations users type and a single canonical representation,
//! plus the WCAG 2.x contrast arithmetic a palette's pairwise contrast matrix
//! is built from.
//!
//! The main abstractions are:
//!
//!   * [`Color`] implements an **immutable, XYZ-canonical color value**. It is
//!     constructed through named factories that sanitize their inputs
//!     ([`Color::from_rgb`], [`Color::from_hsl`], [`Color::from_hwb`],
//!     [`Color::from_oklch`], …) and exposes every other notation as a pure,
//!     derived view.
//!   * [`ColorSpace`] enumerates the supported color spaces and renotations.
//!     All conversions between unrelated spaces go through CIE XYZ with the
//!     D65 standard illuminant as the pivot, so there is a single source of
//!     conversion error rather than combinatorial cross-paths.
//!   * [`relative_luminance`], [`contrast_ratio`], and [`wcag_category`]
//!     implement the **WCAG 2.x contrast evaluator** as pure functions;
//!     [`WcagCategory`] is the resulting conformance bucket.
//!
//! Colors parse from the notations a palette editor accepts—hashed
//! hexadecimal as well as the `rgb()`, `hsl()`, `hwb()`, and `oklch()`
//! functional forms—via [`Color`]'s [`FromStr`](std::str::FromStr)
//! implementation. Formatting for display rounds to a fixed precision; the
//! value type itself never rounds.

mod core;
pub mod error;
mod object;

#[doc(hidden)]
pub use core::to_eq_bits;
pub use core::{contrast_ratio, relative_luminance, wcag_category, ColorSpace, WcagCategory};
pub use object::Color;

/// The floating point number type used for color coordinates.
pub type Float = f64;

/// The unsigned integer with the same number of bits as [`Float`].
pub type Bits = u64;
