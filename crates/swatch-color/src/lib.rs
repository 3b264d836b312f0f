// SPDX-License-Identifier: MIT
//
// swatch-color — the color-science engine behind swatchbook.
//
// Every palette and every contrast judgment in swatchbook is computed by
// walking a color through a fixed chain of colorimetric spaces:
//
//   sRGB ↔ Linear RGB ↔ CIE XYZ ↔ CIE LAB ↔ CIE LCH
//
// Each space is its own type. Conversions are defined only between
// adjacent spaces, so reaching LCH from sRGB is an explicit composition
// and the compiler always knows which space a triple is in.
//
// Parsing and formatting (hex strings, "R G B" triples, CSS custom
// properties) lives in `parse`. Resolving `var(--name)` against a live
// style context is not this crate's job; callers plug that in through
// the `StyleResolver` trait.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Channel names (r/g/b, l/c/h, x/y/z) are inherently similar.
#![allow(clippy::similar_names)]

pub mod error;
pub mod parse;
pub mod space;
pub mod transfer;

pub use error::ColorError;
pub use parse::{
    INVALID, NoStyles, Resolved, StyleResolver, format_hex, parse_hex, parse_triple, resolve_color,
    resolve_hex, tailwind_triple,
};
pub use space::{Lab, Lch, LinearRgb, Srgb, Xyz};
