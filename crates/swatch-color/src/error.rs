// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while turning user-facing color strings into colors.
///
/// Malformed hex is deliberately absent: [`parse_hex`](crate::parse_hex)
/// reports it as `None` so UI code can show a "no preview" state without
/// handling an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string did not contain three decimal components.
    #[error("invalid RGB string: {0:?}")]
    InvalidFormat(String),
    /// A `var(--name)` reference had no value in the style context.
    #[error("unknown CSS variable: {0}")]
    UnknownVariable(String),
    /// CSS variables referenced each other more deeply than we follow.
    #[error("CSS variable {0} nests too deeply (cycle?)")]
    VariableDepth(String),
    /// The input resolved to something that is not a color.
    #[error("not a color: {0:?}")]
    NotAColor(String),
}
