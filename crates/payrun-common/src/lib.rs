//! Shared utilities for payrun crates.
//!
//! Cell rendering for the document writer and scalar conversions used when
//! source values (JSON scalars, sheet cells) are compared or projected.

pub mod cell;

pub use cell::{
    any_to_cell, any_to_string, format_numeric, json_to_text, parse_i64,
};
