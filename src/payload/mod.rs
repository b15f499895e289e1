//! Authority payload construction — pure transformation, no I/O.
//!
//! Turns (profile, document, items) into the gateway's request shape:
//! identifiers stripped to digits, text uppercased and truncated to the
//! NF-e layout limits, enums mapped to authority codes, and every amount
//! rounded exactly once (2 decimal places, unit prices 4), half-up.

mod builder;
pub mod codes;
pub mod sanitize;
mod types;

pub use builder::{build_payload, round_amount, round_unit_price};
pub use types::*;
