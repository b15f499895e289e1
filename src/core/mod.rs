//! Core entities, lifecycle state machine, and error taxonomy.
//!
//! Everything here is pure data — no I/O. The entities mirror the NF-e
//! layout fields they feed (natOp, CFOP, NCM, CRT, finNFe).

mod correlation;
mod error;
mod events;
mod status;
mod types;

pub use correlation::correlation_ref;
pub use error::*;
pub use events::*;
pub use status::*;
pub use types::*;
