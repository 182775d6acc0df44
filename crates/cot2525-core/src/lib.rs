//! cot2525 Core Library
//!
//! Translates Cursor-on-Target (CoT) event types such as `a-f-A-M-F-Q` into
//! 15-character MIL-STD-2525B Symbol Identification Codes (SIDCs).
//!
//! ## Key Components
//!
//! - [`decode`]: total, allocation-free CoT -> SIDC mapping
//! - [`Sidc`]: fixed-width symbol code value type
//! - [`CotType`]: builder for atom CoT types, plus [`parents`] for
//!   progressively less specific fallbacks

pub mod cot;
pub mod decode;
pub mod sidc;

pub use cot::{parents, Affiliation, CotType, Dimension, Parents};
pub use decode::{decode, DETAIL_FIELDS};
pub use sidc::{Sidc, SidcError, SIDC_LEN};

/// cot2525 version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
