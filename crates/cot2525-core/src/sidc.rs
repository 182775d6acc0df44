//! MIL-STD-2525B Symbol Identification Code value type.
//!
//! Field layout (one character per position unless noted):
//!
//! | offset | field            |
//! |--------|------------------|
//! | 0      | coding scheme    |
//! | 1      | affiliation      |
//! | 2      | battle dimension |
//! | 3      | status           |
//! | 4..10  | function ID      |
//! | 10..12 | symbol modifier  |
//! | 12..14 | country code     |
//! | 14     | order of battle  |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of characters in every SIDC.
pub const SIDC_LEN: usize = 15;

/// Placeholder for an unspecified position.
pub const PLACEHOLDER: char = '-';

/// File extension of pre-rendered symbol images.
pub const IMAGE_EXTENSION: &str = "png";

pub(crate) const CODING_SCHEME_INDEX: usize = 0;
pub(crate) const AFFILIATION_INDEX: usize = 1;
pub(crate) const BATTLE_DIMENSION_INDEX: usize = 2;
pub(crate) const STATUS_INDEX: usize = 3;
pub(crate) const FUNCTION_START_INDEX: usize = 4;
const SYMBOL_MODIFIER_START_INDEX: usize = 10;
const COUNTRY_CODE_START_INDEX: usize = 12;
const ORDER_OF_BATTLE_INDEX: usize = 14;

/// Errors from parsing an SIDC supplied as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SidcError {
    #[error("SIDC must be exactly 15 characters, got {0}")]
    Length(usize),
}

/// A 15-character symbol identification code.
///
/// The length invariant is enforced by the representation: there is no way
/// to build a `Sidc` with more or fewer positions. Any character may occupy a
/// position, so every decoded value parses back from its `Display` form.
/// Whether a SIDC is usable as a file name is the store's concern.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sidc([char; SIDC_LEN]);

impl Sidc {
    /// The "no symbol determined" code: every position is a placeholder.
    pub const UNKNOWN: Sidc = Sidc([PLACEHOLDER; SIDC_LEN]);

    pub(crate) fn from_chars(chars: [char; SIDC_LEN]) -> Self {
        Self(chars)
    }

    /// True when no position carries information.
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }

    pub fn coding_scheme(&self) -> char {
        self.0[CODING_SCHEME_INDEX]
    }

    pub fn affiliation(&self) -> char {
        self.0[AFFILIATION_INDEX]
    }

    pub fn dimension(&self) -> char {
        self.0[BATTLE_DIMENSION_INDEX]
    }

    pub fn status(&self) -> char {
        self.0[STATUS_INDEX]
    }

    /// Six-character function identifier (offsets 4..10).
    pub fn function_id(&self) -> String {
        self.slice(FUNCTION_START_INDEX, SYMBOL_MODIFIER_START_INDEX)
    }

    pub fn modifier(&self) -> String {
        self.slice(SYMBOL_MODIFIER_START_INDEX, COUNTRY_CODE_START_INDEX)
    }

    pub fn country(&self) -> String {
        self.slice(COUNTRY_CODE_START_INDEX, ORDER_OF_BATTLE_INDEX)
    }

    pub fn order_of_battle(&self) -> char {
        self.0[ORDER_OF_BATTLE_INDEX]
    }

    /// Image repository key, e.g. `sfAPMFQ--------.png`.
    pub fn image_key(&self) -> String {
        format!("{self}.{IMAGE_EXTENSION}")
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.0[start..end].iter().collect()
    }
}

impl Default for Sidc {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for Sidc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Sidc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sidc({self})")
    }
}

impl FromStr for Sidc {
    type Err = SidcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != SIDC_LEN {
            return Err(SidcError::Length(count));
        }
        let mut chars = [PLACEHOLDER; SIDC_LEN];
        for (slot, c) in chars.iter_mut().zip(s.chars()) {
            *slot = c;
        }
        Ok(Self(chars))
    }
}

impl TryFrom<String> for Sidc {
    type Error = SidcError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Sidc> for String {
    fn from(sidc: Sidc) -> Self {
        sidc.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_is_all_placeholders() {
        assert_eq!(Sidc::UNKNOWN.to_string(), "---------------");
        assert!(Sidc::UNKNOWN.is_unknown());
        assert!(Sidc::default().is_unknown());
    }

    #[test]
    fn field_accessors() {
        let sidc: Sidc = "SFAPMFQ---USB-C".parse().unwrap();
        assert_eq!(sidc.coding_scheme(), 'S');
        assert_eq!(sidc.affiliation(), 'F');
        assert_eq!(sidc.dimension(), 'A');
        assert_eq!(sidc.status(), 'P');
        assert_eq!(sidc.function_id(), "MFQ---");
        assert_eq!(sidc.modifier(), "US");
        assert_eq!(sidc.country(), "B-");
        assert_eq!(sidc.order_of_battle(), 'C');
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!("sfap".parse::<Sidc>(), Err(SidcError::Length(4)));
        assert_eq!(
            "sfapmfq---------".parse::<Sidc>(),
            Err(SidcError::Length(16))
        );
    }

    #[test]
    fn parse_accepts_any_character() {
        for raw in ["sfap/fq--------", "sfap\\fq--------", "sfap\nfq--------"] {
            let sidc: Sidc = raw.parse().unwrap();
            assert_eq!(sidc.to_string(), raw);
        }
        assert_eq!("sfGp/é---------".parse::<Sidc>().unwrap().status(), 'p');
    }

    #[test]
    fn image_key_appends_png() {
        let sidc: Sidc = "sfapmfq--------".parse().unwrap();
        assert_eq!(sidc.image_key(), "sfapmfq--------.png");
    }

    #[test]
    fn serde_as_plain_string() {
        let sidc: Sidc = "sfapmfq--------".parse().unwrap();
        let json = serde_json::to_string(&sidc).unwrap();
        assert_eq!(json, "\"sfapmfq--------\"");
        let back: Sidc = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sidc);
        assert!(serde_json::from_str::<Sidc>("\"short\"").is_err());
    }
}
