//! CoT type -> SIDC decoding.
//!
//! A CoT type is read by absolute character offset, not by splitting on `-`:
//! detail fields sit every two characters (value + separator) while SIDC
//! fields are one character wide.

use crate::sidc::{
    Sidc, AFFILIATION_INDEX, BATTLE_DIMENSION_INDEX, CODING_SCHEME_INDEX, PLACEHOLDER, SIDC_LEN,
    STATUS_INDEX,
};

/// Top-level CoT category that carries a symbol.
pub const ATOM: char = 'a';

/// Coding scheme written for every atom ("warfighting").
pub const WARFIGHTING: char = 's';

/// Status written for every atom ("present").
pub const PRESENT: char = 'p';

/// Affiliation used when the CoT type is too short to carry one.
pub const DEFAULT_AFFILIATION: char = 'O';

/// Battle dimension used when the CoT type is too short to carry one.
pub const DEFAULT_DIMENSION: char = 'X';

const AFFILIATION_OFFSET: usize = 2;
const DIMENSION_OFFSET: usize = 4;

/// `(cot_offset, sidc_offset)` pairs for the function-ID detail fields.
pub const DETAIL_FIELDS: [(usize, usize); 6] = [(6, 4), (8, 5), (10, 6), (12, 7), (14, 8), (16, 9)];

/// Characters of the CoT type that can influence the result.
const COT_WINDOW: usize = 17;

/// Decode a CoT event type into its SIDC.
///
/// Total over all inputs: anything that is not an atom (`a...`) yields
/// [`Sidc::UNKNOWN`], and positions the input is too short to supply keep
/// their defaults. Characters past offset 16 are ignored.
///
/// ```
/// use cot2525_core::decode;
///
/// assert_eq!(decode("a-f-A-M-F-Q").to_string(), "sfApMFQ--------");
/// assert_eq!(decode("b-m-p-s-p-i").to_string(), "---------------");
/// ```
pub fn decode(cot: &str) -> Sidc {
    let mut head = [None; COT_WINDOW];
    for (slot, c) in head.iter_mut().zip(cot.chars()) {
        *slot = Some(c);
    }

    if head[0] != Some(ATOM) {
        return Sidc::UNKNOWN;
    }

    let affiliation = head[AFFILIATION_OFFSET].unwrap_or(DEFAULT_AFFILIATION);
    let dimension = head[DIMENSION_OFFSET].unwrap_or(DEFAULT_DIMENSION);

    let mut sidc = [PLACEHOLDER; SIDC_LEN];
    for &(from, to) in &DETAIL_FIELDS {
        match head[from] {
            Some(c) => sidc[to] = c,
            None => break,
        }
    }

    sidc[CODING_SCHEME_INDEX] = WARFIGHTING;
    sidc[AFFILIATION_INDEX] = affiliation;
    sidc[BATTLE_DIMENSION_INDEX] = dimension;
    sidc[STATUS_INDEX] = PRESENT;

    Sidc::from_chars(sidc)
}
