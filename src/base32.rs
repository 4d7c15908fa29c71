//! Base-32 alphabet used by geohash strings.
//!
//! The alphabet is `0123456789bcdefghjkmnpqrstuvwxyz` (base-32 without `a`,
//! `i`, `l`, `o`). Its order matches ASCII order, so lexicographic comparison
//! of encoded strings agrees with numeric comparison of the underlying bits.
//! Range scans on a geohash column depend on that agreement.

use crate::error::{GeoRangeError, Result};

/// Number of bits encoded by one geohash character.
pub const BITS_PER_CHAR: usize = 5;

/// Numeric weight of bit index `0..5` within a character, most significant
/// bit first.
pub const BIT_MASKS: [u8; BITS_PER_CHAR] = [16, 8, 4, 2, 1];

pub(crate) const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

const fn build_reverse_table() -> [i8; 128] {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
}

const REVERSE: [i8; 128] = build_reverse_table();

/// Converts a value in `0..32` to its alphabet character.
///
/// # Errors
///
/// Returns [`GeoRangeError::InvalidValue`] when `value` is 32 or more.
pub fn value_to_char(value: u8) -> Result<char> {
    if usize::from(value) < ALPHABET.len() {
        Ok(ALPHABET[usize::from(value)] as char)
    } else {
        Err(GeoRangeError::InvalidValue(value))
    }
}

/// Converts an alphabet character to its value in `0..32`.
///
/// # Errors
///
/// Returns [`GeoRangeError::InvalidChar`] when `c` is outside the alphabet.
pub fn char_to_value(c: char) -> Result<u8> {
    match REVERSE.get(c as usize) {
        Some(&v) if v >= 0 => Ok(v as u8),
        _ => Err(GeoRangeError::InvalidChar(c)),
    }
}

/// Returns `true` when `s` is non-empty and every character is in the
/// alphabet.
pub fn is_valid(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| matches!(REVERSE.get(b as usize), Some(&v) if v >= 0))
}

/// Character for a 5-bit value the caller has already bounded below 32.
#[inline]
pub(crate) fn char_for(value: u8) -> char {
    ALPHABET[usize::from(value)] as char
}

/// Value of a character the caller has already validated as alphabet.
#[inline]
pub(crate) fn value_for(c: u8) -> u8 {
    REVERSE[usize::from(c)] as u8
}
