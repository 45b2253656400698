//! The A-Z alphabet: letter/number mapping, cleaning and padding

use crate::internal::MODULUS;

/// The 26 letters in index order
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Filler appended to odd-length plaintext
pub const PAD_LETTER: char = 'X';

/// Index 0..=25 of an uppercase letter, `None` for anything else
pub fn letter_to_num(c: char) -> Option<u8> {
    if c.is_ascii_uppercase() {
        Some(c as u8 - b'A')
    } else {
        None
    }
}

/// Letter for an index; values are taken mod 26
pub fn num_to_letter(n: u8) -> char {
    ALPHABET[(n % MODULUS) as usize] as char
}

/// Keep only ASCII letters, uppercased.
///
/// The flag is true when the result differs from a plain uppercase of the
/// input, i.e. something other than case was dropped (spaces, digits,
/// punctuation, non-ASCII letters).
pub fn normalize(text: &str) -> (String, bool) {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let was_modified = cleaned != text.to_uppercase();
    (cleaned, was_modified)
}

/// Append a single `X` to odd-length text
pub fn pad(text: &str) -> String {
    let mut padded = String::with_capacity(text.len() + 1);
    padded.push_str(text);
    if text.len() % 2 != 0 {
        padded.push(PAD_LETTER);
    }
    padded
}

/// Convert normalized text to 0..=25 values
pub(crate) fn text_to_nums(text: &str) -> Vec<u8> {
    text.chars().filter_map(letter_to_num).collect()
}
