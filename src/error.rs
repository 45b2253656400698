//! Error types for the Hill cipher library.

use thiserror::Error;

/// Errors produced by the Hill cipher library.
///
/// Every variant is recoverable: operations are independent and hold no
/// state, so a failed call never affects later ones.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HillError {
    /// Key determinant shares a factor with 26 and has no modular inverse.
    #[error("key is not invertible: determinant {determinant} has no inverse modulo 26")]
    InvalidKey { determinant: u8 },

    /// A key entry lies outside [0, 25].
    #[error("key entry K[{row}][{col}] = {value} is outside the range 0..=25")]
    KeyEntryOutOfRange { row: usize, col: usize, value: i64 },

    /// Key text could not be parsed into four integers.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// A block holds a character outside A-Z.
    #[error("'{found}' is not a letter A-Z")]
    NotALetter { found: char },

    /// No letters A-Z remain after cleaning the input.
    #[error("input contains no alphabetic characters (A-Z)")]
    EmptyInput,

    /// Cleaned ciphertext does not split into whole blocks.
    #[error("ciphertext has an odd number of letters ({length}); it may be truncated or corrupted")]
    OddLengthCiphertext { length: usize },

    /// Encoded input could not be turned back into text.
    #[error("failed to decode {format} input: {reason}")]
    Decode { format: &'static str, reason: String },

    /// Random key generation ran out of attempts.
    #[error("internal error: no invertible key found after {attempts} attempts")]
    Internal { attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_key() {
        let err = HillError::InvalidKey { determinant: 0 };
        assert_eq!(
            err.to_string(),
            "key is not invertible: determinant 0 has no inverse modulo 26"
        );
    }

    #[test]
    fn test_display_out_of_range() {
        let err = HillError::KeyEntryOutOfRange { row: 1, col: 0, value: 30 };
        assert_eq!(err.to_string(), "key entry K[1][0] = 30 is outside the range 0..=25");
    }

    #[test]
    fn test_display_empty_input() {
        assert_eq!(
            HillError::EmptyInput.to_string(),
            "input contains no alphabetic characters (A-Z)"
        );
    }

    #[test]
    fn test_display_not_a_letter() {
        assert_eq!(HillError::NotALetter { found: '!' }.to_string(), "'!' is not a letter A-Z");
    }

    #[test]
    fn test_display_odd_length() {
        let err = HillError::OddLengthCiphertext { length: 3 };
        assert!(err.to_string().contains("odd number of letters (3)"));
    }

    #[test]
    fn test_display_decode() {
        let err = HillError::Decode { format: "base64", reason: "bad padding".into() };
        assert_eq!(err.to_string(), "failed to decode base64 input: bad padding");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(HillError::EmptyInput, HillError::EmptyInput);
        assert_ne!(
            HillError::InvalidKey { determinant: 2 },
            HillError::InvalidKey { determinant: 4 }
        );
    }
}
