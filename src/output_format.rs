//! Output format utilities for encryption/decryption results
//!
//! Cipher output is always A-Z text. These formats only change how that
//! text is written out, and `decode` turns any of them back into letters
//! before decryption.

use base32::Alphabet;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::alphabet::{letter_to_num, num_to_letter};
use crate::error::HillError;

/// Classic telegraph group width
pub const DEFAULT_GROUP_SIZE: usize = 5;

/// RFC 4648 base32 with `=` padding
const BASE32: Alphabet = Alphabet::Rfc4648 { padding: true };

/// Output format for encryption/decryption results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain A-Z letters
    #[default]
    Letters,
    /// Letters in space-separated groups of the given width
    Groups(usize),
    /// Space-separated numbers 0-25
    Numeric,
    /// Base64 of the ASCII letters
    Base64,
    /// Hexadecimal of the ASCII letters (lowercase)
    HexLowercase,
    /// Hexadecimal of the ASCII letters (uppercase)
    HexUppercase,
    /// Base32 of the ASCII letters
    Base32,
}

/// Format names as written in config files and on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    #[default]
    Letters,
    Groups,
    Numeric,
    Base64,
    HexLowercase,
    HexUppercase,
    Base32,
}

impl FormatKind {
    /// Resolve to a concrete format; `group_size` only matters for `Groups`
    pub fn with_group_size(self, group_size: usize) -> OutputFormat {
        match self {
            FormatKind::Letters => OutputFormat::Letters,
            FormatKind::Groups => OutputFormat::Groups(group_size.max(1)),
            FormatKind::Numeric => OutputFormat::Numeric,
            FormatKind::Base64 => OutputFormat::Base64,
            FormatKind::HexLowercase => OutputFormat::HexLowercase,
            FormatKind::HexUppercase => OutputFormat::HexUppercase,
            FormatKind::Base32 => OutputFormat::Base32,
        }
    }
}

/// Split letters into space-separated groups
fn encode_groups(text: &str, size: usize) -> String {
    let size = size.max(1);
    let mut out = String::with_capacity(text.len() + text.len() / size);
    for (i, c) in text.chars().enumerate() {
        if i > 0 && i % size == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Letters to space-separated indices; non-letters are skipped
fn encode_numeric(text: &str) -> String {
    text.chars()
        .filter_map(letter_to_num)
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Indices separated by whitespace and/or commas back to letters
fn decode_numeric(encoded: &str) -> Result<String, HillError> {
    encoded
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|token| match token.parse::<u8>() {
            Ok(n) if n < 26 => Ok(num_to_letter(n)),
            _ => Err(HillError::Decode {
                format: "numeric",
                reason: format!("'{}' is not a number in 0..=25", token),
            }),
        })
        .collect()
}

fn utf8(format: &'static str, bytes: Vec<u8>) -> Result<String, HillError> {
    String::from_utf8(bytes).map_err(|e| HillError::Decode { format, reason: e.to_string() })
}

impl OutputFormat {
    /// Short name used in messages
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Letters => "letters",
            OutputFormat::Groups(_) => "groups",
            OutputFormat::Numeric => "numeric",
            OutputFormat::Base64 => "base64",
            OutputFormat::HexLowercase => "hex-lowercase",
            OutputFormat::HexUppercase => "hex-uppercase",
            OutputFormat::Base32 => "base32",
        }
    }

    /// Encode A-Z text to the specified format
    pub fn encode(&self, text: &str) -> String {
        match self {
            OutputFormat::Letters => text.to_string(),
            OutputFormat::Groups(size) => encode_groups(text, *size),
            OutputFormat::Numeric => encode_numeric(text),
            OutputFormat::Base64 => STANDARD.encode(text.as_bytes()),
            OutputFormat::HexLowercase => hex::encode(text.as_bytes()),
            OutputFormat::HexUppercase => hex::encode_upper(text.as_bytes()),
            OutputFormat::Base32 => base32::encode(BASE32, text.as_bytes()),
        }
    }

    /// Decode from the specified format back to text.
    ///
    /// Letter formats pass through unchanged; cleaning happens later in the
    /// cipher itself.
    pub fn decode(&self, encoded: &str) -> Result<String, HillError> {
        let encoded = encoded.trim();
        let name = self.name();
        match self {
            OutputFormat::Letters | OutputFormat::Groups(_) => Ok(encoded.to_string()),
            OutputFormat::Numeric => decode_numeric(encoded),
            OutputFormat::Base64 => {
                let bytes = STANDARD
                    .decode(encoded)
                    .map_err(|e| HillError::Decode { format: name, reason: e.to_string() })?;
                utf8(name, bytes)
            }
            OutputFormat::HexLowercase | OutputFormat::HexUppercase => {
                let bytes = hex::decode(encoded)
                    .map_err(|e| HillError::Decode { format: name, reason: e.to_string() })?;
                utf8(name, bytes)
            }
            OutputFormat::Base32 => {
                let bytes = base32::decode(BASE32, encoded).ok_or_else(|| HillError::Decode {
                    format: name,
                    reason: "invalid base32".to_string(),
                })?;
                utf8(name, bytes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OutputFormat; 7] = [
        OutputFormat::Letters,
        OutputFormat::Groups(5),
        OutputFormat::Numeric,
        OutputFormat::Base64,
        OutputFormat::HexLowercase,
        OutputFormat::HexUppercase,
        OutputFormat::Base32,
    ];

    #[test]
    fn test_decode_inverts_encode() {
        let text = "HIOZHNQWERTYZ";
        for format in ALL {
            let encoded = format.encode(text);
            let decoded = format.decode(&encoded).unwrap();
            assert_eq!(decoded.replace(' ', ""), text, "format {}", format.name());
        }
    }

    #[test]
    fn test_groups() {
        assert_eq!(OutputFormat::Groups(5).encode("ABCDEFGHIJKL"), "ABCDE FGHIJ KL");
        assert_eq!(OutputFormat::Groups(2).encode("ABCD"), "AB CD");
        assert_eq!(OutputFormat::Groups(0).encode("ABC"), "A B C");
        assert_eq!(OutputFormat::Groups(5).encode(""), "");
    }

    #[test]
    fn test_numeric() {
        assert_eq!(OutputFormat::Numeric.encode("HIOZ"), "7 8 14 25");
        assert_eq!(OutputFormat::Numeric.decode("7, 8,14 25").unwrap(), "HIOZ");
    }

    #[test]
    fn test_numeric_rejects_out_of_range() {
        assert!(matches!(
            OutputFormat::Numeric.decode("7 26"),
            Err(HillError::Decode { format: "numeric", .. })
        ));
        assert!(OutputFormat::Numeric.decode("7 x").is_err());
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(OutputFormat::Base64.encode("HI"), "SEk=");
        assert_eq!(OutputFormat::HexLowercase.encode("HI"), "4849");
        assert_eq!(OutputFormat::Base32.encode("HI"), "JBEQ====");
    }

    #[test]
    fn test_bad_input() {
        assert!(matches!(
            OutputFormat::Base64.decode("***"),
            Err(HillError::Decode { format: "base64", .. })
        ));
        assert!(OutputFormat::HexLowercase.decode("zz").is_err());
        assert!(OutputFormat::Base32.decode("1!").is_err());
        // valid hex, invalid UTF-8
        assert!(OutputFormat::HexUppercase.decode("FF").is_err());
    }

    #[test]
    fn test_kind_resolution() {
        assert_eq!(FormatKind::Groups.with_group_size(4), OutputFormat::Groups(4));
        assert_eq!(FormatKind::Groups.with_group_size(0), OutputFormat::Groups(1));
        assert_eq!(FormatKind::Base64.with_group_size(4), OutputFormat::Base64);
    }
}
