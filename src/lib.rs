//! HILL: classical 2x2 Hill cipher library
//!
//! A polygraphic substitution cipher over the 26-letter Latin alphabet.
//! Each pair of letters is multiplied by an invertible 2x2 key matrix
//! modulo 26; decryption multiplies by the modular inverse of the key.
//!
//! This is a teaching tool. The Hill cipher is linear and falls to a
//! known-plaintext attack with a handful of letter pairs.
//!
//! ## Modules
//!
//! - `alphabet`: A-Z mapping, text cleaning and padding
//! - `key`: validated keys, inverses and random key generation
//! - `hill2x2`: block transform and the full-text encrypt/decrypt pipeline
//! - `output_format`: transport encodings for cipher text
//! - `config`: TOML defaults for the command-line tool
//!
//! ```
//! use hill::{HillCipher, Key};
//!
//! let cipher = HillCipher::new(Key::from_entries([[3, 3], [2, 5]]).unwrap());
//! let ct = cipher.encrypt_str("Hello").unwrap();
//! assert_eq!(ct, "HIOZHN");
//! assert_eq!(cipher.decrypt_str(&ct).unwrap(), "HELLOX");
//! ```

pub mod alphabet;
pub mod config;
pub mod error;
pub mod hill2x2;
pub mod internal;
pub mod key;
pub mod output_format;

// Re-export main types
pub use alphabet::{normalize, pad};
pub use config::Config;
pub use error::HillError;
pub use hill2x2::{
    decrypt, decrypt_block, encrypt, encrypt_block, BlockTrace, CipherOptions, Decryption,
    Encryption, HillCipher, OddLengthPolicy,
};
pub use internal::Matrix2;
pub use key::{generate_random_key, generate_random_key_with, validate_and_invert, Key, KeyInverse};
pub use output_format::{FormatKind, OutputFormat};
