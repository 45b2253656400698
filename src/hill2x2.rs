//! HILL-2x2: block transform and full-text pipeline
//!
//! Plaintext goes through clean -> pad -> split into digraphs -> multiply by
//! the key -> reassemble. Decryption is the same shape with the inverse key
//! and without padding.
//!
//! - Block size: 2 letters
//! - Key: 2x2 matrix over Z/26 with unit determinant
//! - Padding: a single trailing `X` on odd-length plaintext (never removed)

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::alphabet::{letter_to_num, normalize, num_to_letter, pad, text_to_nums};
use crate::error::HillError;
use crate::internal::DIM;
use crate::key::{Key, KeyInverse};

/// Letters per block
pub const BLOCK_LETTERS: usize = DIM;

/// What to do with a ciphertext whose cleaned length is odd
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OddLengthPolicy {
    /// Fail with [`HillError::OddLengthCiphertext`]
    #[default]
    Reject,
    /// Drop the trailing unpaired letter and decrypt the rest
    Truncate,
}

/// Options shared by [`encrypt`] and [`decrypt`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CipherOptions {
    /// Record a [`BlockTrace`] for every block
    pub trace: bool,
    /// Odd-length ciphertext handling (decryption only)
    pub odd_length: OddLengthPolicy,
}

impl CipherOptions {
    /// Options with block tracing turned on
    pub fn traced() -> Self {
        Self { trace: true, ..Self::default() }
    }
}

/// Per-block record for pedagogical display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockTrace {
    pub index: usize,
    pub plain_block: String,
    pub plain_nums: [u8; BLOCK_LETTERS],
    pub cipher_nums: [u8; BLOCK_LETTERS],
    pub cipher_block: String,
}

/// Result of [`encrypt`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encryption {
    /// Input reduced to A-Z
    pub cleaned: String,
    /// Cleaned input padded to even length
    pub padded: String,
    pub ciphertext: String,
    /// Characters other than letter case were removed from the input
    pub was_modified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<BlockTrace>>,
}

/// Result of [`decrypt`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decryption {
    /// Input reduced to A-Z
    pub cleaned: String,
    /// May end in a padding `X` from encryption
    pub plaintext: String,
    pub was_modified: bool,
    /// Letter discarded under [`OddLengthPolicy::Truncate`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<BlockTrace>>,
}

fn nums_to_string(nums: &[u8]) -> String {
    nums.iter().map(|&n| num_to_letter(n)).collect()
}

/// Letters of a digraph as 0..=25; lowercase is folded, anything else rejected
fn block_nums(block: [char; BLOCK_LETTERS]) -> Result<[u8; BLOCK_LETTERS], HillError> {
    let [a, b] = block.map(|c| {
        letter_to_num(c.to_ascii_uppercase()).ok_or(HillError::NotALetter { found: c })
    });
    Ok([a?, b?])
}

/// Encrypt one digraph with the key.
///
/// Fails with [`HillError::NotALetter`] if either character is not A-Z
/// (case-insensitive).
pub fn encrypt_block(
    block: [char; BLOCK_LETTERS],
    key: &Key,
) -> Result<[char; BLOCK_LETTERS], HillError> {
    Ok(key.apply(block_nums(block)?).map(num_to_letter))
}

/// Decrypt one digraph with the inverse key
pub fn decrypt_block(
    block: [char; BLOCK_LETTERS],
    inverse: &KeyInverse,
) -> Result<[char; BLOCK_LETTERS], HillError> {
    Ok(inverse.apply(block_nums(block)?).map(num_to_letter))
}

/// Which way a block transform runs, for laying out traces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// Run `transform` over consecutive digraphs of `nums`
fn transform_blocks<F>(
    nums: &[u8],
    with_trace: bool,
    direction: Direction,
    transform: F,
) -> (String, Option<Vec<BlockTrace>>)
where
    F: Fn([u8; BLOCK_LETTERS]) -> [u8; BLOCK_LETTERS],
{
    let mut out = String::with_capacity(nums.len());
    let mut blocks = with_trace.then(|| Vec::with_capacity(nums.len() / BLOCK_LETTERS));

    for (index, chunk) in nums.chunks_exact(BLOCK_LETTERS).enumerate() {
        let input = [chunk[0], chunk[1]];
        let output = transform(input);
        out.extend(output.map(num_to_letter));
        trace!(index, ?input, ?output, "block");

        if let Some(blocks) = blocks.as_mut() {
            let (plain_nums, cipher_nums) = match direction {
                Direction::Encrypt => (input, output),
                Direction::Decrypt => (output, input),
            };
            blocks.push(BlockTrace {
                index,
                plain_block: nums_to_string(&plain_nums),
                plain_nums,
                cipher_nums,
                cipher_block: nums_to_string(&cipher_nums),
            });
        }
    }

    (out, blocks)
}

/// Encrypt arbitrary text.
///
/// Non-letters are dropped, the rest uppercased and padded with `X` to even
/// length. Fails with [`HillError::EmptyInput`] when no letters remain.
pub fn encrypt(
    plaintext: &str,
    key: &Key,
    options: CipherOptions,
) -> Result<Encryption, HillError> {
    let (cleaned, was_modified) = normalize(plaintext);
    if cleaned.is_empty() {
        return Err(HillError::EmptyInput);
    }
    let padded = pad(&cleaned);
    let nums = text_to_nums(&padded);
    let (ciphertext, blocks) =
        transform_blocks(&nums, options.trace, Direction::Encrypt, |p| key.apply(p));

    Ok(Encryption {
        cleaned,
        padded,
        ciphertext,
        was_modified,
        blocks,
    })
}

/// Decrypt arbitrary text with the inverse key.
///
/// Fails with [`HillError::EmptyInput`] when no letters remain and, under
/// the default policy, with [`HillError::OddLengthCiphertext`] when the
/// cleaned length is odd. Padding letters are not removed.
pub fn decrypt(
    ciphertext: &str,
    inverse: &KeyInverse,
    options: CipherOptions,
) -> Result<Decryption, HillError> {
    let (cleaned, was_modified) = normalize(ciphertext);
    if cleaned.is_empty() {
        return Err(HillError::EmptyInput);
    }

    let mut nums = text_to_nums(&cleaned);
    let mut dropped = None;
    if nums.len() % BLOCK_LETTERS != 0 {
        match options.odd_length {
            OddLengthPolicy::Reject => {
                return Err(HillError::OddLengthCiphertext { length: nums.len() });
            }
            OddLengthPolicy::Truncate => {
                dropped = nums.pop().map(num_to_letter);
                info!(
                    length = cleaned.len(),
                    ?dropped,
                    "odd-length ciphertext, dropping trailing letter"
                );
            }
        }
    }

    let (plaintext, blocks) =
        transform_blocks(&nums, options.trace, Direction::Decrypt, |c| inverse.apply(c));

    Ok(Decryption {
        cleaned,
        plaintext,
        was_modified,
        dropped,
        blocks,
    })
}

/// Key and inverse bundled for repeated use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HillCipher {
    key: Key,
    inverse: KeyInverse,
}

impl HillCipher {
    /// Create a cipher for the given key; the inverse is computed once here
    pub fn new(key: Key) -> Self {
        Self { key, inverse: key.inverse() }
    }

    /// Create a cipher from a decryption key
    pub fn from_inverse(inverse: KeyInverse) -> Self {
        Self { key: inverse.key(), inverse }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn inverse(&self) -> &KeyInverse {
        &self.inverse
    }

    /// Encrypt text; see [`encrypt`]
    pub fn encrypt(&self, plaintext: &str, options: CipherOptions) -> Result<Encryption, HillError> {
        encrypt(plaintext, &self.key, options)
    }

    /// Decrypt text; see [`decrypt`]
    pub fn decrypt(&self, ciphertext: &str, options: CipherOptions) -> Result<Decryption, HillError> {
        decrypt(ciphertext, &self.inverse, options)
    }

    /// Encrypt and return only the ciphertext
    pub fn encrypt_str(&self, plaintext: &str) -> Result<String, HillError> {
        Ok(self.encrypt(plaintext, CipherOptions::default())?.ciphertext)
    }

    /// Decrypt and return only the plaintext
    pub fn decrypt_str(&self, ciphertext: &str) -> Result<String, HillError> {
        Ok(self.decrypt(ciphertext, CipherOptions::default())?.plaintext)
    }
}

impl Default for HillCipher {
    fn default() -> Self {
        Self::new(Key::default())
    }
}
