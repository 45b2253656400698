//! Hill cipher keys
//!
//! A [`Key`] is a 2x2 matrix over Z/26 whose determinant is a unit, so
//! holding one proves the matrix can be inverted. The matching
//! [`KeyInverse`] is derived from it and never stored separately from
//! the key that produced it.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::HillError;
use crate::internal::{inv_mod26, Matrix2, DIM, MODULUS};

/// Upper bound on sampling attempts in [`generate_random_key_with`]
pub const MAX_KEYGEN_ATTEMPTS: u32 = 10_000;

/// Key used when none is supplied: [[3, 3], [2, 5]]
pub const DEFAULT_KEY: [[i64; DIM]; DIM] = [[3, 3], [2, 5]];

/// Validated, invertible encryption key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Key(Matrix2);

/// Modular inverse of a [`Key`], used for decryption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct KeyInverse(Matrix2);

/// Check that `matrix` is invertible mod 26 and return its inverse
pub fn validate_and_invert(matrix: &Matrix2) -> Result<KeyInverse, HillError> {
    match matrix.inverse() {
        Ok(inv) => {
            debug!(key = %matrix, determinant = matrix.determinant(), inverse = %inv, "key validated");
            Ok(KeyInverse(inv))
        }
        Err(err) => {
            debug!(key = %matrix, %err, "key rejected");
            Err(err)
        }
    }
}

impl Key {
    /// Validate a matrix as a key
    pub fn new(matrix: Matrix2) -> Result<Self, HillError> {
        validate_and_invert(&matrix)?;
        Ok(Self(matrix))
    }

    /// Validate raw entries; out-of-range values are rejected, not wrapped
    pub fn from_entries(entries: [[i64; DIM]; DIM]) -> Result<Self, HillError> {
        Self::new(Matrix2::try_new(entries)?)
    }

    /// The default key [[3, 3], [2, 5]]
    pub fn default_key() -> Self {
        Self(Matrix2::reduced(DEFAULT_KEY))
    }

    /// Underlying matrix
    pub fn matrix(&self) -> &Matrix2 {
        &self.0
    }

    /// Determinant mod 26 (always a unit)
    pub fn determinant(&self) -> u8 {
        self.0.determinant()
    }

    /// Inverse of the determinant mod 26
    pub fn determinant_inverse(&self) -> u8 {
        // A Key only exists when its determinant is a unit.
        inv_mod26(self.determinant() as i64).unwrap_or(0)
    }

    /// Modular inverse of this key
    pub fn inverse(&self) -> KeyInverse {
        KeyInverse(self.0.adjugate().scale(self.determinant_inverse() as i64))
    }

    /// Multiply a numeric block by the key
    pub fn apply(&self, block: [u8; DIM]) -> [u8; DIM] {
        self.0.mul_vec(block)
    }
}

impl KeyInverse {
    /// Accept a matrix that is already a decryption key.
    ///
    /// The inverse of an invertible matrix is itself invertible, so the same
    /// determinant check applies.
    pub fn from_matrix(matrix: Matrix2) -> Result<Self, HillError> {
        validate_and_invert(&matrix)?;
        Ok(Self(matrix))
    }

    /// Underlying matrix
    pub fn matrix(&self) -> &Matrix2 {
        &self.0
    }

    /// The encryption key this inverse belongs to
    pub fn key(&self) -> Key {
        // Inverse of an invertible matrix always exists.
        Key(self.0.inverse().unwrap_or(Matrix2::IDENTITY))
    }

    /// Multiply a numeric block by the inverse key
    pub fn apply(&self, block: [u8; DIM]) -> [u8; DIM] {
        self.0.mul_vec(block)
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::default_key()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for KeyInverse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Key {
    type Err = HillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::new(s.parse()?)
    }
}

impl FromStr for KeyInverse {
    type Err = HillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyInverse::from_matrix(s.parse()?)
    }
}

/// Generate a random invertible key from the given RNG.
///
/// Samples four uniform values in [0, 25] until the matrix is invertible.
/// Roughly one matrix in three qualifies; the attempt bound only rules out
/// non-termination with a broken RNG.
pub fn generate_random_key_with<R: Rng + ?Sized>(rng: &mut R) -> Result<Key, HillError> {
    for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
        let mut entries = [[0i64; DIM]; DIM];
        for row in entries.iter_mut() {
            for cell in row.iter_mut() {
                *cell = rng.gen_range(0..MODULUS as i64);
            }
        }
        let matrix = Matrix2::reduced(entries);
        if matrix.is_invertible() {
            debug!(key = %matrix, attempt, "random key generated");
            return Ok(Key(matrix));
        }
    }
    Err(HillError::Internal { attempts: MAX_KEYGEN_ATTEMPTS })
}

/// Generate a random invertible key from the thread-local RNG
pub fn generate_random_key() -> Result<Key, HillError> {
    generate_random_key_with(&mut rand::thread_rng())
}
