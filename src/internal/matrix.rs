//! 2x2 matrices over the integers modulo 26

use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

use serde::Serialize;

use super::zmod26::{inv_mod26, reduce, MODULUS};
use crate::error::HillError;

/// Matrix dimension (block size in letters)
pub const DIM: usize = 2;

/// A 2x2 matrix whose entries are always reduced into [0, 26)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Matrix2 {
    m: [[u8; DIM]; DIM],
}

impl Matrix2 {
    /// Identity matrix
    pub const IDENTITY: Matrix2 = Matrix2 { m: [[1, 0], [0, 1]] };

    /// Build a matrix from raw integers, rejecting anything outside [0, 25]
    pub fn try_new(entries: [[i64; DIM]; DIM]) -> Result<Self, HillError> {
        let mut m = [[0u8; DIM]; DIM];
        for (row, values) in entries.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if !(0..MODULUS as i64).contains(&value) {
                    return Err(HillError::KeyEntryOutOfRange { row, col, value });
                }
                m[row][col] = value as u8;
            }
        }
        Ok(Self { m })
    }

    /// Build a matrix from arbitrary integers by reducing each entry mod 26
    pub fn reduced(entries: [[i64; DIM]; DIM]) -> Self {
        let mut m = [[0u8; DIM]; DIM];
        for row in 0..DIM {
            for col in 0..DIM {
                m[row][col] = reduce(entries[row][col]);
            }
        }
        Self { m }
    }

    /// Entries in row-major order
    pub fn entries(&self) -> [[u8; DIM]; DIM] {
        self.m
    }

    /// Determinant reduced into [0, 26)
    pub fn determinant(&self) -> u8 {
        let [[a, b], [c, d]] = self.widened();
        reduce(a * d - b * c)
    }

    /// Adjugate [[d, -b], [-c, a]], reduced
    pub fn adjugate(&self) -> Self {
        let [[a, b], [c, d]] = self.widened();
        Self::reduced([[d, -b], [-c, a]])
    }

    /// Multiply every entry by a scalar, reduced
    pub fn scale(&self, k: i64) -> Self {
        let [[a, b], [c, d]] = self.widened();
        Self::reduced([[k * a, k * b], [k * c, k * d]])
    }

    /// Matrix times column vector, reduced
    pub fn mul_vec(&self, v: [u8; DIM]) -> [u8; DIM] {
        let [[a, b], [c, d]] = self.widened();
        let (x, y) = (v[0] as i64, v[1] as i64);
        [reduce(a * x + b * y), reduce(c * x + d * y)]
    }

    /// Modular inverse: inv(det) * adjugate.
    ///
    /// Fails with [`HillError::InvalidKey`] when the determinant shares a
    /// factor with 26 (zero, even, or 13).
    pub fn inverse(&self) -> Result<Self, HillError> {
        let determinant = self.determinant();
        let inv_det = inv_mod26(determinant as i64).ok_or(HillError::InvalidKey { determinant })?;
        Ok(self.adjugate().scale(inv_det as i64))
    }

    /// True when the determinant is a unit mod 26
    pub fn is_invertible(&self) -> bool {
        inv_mod26(self.determinant() as i64).is_some()
    }

    fn widened(&self) -> [[i64; DIM]; DIM] {
        let m = &self.m;
        [
            [m[0][0] as i64, m[0][1] as i64],
            [m[1][0] as i64, m[1][1] as i64],
        ]
    }
}

impl Mul for Matrix2 {
    type Output = Matrix2;

    fn mul(self, rhs: Matrix2) -> Matrix2 {
        let mut out = [[0i64; DIM]; DIM];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..DIM)
                    .map(|k| self.m[i][k] as i64 * rhs.m[k][j] as i64)
                    .sum();
            }
        }
        Matrix2::reduced(out)
    }
}

impl fmt::Display for Matrix2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[[{}, {}], [{}, {}]]",
            self.m[0][0], self.m[0][1], self.m[1][0], self.m[1][1]
        )
    }
}

/// Parses four row-major integers separated by commas and/or whitespace,
/// e.g. `"3,3,2,5"` or `"3 3 2 5"`.
impl FromStr for Matrix2 {
    type Err = HillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.len() != DIM * DIM {
            return Err(HillError::MalformedKey(format!(
                "expected {} integers, got {}",
                DIM * DIM,
                tokens.len()
            )));
        }
        let mut entries = [[0i64; DIM]; DIM];
        for (i, token) in tokens.iter().enumerate() {
            entries[i / DIM][i % DIM] = token
                .parse()
                .map_err(|_| HillError::MalformedKey(format!("'{}' is not an integer", token)))?;
        }
        Matrix2::try_new(entries)
    }
}
