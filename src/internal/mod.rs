//! Internal arithmetic shared by the Hill cipher modules

pub mod matrix;
pub mod zmod26;

pub use matrix::{Matrix2, DIM};
pub use zmod26::{gcd, inv_mod26, is_unit, reduce, units, MODULUS};
