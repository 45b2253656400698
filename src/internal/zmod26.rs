//! Arithmetic in the ring of integers modulo 26

/// Alphabet size and modulus of every Hill cipher operation
pub const MODULUS: u8 = 26;

/// Reduce any integer into the range [0, 26)
pub fn reduce(value: i64) -> u8 {
    value.rem_euclid(MODULUS as i64) as u8
}

/// Greatest common divisor (Euclid)
pub const fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Brute-force inverse search, used only to build the table at compile time
const fn inverse_slow_const(a: u8) -> u8 {
    let mut x = 1u8;
    while x < MODULUS {
        if (a as u32 * x as u32) % MODULUS as u32 == 1 {
            return x;
        }
        x += 1;
    }
    0
}

/// Generate the modular inverse table at compile time.
/// Entry `a` holds the inverse of `a`, or 0 when `a` is not a unit.
const fn generate_inverse_table() -> [u8; MODULUS as usize] {
    let mut table = [0u8; MODULUS as usize];
    let mut a = 1;
    while a < MODULUS as usize {
        if gcd(a as u32, MODULUS as u32) == 1 {
            table[a] = inverse_slow_const(a as u8);
        }
        a += 1;
    }
    table
}

/// Inverses of the twelve units mod 26 (1, 3, 5, 7, 9, 11, 15, 17, 19, 21, 23, 25)
const INVERSE_TABLE: [u8; MODULUS as usize] = generate_inverse_table();

/// Multiplicative inverse modulo 26, if one exists.
/// The argument is reduced first, so negative and large values are fine.
pub fn inv_mod26(a: i64) -> Option<u8> {
    match INVERSE_TABLE[reduce(a) as usize] {
        0 => None,
        inv => Some(inv),
    }
}

/// True when `a` mod 26 is coprime with 26
pub fn is_unit(a: i64) -> bool {
    inv_mod26(a).is_some()
}

/// All residues that have an inverse mod 26, in ascending order
pub fn units() -> impl Iterator<Item = u8> {
    (0..MODULUS).filter(|&a| INVERSE_TABLE[a as usize] != 0)
}
