use hill::internal::{gcd, Matrix2};
use hill::{
    decrypt, encrypt, generate_random_key_with, normalize, pad, validate_and_invert, CipherOptions,
    Config, HillCipher, HillError, Key, OddLengthPolicy, OutputFormat,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::io::Write;

/// Number of 2x2 matrices over Z/26 with a unit determinant:
/// |GL2(Z/2)| * |GL2(Z/13)| = 6 * 26208
const INVERTIBLE_COUNT: usize = 157_248;

/// Matrix for a flat index in 0..26^4
fn matrix_at(index: u32) -> Matrix2 {
    let a = (index / 17_576) % 26;
    let b = (index / 676) % 26;
    let c = (index / 26) % 26;
    let d = index % 26;
    Matrix2::try_new([[a as i64, b as i64], [c as i64, d as i64]]).unwrap()
}

#[test]
fn test_invertibility_gate_over_all_matrices() {
    let total = 26u32.pow(4);
    let invertible = (0..total)
        .into_par_iter()
        .filter(|&i| {
            let m = matrix_at(i);
            let coprime = gcd(m.determinant() as u32, 26) == 1;
            let accepted = validate_and_invert(&m).is_ok();
            assert_eq!(accepted, coprime, "gate mismatch for {}", m);
            accepted
        })
        .count();
    assert_eq!(invertible, INVERTIBLE_COUNT);
}

#[test]
fn test_round_trip_every_invertible_key() {
    let plaintext = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOGS";
    let failures: Vec<Matrix2> = (0..26u32.pow(4))
        .into_par_iter()
        .map(matrix_at)
        .filter_map(|m| Key::new(m).ok())
        .filter(|key| {
            let ct = encrypt(plaintext, key, CipherOptions::default()).unwrap().ciphertext;
            let pt = decrypt(&ct, &key.inverse(), CipherOptions::default()).unwrap().plaintext;
            pt != plaintext
        })
        .map(|key| *key.matrix())
        .collect();
    assert!(failures.is_empty(), "round trip failed for {:?}", failures);
}

#[test]
fn test_default_key_hello() {
    let key = Key::from_entries([[3, 3], [2, 5]]).unwrap();
    assert_eq!(key.determinant(), 9);
    assert_eq!(key.determinant_inverse(), 3);
    assert_eq!(key.inverse().matrix().entries(), [[15, 17], [20, 9]]);

    let enc = encrypt("HELLO", &key, CipherOptions::traced()).unwrap();
    assert_eq!(enc.padded, "HELLOX");
    let blocks: Vec<&str> =
        enc.blocks.as_ref().unwrap().iter().map(|b| b.plain_block.as_str()).collect();
    assert_eq!(blocks, ["HE", "LL", "OX"]);
    assert_eq!(enc.ciphertext, "HIOZHN");

    let dec = decrypt(&enc.ciphertext, &key.inverse(), CipherOptions::default()).unwrap();
    assert_eq!(dec.plaintext, "HELLOX");
}

#[test]
fn test_singular_key_rejected() {
    assert_eq!(
        Key::from_entries([[2, 4], [5, 10]]),
        Err(HillError::InvalidKey { determinant: 0 })
    );
}

#[test]
fn test_text_without_letters_rejected() {
    let cipher = HillCipher::default();
    assert_eq!(cipher.encrypt_str("   123!!!"), Err(HillError::EmptyInput));
    assert_eq!(cipher.decrypt_str("   123!!!"), Err(HillError::EmptyInput));
}

#[test]
fn test_odd_ciphertext_policies() {
    let cipher = HillCipher::default();
    assert_eq!(cipher.decrypt_str("ABC"), Err(HillError::OddLengthCiphertext { length: 3 }));

    let legacy = CipherOptions { odd_length: OddLengthPolicy::Truncate, ..Default::default() };
    let truncated = cipher.decrypt("ABC", legacy).unwrap();
    assert_eq!(truncated.plaintext, cipher.decrypt_str("AB").unwrap());
    assert_eq!(truncated.dropped, Some('C'));
}

#[test]
fn test_failed_call_leaves_cipher_usable() {
    let cipher = HillCipher::default();
    assert!(cipher.decrypt_str("ABC").is_err());
    assert!(cipher.encrypt_str("").is_err());
    assert_eq!(cipher.encrypt_str("hello").unwrap(), "HIOZHN");
}

#[test]
fn test_messy_text_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x1234567890ABCDEF);
    let messages = [
        "Hello, World!",
        "Meet me at the old bridge, 9pm.",
        "Unicode: 🚀 café naïve",
        "Multi-line\nstring\nwith\nnewlines",
        "a",
    ];
    for message in messages {
        let cipher = HillCipher::new(generate_random_key_with(&mut rng).unwrap());
        let enc = cipher.encrypt(message, CipherOptions::default()).unwrap();
        assert!(enc.was_modified || message.chars().all(|c| c.is_ascii_alphabetic()));
        assert!(enc.ciphertext.chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(enc.ciphertext.len() % 2, 0);

        let (cleaned, _) = normalize(message);
        assert_eq!(cipher.decrypt_str(&enc.ciphertext).unwrap(), pad(&cleaned));
    }
}

#[test]
fn test_output_formats_round_trip_through_cipher() {
    let cipher = HillCipher::new(Key::from_entries([[9, 4], [5, 7]]).unwrap());
    let formats = [
        OutputFormat::Letters,
        OutputFormat::Groups(5),
        OutputFormat::Numeric,
        OutputFormat::Base64,
        OutputFormat::HexLowercase,
        OutputFormat::HexUppercase,
        OutputFormat::Base32,
    ];
    for format in formats {
        let ct = cipher.encrypt_str("attack at dawn").unwrap();
        let wire = format.encode(&ct);
        let back = format.decode(&wire).unwrap();
        assert_eq!(cipher.decrypt_str(&back).unwrap(), "ATTACKATDAWN", "format {}", format.name());
    }
}

#[test]
fn test_random_keys_parallel() {
    let seeds: Vec<u64> = (0..64).collect();
    seeds.par_iter().for_each(|&seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let key = generate_random_key_with(&mut rng).unwrap();
        let len = 2 * rng.gen_range(1..50);
        let text: String = (0..len).map(|_| (b'A' + rng.gen_range(0..26u8)) as char).collect();
        let cipher = HillCipher::new(key);
        assert_eq!(cipher.decrypt_str(&cipher.encrypt_str(&text).unwrap()).unwrap(), text);
    });
}

#[test]
fn test_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "key = [[5, 17], [4, 15]]").unwrap();
    writeln!(file, "format = \"numeric\"").unwrap();
    writeln!(file, "odd_length = \"truncate\"").unwrap();

    let config = Config::load(file.path()).unwrap();
    let key = config.validated_key().unwrap();
    assert_eq!(key.matrix().entries(), [[5, 17], [4, 15]]);
    assert_eq!(config.output_format(), OutputFormat::Numeric);
    assert_eq!(config.odd_length, OddLengthPolicy::Truncate);

    let explicit = Config::resolve(Some(file.path())).unwrap();
    assert_eq!(explicit, config);
}

#[test]
fn test_config_with_singular_key_still_loads() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "key = [[2, 4], [5, 10]]").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.key_or(None), Err(HillError::InvalidKey { determinant: 0 }));

    let cipher = HillCipher::new(config.key_or(Some("3 3 2 5")).unwrap());
    assert_eq!(cipher.encrypt_str("hello").unwrap(), "HIOZHN");
}

#[test]
fn test_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Cannot read config file"));
}
