//! Random password generation.

use rand::Rng;
use thiserror::Error;
use tracing::debug;

/// Characters a generated password is drawn from.
pub const ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

/// Generate a password of exactly `length` characters using the OS RNG.
pub fn generate(length: usize) -> String {
    generate_with(&mut rand::rngs::OsRng, length)
}

/// Generate a password of exactly `length` characters using `rng`.
///
/// Every character is sampled independently and uniformly from
/// [`ALPHABET`]; `gen_range` rejects out-of-range draws so there is no
/// modulo bias.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Parse the free-text length field.
///
/// Reads an optional sign and the longest run of digits after any
/// leading whitespace, ignoring whatever follows (`"12px"` is 12). A
/// `0x` prefix switches to hexadecimal. Returns `None` when no digits
/// are found. Values too large for `i64` saturate.
pub fn parse_length(input: &str) -> Option<i64> {
    let s = input.trim_start();

    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        value = value.saturating_mul(i64::from(radix)).saturating_add(i64::from(d));
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Why a generation request produced an empty password.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
    #[error("length {0:?} is not a number; generated an empty password")]
    Unparseable(String),

    #[error("length {0} is not positive; generated an empty password")]
    NonPositive(i64),
}

/// Result of generating from raw user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub password: String,

    /// Set when the input degraded to an empty password.
    pub warning: Option<GenerationWarning>,
}

impl Generation {
    pub fn is_degenerate(&self) -> bool {
        self.warning.is_some()
    }
}

/// Generate from the length text field.
///
/// Input that is not a number, zero or negative yields an empty password
/// rather than an error; the [`Generation`] carries a warning saying why.
pub fn generate_from_input(input: &str) -> Generation {
    generate_from_input_with(&mut rand::rngs::OsRng, input)
}

pub fn generate_from_input_with<R: Rng + ?Sized>(rng: &mut R, input: &str) -> Generation {
    let length = match parse_length(input) {
        None => return degenerate(GenerationWarning::Unparseable(input.to_owned())),
        Some(n) if n <= 0 => return degenerate(GenerationWarning::NonPositive(n)),
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
    };

    Generation {
        password: generate_with(rng, length),
        warning: None,
    }
}

fn degenerate(warning: GenerationWarning) -> Generation {
    debug!("{}", warning);
    Generation {
        password: String::new(),
        warning: Some(warning),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn alphabet_is_88_distinct_ascii_characters() {
        assert_eq!(ALPHABET.len(), 88);
        let mut sorted = ALPHABET.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), ALPHABET.len());
        assert!(ALPHABET.iter().all(u8::is_ascii_graphic));
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(generate(0), "");
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a = generate_with(&mut StdRng::seed_from_u64(42), 32);
        let b = generate_with(&mut StdRng::seed_from_u64(42), 32);
        assert_eq!(a, b);
    }

    #[test]
    fn every_character_is_reachable() {
        let mut rng = StdRng::seed_from_u64(7);
        let sample = generate_with(&mut rng, 20_000);
        for &c in ALPHABET {
            assert!(sample.contains(c as char), "never drew {:?}", c as char);
        }
    }

    #[test]
    fn parse_length_reads_integer_prefix() {
        assert_eq!(parse_length("12"), Some(12));
        assert_eq!(parse_length("  8"), Some(8));
        assert_eq!(parse_length("12px"), Some(12));
        assert_eq!(parse_length("3.9"), Some(3));
        assert_eq!(parse_length("+5"), Some(5));
        assert_eq!(parse_length("-1"), Some(-1));
        assert_eq!(parse_length("0x10"), Some(16));
        assert_eq!(parse_length("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn parse_length_rejects_non_numbers() {
        assert_eq!(parse_length(""), None);
        assert_eq!(parse_length("abc"), None);
        assert_eq!(parse_length("-"), None);
        assert_eq!(parse_length("0x"), None);
        assert_eq!(parse_length(" px12"), None);
    }

    #[test]
    fn degenerate_inputs_give_empty_password() {
        for input in ["0", "-1", "", "abc", "-0"] {
            let generation = generate_from_input(input);
            assert_eq!(generation.password, "", "input {:?}", input);
            assert!(generation.is_degenerate(), "input {:?}", input);
        }

        assert_eq!(
            generate_from_input("abc").warning,
            Some(GenerationWarning::Unparseable("abc".into()))
        );
        assert_eq!(
            generate_from_input("-3").warning,
            Some(GenerationWarning::NonPositive(-3))
        );
    }

    #[test]
    fn valid_input_has_no_warning() {
        let generation = generate_from_input("16");
        assert_eq!(generation.password.len(), 16);
        assert!(!generation.is_degenerate());
    }

    proptest! {
        #[test]
        fn generated_password_has_requested_length(n in 0usize..512) {
            let pw = generate(n);
            prop_assert_eq!(pw.chars().count(), n);
            prop_assert!(pw.bytes().all(|b| ALPHABET.contains(&b)));
        }

        #[test]
        fn numeric_input_matches_length(n in 1i64..512) {
            let generation = generate_from_input(&n.to_string());
            prop_assert_eq!(generation.password.len() as i64, n);
            prop_assert!(generation.warning.is_none());
        }
    }
}
