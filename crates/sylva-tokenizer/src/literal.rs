//! Classification of value-shaped text.

use num_bigint::BigInt;
use sylva_yellow::green::{GreenIntegerLiteral, GreenValue, JsonInteger};
use text_size::TextSize;
use triomphe::Arc;

/// Turns a run of value characters into a literal, or `None` if the run is
/// not a legal literal.
///
/// # Panics
///
/// Panics if `text` is empty.
#[track_caller]
pub fn classify(text: &str) -> Option<GreenValue> {
    assert!(!text.is_empty(), "cannot classify empty text");

    match text {
        "true" => return Some(GreenValue::TRUE),
        "false" => return Some(GreenValue::FALSE),
        _ => {}
    }

    let integer = parse_integer(text)?;
    Some(GreenValue::IntegerLiteral(Arc::new(GreenIntegerLiteral::new(integer, TextSize::of(text)))))
}

/// Parses `[+-]?[0-9]+`.
pub fn parse_integer(text: &str) -> Option<JsonInteger> {
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let mut magnitude: u64 = 0;
    for byte in digits.bytes() {
        let digit = u64::from(byte - b'0');
        match magnitude.checked_mul(10).and_then(|value| value.checked_add(digit)) {
            Some(value) => magnitude = value,
            None => return parse_big(negative, digits),
        }
    }

    Some(JsonInteger::from_parts(negative, magnitude))
}

#[cold]
fn parse_big(negative: bool, digits: &str) -> Option<JsonInteger> {
    let magnitude = digits.parse::<BigInt>().ok()?;
    Some(JsonInteger::from_bigint(if negative { -magnitude } else { magnitude }))
}

#[cfg(test)]
mod tests {
    use sylva_yellow::TextLength as _;

    use super::*;

    fn integer(text: &str) -> JsonInteger {
        match classify(text) {
            Some(GreenValue::IntegerLiteral(literal)) => literal.value().clone(),
            other => panic!("expected an integer for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn booleans() {
        assert_eq!(classify("true"), Some(GreenValue::TRUE));
        assert_eq!(classify("false"), Some(GreenValue::FALSE));
        assert_eq!(classify("True"), None);
    }

    #[test]
    fn small_integers() {
        assert_eq!(integer("0").to_u64(), Some(0));
        assert_eq!(integer("+17").to_u64(), Some(17));
        assert_eq!(integer("-1").to_i64(), Some(-1));
        assert_eq!(integer("-0"), JsonInteger::ZERO);
        assert_eq!(integer("007").to_u64(), Some(7));
        assert_eq!(integer("18446744073709551615").to_u64(), Some(u64::MAX));
        assert!(!integer("-18446744073709551615").is_big());
    }

    #[test]
    fn big_integers() {
        let value = integer("18446744073709551616");
        assert!(value.is_big());
        assert_eq!(value.to_bigint(), BigInt::from(u64::MAX) + 1u32);
        assert_eq!(value.to_u64(), None);

        let value = integer("-99999999999999999999999");
        assert!(value.is_big());
        assert!(value.is_negative());
        assert_eq!(value.to_string(), "-99999999999999999999999");
    }

    #[test]
    fn literal_length() {
        let Some(GreenValue::IntegerLiteral(literal)) = classify("+0042") else {
            panic!("expected an integer")
        };
        assert_eq!(literal.text_len(), TextSize::new(5));
    }

    #[test]
    fn illegal_shapes() {
        for text in ["1.5", "1e3", "--1", "+-1", "-", "+", "1-", "abc", "0x10", "null", "_1"] {
            assert_eq!(classify(text), None, "{text:?}");
        }
    }

    #[test]
    #[should_panic(expected = "cannot classify empty text")]
    fn empty_text() {
        classify("");
    }
}
