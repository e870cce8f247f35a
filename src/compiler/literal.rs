//! Integer literal parsing
//!
//! Accepts an optional sign followed by a `0x`/`0X` hex, `0`-prefixed octal
//! or decimal number. The whole token must be consumed. Magnitudes beyond the
//! 32-bit signed range saturate.

/// Parse an integer literal token
pub fn parse_int(token: &str) -> Option<i32> {
    let (negative, body) = match token.as_bytes().first().copied()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let (radix, digits) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
        .filter(|h| h.starts_with(|c: char| c.is_ascii_hexdigit()))
    {
        (16, hex)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    if digits.is_empty() {
        return None;
    }

    let mut magnitude: i64 = 0;
    for c in digits.chars() {
        let d = c.to_digit(radix)? as i64;
        magnitude = magnitude.saturating_mul(radix as i64).saturating_add(d);
    }

    let value = if negative { -magnitude } else { magnitude };
    Some(value.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal() {
        assert_eq!(parse_int("0"), Some(0));
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("+9"), Some(9));
    }

    #[test]
    fn test_hex_and_octal() {
        assert_eq!(parse_int("0x1F"), Some(31));
        assert_eq!(parse_int("0XfF"), Some(255));
        assert_eq!(parse_int("-0x10"), Some(-16));
        assert_eq!(parse_int("017"), Some(15));
        assert_eq!(parse_int("00"), Some(0));
    }

    #[test]
    fn test_rejects_leftovers() {
        assert_eq!(parse_int("12a"), None);
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("0xG"), None);
        assert_eq!(parse_int("08"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("NOTE"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_saturates() {
        assert_eq!(parse_int("99999999999"), Some(i32::MAX));
        assert_eq!(parse_int("-99999999999999999999999"), Some(i32::MIN));
    }
}
