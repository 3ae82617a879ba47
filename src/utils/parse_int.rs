use serde_json::Number;

/// Parse the leading integer of a string the way a browser's `parseInt`
/// without a radix does: skip leading whitespace, accept an optional sign,
/// then a `0x`/`0X` prefix switches to hexadecimal. The longest run of
/// digits in that radix is taken and trailing garbage is ignored.
///
/// Returns `None` when no digit follows the sign and prefix. Digit runs that
/// overflow `i64` come back as a floating point number.
pub fn parse_leading_int(value: &str) -> Option<Number> {
    let t = value.trim_start();
    let (negative, rest) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let digits_len = rest.chars().take_while(|c| c.is_digit(radix)).count();
    if digits_len == 0 {
        return None;
    }
    // Digits in either radix are ASCII, so the char count is a byte offset
    let digits = &rest[..digits_len];

    if let Ok(n) = i64::from_str_radix(digits, radix) {
        return Some(Number::from(if negative { -n } else { n }));
    }
    if negative {
        let signed = format!("-{}", digits);
        if let Ok(n) = i64::from_str_radix(&signed, radix) {
            return Some(Number::from(n));
        }
    }
    let magnitude = digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0f64, |acc, d| acc * radix as f64 + d as f64);
    Number::from_f64(if negative { -magnitude } else { magnitude })
}
