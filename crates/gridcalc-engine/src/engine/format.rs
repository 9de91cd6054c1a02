//! Value formatting for display.

/// Fixed-point formatting with `precision` digits after the decimal point.
///
/// Rounds half away from zero on the shortest decimal form of `value`, so
/// `2.5` shows as "3" and `0.125` at two places as "0.13". Infinite and NaN
/// values print as Rust formats them.
pub fn format_value(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", precision, value);
    }

    // `Display` for f64 gives the shortest round-trip digits, never an exponent.
    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(precision))
        .collect();
    if frac_part
        .as_bytes()
        .get(precision)
        .is_some_and(|&next| next >= b'5')
    {
        round_up(&mut digits);
    }

    let split = digits.len() - precision;
    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|&d| d as char));
    if precision > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|&d| d as char));
    }
    out
}

fn round_up(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
