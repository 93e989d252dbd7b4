//! Permissive number reading for hand-edited profile files.

/// Parse the longest numeric prefix of `s`, after leading whitespace.
///
/// Accepts an optional sign, digits with at most one `.`, and an exponent
/// only when digits follow it. `"9.0bar"` reads as 9, `"1.2.3"` as 1.2.
/// Returns `None` when no digits lead the string.
pub fn parse_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let b = s.as_bytes();
    let mut end = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let mut digits = 0;
    let mut dot = false;
    while let Some(&c) = b.get(end) {
        if c.is_ascii_digit() {
            digits += 1;
        } else if c == b'.' && !dot {
            dot = true;
        } else {
            break;
        }
        end += 1;
    }
    if digits == 0 {
        return None;
    }
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(b.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = b[exp_end.min(b.len())..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    s[..end].parse().ok().filter(|v: &f64| v.is_finite())
}

/// [`parse_prefix`], with anything unreadable as 0.
pub fn number_or_zero(s: &str) -> f64 {
    parse_prefix(s).unwrap_or(0.0)
}
