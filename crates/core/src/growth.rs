//! Parsing of growth-entry measurements submitted through the entry form.
//!
//! Both measurements are optional. The leading number of the field is
//! used, so `"12.5 cm"` records 12.5 and `"8 leaves"` records 8. Input that
//! does not start with a number is stored as absent; a parsed zero is a
//! real measurement and is kept.

/// Parse the `height` form field (centimetres).
///
/// Returns `None` for blank, non-numeric or non-finite input.
pub fn parse_height(value: Option<&str>) -> Option<f64> {
    let raw = value?.trim_start();
    let len = decimal_prefix_len(raw);
    if len == 0 {
        return None;
    }
    raw[..len].parse::<f64>().ok().filter(|h| h.is_finite())
}

/// Parse the `num_leaves` form field.
///
/// A fractional count is truncated (`"8.5"` records 8). Returns `None`
/// for blank or non-numeric input and for counts outside `i32`.
pub fn parse_leaf_count(value: Option<&str>) -> Option<i32> {
    let raw = value?.trim_start();
    let sign = sign_len(raw);
    let digits = digit_run(&raw[sign..]);
    if digits == 0 {
        return None;
    }
    raw[..sign + digits].parse::<i32>().ok()
}

// ---------------------------------------------------------------------------
// Prefix scanning
// ---------------------------------------------------------------------------

fn sign_len(s: &str) -> usize {
    usize::from(s.starts_with(['+', '-']))
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Length of the longest leading decimal literal: optional sign, digits
/// with an optional fraction, and an optional exponent. Zero when the
/// input has no mantissa digits.
fn decimal_prefix_len(s: &str) -> usize {
    let mut end = sign_len(s);
    let int_digits = digit_run(&s[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if s[end..].starts_with('.') {
        frac_digits = digit_run(&s[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if s[end..].starts_with(['e', 'E']) {
        let exp_sign = sign_len(&s[end + 1..]);
        let exp_digits = digit_run(&s[end + 1 + exp_sign..]);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }
    end
}
