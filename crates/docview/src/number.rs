/// Format an f64 the way a JavaScript runtime prints a number.
///
/// Requirements:
/// - shortest round-trip digits
/// - plain decimal notation for exponents in `-7 < n <= 21`, otherwise
///   `d.ddde+N` / `d.ddde-N`
/// - -0 printed as `0`
/// - `NaN`, `Infinity`, `-Infinity` for non-finite values
pub(crate) fn format_js_f64(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return String::from("0");
    }

    let mut buf = ryu::Buffer::new();
    let raw = buf.format_finite(value.abs());
    let (digits, point) = decompose(raw);
    let body = layout(&digits, point);
    if value < 0.0 {
        let mut out = String::with_capacity(body.len() + 1);
        out.push('-');
        out.push_str(&body);
        out
    } else {
        body
    }
}

/// Split ryu output into significant digits (no leading or trailing zeros)
/// and the decimal exponent `n` such that the value is `0.d1d2... * 10^n`.
fn decompose(raw: &str) -> (Vec<u8>, i32) {
    let (mantissa, exp) = match raw.find(['e', 'E']) {
        Some(idx) => (&raw[..idx], raw[idx + 1..].parse::<i32>().unwrap_or(0)),
        None => (raw, 0),
    };

    let mut digits = Vec::with_capacity(mantissa.len());
    let mut point_index = None;
    for &b in mantissa.as_bytes() {
        if b == b'.' {
            point_index = Some(digits.len());
        } else {
            digits.push(b);
        }
    }
    let mut point = point_index.unwrap_or(digits.len()) as i32 + exp;

    let leading = digits.iter().take_while(|&&d| d == b'0').count();
    digits.drain(..leading);
    point -= leading as i32;
    while digits.last() == Some(&b'0') {
        digits.pop();
    }
    (digits, point)
}

fn layout(digits: &[u8], point: i32) -> String {
    let k = digits.len() as i32;
    let mut out = String::with_capacity(digits.len() + 8);

    if k <= point && point <= 21 {
        push_digits(&mut out, digits);
        for _ in 0..(point - k) {
            out.push('0');
        }
    } else if 0 < point && point <= 21 {
        let split = point as usize;
        push_digits(&mut out, &digits[..split]);
        out.push('.');
        push_digits(&mut out, &digits[split..]);
    } else if -6 < point && point <= 0 {
        out.push_str("0.");
        for _ in 0..(-point) {
            out.push('0');
        }
        push_digits(&mut out, digits);
    } else {
        out.push(digits[0] as char);
        if k > 1 {
            out.push('.');
            push_digits(&mut out, &digits[1..]);
        }
        let exp = point - 1;
        out.push('e');
        out.push(if exp < 0 { '-' } else { '+' });
        out.push_str(&exp.abs().to_string());
    }
    out
}

fn push_digits(out: &mut String, digits: &[u8]) {
    for &d in digits {
        out.push(d as char);
    }
}
