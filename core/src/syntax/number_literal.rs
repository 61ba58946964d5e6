/// Number literal scanning for formulas.
///
/// Accepted forms are decimal only: `12`, `1.5`, `.5`, `5.`, `1e3`, `2.5E-4`.
/// An exponent marker is part of the literal only when at least one digit
/// follows it (with an optional sign in between), so `2e` scans as `2`.

/// Length in bytes of the number literal at the start of `input`.
///
/// Returns 0 when `input` does not start with a digit or a `.`.
pub fn scan(input: &str) -> usize {
    let bytes = input.as_bytes();
    let mut len = digits(bytes, 0);
    if bytes.get(len) == Some(&b'.') {
        len = digits(bytes, len + 1);
    }
    if len == 0 || !bytes[..len].iter().any(u8::is_ascii_digit) {
        return len;
    }
    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let mut exponent = len + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let end = digits(bytes, exponent);
        if end > exponent {
            len = end;
        }
    }
    len
}

/// Parse a scanned literal. `None` if it holds no digits (a lone `.`).
pub fn parse(literal: &str) -> Option<f64> {
    literal.parse::<f64>().ok()
}

fn digits(bytes: &[u8], start: usize) -> usize {
    start
        + bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count()
}
