//! Per-field input normalization applied on every keystroke.
//!
//! Sanitizers are total: they never fail and never reject input. Rejection is
//! the validator's job; these only strip, collapse, re-case and clamp so the form
//! state always holds something renderable.

/// Clamp applied by callers after [`sanitize_text`].
pub const TEXT_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 254;
pub const POSTAL_MAX_CHARS: usize = 10;
pub const SECRET_MAX_CHARS: usize = 128;
pub const PHONE_DIGITS: usize = 10;

/// C0 control characters and DEL.
const fn is_control(ch: char) -> bool {
    matches!(ch, '\u{00}'..='\u{1f}' | '\u{7f}')
}

fn strip_controls(input: &str) -> String {
    input.chars().filter(|&ch| !is_control(ch)).collect()
}

/// Keeps at most `max` characters (not bytes).
#[must_use]
pub fn clamp_chars(input: &str, max: usize) -> String {
    input.chars().take(max).collect()
}

/// Strips control characters and collapses runs of two or more whitespace
/// characters into a single space. A lone whitespace character is kept as typed.
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut run = String::new();

    for ch in input.chars().filter(|&ch| !is_control(ch)) {
        if ch.is_whitespace() {
            run.push(ch);
            continue;
        }
        flush_whitespace(&mut out, &mut run);
        out.push(ch);
    }
    flush_whitespace(&mut out, &mut run);

    out
}

fn flush_whitespace(out: &mut String, run: &mut String) {
    if run.chars().nth(1).is_some() {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}

/// Canonical email form, also used as the credential store key: control
/// characters removed, trimmed, lowercased, clamped to 254 characters.
///
/// Idempotent; a clamp that lands inside trailing whitespace is trimmed again.
#[must_use]
pub fn sanitize_email(input: &str) -> String {
    let lowered = strip_controls(input).trim().to_lowercase();
    clamp_chars(&lowered, EMAIL_MAX_CHARS).trim_end().to_string()
}

/// Digits of a phone entry, in order, without any clamp.
#[must_use]
pub fn phone_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Renders up to ten digits progressively as `(XXX) XXX-XXXX`.
#[must_use]
pub fn sanitize_phone_display(input: &str) -> String {
    let digits = clamp_chars(&phone_digits(input), PHONE_DIGITS);

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

/// Postal entry: control characters removed, uppercased, clamped to 10 characters.
#[must_use]
pub fn sanitize_postal_display(input: &str) -> String {
    clamp_chars(&strip_controls(input).to_uppercase(), POSTAL_MAX_CHARS)
}

/// Passwords are only stripped of control characters and clamped; case and
/// inner whitespace are preserved verbatim.
#[must_use]
pub fn sanitize_secret(input: &str) -> String {
    clamp_chars(&strip_controls(input), SECRET_MAX_CHARS)
}
