//! Digit grouping
//!
//! Renders a run of ASCII digits with a separator every three digits from the
//! least significant end (US grouping).

/// Default grouping separator (en-US)
pub const DEFAULT_SEPARATOR: char = ',';

/// Digits per group
const GROUP_SIZE: usize = 3;

/// Format a digit string with thousand separators.
///
/// The input is treated as an integer value: leading zeros are dropped, and a
/// run made only of zeros renders as `0`. Grouping works on the digits
/// themselves, so values of any length are rendered exactly.
///
/// Callers must pass ASCII digits only.
pub fn format_with_grouping(digits: &str, separator: char) -> String {
    debug_assert!(digits.bytes().all(|b| b.is_ascii_digit()));

    let trimmed = digits.trim_start_matches('0');
    let value = if trimmed.is_empty() { "0" } else { trimmed };

    let len = value.len();
    let mut out = String::with_capacity(len + len / GROUP_SIZE);
    for (i, c) in value.chars().enumerate() {
        if i > 0 && (len - i) % GROUP_SIZE == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
