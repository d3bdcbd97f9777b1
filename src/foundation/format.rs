/// Separator placed between digit groups of counter values.
pub const THOUSANDS_SEPARATOR: char = '.';

/// Format `value` with `sep` between every group of three digits (`1234567` -> `1.234.567`).
pub fn group_thousands(value: u64, sep: char) -> String {
    let digits = value.to_string();
    let lead = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Counter label as drawn on frames and used for overlay sizing.
pub fn counter_label(iteration: u64) -> String {
    group_thousands(iteration, THOUSANDS_SEPARATOR)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/format.rs"]
mod tests;
