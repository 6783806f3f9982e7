//! Pluralization for log lines.

/// Return "s" suffix for plural counts
#[inline]
fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun: `plural_count(3, "url")` -> `"3 urls"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
