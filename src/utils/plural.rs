//! Pluralization utilities.

/// Return "s" suffix for plural counts
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "file")` -> `"0 files"`
/// - `plural_count(1, "stylesheet")` -> `"1 stylesheet"`
/// - `plural_count(2, "invocation")` -> `"2 invocations"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "file"), "0 files");
        assert_eq!(plural_count(1, "file"), "1 file");
        assert_eq!(plural_count(3, "build"), "3 builds");
    }
}
