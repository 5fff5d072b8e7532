//! Shared helpers for the fixture-driven tests: TOML case manifests and
//! line-snapshot comparison.
pub mod fixtures;

pub use fixtures::{FIXTURE_FORMAT_V1, FixtureCase, FragmentCase, load_cases, parse_cases};

use std::fmt::Write;

const MISSING: &str = "<missing>";
const CONTEXT: usize = 2;

fn line_at(lines: &[String], index: usize) -> &str {
    lines.get(index).map(String::as_str).unwrap_or(MISSING)
}

/// Human-readable report of where two snapshots diverge, with a couple of
/// lines of context around the first differing line.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    let total = expected.len().max(actual.len());
    let first = (0..total).find(|&i| line_at(expected, i) != line_at(actual, i));

    let mut out = String::new();
    if let Some(first) = first {
        let from = first.saturating_sub(CONTEXT);
        let to = (first + CONTEXT + 1).min(total);
        let _ = writeln!(out, "first mismatch at line {}:", first + 1);
        for i in from..to {
            let marker = if i == first { '>' } else { ' ' };
            let _ = writeln!(out, "{marker} {:>4}  expected: {}", i + 1, line_at(expected, i));
            let _ = writeln!(out, "{marker} {:>4}    actual: {}", i + 1, line_at(actual, i));
        }
    }
    let _ = writeln!(
        out,
        "expected {} line(s), actual {} line(s)",
        expected.len(),
        actual.len()
    );
    out
}

/// Panics with a windowed diff when the two snapshots differ.
pub fn assert_lines_eq(expected: &[String], actual: &[String], context: &str) {
    if expected != actual {
        panic!("{context}: snapshot mismatch\n{}", diff_lines(expected, actual));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn diff_lines_points_at_first_mismatch() {
        let diff = diff_lines(&lines(&["a", "b"]), &lines(&["a", "c"]));
        assert!(diff.contains("first mismatch at line 2"), "{diff}");
        assert!(diff.contains("expected: b"), "{diff}");
        assert!(diff.contains("actual: c"), "{diff}");
    }

    #[test]
    fn diff_lines_marks_missing_tail() {
        let diff = diff_lines(&lines(&["a"]), &lines(&["a", "b"]));
        assert!(diff.contains("first mismatch at line 2"), "{diff}");
        assert!(diff.contains("expected: <missing>"), "{diff}");
        assert!(diff.contains("expected 1 line(s), actual 2 line(s)"), "{diff}");
    }

    #[test]
    #[should_panic(expected = "case-x: snapshot mismatch")]
    fn assert_lines_eq_panics_with_context() {
        assert_lines_eq(&lines(&["a"]), &lines(&["b"]), "case-x");
    }

    #[test]
    fn assert_lines_eq_accepts_equal_snapshots() {
        assert_lines_eq(&lines(&["a", "b"]), &lines(&["a", "b"]), "same");
    }
}
