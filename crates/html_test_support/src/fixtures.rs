//! TOML fixture manifests.
//!
//! A manifest is a `format` marker plus an array of `[[cases]]` tables whose
//! shape is chosen by the caller:
//!
//! ```toml
//! format = "rte-fixture-v1"
//!
//! [[cases]]
//! id = "wrap-middle-word"
//! input = "<p>Hello world</p>"
//! ```
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const FIXTURE_FORMAT_V1: &str = "rte-fixture-v1";

#[derive(Deserialize)]
struct Manifest<T> {
    format: String,
    cases: Vec<T>,
}

/// Anything with a stable id, so manifests can be checked for duplicates.
pub trait FixtureCase {
    fn id(&self) -> &str;
}

/// Input fragment and expected snapshot lines, the most common case shape.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FragmentCase {
    pub id: String,
    pub input: String,
    #[serde(default)]
    pub expected: Vec<String>,
}

impl FixtureCase for FragmentCase {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn parse_cases<T>(content: &str, origin: &str) -> Vec<T>
where
    T: DeserializeOwned + FixtureCase,
{
    let manifest: Manifest<T> = match toml::from_str(content) {
        Ok(manifest) => manifest,
        Err(err) => panic!("invalid fixture manifest {origin}: {err}"),
    };
    assert_eq!(
        manifest.format, FIXTURE_FORMAT_V1,
        "unsupported fixture format in {origin}"
    );
    assert!(!manifest.cases.is_empty(), "fixture manifest {origin} has no cases");
    let mut seen = BTreeSet::new();
    for case in &manifest.cases {
        assert!(!case.id().trim().is_empty(), "blank case id in {origin}");
        if !seen.insert(case.id().to_string()) {
            panic!("duplicate case id '{}' in {origin}", case.id());
        }
    }
    manifest.cases
}

pub fn load_cases<T>(path: &Path) -> Vec<T>
where
    T: DeserializeOwned + FixtureCase,
{
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture manifest {path:?}: {err}"));
    parse_cases(&content, &format!("{path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fragment_cases() {
        let cases: Vec<FragmentCase> = parse_cases(
            r#"
format = "rte-fixture-v1"

[[cases]]
id = "one"
input = "<b>x</b>"
expected = ["<b>", "  \"x\""]

[[cases]]
id = "two"
input = "y"
"#,
            "inline",
        );
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].expected.len(), 2);
        assert!(cases[1].expected.is_empty());
    }

    #[test]
    #[should_panic(expected = "duplicate case id 'one'")]
    fn rejects_duplicate_ids() {
        let _: Vec<FragmentCase> = parse_cases(
            r#"
format = "rte-fixture-v1"
[[cases]]
id = "one"
input = ""
[[cases]]
id = "one"
input = ""
"#,
            "inline",
        );
    }

    #[test]
    #[should_panic(expected = "unsupported fixture format")]
    fn rejects_unknown_format() {
        let _: Vec<FragmentCase> = parse_cases(
            "format = \"v0\"\n[[cases]]\nid = \"a\"\ninput = \"\"\n",
            "inline",
        );
    }
}
