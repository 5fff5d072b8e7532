use editor::{ContentNode, convert, serialize_nodes, text_content};
use html::{fragment_text, parse_fragment};
use html_test_support::{FixtureCase, assert_lines_eq, load_cases};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct ConvertCase {
    id: String,
    input: String,
    nodes: Vec<String>,
}

impl FixtureCase for ConvertCase {
    fn id(&self) -> &str {
        &self.id
    }
}

fn cases() -> Vec<ConvertCase> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/convert_cases.toml");
    load_cases(&path)
}

fn describe(node: &ContentNode) -> String {
    match node {
        ContentNode::Text { content } => format!("text:{content}"),
        ContentNode::InlineStyled {
            style_class,
            children,
        } => format!("inline:{style_class}:{}", text_content(children)),
        ContentNode::Opaque { raw_markup } => format!("opaque:{raw_markup}"),
    }
}

#[test]
fn convert_matches_fixtures() {
    for case in cases() {
        let actual: Vec<String> = convert(&case.input).iter().map(describe).collect();
        assert_lines_eq(&case.nodes, &actual, &case.id);
    }
}

#[test]
fn convert_preserves_text_content() {
    for case in cases() {
        let nodes = convert(&case.input);
        assert_eq!(
            text_content(&nodes),
            fragment_text(&parse_fragment(&case.input)),
            "{}",
            case.id
        );
    }
}

#[test]
fn inline_nodes_hold_exactly_one_text_child() {
    for case in cases() {
        for node in convert(&case.input) {
            if let ContentNode::InlineStyled { children, .. } = node {
                assert!(
                    matches!(children.as_slice(), [ContentNode::Text { .. }]),
                    "{}",
                    case.id
                );
            }
        }
    }
}

#[test]
fn serialized_nodes_convert_back_to_the_same_nodes() {
    for case in cases() {
        let nodes = convert(&case.input);
        assert_eq!(convert(&serialize_nodes(&nodes)), nodes, "{}", case.id);
    }
}
