//! Tests for outline parsing and block creation order

use super::*;
use crate::models::Block;
use crate::outline::render_block;
use std::sync::Mutex;

/// (parent_uid, text, block_uid) per call
type Call = (String, String, String);

#[derive(Error, Debug)]
#[error("remote rejected block '{0}'")]
struct Rejected(String);

#[derive(Default)]
struct RecordingCreator {
    calls: Mutex<Vec<Call>>,
    fail_on_text: Option<&'static str>,
}

impl RecordingCreator {
    fn failing_on(text: &'static str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_text: Some(text),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlockCreator for RecordingCreator {
    type Outcome = String;
    type Error = Rejected;

    async fn create_block(
        &self,
        parent_uid: &str,
        text: &str,
        block_uid: &str,
    ) -> Result<String, Rejected> {
        if self.fail_on_text == Some(text) {
            return Err(Rejected(text.to_string()));
        }
        self.calls.lock().unwrap().push((
            parent_uid.to_string(),
            text.to_string(),
            block_uid.to_string(),
        ));
        Ok(format!("created {}", text))
    }
}

/// Text-only shape of a forest, for comparisons that ignore uids
#[derive(Debug, PartialEq)]
struct Shape(String, Vec<Shape>);

fn shape(blocks: &[OutlineBlock]) -> Vec<Shape> {
    blocks
        .iter()
        .map(|b| Shape(b.text.clone(), shape(&b.children)))
        .collect()
}

fn leaf(text: &str) -> Shape {
    Shape(text.to_string(), vec![])
}

fn node(text: &str, children: Vec<Shape>) -> Shape {
    Shape(text.to_string(), children)
}

// ============================================================================
// Depth inference
// ============================================================================

#[test]
fn test_width_zero_is_depth_zero() {
    let mut levels = IndentLevels::new();
    assert_eq!(levels.depth_for(0), 0);
}

#[test]
fn test_first_indent_is_depth_one_regardless_of_width() {
    let mut levels = IndentLevels::new();
    assert_eq!(levels.depth_for(7), 1);
}

#[test]
fn test_widths_0_2_5_3_collide_at_depth_two() {
    let mut levels = IndentLevels::new();
    assert_eq!(levels.depth_for(0), 0);
    assert_eq!(levels.depth_for(2), 1);
    assert_eq!(levels.depth_for(5), 2);
    assert_eq!(levels.depth_for(3), 2);

    // Assignments are stable once made
    assert_eq!(levels.depth_for(5), 2);
    assert_eq!(levels.depth_for(3), 2);
}

#[test]
fn test_new_wider_width_goes_one_below_largest_narrower() {
    let mut levels = IndentLevels::new();
    levels.depth_for(0);
    levels.depth_for(2);
    levels.depth_for(4);
    // 10 is new; the largest seen width below it is 4 (depth 2)
    assert_eq!(levels.depth_for(10), 3);
    // 3 is new; the largest seen width below it is 2 (depth 1)
    assert_eq!(levels.depth_for(3), 2);
}

#[test]
fn test_assignment_not_revised_by_later_widths() {
    let mut levels = IndentLevels::new();
    assert_eq!(levels.depth_for(8), 1);
    assert_eq!(levels.depth_for(4), 1);
    assert_eq!(levels.depth_for(8), 1);
}

// ============================================================================
// Tree shape
// ============================================================================

#[test]
fn test_dash_list_with_two_children() {
    let roots = parse_outline("- A\n  - B\n  - C");
    assert_eq!(shape(&roots), vec![node("A", vec![leaf("B"), leaf("C")])]);
}

#[test]
fn test_plain_lines_with_four_space_steps() {
    let roots = parse_outline("A\n    B\n        C");
    assert_eq!(
        shape(&roots),
        vec![node("A", vec![node("B", vec![leaf("C")])])]
    );
}

#[test]
fn test_colliding_widths_become_siblings() {
    let roots = parse_outline("A\n  B\n     C\n   D");
    assert_eq!(
        shape(&roots),
        vec![node("A", vec![node("B", vec![leaf("C"), leaf("D")])])]
    );
}

#[test]
fn test_dedent_returns_to_earlier_parent() {
    let text = "- A\n  - B\n    - C\n  - D\n- E\n  - F";
    let roots = parse_outline(text);
    assert_eq!(
        shape(&roots),
        vec![
            node("A", vec![node("B", vec![leaf("C")]), leaf("D")]),
            node("E", vec![leaf("F")]),
        ]
    );
}

#[test]
fn test_empty_input_yields_no_blocks() {
    assert!(parse_outline("").is_empty());
    assert!(parse_outline("\n   \n\t\n").is_empty());
}

#[test]
fn test_blank_lines_do_not_change_the_tree() {
    let dense = parse_outline("- A\n  - B\n    - C\n- D");
    let sparse = parse_outline("\n- A\n\n  - B\n   \n    - C\n\n\n- D\n");
    assert_eq!(shape(&dense), shape(&sparse));
}

#[test]
fn test_first_line_indented_becomes_root() {
    // A has no parent so it starts a root; B then finds A open at depth 0
    let roots = parse_outline("  - A\n  - B\n- C");
    assert_eq!(shape(&roots), vec![node("A", vec![leaf("B")]), leaf("C")]);
}

#[test]
fn test_depth_jump_without_parent_falls_back_to_root() {
    // 4 is depth 2 from the first block; after D (depth 0) there is no depth-1 parent
    let roots = parse_outline("A\n  B\n    C\nD\n    E\n  F");
    assert_eq!(
        shape(&roots),
        vec![
            node("A", vec![node("B", vec![leaf("C")])]),
            leaf("D"),
            node("E", vec![leaf("F")]),
        ]
    );
}

#[test]
fn test_only_leading_dash_space_is_stripped() {
    let roots = parse_outline("- - nested marker\n-no space\n-\n  -  two spaces");
    assert_eq!(roots[0].text, "- nested marker");
    assert_eq!(roots[1].text, "-no space");
    assert_eq!(roots[2].text, "-");
    assert_eq!(roots[2].children[0].text, " two spaces");
}

#[test]
fn test_reference_tokens_pass_through() {
    let roots = parse_outline("- Read [[Rust Book]]\n  - chapter [[Ownership]]");
    assert_eq!(roots[0].text, "Read [[Rust Book]]");
    assert_eq!(roots[0].children[0].text, "chapter [[Ownership]]");
}

#[test]
fn test_tabs_count_as_indentation() {
    let roots = parse_outline("A\n\tB\n\t\tC");
    assert_eq!(
        shape(&roots),
        vec![node("A", vec![node("B", vec![leaf("C")])])]
    );
}

#[test]
fn test_uids_unique_within_parse() {
    let roots = parse_outline("a\n b\n  c\nd\n e\n f");
    let mut uids = Vec::new();
    fn collect<'a>(blocks: &'a [OutlineBlock], uids: &mut Vec<&'a str>) {
        for b in blocks {
            uids.push(b.uid.as_str());
            collect(&b.children, uids);
        }
    }
    collect(&roots, &mut uids);
    let total = uids.len();
    uids.sort();
    uids.dedup();
    assert_eq!(total, 6);
    assert_eq!(uids.len(), 6);
}

#[test]
fn test_render_then_parse_preserves_shape() {
    let tree = Block::new("root [[Page]]")
        .with_child(
            Block::new("child one")
                .with_child(Block::new("grandchild").with_child(Block::new("great"))),
        )
        .with_child(Block::new("child two"));

    let markdown = render_block(&tree);
    let roots = parse_outline(&markdown);

    assert_eq!(
        shape(&roots),
        vec![node(
            "root [Page](Page)",
            vec![
                node(
                    "child one",
                    vec![node("grandchild", vec![leaf("great")])]
                ),
                leaf("child two"),
            ]
        )]
    );
}

// ============================================================================
// Creation order
// ============================================================================

#[tokio::test]
async fn test_write_creates_parent_before_children() {
    let creator = RecordingCreator::default();

    let result = write_outline(&creator, "page-uid", "- A\n  - B\n  - C")
        .await
        .unwrap();

    assert_eq!(result.created_count, 3);
    assert_eq!(result.details, vec!["created A", "created B", "created C"]);

    let calls = creator.calls();
    let (a_parent, a_text, a_uid) = &calls[0];
    assert_eq!(a_parent, "page-uid");
    assert_eq!(a_text, "A");
    assert_eq!(calls[1].0, *a_uid);
    assert_eq!(calls[1].1, "B");
    assert_eq!(calls[2].0, *a_uid);
    assert_eq!(calls[2].1, "C");
}

#[tokio::test]
async fn test_write_is_depth_first_left_to_right() {
    let creator = RecordingCreator::default();

    write_outline(&creator, "p", "A\n  A1\n    A1a\n  A2\nB\n  B1")
        .await
        .unwrap();

    let texts: Vec<String> = creator.calls().into_iter().map(|c| c.1).collect();
    assert_eq!(texts, vec!["A", "A1", "A1a", "A2", "B", "B1"]);
}

#[tokio::test]
async fn test_write_nests_by_parent_uid() {
    let creator = RecordingCreator::default();

    write_outline(&creator, "p", "A\n    B\n        C")
        .await
        .unwrap();

    let calls = creator.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].0, "p");
    assert_eq!(calls[1].0, calls[0].2);
    assert_eq!(calls[2].0, calls[1].2);
}

#[tokio::test]
async fn test_write_empty_input_makes_no_calls() {
    let creator = RecordingCreator::default();

    let result = write_outline(&creator, "p", "\n\n").await.unwrap();

    assert_eq!(result.created_count, 0);
    assert!(result.details.is_empty());
    assert!(creator.calls().is_empty());
}

#[tokio::test]
async fn test_write_stops_at_first_failure() {
    let creator = RecordingCreator::failing_on("B");

    let err = write_outline(&creator, "p", "A\n  B\n    B1\nC")
        .await
        .unwrap_err();

    assert_eq!(err.created, 1);
    assert_eq!(err.total, 4);
    assert_eq!(err.source.0, "B");

    let texts: Vec<String> = creator.calls().into_iter().map(|c| c.1).collect();
    assert_eq!(texts, vec!["A"]);
}

#[tokio::test]
async fn test_write_blocks_uses_parsed_uids() {
    let creator = RecordingCreator::default();
    let roots = parse_outline("A\n  B");

    write_blocks(&creator, "p", &roots).await.unwrap();

    let calls = creator.calls();
    assert_eq!(calls[0].2, roots[0].uid);
    assert_eq!(calls[1].2, roots[0].children[0].uid);
}
