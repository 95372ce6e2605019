use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use expect_test::expect_file;
use sylva_errors::ErrorCode;
use sylva_yellow::green::GreenValue;
use sylva_yellow::{
    RedElement, RedValue, SyntaxKind, TextLength as _, TextRange, TextSize, WalkEvent,
};

use crate::{Parse, ParseOptions, parse, parse_with};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "json" {
                    let expected = path.with_extension("tree");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

fn dump(parsed: &Parse) -> String {
    let mut actual = parsed.debug_tree();
    actual.push_str("errors:\n");
    for diagnostic in parsed.diagnostics() {
        _ = writeln!(actual, "  {}@{:?}", diagnostic.code(), diagnostic.range());
    }
    actual
}

fn codes(parsed: &Parse) -> Vec<ErrorCode> {
    parsed.diagnostics().iter().map(|diagnostic| diagnostic.code()).collect()
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn test_data() {
    let cases = TestCase::list();
    assert!(!cases.is_empty());

    for case in cases {
        let parsed = parse(&case.text);
        expect_file![&case.expected].assert_eq(&dump(&parsed));
    }
}

const INPUTS: &[&str] = &[
    "",
    "   ",
    "true",
    "{0, \"error\": [error,, true], \"ok\": -1 ] }",
    "[1,,2]",
    "/*",
    "{\"a\" \"b\": 1 : 2, , \"a\": {}} ]",
    "[[[[",
    "}}}{{{",
    "\"unterminated \\u12",
    "{\"k\": [1 2 3], \"k\": null, : 4,}",
    "// only a comment\n",
    "[\"\\ud83d\\ude00\", 18446744073709551616, -0]",
    "é , ]",
];

#[test]
fn lossless() {
    for &text in INPUTS {
        let parsed = parse(text);
        assert_eq!(parsed.text(), text);
        assert_eq!(parsed.green().text_len(), TextSize::of(text), "{text:?}");

        let tree = parsed.syntax();
        let mut rebuilt = String::new();
        let mut end = TextSize::new(0);
        for leaf in tree.leaves() {
            assert_eq!(leaf.range().start(), end, "{text:?}");
            end = leaf.range().end();
            rebuilt.push_str(&text[leaf.range()]);
        }
        assert_eq!(rebuilt, text);
    }
}

#[test]
fn sum_rule_and_positions() {
    for &text in INPUTS {
        let tree = parse(text).syntax();
        for event in tree.preorder() {
            let WalkEvent::Enter(element) = event else { continue };
            if !element.is_leaf() {
                let children: TextSize = element.children().map(RedElement::text_len).sum();
                assert_eq!(children, element.text_len(), "{element:?} in {text:?}");
            }
            if let Some(parent) = element.parent() {
                assert_eq!(element.absolute_start(), parent.absolute_start() + element.start());
            }
        }
    }
}

#[test]
fn deterministic() {
    for &text in INPUTS {
        assert_eq!(parse(text), parse(text));
    }
}

#[test]
fn diagnostics_are_sorted() {
    for &text in INPUTS {
        let parsed = parse(text);
        let starts: Vec<_> =
            parsed.diagnostics().iter().map(|diagnostic| diagnostic.start()).collect();
        assert!(starts.is_sorted(), "{text:?}");
        for diagnostic in parsed.diagnostics() {
            assert!(diagnostic.range().end() <= TextSize::of(text), "{text:?}");
        }
    }
}

#[test]
fn single_boolean() {
    let parsed = parse("true");
    assert!(parsed.diagnostics().is_empty());
    assert!(!parsed.has_errors());

    let root = parsed.green();
    assert_eq!(root.value_nodes().len(), 1);
    assert_eq!(root.value_node().content(), &GreenValue::TRUE);
    assert_eq!(root.text_len(), TextSize::new(4));
}

#[test]
fn recovery_inside_maps() {
    let text = "{0, \"error\": [error,, true], \"ok\": -1 ] }";
    let parsed = parse(text);
    assert_eq!(
        codes(&parsed),
        [
            ErrorCode::InvalidPropertyKey,
            ErrorCode::MissingSeparator,
            ErrorCode::UnknownSymbol,
            ErrorCode::MissingValue,
            ErrorCode::MissingClosingBracket,
            ErrorCode::ExpectedEndOfInput,
            ErrorCode::ExpectedEndOfInput,
        ]
    );

    let tree = parsed.syntax();
    let root = tree.root();
    assert_eq!(root.range(), TextRange::up_to(TextSize::of(text)));
    let RedValue::Map(map) = root.value() else { panic!("expected a map") };
    assert!(map.curly_close().is_none());
    assert_eq!(map.key_value_count(), 3);
    assert_eq!(map.filtered_key_value_count(), 2);
    assert_eq!(map.range(), range(0, 38));

    let error = map.key_value_node(1).value_node().expect("value section");
    let RedValue::List(list) = error.value() else { panic!("expected a list") };
    assert_eq!(list.list_item_count(), 3);
    assert_eq!(list.filtered_list_item_count(), 2);
}

#[test]
fn big_integer_root() {
    let parsed = parse("18446744073709551616");
    assert!(parsed.diagnostics().is_empty());
    let GreenValue::IntegerLiteral(literal) = parsed.green().value_node().content() else {
        panic!("expected an integer")
    };
    assert!(literal.value().is_big());
    assert_eq!(literal.value().to_string(), "18446744073709551616");
}

#[test]
fn missing_list_items() {
    let parsed = parse("[1,,2]");
    assert_eq!(codes(&parsed), [ErrorCode::MissingValue]);
    assert_eq!(parsed.diagnostics()[0].range(), range(3, 4));

    let GreenValue::List(list) = parsed.green().value_node().content() else {
        panic!("expected a list")
    };
    assert_eq!(list.list_item_nodes().len(), 3);
    assert_eq!(list.filtered_list_item_count(), 2);

    for tolerated in ["[]", "[ ]", "[1,]", "[1, 2]"] {
        assert!(parse(tolerated).diagnostics().is_empty(), "{tolerated:?}");
    }

    let parsed = parse("[,1]");
    assert_eq!(codes(&parsed), [ErrorCode::MissingValue]);
    assert_eq!(parsed.diagnostics()[0].range(), range(1, 2));
}

#[test]
fn unterminated_comment_root() {
    let parsed = parse("/*");
    assert_eq!(codes(&parsed), [ErrorCode::UnterminatedComment]);
    assert_eq!(parsed.diagnostics()[0].range(), range(0, 2));
    assert!(!parsed.has_errors());

    let tree = parsed.syntax();
    let leaves: Vec<_> = tree.leaves().map(|leaf| (leaf.kind(), leaf.range())).collect();
    assert_eq!(
        leaves,
        [(SyntaxKind::UNTERMINATED_COMMENT, range(0, 2)), (SyntaxKind::MISSING_VALUE, range(2, 2))]
    );

    let parsed = parse("1 /* open");
    assert_eq!(codes(&parsed), [ErrorCode::UnterminatedComment]);
    assert!(!parsed.has_errors());
}

#[test]
fn empty_roots() {
    for text in ["", "  \n", "// nothing"] {
        let parsed = parse(text);
        assert!(parsed.diagnostics().is_empty(), "{text:?}");
        assert!(parsed.green().value_node().content().is_missing());
        assert_eq!(parsed.green().text_len(), TextSize::of(text));
    }

    let parsed = parse(" ] ");
    assert_eq!(codes(&parsed), [ErrorCode::ExpectedEndOfInput]);
    assert!(parsed.green().value_node().content().is_missing());
}

#[test]
fn extra_values() {
    let parsed = parse("[1 \"two\" 3]");
    assert_eq!(codes(&parsed), [ErrorCode::ExtraValue, ErrorCode::ExtraValue]);
    assert_eq!(parsed.diagnostics()[0].range(), range(3, 8));
    assert_eq!(parsed.diagnostics()[1].range(), range(9, 10));

    let GreenValue::List(list) = parsed.green().value_node().content() else {
        panic!("expected a list")
    };
    let slot = &list.list_item_nodes()[0];
    assert_eq!(slot.value_nodes().len(), 3);
    assert_eq!(list.filtered_list_item_count(), 1);
}

#[test]
fn map_keys() {
    let parsed = parse("{\"a\": 1, \"a\": 2, \"b\": 3}");
    assert_eq!(codes(&parsed), [ErrorCode::DuplicatePropertyKey]);
    assert_eq!(parsed.diagnostics()[0].range(), range(9, 12));
    let GreenValue::Map(map) = parsed.green().value_node().content() else {
        panic!("expected a map")
    };
    let keys: Vec<_> = map.valid_key_values().map(|(key, _)| key.value()).collect();
    assert_eq!(keys, ["a", "b"]);

    let parsed = parse("{[]: 1, {}: 2, true: 3, null: 4, \"\\q\": 5, #: 6}");
    assert_eq!(
        codes(&parsed),
        [
            ErrorCode::InvalidPropertyKey,
            ErrorCode::InvalidPropertyKey,
            ErrorCode::InvalidPropertyKey,
            ErrorCode::UnknownSymbol,
            ErrorCode::BadEscapeSequence,
            ErrorCode::UnknownSymbol,
        ]
    );
}

#[test]
fn map_structure_errors() {
    let parsed = parse("{:1}");
    assert_eq!(codes(&parsed), [ErrorCode::MissingPropertyKey]);
    assert_eq!(parsed.diagnostics()[0].range(), range(1, 2));

    let parsed = parse("{,}");
    assert_eq!(codes(&parsed), [ErrorCode::MissingPropertyKey]);
    assert_eq!(parsed.diagnostics()[0].range(), range(1, 2));

    let parsed = parse("{\"a\"}");
    assert_eq!(codes(&parsed), [ErrorCode::MissingSeparator]);
    assert_eq!(parsed.diagnostics()[0].range(), range(4, 4));

    let parsed = parse("{\"a\":}");
    assert_eq!(codes(&parsed), [ErrorCode::MissingValue]);
    assert_eq!(parsed.diagnostics()[0].range(), range(5, 6));

    let parsed = parse("{\"a\": 1: 2}");
    assert_eq!(codes(&parsed), [ErrorCode::ExtraValueSection]);
    assert_eq!(parsed.diagnostics()[0].range(), range(7, 8));

    for tolerated in ["{}", "{ }", "{\"a\": 1,}"] {
        assert!(parse(tolerated).diagnostics().is_empty(), "{tolerated:?}");
    }
}

#[test]
fn missing_closing_brackets() {
    let parsed = parse("[1, 2");
    assert_eq!(codes(&parsed), [ErrorCode::MissingClosingBracket]);
    assert_eq!(parsed.diagnostics()[0].range(), range(5, 5));

    let parsed = parse("[1}");
    assert_eq!(codes(&parsed), [ErrorCode::MissingClosingBracket, ErrorCode::ExpectedEndOfInput]);
    assert_eq!(parsed.diagnostics()[0].range(), range(2, 3));
    assert_eq!(parsed.diagnostics()[1].range(), range(2, 3));
    let GreenValue::List(list) = parsed.green().value_node().content() else {
        panic!("expected a list")
    };
    assert!(list.missing_square_bracket_close());
    assert_eq!(list.text_len(), TextSize::new(2));
}

#[test]
fn nesting_limit() {
    let text = "[[[1]], 2]";
    let parsed = parse_with(text, ParseOptions::default().with_max_depth(2));
    assert_eq!(codes(&parsed), [ErrorCode::NestingTooDeep]);
    assert_eq!(parsed.diagnostics()[0].range(), range(2, 3));

    let tree = parsed.syntax();
    let skipped = tree.leaf_at(TextSize::new(3)).expect("leaf at 3");
    assert_eq!(skipped.kind(), SyntaxKind::UNDEFINED_VALUE);
    assert_eq!(skipped.range(), range(2, 5));
    let two = tree.leaf_at(TextSize::new(8)).expect("leaf at 8");
    assert_eq!(two.kind(), SyntaxKind::INTEGER_LITERAL);

    assert!(parse_with(text, ParseOptions::default().with_max_depth(3)).diagnostics().is_empty());
}

#[test]
fn skipped_region_hides_inner_errors() {
    let parsed = parse_with("[[# \"\\q\"]]", ParseOptions::default().with_max_depth(1));
    assert_eq!(codes(&parsed), [ErrorCode::NestingTooDeep]);

    let parsed = parse_with("[[[", ParseOptions::default().with_max_depth(1));
    assert_eq!(codes(&parsed), [ErrorCode::NestingTooDeep, ErrorCode::MissingClosingBracket]);
    assert_eq!(parsed.diagnostics()[1].range(), range(3, 3));
}

#[test]
fn deep_input_does_not_overflow() {
    let text = "[".repeat(100_000) + &"]".repeat(100_000);
    let parsed = parse(&text);
    assert_eq!(codes(&parsed), [ErrorCode::NestingTooDeep]);
    assert_eq!(parsed.green().text_len(), TextSize::of(text.as_str()));
}

#[test]
fn escaped_string_values() {
    let parsed = parse("{\"caf\\u00e9\": \"\\ud83d\\ude00\"}");
    assert!(parsed.diagnostics().is_empty());

    let tree = parsed.syntax();
    let RedValue::Map(map) = tree.root().value() else { panic!("expected a map") };
    let pair = map.key_value_node(0);
    assert_eq!(pair.valid_key().map(|key| key.value()), Some("café"));
    let value = pair.value_node().expect("value section").value();
    let RedValue::StringLiteral(string) = value else { panic!("expected a string") };
    assert_eq!(string.value(), "😀");
}

#[test]
fn red_error_strings() {
    let parsed = parse("[1, \"a\\qb\"]");
    assert_eq!(codes(&parsed), [ErrorCode::BadEscapeSequence]);
    assert_eq!(parsed.diagnostics()[0].range(), range(6, 8));

    let tree = parsed.syntax();
    let leaf = tree.leaf_at(TextSize::new(5)).expect("leaf at 5");
    let RedElement::Value(RedValue::ErrorString(string)) = leaf else {
        panic!("expected an error string")
    };
    let errors: Vec<_> = string.absolute_errors().collect();
    assert_eq!(errors, parsed.diagnostics());
}
