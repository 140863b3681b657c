//! Property-based tests for style selection, folding and document framing.

use proptest::prelude::*;
use yaml_dump::fold::fold_line;
use yaml_dump::scalar::{choose_style, render, ScalarStyle};
use yaml_dump::{dump, DumpOptions, Mapping, Schema, Value};

/// Reads back a literal block scalar written at two spaces of indentation.
fn read_literal(block: &str) -> String {
    let (header, body) = block.split_once('\n').unwrap_or((block, ""));
    let mut text = body
        .split('\n')
        .map(|line| line.strip_prefix("  ").unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n");
    if !header.ends_with('-') {
        text.push('\n');
    }
    text
}

fn scalar_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,12}"
}

fn value_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        scalar_text().prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..4).prop_map(|pairs| {
                Value::Mapping(
                    pairs
                        .into_iter()
                        .map(|(k, v)| (Value::from(k), v))
                        .collect::<Mapping>(),
                )
            }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_plain_safe_words_stay_plain(s in "[a-z][a-z0-9]{0,20}") {
        let schema = Schema::core();
        prop_assume!(!schema.is_ambiguous(&s));

        let style = choose_style(&s, false, 2, Some(80), |t| schema.is_ambiguous(t));
        prop_assert_eq!(style, ScalarStyle::Plain);

        let options = DumpOptions::new().with_no_compat_mode(true);
        prop_assert_eq!(dump(&Value::from(s.as_str()), &options).unwrap(), format!("{}\n", s));
    }

    #[test]
    fn prop_multiline_text_is_literal(lines in prop::collection::vec("[a-z ]{0,10}", 2..6)) {
        let s = lines.join("\n");
        let style = choose_style(&s, false, 2, None, |_| false);
        prop_assert_eq!(style, ScalarStyle::Literal);

        let block = render(&s, style, 2, 2, None);
        prop_assert_eq!(read_literal(&block), s);
    }

    #[test]
    fn prop_short_lines_are_not_folded(line in "[a-z ]{0,40}", width in 40usize..120) {
        prop_assert_eq!(fold_line(&line, width), line);
    }

    #[test]
    fn prop_folding_only_replaces_spaces(
        line in "[a-z]{1,8}( [a-z]{1,8}){0,20}",
        width in 5usize..40
    ) {
        let folded = fold_line(&line, width);
        prop_assert_eq!(folded.replace('\n', " "), line);
    }

    #[test]
    fn prop_document_ends_with_one_line_break(value in value_tree()) {
        let out = dump(&value, &DumpOptions::new()).unwrap();
        prop_assert!(out.ends_with('\n'));
        prop_assert!(!out.ends_with("\n\n"));
    }

    #[test]
    fn prop_dump_is_deterministic(value in value_tree()) {
        let options = DumpOptions::new().with_sort_keys(true);
        prop_assert_eq!(dump(&value, &options).unwrap(), dump(&value, &options).unwrap());
    }

    #[test]
    fn prop_flow_output_is_single_line(value in value_tree()) {
        let out = dump(&value, &DumpOptions::new().with_flow_level(0)).unwrap();
        prop_assert_eq!(out.matches('\n').count(), 1);
    }
}
