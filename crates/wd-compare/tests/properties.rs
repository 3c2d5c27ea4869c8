//! End-to-end properties of the rendered segment stream.

use proptest::prelude::*;
use wd_compare::render_diff;
use wd_compare::tokenize::tokenize;
use wd_core::{change_count, has_changes, join_tokens, Navigation, Segment, Token};

const UNBOUNDED: usize = usize::MAX;

const SAMPLES: &[(&str, &str)] = &[
    ("hello world", "hello world"),
    ("The cat sat", "The dog sat"),
    ("", "new line"),
    ("old line", ""),
    ("a b c d e f g h", "a X c d Y f g Z"),
    (
        "The Borrower shall repay the loan.\nInterest accrues daily.",
        "The Borrower shall promptly repay the loan.\nInterest accrues  monthly.\nNew clause.",
    ),
    ("one  two   three", "one two three"),
    ("line one\nline two\nline three", "line three\nline one"),
];

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.as_str()).collect()
}

fn kind(segment: &Segment) -> &'static str {
    match segment {
        Segment::Unchanged { .. } => "unchanged",
        Segment::Inserted { .. } => "inserted",
        Segment::Deleted { .. } => "deleted",
        Segment::Elided { .. } => "elided",
    }
}

fn old_side(segments: &[Segment]) -> Vec<Token> {
    segments
        .iter()
        .filter(|s| matches!(s, Segment::Unchanged { .. } | Segment::Deleted { .. }))
        .flat_map(|s| s.tokens().iter().cloned())
        .collect()
}

fn new_side(segments: &[Segment]) -> Vec<Token> {
    segments
        .iter()
        .filter(|s| matches!(s, Segment::Unchanged { .. } | Segment::Inserted { .. }))
        .flat_map(|s| s.tokens().iter().cloned())
        .collect()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn identical_inputs_never_produce_changes() {
    for (text, _) in SAMPLES {
        for limit in [0, 1, 5, UNBOUNDED] {
            let segments = render_diff(text, text, limit).expect("render");
            assert!(
                !has_changes(&segments),
                "changes for identical {text:?} at limit {limit}: {segments:?}"
            );
        }
    }
}

#[test]
fn unbounded_stream_reconstructs_both_revisions() {
    for (old, new) in SAMPLES {
        let segments = render_diff(old, new, UNBOUNDED).expect("render");
        assert!(segments.iter().all(|s| !matches!(s, Segment::Elided { .. })));
        assert_eq!(old_side(&segments), tokenize(old).into_inner(), "old side of {old:?}");
        assert_eq!(new_side(&segments), tokenize(new).into_inner(), "new side of {new:?}");
    }
}

#[test]
fn segments_walk_the_original_in_order() {
    for (old, new) in SAMPLES {
        for limit in [0, 1, 2, UNBOUNDED] {
            let alpha = tokenize(old);
            let segments = render_diff(old, new, limit).expect("render");

            let mut position = 0;
            for segment in &segments {
                match segment {
                    Segment::Unchanged { tokens } | Segment::Deleted { tokens, .. } => {
                        assert_eq!(
                            tokens.as_slice(),
                            &alpha[position..position + tokens.len()],
                            "segment out of place in {old:?} -> {new:?} at limit {limit}"
                        );
                        position += tokens.len();
                    }
                    Segment::Elided { skipped } => position += skipped,
                    Segment::Inserted { .. } => {}
                }
            }
            assert_eq!(position, alpha.len(), "original not covered for {old:?}");
        }
    }
}

#[test]
fn long_unchanged_runs_are_elided_to_the_limit() {
    let text = vec!["a"; 30].join(" ");
    let total = tokenize(&text).len();
    assert_eq!(total, 60);

    for limit in [0, 1, 7, 29] {
        let segments = render_diff(&text, &text, limit).expect("render");
        let shape: Vec<&str> = segments.iter().map(kind).collect();
        if limit == 0 {
            assert_eq!(shape, vec!["elided"]);
        } else {
            assert_eq!(shape, vec!["unchanged", "elided", "unchanged"], "limit {limit}");
            assert_eq!(segments[0].tokens().len(), limit);
            assert_eq!(segments[2].tokens().len(), limit);
        }
        let skipped = segments
            .iter()
            .find_map(|s| match s {
                Segment::Elided { skipped } => Some(*skipped),
                _ => None,
            })
            .expect("elided segment");
        assert_eq!(skipped, total - 2 * limit);
    }

    // Exactly twice the limit is kept whole.
    let segments = render_diff(&text, &text, 30).expect("render");
    assert_eq!(segments.iter().map(kind).collect::<Vec<_>>(), vec!["unchanged"]);
}

#[test]
fn anchors_increase_by_one_per_group() {
    let segments = render_diff("a b c d e f g h", "a X c d Y f g Z", UNBOUNDED).expect("render");
    let anchors: Vec<usize> = segments.iter().filter_map(Segment::anchor).collect();
    assert_eq!(anchors, vec![1, 1, 2, 2, 3, 3]);
    assert_eq!(change_count(&segments), 3);

    let last = Navigation::for_anchor(3, change_count(&segments));
    assert_eq!(last.previous, Some(2));
    assert_eq!(last.next, None);
}

#[test]
fn concurrent_callers_get_identical_results() {
    let expected = render_diff(SAMPLES[5].0, SAMPLES[5].1, 3).expect("render");
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| render_diff(SAMPLES[5].0, SAMPLES[5].1, 3).expect("render")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread"), expected);
        }
    });
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_identical_text() {
    let segments = render_diff("hello world", "hello world", UNBOUNDED).expect("render");
    assert!(segments.iter().all(|s| !s.is_change()));
}

#[test]
fn scenario_single_word_replaced() {
    let segments = render_diff("The cat sat", "The dog sat", UNBOUNDED).expect("render");
    assert_eq!(
        segments,
        vec![
            Segment::Unchanged {
                tokens: vec![Token::word("The"), Token::space()]
            },
            Segment::Deleted {
                tokens: vec![Token::word("cat")],
                anchor: 1
            },
            Segment::Inserted {
                tokens: vec![Token::word("dog")],
                anchor: 1
            },
            Segment::Unchanged {
                tokens: vec![Token::space(), Token::word("sat"), Token::line_break()]
            },
        ]
    );
}

#[test]
fn scenario_insert_into_empty() {
    let segments = render_diff("", "new line", UNBOUNDED).expect("render");
    assert_eq!(segments.len(), 1, "segments: {segments:?}");
    match &segments[0] {
        Segment::Inserted { tokens, anchor } => {
            assert_eq!(*anchor, 1);
            assert_eq!(texts(tokens), vec!["new", " ", "line", "\n"]);
        }
        other => panic!("expected inserted segment, got {other:?}"),
    }
}

#[test]
fn scenario_edit_inside_long_unchanged_text() {
    let old: Vec<String> = (0..250).map(|i| format!("w{i}")).collect();
    let mut new = old.clone();
    new[125] = "edited".to_string();
    let (old, new) = (old.join(" "), new.join(" "));
    assert_eq!(tokenize(&old).len(), 500);

    let segments = render_diff(&old, &new, 10).expect("render");
    let shape: Vec<&str> = segments.iter().map(kind).collect();
    assert_eq!(
        shape,
        vec![
            "unchanged", "elided", "unchanged", "deleted", "inserted", "unchanged", "elided",
            "unchanged",
        ]
    );

    assert_eq!(join_tokens(segments[0].tokens()), "w0 w1 w2 w3 w4 ");
    assert_eq!(segments[1], Segment::Elided { skipped: 230 });
    assert_eq!(join_tokens(segments[2].tokens()), "w120 w121 w122 w123 w124 ");
    assert_eq!(texts(segments[3].tokens()), vec!["w125"]);
    assert_eq!(texts(segments[4].tokens()), vec!["edited"]);
    assert_eq!(segments[3].anchor(), Some(1));
    assert_eq!(segments[4].anchor(), Some(1));
    assert_eq!(join_tokens(segments[5].tokens()), " w126 w127 w128 w129 w130");
    assert_eq!(segments[6], Segment::Elided { skipped: 229 });
    assert_eq!(join_tokens(segments[7].tokens()), "w245 w246 w247 w248 w249\n");

    for index in [0, 2, 5, 7] {
        assert_eq!(segments[index].tokens().len(), 10, "segment {index}");
    }
}

// ---------------------------------------------------------------------------
// Generated inputs
// ---------------------------------------------------------------------------

/// Pieces small enough that random texts share plenty of tokens and hit
/// every whitespace rule.
const PIECES: &[&str] = &["a", "b", "c", " ", "  ", "\n", "\r\n", "\t"];

const LIMITS: [usize; 4] = [0, 1, 3, UNBOUNDED];

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(PIECES), 0..40).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn generated_identical_inputs_have_no_changes(old in text()) {
        for limit in LIMITS {
            let segments = render_diff(&old, &old, limit).expect("render");
            prop_assert!(!has_changes(&segments), "limit {}: {:?}", limit, segments);
        }
    }

    #[test]
    fn generated_stream_reconstructs_both_revisions(old in text(), new in text()) {
        let segments = render_diff(&old, &new, UNBOUNDED).expect("render");
        prop_assert_eq!(old_side(&segments), tokenize(&old).into_inner());
        prop_assert_eq!(new_side(&segments), tokenize(&new).into_inner());
        prop_assert_eq!(has_changes(&segments), tokenize(&old) != tokenize(&new));
    }

    #[test]
    fn generated_stream_walks_original_with_ordered_anchors(old in text(), new in text()) {
        let alpha = tokenize(&old);
        for limit in LIMITS {
            let segments = render_diff(&old, &new, limit).expect("render");

            let mut position = 0;
            for segment in &segments {
                match segment {
                    Segment::Unchanged { tokens } | Segment::Deleted { tokens, .. } => {
                        prop_assert!(position + tokens.len() <= alpha.len());
                        prop_assert_eq!(
                            tokens.as_slice(),
                            &alpha[position..position + tokens.len()]
                        );
                        position += tokens.len();
                    }
                    Segment::Elided { skipped } => position += skipped,
                    Segment::Inserted { .. } => {}
                }
            }
            prop_assert_eq!(position, alpha.len());

            // Anchors start at 1, never skip, and a group lists deletions first.
            let mut last: Option<(usize, &str)> = None;
            for segment in segments.iter().filter(|s| s.is_change()) {
                let anchor = segment.anchor().expect("change has anchor");
                let current = (anchor, kind(segment));
                match last {
                    None => prop_assert_eq!(anchor, 1),
                    Some((previous, previous_kind)) if previous == anchor => {
                        prop_assert_eq!((previous_kind, current.1), ("deleted", "inserted"));
                    }
                    Some((previous, _)) => prop_assert_eq!(anchor, previous + 1),
                }
                last = Some(current);
            }
            prop_assert_eq!(change_count(&segments), last.map_or(0, |(anchor, _)| anchor));
        }
    }

    #[test]
    fn generated_context_respects_limit(old in text(), new in text()) {
        for limit in LIMITS {
            let segments = render_diff(&old, &new, limit).expect("render");
            for (index, segment) in segments.iter().enumerate() {
                match segment {
                    Segment::Unchanged { tokens } => {
                        prop_assert!(!tokens.is_empty());
                        prop_assert!(tokens.len() <= limit.saturating_mul(2));
                    }
                    Segment::Elided { skipped } => {
                        prop_assert!(*skipped > 0);
                        prop_assert!(limit != UNBOUNDED);
                        if limit > 0 {
                            let before = &segments[index - 1];
                            let after = &segments[index + 1];
                            prop_assert_eq!(kind(before), "unchanged");
                            prop_assert_eq!(kind(after), "unchanged");
                            prop_assert_eq!(before.tokens().len(), limit);
                            prop_assert_eq!(after.tokens().len(), limit);
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}
