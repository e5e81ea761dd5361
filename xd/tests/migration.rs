use xd::clue::Direction;
use xd::grid::Position;
use xd::migrate::{MigrationError, needs_explicit_headers, to_explicit_headers};
use xd::parser::Parser;

fn parse(source: &str) -> xd::Crossword {
    Parser::new(source.to_string(), 0).parse().expect("parse failed")
}

const IMPLICIT: &str = "\
Title: Pairs
Author: Tester

CAT.DOG

A1. Feline ~ CAT
A2. Canine ~ DOG
";

const IMPLICIT_CROSSING: &str = "\
Title: Square
Author: Tester

AB
CD

A1. First ~ AB
A3. Second ~ CD

D1. Third ~ AC
D2. Fourth ~ BD
";

#[test]
fn implicit_documents_are_detected() {
    assert!(needs_explicit_headers(IMPLICIT));
    assert!(needs_explicit_headers(IMPLICIT_CROSSING));
}

#[test]
fn converted_documents_are_explicit() {
    let converted = to_explicit_headers(IMPLICIT).expect("conversion failed");
    assert!(!needs_explicit_headers(&converted));
}

#[test]
fn documents_without_clues_need_no_conversion() {
    assert!(!needs_explicit_headers("Title: Empty\n\nCAT\n.AT\nTAT\n"));
}

#[test]
fn conversion_injects_start_markers_in_place() {
    let converted = to_explicit_headers(IMPLICIT).expect("conversion failed");
    let lines: Vec<&str> = converted.split('\n').collect();
    let a1 = lines
        .iter()
        .position(|l| *l == "A1. Feline ~ CAT")
        .expect("clue line missing");
    assert_eq!(lines[a1 + 1], "A1 ^Start: 0,0");
    let a2 = lines
        .iter()
        .position(|l| *l == "A2. Canine ~ DOG")
        .expect("clue line missing");
    assert_eq!(lines[a2 + 1], "A2 ^Start: 0,4");
}

#[test]
fn conversion_preserves_original_lines() {
    let converted = to_explicit_headers(IMPLICIT_CROSSING).expect("conversion failed");
    let without_markers: Vec<&str> = converted
        .split('\n')
        .filter(|line| !line.contains("^Start:"))
        .collect();
    let original: Vec<&str> = IMPLICIT_CROSSING.split('\n').collect();
    assert_eq!(without_markers, original);
}

#[test]
fn conversion_is_idempotent() {
    let converted = to_explicit_headers(IMPLICIT).expect("conversion failed");
    let again = to_explicit_headers(&converted).expect("conversion failed");
    assert_eq!(converted, again);
}

#[test]
fn conversion_preserves_clue_semantics() {
    let before = parse(IMPLICIT_CROSSING);
    let converted = to_explicit_headers(IMPLICIT_CROSSING).expect("conversion failed");
    let after = parse(&converted);

    assert!(after.report.success, "report: {:?}", after.report);
    assert_eq!(before.clues.len(), after.clues.len());
    for (b, a) in before.clues.iter().zip(after.clues.iter()) {
        assert_eq!(b.label, a.label);
        assert_eq!(b.question, a.question);
        assert_eq!(b.answer, a.answer);
        assert_eq!(b.hint, a.hint);
        assert_eq!(b.position, a.position);
        assert_eq!(b.length, a.length);
    }
}

#[test]
fn crossing_words_get_their_replayed_positions() {
    let converted = to_explicit_headers(IMPLICIT_CROSSING).expect("conversion failed");
    let after = parse(&converted);
    assert_eq!(
        after.clues.down[0].explicit_start,
        Some(Position { row: 0, col: 0 })
    );
    assert_eq!(
        after.clues.down[1].explicit_start,
        Some(Position { row: 0, col: 1 })
    );
    assert_eq!(
        after.clues.across[1].explicit_start,
        Some(Position { row: 1, col: 0 })
    );
}

#[test]
fn markers_go_after_existing_annotations() {
    let source = IMPLICIT.replace(
        "A1. Feline ~ CAT\n",
        "A1. Feline ~ CAT\nA1 ^Hint: Purrs\n",
    );
    let converted = to_explicit_headers(&source).expect("conversion failed");
    let lines: Vec<&str> = converted.split('\n').collect();
    let hint = lines
        .iter()
        .position(|l| *l == "A1 ^Hint: Purrs")
        .expect("hint line missing");
    assert_eq!(lines[hint + 1], "A1 ^Start: 0,0");
}

#[test]
fn clue_count_mismatch_refuses_to_convert() {
    let source = IMPLICIT.replace("A2. Canine ~ DOG\n", "");
    let error = to_explicit_headers(&source).expect_err("expected mismatch");
    match error {
        MigrationError::CountMismatch {
            direction,
            clues,
            words,
        } => {
            assert_eq!(direction, Direction::Across);
            assert_eq!(clues, 1);
            assert_eq!(words, 2);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn explicit_documents_pass_through_unchanged() {
    let converted = to_explicit_headers(IMPLICIT).expect("conversion failed");
    let passthrough = to_explicit_headers(&converted).expect("conversion failed");
    assert_eq!(converted, passthrough);

    // Even one stated position makes the document explicit.
    let partly = IMPLICIT.replace(
        "A1. Feline ~ CAT\n",
        "A1. Feline ~ CAT\nA1 ^Start: 0,0\n",
    );
    assert!(!needs_explicit_headers(&partly));
    assert_eq!(to_explicit_headers(&partly).expect("conversion failed"), partly);
}

#[test]
fn unparsable_documents_refuse_to_convert() {
    let error = to_explicit_headers("Title: Broken\n\nA1. No grid ~ HERE\n")
        .expect_err("expected failure");
    assert!(matches!(error, MigrationError::Parse(_)));
}
