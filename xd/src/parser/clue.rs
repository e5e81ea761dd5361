use crate::clue::{Clue, ClueLabel, Direction};
use crate::config::ParseOptions;
use crate::grid::Position;
use crate::parser::error::ParseError;
use crate::parser::segment::{Line, Section};

/// A parsed annotation continuation line, e.g. `A1 ^Hint: think feathers`.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub label: ClueLabel,
    pub key: String,
    pub value: String,
}

/// Parse one clues section into clue records, in source order.
///
/// Any line matching neither grammar is fatal: skipping it would silently
/// drop a clue, and downstream linking would mispair everything after it.
pub fn parse_clues(
    section: &Section,
    file_id: usize,
    options: &ParseOptions,
) -> Result<Vec<Clue>, ParseError> {
    let mut clues: Vec<Clue> = Vec::new();

    for line in &section.lines {
        if let Some((label, question, answer)) = split_clue_line(&line.text) {
            let split_character = answer
                .contains(options.split_character)
                .then_some(options.split_character);
            clues.push(Clue {
                label,
                question,
                answer,
                hint: None,
                split_character,
                explicit_start: None,
                position: None,
                length: None,
                line: line.number,
                span: line.span.clone(),
            });
        } else if let Some(annotation) = split_annotation_line(&line.text) {
            apply_annotation(annotation, &mut clues, line, file_id)?;
        } else {
            return Err(ParseError::clue_syntax(
                format!("cannot parse clue line: {}", line.text),
                line.span.clone(),
                file_id,
            )
            .with_note("expected `A1. question ~ ANSWER` or an annotation like `A1 ^Hint: text`"));
        }
    }

    Ok(clues)
}

fn apply_annotation(
    annotation: Annotation,
    clues: &mut [Clue],
    line: &Line,
    file_id: usize,
) -> Result<(), ParseError> {
    let Some(clue) = clues.last_mut() else {
        return Err(ParseError::clue_syntax(
            format!("annotation for {} appears before any clue", annotation.label),
            line.span.clone(),
            file_id,
        ));
    };
    if clue.label != annotation.label {
        return Err(ParseError::clue_syntax(
            format!(
                "annotation labelled {} follows clue {}",
                annotation.label, clue.label
            ),
            line.span.clone(),
            file_id,
        ));
    }

    match annotation.key.as_str() {
        "Hint" => clue.hint = Some(annotation.value),
        "Start" => {
            let position = parse_start(&annotation.value).ok_or_else(|| {
                ParseError::clue_syntax(
                    format!("malformed start position: {}", annotation.value),
                    line.span.clone(),
                    file_id,
                )
                .with_note("expected zero-based `row,col`")
            })?;
            clue.explicit_start = Some(position);
        }
        // Other keys come from authoring tools whose data we don't model.
        _ => {}
    }
    Ok(())
}

/// Split `A1. question text ~ ANSWER` into its parts. The last `~` on the
/// line separates question from answer, so questions may contain tildes.
pub(crate) fn split_clue_line(text: &str) -> Option<(ClueLabel, String, String)> {
    let (label, rest) = split_label(text)?;
    let rest = rest.strip_prefix('.')?;
    let (question, answer) = rest.rsplit_once('~')?;
    let question = question.trim();
    let answer = answer.trim();
    if question.is_empty() || answer.is_empty() {
        return None;
    }
    Some((label, question.to_string(), answer.to_string()))
}

/// Split `A1 ^Key: value` into an [`Annotation`].
pub(crate) fn split_annotation_line(text: &str) -> Option<Annotation> {
    let (label, rest) = split_label(text)?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('^')?;
    let (key, value) = rest.split_once(':')?;
    if key.is_empty() || !key.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        return None;
    }
    Some(Annotation {
        label,
        key: key.to_string(),
        value: value.trim().to_string(),
    })
}

/// A label prefix: a direction letter followed by digits, e.g. `D12`.
fn split_label(text: &str) -> Option<(ClueLabel, &str)> {
    let direction = Direction::from_letter(text.chars().next()?)?;
    let digits_len = text[1..]
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(text.len() - 1);
    if digits_len == 0 {
        return None;
    }
    let number = text[1..1 + digits_len].parse().ok()?;
    Some((
        ClueLabel { direction, number },
        &text[1 + digits_len..],
    ))
}

/// Zero-based `row,col`.
fn parse_start(value: &str) -> Option<Position> {
    let (row, col) = value.split_once(',')?;
    Some(Position {
        row: row.trim().parse().ok()?,
        col: col.trim().parse().ok()?,
    })
}
