use crate::clue::{Clue, ClueLabel, ClueSet};
use crate::config::ParseOptions;
use crate::report::{Diagnostic, Severity};

/// One lint rule: appends its findings and never halts the others.
type Rule = fn(&Context<'_>, &mut Vec<Diagnostic>);

/// Rules run in declaration order; within a rule, findings follow clue
/// encounter order (across first, each list in source order).
const RULES: &[Rule] = &[answer_leak, multiword_enumeration, meta_completeness];

/// Everything the rules may look at. Linting only sees a model that passed
/// validation; `failed` lists the clues it must skip.
pub struct Context<'a> {
    pub meta: &'a [(String, String)],
    pub clues: &'a ClueSet,
    pub failed: &'a [ClueLabel],
    pub options: &'a ParseOptions,
}

impl Context<'_> {
    fn validated(&self) -> impl Iterator<Item = &Clue> {
        self.clues
            .iter()
            .filter(|clue| !self.failed.contains(&clue.label))
    }
}

pub fn run(context: &Context<'_>) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    for rule in RULES {
        rule(context, &mut findings);
    }
    if context.options.strict_linting {
        for finding in &mut findings {
            finding.severity = Severity::Error;
        }
    }
    findings
}

/// The answer appearing verbatim in its own question, any casing.
fn answer_leak(context: &Context<'_>, findings: &mut Vec<Diagnostic>) {
    for clue in context.validated() {
        let letters = clue.letters(context.options.split_character);
        if letters.is_empty() {
            continue;
        }
        if clue
            .question
            .to_lowercase()
            .contains(&letters.to_lowercase())
        {
            findings.push(
                Diagnostic::warning(format!("answer appears in clue text for {}", clue.label))
                    .about_clue(clue),
            );
        }
    }
}

/// Multi-word answers should tell the solver the breakdown, either in the
/// question or in a hint, as a `(3,5)`-style enumeration.
fn multiword_enumeration(context: &Context<'_>, findings: &mut Vec<Diagnostic>) {
    for clue in context.validated() {
        if !clue.answer.contains(context.options.split_character) {
            continue;
        }
        let hinted = has_enumeration(&clue.question)
            || clue.hint.as_deref().is_some_and(has_enumeration);
        if !hinted {
            findings.push(
                Diagnostic::warning(format!(
                    "multi-word answer missing length hint for {}",
                    clue.label
                ))
                .about_clue(clue),
            );
        }
    }
}

fn meta_completeness(context: &Context<'_>, findings: &mut Vec<Diagnostic>) {
    if context.meta.is_empty() {
        findings.push(Diagnostic::warning("metadata section is empty"));
        return;
    }
    for key in &context.options.required_meta_keys {
        if !context
            .meta
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(key))
        {
            findings.push(Diagnostic::warning(format!(
                "missing required metadata key: {}",
                key
            )));
        }
    }
}

/// True if the text carries a parenthesized comma-separated length
/// breakdown with at least two numbers, e.g. `(3,5)`.
fn has_enumeration(text: &str) -> bool {
    let mut rest = text;
    while let Some(open) = rest.find('(') {
        let tail = &rest[open + 1..];
        let Some(close) = tail.find(')') else {
            return false;
        };
        let parts: Vec<&str> = tail[..close].split(',').collect();
        if parts.len() >= 2
            && parts.iter().all(|part| {
                let part = part.trim();
                !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit())
            })
        {
            return true;
        }
        rest = &tail[close + 1..];
    }
    false
}
