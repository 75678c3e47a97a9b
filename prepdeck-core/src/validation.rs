//! Lesson validation.
//!
//! The renderer accepts any parsed lesson. These checks catch authoring
//! mistakes before publishing: answer keys that name no option, broken Data
//! Sufficiency letters, duplicate anchors, ragged tables.
//!
//! Validation collects ALL issues (doesn't stop at first) to provide
//! comprehensive feedback to authors.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{ContentError, Severity, ValidationIssue};
use crate::lesson::schema::{
    Block, CorrectOption, ExampleCard, Image, Inline, Lesson, McqQuestion, Table,
};

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

// ============================================================================
// Public API
// ============================================================================

/// Result of lesson validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (lesson should not be published).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if there are no errors and no warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Add an issue to the matching list.
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }
}

/// Lesson validator.
#[derive(Debug, Default)]
pub struct LessonValidator {
    result: ValidationResult,
}

impl LessonValidator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a lesson, returning every issue found.
    pub fn validate(&mut self, lesson: &Lesson) -> ValidationResult {
        self.validate_metadata(lesson);
        self.validate_blocks(lesson);
        std::mem::take(&mut self.result)
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.result.push(ValidationIssue::error(path, message));
    }

    fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.result.push(ValidationIssue::warning(path, message));
    }

    fn validate_metadata(&mut self, lesson: &Lesson) {
        if lesson.metadata.title.trim().is_empty() {
            self.error("metadata.title", "title is empty");
        }
        if lesson.metadata.description.trim().is_empty() {
            self.warning("metadata.description", "description is empty");
        }
        if lesson.heading.topic.trim().is_empty() {
            self.error("heading.topic", "topic heading is empty");
        }
        if lesson.heading.subtopic.trim().is_empty() {
            self.error("heading.subtopic", "subtopic heading is empty");
        }
    }

    fn validate_blocks(&mut self, lesson: &Lesson) {
        let mut anchors: HashSet<String> = HashSet::new();
        let mut last_number: Option<(u32, String)> = None;

        for (path, block) in lesson.walk() {
            let number = match block {
                Block::Mcq(q) => {
                    self.validate_question(&path, q);
                    q.number
                }
                Block::Example(card) => {
                    self.validate_example(&path, card);
                    card.number
                }
                Block::Section(section) => {
                    let anchor = section.anchor();
                    if !anchors.insert(anchor.clone()) {
                        self.error(
                            format!("{path}.id"),
                            format!("duplicate section id \"{anchor}\""),
                        );
                    }
                    None
                }
                Block::Math(math) => {
                    if math.expr.trim().is_empty() {
                        self.warning(format!("{path}.expr"), "formula is empty");
                    }
                    None
                }
                Block::Table(table) => {
                    self.validate_table(&path, table);
                    None
                }
                Block::List(list) => {
                    if list.items.is_empty() {
                        self.warning(format!("{path}.items"), "list has no items");
                    }
                    None
                }
                Block::Image(image) => {
                    self.validate_image(&path, image);
                    None
                }
                Block::Prose { .. } | Block::Callout(_) => None,
            };

            if let Some(number) = number {
                if let Some((previous, previous_path)) = &last_number {
                    if number <= *previous {
                        self.warning(
                            format!("{path}.number"),
                            format!(
                                "question number {number} does not follow {previous} at {previous_path}"
                            ),
                        );
                    }
                }
                last_number = Some((number, path.clone()));
            }
        }
    }

    fn validate_question(&mut self, path: &str, q: &McqQuestion) {
        if q.prompt.is_empty() {
            self.error(format!("{path}.prompt"), "prompt is empty");
        }

        if q.options.len() < 2 {
            self.error(
                format!("{path}.options"),
                format!("expected at least 2 options, got {}", q.options.len()),
            );
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for (i, option) in q.options.iter().enumerate() {
            let source = option.source().trim().to_string();
            if let Some(first) = seen.get(&source) {
                self.warning(
                    format!("{path}.options[{i}]"),
                    format!("duplicate option \"{source}\", first at options[{first}]"),
                );
            } else {
                seen.insert(source, i);
            }
        }

        if q.correct_index().is_none() {
            let message = match &q.correct {
                CorrectOption::Index { index } => format!(
                    "correct index {index} is out of range for {} options",
                    q.options.len()
                ),
                CorrectOption::Value(value) => suggest(value, &q.options).map_or_else(
                    || format!("correct answer \"{value}\" is not among the options"),
                    |s| {
                        format!(
                            "correct answer \"{value}\" is not among the options (did you mean \"{s}\"?)"
                        )
                    },
                ),
            };
            self.error(format!("{path}.correct"), message);
        }
    }

    fn validate_example(&mut self, path: &str, card: &ExampleCard) {
        if card.title.trim().is_empty() {
            self.warning(format!("{path}.title"), "example title is empty");
        }
        if let Some(letter) = &card.correct_letter {
            if card.letter().is_none() {
                self.error(
                    format!("{path}.correct_letter"),
                    format!("expected one of A, B, C, D, E, got \"{letter}\""),
                );
            }
        }
    }

    fn validate_image(&mut self, path: &str, image: &Image) {
        if image.src.trim().is_empty() {
            self.error(format!("{path}.src"), "image source is empty");
        }
        if image.alt.trim().is_empty() {
            self.error(
                format!("{path}.alt"),
                "image has no alt text; describe what the chart shows",
            );
        }
    }

    fn validate_table(&mut self, path: &str, table: &Table) {
        if table.rows.is_empty() {
            self.warning(format!("{path}.rows"), "table has no rows");
        }
        let width = table
            .rows
            .first()
            .map_or(table.header.len(), Vec::len)
            .max(table.header.len());
        for (r, row) in table.rows.iter().enumerate() {
            if row.len() != width {
                self.error(
                    format!("{path}.rows[{r}]"),
                    format!("row has {} cells, expected {width}", row.len()),
                );
            }
        }
    }
}

/// Closest option to a mistyped answer key.
fn suggest(value: &str, options: &[Inline]) -> Option<String> {
    options
        .iter()
        .map(|option| option.source().trim().to_string())
        .map(|source| (strsim::jaro_winkler(value.trim(), &source), source))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, source)| source)
}

/// Detect lessons that resolve to the same id.
///
/// Returns one `ContentError::DuplicateId` per repeated id occurrence after
/// the first.
#[must_use]
pub fn detect_duplicate_ids<'a, I>(lessons: I) -> Vec<ContentError>
where
    I: IntoIterator<Item = (&'a Path, &'a Lesson)>,
{
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    let mut errors = Vec::new();

    for (path, lesson) in lessons {
        if let Some(first) = seen.get(lesson.id.as_str()) {
            errors.push(ContentError::DuplicateId {
                id: lesson.id.clone(),
                path: path.to_path_buf(),
                first: first.to_path_buf(),
            });
        } else {
            seen.insert(&lesson.id, path);
        }
    }

    errors
}
