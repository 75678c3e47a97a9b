//! Lesson checking.
//!
//! Runs the structural validator over every lesson and parses each formula
//! strictly. Malformed TeX only warns: pages still render it best-effort.

use serde::Serialize;

use prepdeck_core::catalog::Catalog;
use prepdeck_core::error::{ContentError, ValidationIssue};
use prepdeck_core::lesson::Lesson;
use prepdeck_core::validation::{LessonValidator, ValidationResult};
use prepdeck_render::{KatexEngine, MathEngine};

use super::load_site;
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::error::PrepdeckError;

/// Issues found in one lesson file.
#[derive(Debug, Serialize)]
pub struct LessonReport {
    /// Source file.
    pub path: String,
    /// Lesson id, absent when the file did not load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Errors.
    pub errors: Vec<ValidationIssue>,
    /// Warnings.
    pub warnings: Vec<ValidationIssue>,
}

impl LessonReport {
    /// Returns `true` if the lesson fails the check.
    #[must_use]
    pub fn fails(&self, strict: bool) -> bool {
        !self.errors.is_empty() || (strict && !self.warnings.is_empty())
    }
}

/// Totals across all reports.
#[derive(Debug, Default, Serialize)]
pub struct CheckSummary {
    /// Lesson files examined.
    pub lessons: usize,
    /// Total errors.
    pub errors: usize,
    /// Total warnings.
    pub warnings: usize,
    /// Files that fail the check.
    pub failed: usize,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    files: &'a [LessonReport],
    summary: CheckSummary,
}

/// Execute `check`.
///
/// # Errors
///
/// Returns `ContentError::ValidationFailed` if any lesson has errors (or
/// warnings under `--strict`), or an error if the content tree cannot be
/// read.
pub fn run(args: &CheckArgs) -> Result<(), PrepdeckError> {
    let site = load_site(&args.source)?;
    let catalog = Catalog::discover(&args.source.content, &site)?;
    let reports = check_catalog(&catalog, &KatexEngine);
    let summary = summarize(&reports, args.strict);

    match args.format {
        OutputFormat::Human => print_human(&reports, &summary),
        OutputFormat::Json => {
            let output = CheckOutput {
                files: &reports,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    let failed = reports.iter().filter(|r| r.fails(args.strict)).count();
    if failed > 0 {
        return Err(ContentError::ValidationFailed { count: failed }.into());
    }
    Ok(())
}

/// Check every lesson in a catalog, plus the files that failed to load.
#[must_use]
pub fn check_catalog(catalog: &Catalog, engine: &dyn MathEngine) -> Vec<LessonReport> {
    let mut reports: Vec<LessonReport> = catalog
        .failures
        .iter()
        .map(failure_report)
        .collect();

    for entry in catalog.lessons() {
        let result = check_lesson(&entry.lesson, engine);
        reports.push(LessonReport {
            path: entry.path.display().to_string(),
            id: Some(entry.lesson.id.clone()),
            errors: result.errors,
            warnings: result.warnings,
        });
    }
    reports
}

/// Validate one lesson and parse its formulas strictly.
#[must_use]
pub fn check_lesson(lesson: &Lesson, engine: &dyn MathEngine) -> ValidationResult {
    let mut result = LessonValidator::new().validate(lesson);
    for formula in lesson.formulas() {
        if formula.expr.trim().is_empty() {
            continue;
        }
        if let Err(e) = engine.check(&formula.expr, formula.display) {
            result.push(ValidationIssue::warning(formula.path, e.to_string()));
        }
    }
    tracing::debug!(
        lesson = %lesson.id,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "lesson checked"
    );
    result
}

fn failure_report(failure: &ContentError) -> LessonReport {
    let path = match failure {
        ContentError::ParseError { path, .. }
        | ContentError::Read { path, .. }
        | ContentError::MissingFile { path }
        | ContentError::DuplicateId { path, .. } => path.display().to_string(),
        ContentError::InvalidValue { .. } | ContentError::ValidationFailed { .. } => {
            String::new()
        }
    };
    LessonReport {
        path,
        id: None,
        errors: vec![ValidationIssue::error("", failure.to_string())],
        warnings: Vec::new(),
    }
}

fn summarize(reports: &[LessonReport], strict: bool) -> CheckSummary {
    CheckSummary {
        lessons: reports.len(),
        errors: reports.iter().map(|r| r.errors.len()).sum(),
        warnings: reports.iter().map(|r| r.warnings.len()).sum(),
        failed: reports.iter().filter(|r| r.fails(strict)).count(),
    }
}

fn print_human(reports: &[LessonReport], summary: &CheckSummary) {
    for report in reports {
        if report.errors.is_empty() && report.warnings.is_empty() {
            continue;
        }
        println!("{}", report.path);
        for issue in report.errors.iter().chain(&report.warnings) {
            if issue.path.is_empty() {
                println!("  {}", issue.message);
            } else {
                println!("  {issue}");
            }
        }
    }
    println!(
        "{} lesson(s) checked: {} error(s), {} warning(s)",
        summary.lessons, summary.errors, summary.warnings
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use prepdeck_core::catalog::CatalogEntry;
    use prepdeck_core::lesson::parse_lesson;
    use prepdeck_core::site::SiteConfig;
    use prepdeck_render::RenderError;
    use std::path::{Path, PathBuf};

    /// Rejects any formula containing an unbalanced brace.
    struct BraceEngine;

    impl MathEngine for BraceEngine {
        fn render(&self, expr: &str, _display: bool) -> Result<String, RenderError> {
            Ok(expr.to_string())
        }

        fn check(&self, expr: &str, _display: bool) -> Result<(), RenderError> {
            if expr.matches('{').count() == expr.matches('}').count() {
                Ok(())
            } else {
                Err(RenderError::Math {
                    formula: expr.to_string(),
                    message: "unbalanced braces".to_string(),
                })
            }
        }
    }

    const LESSON: &str = r#"
metadata:
  title: 5.3 Fractions
  description: Halves
heading:
  topic: 5. Roots
  subtopic: 5.3 Fractions
blocks:
  - type: prose
    text: "Half is $\\frac{1}{2$."
  - type: mcq
    number: 1
    prompt: Pick
    options: ["1", "2"]
    correct: "3"
"#;

    fn lesson() -> Lesson {
        parse_lesson(LESSON, Path::new("content/Roots/lesson3.yaml")).unwrap()
    }

    #[test]
    fn test_malformed_formula_is_a_warning() {
        let result = check_lesson(&lesson(), &BraceEngine);
        let warning = result
            .warnings
            .iter()
            .find(|w| w.path == "blocks[0].text")
            .unwrap();
        assert!(warning.message.contains("unbalanced braces"));
    }

    #[test]
    fn test_display_formulas_checked_in_display_mode() {
        let source = r#"
metadata:
  title: 5.4 Tags
  description: Equation tags
heading:
  topic: 5. Roots
  subtopic: 5.4 Tags
blocks:
  - type: math
    expr: "x^2 = 4 \\tag{1}"
  - type: prose
    text: "Inline $y \\tag{2}$ is not allowed."
"#;
        let lesson = parse_lesson(source, Path::new("content/Roots/lesson4.yaml")).unwrap();
        let result = check_lesson(&lesson, &prepdeck_render::KatexEngine);
        let paths: Vec<&str> = result.warnings.iter().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, ["blocks[1].text"]);
    }

    #[test]
    fn test_validator_errors_are_kept() {
        let result = check_lesson(&lesson(), &BraceEngine);
        assert!(result.errors.iter().any(|e| e.path.starts_with("blocks[1]")));
    }

    #[test]
    fn test_report_fails() {
        let report = LessonReport {
            path: "a.yaml".to_string(),
            id: None,
            errors: Vec::new(),
            warnings: vec![ValidationIssue::warning("x", "y")],
        };
        assert!(!report.fails(false));
        assert!(report.fails(true));
    }

    #[test]
    fn test_check_catalog_includes_load_failures() {
        let mut catalog = Catalog::from_entries(
            vec![CatalogEntry {
                path: PathBuf::from("content/Roots/lesson3.yaml"),
                lesson: lesson(),
            }],
            &SiteConfig::default(),
        );
        catalog.failures.push(ContentError::ParseError {
            path: PathBuf::from("content/Roots/broken.yaml"),
            line: Some(2),
            message: "bad indentation".to_string(),
        });

        let reports = check_catalog(&catalog, &BraceEngine);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].path, "content/Roots/broken.yaml");
        assert!(reports[0].id.is_none());
        assert_eq!(reports[1].id.as_deref(), Some("roots/lesson3"));

        let summary = summarize(&reports, false);
        assert_eq!(summary.lessons, 2);
        assert_eq!(summary.failed, 2);
    }

    #[test]
    fn test_json_shape() {
        let reports = vec![LessonReport {
            path: "a.yaml".to_string(),
            id: Some("t/a".to_string()),
            errors: vec![ValidationIssue::error("metadata.title", "title is empty")],
            warnings: Vec::new(),
        }];
        let output = CheckOutput {
            files: &reports,
            summary: summarize(&reports, false),
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["files"][0]["errors"][0]["severity"], "error");
        assert_eq!(value["summary"]["failed"], 1);
    }
}
