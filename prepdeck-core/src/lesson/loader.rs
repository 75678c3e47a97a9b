//! Lesson file loading.
//!
//! Reads a YAML lesson, attaches the topic taken from its directory, and
//! derives the lesson id from the path when the file does not set one.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use crate::error::ContentError;
use crate::lesson::schema::Lesson;
use crate::slug::slugify;

/// Topic used for lesson files that sit directly in the content root.
pub const DEFAULT_TOPIC: &str = "lessons";

/// Load a lesson from disk.
///
/// # Errors
///
/// Returns `ContentError::MissingFile` if the file does not exist,
/// `ContentError::Read` on other I/O failures, and the errors of
/// [`parse_lesson`].
pub fn load_lesson(path: &Path) -> Result<Lesson, ContentError> {
    let source = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ContentError::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            ContentError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    parse_lesson(&source, path)
}

/// Parse lesson YAML that was read from `path`.
///
/// # Errors
///
/// Returns `ContentError::ParseError` if the YAML does not match the lesson
/// schema, and `ContentError::InvalidValue` if an explicit id is not a
/// `<topic>/<slug>` path.
pub fn parse_lesson(source: &str, path: &Path) -> Result<Lesson, ContentError> {
    let mut lesson: Lesson =
        serde_yaml::from_str(source).map_err(|e| ContentError::ParseError {
            path: path.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;

    lesson.topic = topic_for(path);

    if lesson.id.trim().is_empty() {
        let stem = path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or_default();
        lesson.id = format!("{}/{}", lesson.topic, slugify(stem, 0));
    } else if !is_valid_id(&lesson.id) {
        return Err(ContentError::InvalidValue {
            field: "id".to_string(),
            value: lesson.id,
            expected: "<topic>/<slug>, segments of [a-z0-9-]".to_string(),
        });
    }

    tracing::debug!(path = %path.display(), id = %lesson.id, blocks = lesson.blocks.len(), "lesson parsed");
    Ok(lesson)
}

/// Topic slug for a lesson file: its parent directory name.
#[must_use]
pub fn topic_for(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .and_then(OsStr::to_str)
        .map_or_else(|| DEFAULT_TOPIC.to_string(), |name| slugify(name, 0))
}

/// Ids become output paths, so only plain relative segments are allowed.
/// A topic segment is required so no page lands on the root `index.html`.
fn is_valid_id(id: &str) -> bool {
    id.contains('/')
        && id.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const MINIMAL: &str = r"
metadata:
  title: Intro
heading:
  topic: 1. Intro
  subtopic: 1.1 Welcome
";

    #[test]
    fn test_id_derived_from_path() {
        let lesson = parse_lesson(MINIMAL, Path::new("content/Roots And Exponents/lesson1.yaml"))
            .unwrap();
        assert_eq!(lesson.topic, "roots-and-exponents");
        assert_eq!(lesson.id, "roots-and-exponents/lesson1");
        assert_eq!(lesson.href(), "roots-and-exponents/lesson1.html");
    }

    #[test]
    fn test_root_level_file_uses_default_topic() {
        let lesson = parse_lesson(MINIMAL, Path::new("lesson.yaml")).unwrap();
        assert_eq!(lesson.topic, DEFAULT_TOPIC);
        assert_eq!(lesson.id, "lessons/lesson");
    }

    #[test]
    fn test_explicit_id_kept() {
        let yaml = format!("id: roots/principal-root\n{MINIMAL}");
        let lesson = parse_lesson(&yaml, Path::new("x/lesson1.yaml")).unwrap();
        assert_eq!(lesson.id, "roots/principal-root");
        assert_eq!(lesson.topic, "x");
    }

    #[test]
    fn test_explicit_id_rejects_traversal() {
        let yaml = format!("id: ../../etc/passwd\n{MINIMAL}");
        let err = parse_lesson(&yaml, Path::new("x/lesson1.yaml")).unwrap_err();
        assert!(matches!(err, ContentError::InvalidValue { .. }));
    }

    #[test]
    fn test_explicit_id_needs_topic_segment() {
        let yaml = format!("id: index\n{MINIMAL}");
        let err = parse_lesson(&yaml, Path::new("x/lesson1.yaml")).unwrap_err();
        assert!(matches!(err, ContentError::InvalidValue { ref field, .. } if field == "id"));
    }

    #[test]
    fn test_explicit_id_rejects_absolute() {
        let yaml = format!("id: /abs\n{MINIMAL}");
        assert!(parse_lesson(&yaml, Path::new("x/lesson1.yaml")).is_err());
    }

    #[test]
    fn test_parse_error_has_line() {
        let err = parse_lesson("metadata:\n  title: [unclosed\n", Path::new("bad.yaml")).unwrap_err();
        match err {
            ContentError::ParseError { path, line, .. } => {
                assert_eq!(path, PathBuf::from("bad.yaml"));
                assert!(line.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let err = parse_lesson("metadata:\n  title: t\n", Path::new("a/b.yaml")).unwrap_err();
        assert!(err.to_string().contains("heading"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_lesson(Path::new("/nonexistent/prepdeck/lesson.yaml")).unwrap_err();
        assert!(matches!(err, ContentError::MissingFile { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let topic = dir.path().join("Statistics");
        std::fs::create_dir_all(&topic).unwrap();
        let file = topic.join("lesson4.yaml");
        std::fs::write(&file, MINIMAL).unwrap();

        let lesson = load_lesson(&file).unwrap();
        assert_eq!(lesson.id, "statistics/lesson4");
    }
}
