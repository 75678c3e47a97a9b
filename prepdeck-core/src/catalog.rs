//! Lesson discovery and ordering.
//!
//! Lessons live one per file, one directory per topic. Curriculum order is
//! implied by the dotted section number that starts each subtopic heading
//! ("5.2", "14.6.4"); an explicit `order` in the lesson or the site
//! configuration takes precedence.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::ContentError;
use crate::lesson::{Lesson, load_lesson};
use crate::site::{SITE_CONFIG_FILE, SiteConfig};
use crate::validation::detect_duplicate_ids;

static SECTION_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)*)").expect("valid regex"));

const LESSON_PATTERNS: [&str; 2] = ["**/*.yaml", "**/*.yml"];

/// A lesson together with the file it was loaded from.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Source file.
    pub path: PathBuf,
    /// Parsed lesson.
    pub lesson: Lesson,
}

/// All lessons of one topic, in curriculum order.
#[derive(Debug, Clone)]
pub struct Topic {
    /// Topic slug.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Lessons in display order.
    pub lessons: Vec<CatalogEntry>,
}

/// Every lesson in a content tree.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Topics in display order.
    pub topics: Vec<Topic>,
    /// Files that could not be loaded, and duplicate ids.
    pub failures: Vec<ContentError>,
}

impl Catalog {
    /// Load every lesson under `content_dir`.
    ///
    /// Files that fail to parse are recorded in `failures` rather than
    /// aborting discovery.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::MissingFile` if `content_dir` is not a
    /// directory.
    pub fn discover(content_dir: &Path, site: &SiteConfig) -> Result<Self, ContentError> {
        let files = lesson_files(content_dir)?;
        let mut entries = Vec::with_capacity(files.len());
        let mut failures = Vec::new();

        for path in files {
            match load_lesson(&path) {
                Ok(lesson) => entries.push(CatalogEntry { path, lesson }),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping lesson");
                    failures.push(e);
                }
            }
        }

        let mut catalog = Self::from_entries(entries, site);
        failures.append(&mut catalog.failures);
        catalog.failures = failures;

        tracing::info!(
            topics = catalog.topics.len(),
            lessons = catalog.len(),
            failures = catalog.failures.len(),
            "content discovered"
        );
        Ok(catalog)
    }

    /// Group and order already-loaded lessons.
    ///
    /// The first lesson to claim an id wins; later ones are reported as
    /// `ContentError::DuplicateId` and dropped.
    #[must_use]
    pub fn from_entries(entries: Vec<CatalogEntry>, site: &SiteConfig) -> Self {
        let failures =
            detect_duplicate_ids(entries.iter().map(|e| (e.path.as_path(), &e.lesson)));
        let duplicates: Vec<&Path> = failures
            .iter()
            .filter_map(|f| match f {
                ContentError::DuplicateId { path, .. } => Some(path.as_path()),
                _ => None,
            })
            .collect();

        let mut groups: IndexMap<String, Vec<CatalogEntry>> = IndexMap::new();
        for entry in entries {
            if duplicates.contains(&entry.path.as_path()) {
                continue;
            }
            groups
                .entry(entry.lesson.topic.clone())
                .or_default()
                .push(entry);
        }

        let mut topics: Vec<(TopicKey, Topic)> = groups
            .into_iter()
            .map(|(id, mut lessons)| {
                lessons.sort_by_cached_key(|e| lesson_key(&e.lesson));
                let configured = site.topic(&id);
                let heading = lessons
                    .first()
                    .map(|e| e.lesson.heading.topic.clone())
                    .unwrap_or_default();
                let name = configured
                    .and_then(|t| t.name.clone())
                    .unwrap_or_else(|| heading.clone());
                let order = configured
                    .and_then(|t| t.order)
                    .or_else(|| section_number(&heading).first().copied())
                    .unwrap_or(u32::MAX);
                ((order, name.clone()), Topic { id, name, lessons })
            })
            .collect();
        topics.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            topics: topics.into_iter().map(|(_, t)| t).collect(),
            failures,
        }
    }

    /// All lessons in display order.
    pub fn lessons(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.topics.iter().flat_map(|t| t.lessons.iter())
    }

    /// Number of lessons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.iter().map(|t| t.lessons.len()).sum()
    }

    /// Returns `true` if no lessons were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type TopicKey = (u32, String);

fn lesson_key(lesson: &Lesson) -> (u32, bool, Vec<u32>, String) {
    let number = section_number(&lesson.heading.subtopic);
    (
        lesson.order.unwrap_or(u32::MAX),
        number.is_empty(),
        number,
        lesson.id.clone(),
    )
}

/// Dotted section number at the start of a heading.
///
/// `"14.6.4 Median with Unknown Values"` yields `[14, 6, 4]`; a heading
/// without a leading number yields an empty vector.
#[must_use]
pub fn section_number(heading: &str) -> Vec<u32> {
    SECTION_NUMBER_RE
        .captures(heading)
        .and_then(|c| c.get(1))
        .map(|m| {
            m.as_str()
                .split('.')
                .filter_map(|part| part.parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Lesson files under `content_dir`, sorted, excluding site config files.
///
/// # Errors
///
/// Returns `ContentError::MissingFile` if `content_dir` is not a directory.
pub fn lesson_files(content_dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    if !content_dir.is_dir() {
        return Err(ContentError::MissingFile {
            path: content_dir.to_path_buf(),
        });
    }

    let root = glob::Pattern::escape(&content_dir.display().to_string());
    let mut files = Vec::new();

    for pattern in LESSON_PATTERNS {
        let full = format!("{root}/{pattern}");
        let paths = glob::glob(&full).map_err(|e| ContentError::InvalidValue {
            field: "content".to_string(),
            value: full.clone(),
            expected: format!("a valid directory path ({e})"),
        })?;

        for entry in paths {
            match entry {
                Ok(path) => {
                    if !path.file_name().is_some_and(|n| n == SITE_CONFIG_FILE) {
                        files.push(path);
                    }
                }
                Err(e) => tracing::warn!(error = %e, "unreadable path during discovery"),
            }
        }
    }

    files.sort();
    Ok(files)
}
