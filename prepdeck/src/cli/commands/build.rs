//! Site build.
//!
//! Renders every publishable lesson to `<output>/<topic>/<slug>.html`, then
//! the index page and `manifest.json`. Each page gets a fresh render
//! context; the KaTeX renderer is shared.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Serialize;

use prepdeck_core::catalog::Catalog;
use prepdeck_core::error::ContentError;
use prepdeck_render::index::render_index;
use prepdeck_render::page::render_lesson_with_nav;
use prepdeck_render::{MathRenderer, Navigation};

use super::check::check_catalog;
use super::{load_site, write_file};
use crate::cli::args::BuildArgs;
use crate::error::PrepdeckError;

/// Name of the build manifest in the output directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Record of one build.
#[derive(Debug, Serialize)]
pub struct Manifest {
    /// Generator name and version.
    pub generator: String,
    /// RFC 3339 build time.
    pub generated_at: String,
    /// Pages written, in curriculum order.
    pub lessons: Vec<ManifestEntry>,
    /// Source files left out of the build.
    pub skipped: Vec<String>,
}

/// One rendered lesson.
#[derive(Debug, Serialize)]
pub struct ManifestEntry {
    /// Lesson id.
    pub id: String,
    /// Topic slug.
    pub topic: String,
    /// Document title.
    pub title: String,
    /// Subtopic heading.
    pub subtopic: String,
    /// Page path relative to the output directory.
    pub href: String,
    /// Number of formulas on the page.
    pub formulas: usize,
}

/// Execute `build`.
///
/// # Errors
///
/// Returns an error if the content tree cannot be read, if any lesson has
/// errors under `--strict`, or if an output file cannot be written.
pub fn run(args: &BuildArgs) -> Result<(), PrepdeckError> {
    if same_dir(&args.output, &args.source.content) {
        return Err(PrepdeckError::Usage(format!(
            "output directory {} is the content directory",
            args.output.display()
        )));
    }

    let site = load_site(&args.source)?;
    let mut catalog = Catalog::discover(&args.source.content, &site)?;
    let renderer = MathRenderer::katex();

    let reports = check_catalog(&catalog, renderer.engine());
    let rejected: Vec<_> = reports.iter().filter(|r| !r.errors.is_empty()).collect();
    for report in &rejected {
        for issue in &report.errors {
            tracing::warn!(file = %report.path, "{issue}");
        }
    }
    if args.strict && !rejected.is_empty() {
        return Err(ContentError::ValidationFailed {
            count: rejected.len(),
        }
        .into());
    }

    let skipped_ids: HashSet<&str> = rejected.iter().filter_map(|r| r.id.as_deref()).collect();
    let skipped: Vec<String> = rejected.iter().map(|r| r.path.clone()).collect();
    retain_lessons(&mut catalog, &skipped_ids);

    let mut lessons = Vec::with_capacity(catalog.len());
    for entry in catalog.lessons() {
        let lesson = &entry.lesson;
        let nav = Navigation::for_lesson(&catalog, &lesson.id, &site);
        let html = render_lesson_with_nav(lesson, &site, &renderer, nav.as_ref());
        write_file(&args.output.join(lesson.href()), &html)?;
        tracing::info!(lesson = %lesson.id, "page written");
        lessons.push(ManifestEntry {
            id: lesson.id.clone(),
            topic: lesson.topic.clone(),
            title: lesson.metadata.title.clone(),
            subtopic: lesson.heading.subtopic.clone(),
            href: lesson.href(),
            formulas: lesson.formulas().len(),
        });
    }

    write_file(&args.output.join("index.html"), &render_index(&catalog, &site))?;

    let manifest = Manifest {
        generator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        generated_at: chrono::Utc::now().to_rfc3339(),
        lessons,
        skipped,
    };
    write_manifest(&args.output, &manifest)?;

    println!(
        "Built {} lesson page(s) into {} ({} skipped)",
        manifest.lessons.len(),
        args.output.display(),
        manifest.skipped.len()
    );
    Ok(())
}

/// Whether two paths name the same directory. Paths that cannot be
/// resolved are compared as written.
fn same_dir(a: &Path, b: &Path) -> bool {
    if let (Ok(a), Ok(b)) = (fs::canonicalize(a), fs::canonicalize(b)) {
        return a == b;
    }
    a == b
}

/// Drop skipped lessons, and topics left empty.
fn retain_lessons(catalog: &mut Catalog, skipped: &HashSet<&str>) {
    for topic in &mut catalog.topics {
        topic
            .lessons
            .retain(|e| !skipped.contains(e.lesson.id.as_str()));
    }
    catalog.topics.retain(|t| !t.lessons.is_empty());
}

fn write_manifest(output: &Path, manifest: &Manifest) -> Result<(), PrepdeckError> {
    let json = serde_json::to_string_pretty(manifest)?;
    write_file(&output.join(MANIFEST_FILE), &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prepdeck_core::catalog::CatalogEntry;
    use prepdeck_core::lesson::parse_lesson;
    use prepdeck_core::site::SiteConfig;
    use std::path::PathBuf;

    fn entry(dir: &str, file: &str) -> CatalogEntry {
        let path = PathBuf::from(format!("content/{dir}/{file}"));
        let lesson = parse_lesson(
            "metadata:\n  title: t\nheading:\n  topic: 1. T\n  subtopic: 1.1 S\n",
            &path,
        )
        .unwrap();
        CatalogEntry { path, lesson }
    }

    #[test]
    fn test_retain_lessons_drops_empty_topics() {
        let mut catalog = Catalog::from_entries(
            vec![
                entry("Ratios", "lesson1.yaml"),
                entry("Statistics", "lesson1.yaml"),
                entry("Statistics", "lesson2.yaml"),
            ],
            &SiteConfig::default(),
        );
        let skipped: HashSet<&str> = ["ratios/lesson1", "statistics/lesson2"].into();
        retain_lessons(&mut catalog, &skipped);

        assert_eq!(catalog.topics.len(), 1);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.topics[0].lessons[0].lesson.id, "statistics/lesson1");
    }

    #[test]
    fn test_same_dir_resolves_spellings() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        std::fs::create_dir_all(content.join("ratios")).unwrap();

        assert!(same_dir(&content, &content.join(".")));
        assert!(same_dir(&content, &content.join("ratios/..")));
        assert!(!same_dir(&content, &content.join("ratios")));
        assert!(!same_dir(&content, &dir.path().join("site")));
        assert!(same_dir(Path::new("missing/out"), Path::new("missing/out")));
    }

    #[test]
    fn test_manifest_serializes() {
        let manifest = Manifest {
            generator: "prepdeck 0.0.0".to_string(),
            generated_at: "2026-01-01T00:00:00+00:00".to_string(),
            lessons: vec![ManifestEntry {
                id: "ratios/lesson1".to_string(),
                topic: "ratios".to_string(),
                title: "t".to_string(),
                subtopic: "1.1 S".to_string(),
                href: "ratios/lesson1.html".to_string(),
                formulas: 0,
            }],
            skipped: Vec::new(),
        };
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), &manifest).unwrap();
        let text = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["lessons"][0]["href"], "ratios/lesson1.html");
    }
}
