//! Single-lesson preview.

use std::path::{Path, PathBuf};

use prepdeck_core::lesson::load_lesson;
use prepdeck_core::site::SiteConfig;
use prepdeck_render::MathRenderer;
use prepdeck_render::page::render_lesson;

use super::write_file;
use crate::cli::args::RenderArgs;
use crate::error::PrepdeckError;

/// Execute `render`.
///
/// Without `--config` the site configuration is looked up in the content
/// root, the directory above the lesson's topic directory.
///
/// # Errors
///
/// Returns an error if the lesson or configuration cannot be loaded, or the
/// output file cannot be written.
pub fn run(args: &RenderArgs) -> Result<(), PrepdeckError> {
    let lesson = load_lesson(&args.file)?;
    let site = match &args.config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::load_or_default(&content_root(&args.file))?,
    };

    let html = render_lesson(&lesson, &site, &MathRenderer::katex());
    match &args.output {
        Some(path) => {
            write_file(path, &html)?;
            tracing::info!(lesson = %lesson.id, path = %path.display(), "page written");
        }
        None => print!("{html}"),
    }
    Ok(())
}

/// `content/<topic>/<file>.yaml` → `content`.
fn content_root(file: &Path) -> PathBuf {
    file.parent()
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
