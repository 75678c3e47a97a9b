//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod build;
pub mod check;
pub mod completions;
pub mod list;
pub mod math;
pub mod render;
pub mod version;

use std::fs;
use std::path::Path;

use prepdeck_core::site::SiteConfig;

use crate::cli::args::{Cli, Commands, ContentArgs};
use crate::error::PrepdeckError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), PrepdeckError> {
    match cli.command {
        Commands::Build(args) => build::run(&args),
        Commands::Check(args) => check::run(&args),
        Commands::Render(args) => render::run(&args),
        Commands::Math(args) => math::run(&args),
        Commands::List(args) => list::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => version::run(&args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Site configuration for a content tree: the explicit `--config` file, or
/// `prepdeck.yaml` in the content directory, or defaults.
pub(crate) fn load_site(source: &ContentArgs) -> Result<SiteConfig, PrepdeckError> {
    let site = match &source.config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::load_or_default(&source.content)?,
    };
    Ok(site)
}

/// Write `contents` to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), PrepdeckError> {
    let io_err = |source| PrepdeckError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prepdeck_core::site::SITE_CONFIG_FILE;

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statistics/lesson1.html");
        write_file(&path, "<p>hi</p>").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_load_site_prefers_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SITE_CONFIG_FILE), "site:\n  title: Default\n").unwrap();
        let explicit = dir.path().join("other.yaml");
        fs::write(&explicit, "site:\n  title: Explicit\n").unwrap();

        let source = ContentArgs {
            content: dir.path().to_path_buf(),
            config: Some(explicit),
        };
        assert_eq!(load_site(&source).unwrap().site.title, "Explicit");

        let source = ContentArgs {
            content: dir.path().to_path_buf(),
            config: None,
        };
        assert_eq!(load_site(&source).unwrap().site.title, "Default");
    }

    #[test]
    fn test_load_site_missing_explicit_config() {
        let source = ContentArgs {
            content: "content".into(),
            config: Some("/nonexistent/prepdeck.yaml".into()),
        };
        assert!(matches!(
            load_site(&source),
            Err(PrepdeckError::Content(_))
        ));
    }
}
