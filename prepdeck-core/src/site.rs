//! Site configuration (`prepdeck.yaml`).
//!
//! Example YAML:
//! ```yaml
//! site:
//!   title: GMAT Prep
//!   description: Lessons and practice
//! math:
//!   stylesheet_href: /assets/katex.min.css
//! stylesheets: [/assets/site.css]
//! topics:
//!   - id: roots-and-exponents
//!     name: Roots and Exponents
//!     order: 5
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// File name of the site configuration inside the content directory.
pub const SITE_CONFIG_FILE: &str = "prepdeck.yaml";

/// KaTeX stylesheet used when the configuration does not name one.
pub const DEFAULT_KATEX_STYLESHEET: &str =
    "https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css";

/// Parsed site configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site-level metadata.
    #[serde(default)]
    pub site: SiteInfo,

    /// Math rendering settings.
    #[serde(default)]
    pub math: MathSettings,

    /// Extra stylesheets linked from every page, in order.
    #[serde(default)]
    pub stylesheets: Vec<String>,

    /// Topic display names and ordering.
    #[serde(default)]
    pub topics: Vec<TopicEntry>,
}

/// Site-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Site title, used on the index page and as the title suffix.
    #[serde(default = "default_title")]
    pub title: String,

    /// Site description for the index page.
    #[serde(default)]
    pub description: String,

    /// Prefix for links on the index page.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Document language.
    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: String::new(),
            base_url: None,
            lang: default_lang(),
        }
    }
}

fn default_title() -> String {
    "GMAT Prep".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

/// Math rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathSettings {
    /// KaTeX stylesheet linked from pages that contain math.
    #[serde(default = "default_katex_href")]
    pub stylesheet_href: String,
}

impl Default for MathSettings {
    fn default() -> Self {
        Self {
            stylesheet_href: default_katex_href(),
        }
    }
}

fn default_katex_href() -> String {
    DEFAULT_KATEX_STYLESHEET.to_string()
}

/// Display name and position of a topic directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    /// Topic slug (the slugified directory name).
    pub id: String,

    /// Human-readable name.
    #[serde(default)]
    pub name: Option<String>,

    /// Display order.
    #[serde(default)]
    pub order: Option<u32>,
}

impl SiteConfig {
    /// Parse site configuration YAML.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::ParseError` if the YAML is malformed.
    pub fn parse(source: &str, path: &Path) -> Result<Self, ContentError> {
        serde_yaml::from_str(source).map_err(|e| ContentError::ParseError {
            path: path.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::MissingFile` if the file does not exist,
    /// `ContentError::Read` on other I/O failures, or a parse error.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
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
        Self::parse(&source, path)
    }

    /// Load `prepdeck.yaml` from the content directory, or defaults when the
    /// file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(content_dir: &Path) -> Result<Self, ContentError> {
        let path = content_dir.join(SITE_CONFIG_FILE);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading site configuration");
            Self::load(&path)
        } else {
            tracing::debug!(dir = %content_dir.display(), "no site configuration, using defaults");
            Ok(Self::default())
        }
    }

    /// Configured entry for a topic slug.
    #[must_use]
    pub fn topic(&self, id: &str) -> Option<&TopicEntry> {
        self.topics.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.site.title, "GMAT Prep");
        assert_eq!(config.site.lang, "en");
        assert_eq!(config.math.stylesheet_href, DEFAULT_KATEX_STYLESHEET);
        assert!(config.stylesheets.is_empty());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = SiteConfig::parse("{}", Path::new("prepdeck.yaml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_parse_full() {
        let yaml = r"
site:
  title: Quant Lab
  description: Practice
  base_url: /gmat/
math:
  stylesheet_href: /assets/katex.min.css
stylesheets: [/assets/site.css]
topics:
  - id: statistics
    name: Statistics
    order: 14
";
        let config = SiteConfig::parse(yaml, Path::new("prepdeck.yaml")).unwrap();
        assert_eq!(config.site.title, "Quant Lab");
        assert_eq!(config.site.base_url.as_deref(), Some("/gmat/"));
        assert_eq!(config.math.stylesheet_href, "/assets/katex.min.css");
        assert_eq!(config.stylesheets, vec!["/assets/site.css".to_string()]);
        assert_eq!(config.topic("statistics").and_then(|t| t.order), Some(14));
        assert!(config.topic("ratios").is_none());
    }

    #[test]
    fn test_parse_error() {
        let err = SiteConfig::parse("site: [", Path::new("prepdeck.yaml")).unwrap_err();
        assert!(matches!(err, ContentError::ParseError { .. }));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_load_or_default_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SITE_CONFIG_FILE), "site:\n  title: Verbal\n").unwrap();
        let config = SiteConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.site.title, "Verbal");
    }
}
