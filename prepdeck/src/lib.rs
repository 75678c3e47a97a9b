//! `prepdeck` - Static GMAT lesson pages with KaTeX math
//!
//! Command-line front end: builds a site from a content tree of YAML
//! lessons, checks lessons before publishing, and previews single pages and
//! formulas.

pub mod cli;
pub mod error;
pub mod observability;
