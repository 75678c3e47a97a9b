//! `prepdeck` Core - lesson schema, loading, and authoring checks
//!
//! This crate provides the lesson and site types shared across `prepdeck`
//! (CLI) and `prepdeck-render` (HTML generation), plus the validation used
//! by `prepdeck check`.

pub mod catalog;
pub mod error;
pub mod lesson;
pub mod site;
pub mod slug;
pub mod validation;
