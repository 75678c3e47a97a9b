//! Lesson pages as authored content.
//!
//! A lesson is a single YAML document describing one instructional page:
//! metadata for the document head, the topic/subtopic heading, and an
//! ordered list of content blocks (prose, callouts, math, practice
//! questions, example cards, tables, images).

pub mod loader;
pub mod markup;
pub mod schema;

pub use loader::{load_lesson, parse_lesson};
pub use markup::parse_markup;
pub use schema::{
    Block, Callout, CalloutKind, CorrectOption, Difficulty, ExampleCard, FormulaRef, Heading, Image,
    Inline, Lesson, ListBlock, MathBlock, McqQuestion, PageMetadata, Section, Span, Table,
};
