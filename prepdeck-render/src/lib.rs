//! `prepdeck` Render - HTML generation for lesson pages
//!
//! Turns parsed lessons into standalone HTML documents: the shared KaTeX
//! math renderer, callout / practice-question / example-card components,
//! per-document stylesheet management, links between lessons, and the site
//! index page.

pub mod components;
pub mod context;
pub mod error;
pub mod escape;
pub mod head;
pub mod index;
pub mod math;
pub mod nav;
pub mod page;

pub use context::RenderContext;
pub use error::RenderError;
pub use head::DocumentHead;
pub use math::{Formula, KatexEngine, MathEngine, MathRenderer};
pub use nav::{NavLink, Navigation};
