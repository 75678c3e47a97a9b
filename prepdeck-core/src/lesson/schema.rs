//! Lesson document schema.
//!
//! Example YAML:
//! ```yaml
//! metadata:
//!   title: "5.2 The Principal Square Root | Roots and Exponents"
//!   description: Why the radical returns the nonnegative root.
//! heading:
//!   topic: 5. Roots and Exponents
//!   subtopic: 5.2 The Principal Square Root
//! blocks:
//!   - type: prose
//!     text: "The identity $\\sqrt{x^2}=|x|$ hides the sign of x."
//!   - type: callout
//!     body:
//!       - type: prose
//!         text: The radical always returns the principal root.
//!   - type: mcq
//!     number: 1
//!     prompt: "If $\\sqrt{64}=n$, what is n?"
//!     options: ["-8", "8", "±8"]
//!     correct: "8"
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::lesson::markup::parse_markup;

/// Unquoted YAML decimals lose their formatting (`1.50` becomes `1.5`), so
/// they are rejected wherever lesson text is expected.
pub const UNQUOTED_DECIMAL: &str =
    "decimal numbers must be quoted to keep their digits (write \"1.50\", not 1.50)";

/// Scalar `visit_*` methods: strings, integers and booleans become text
/// wrapped by `$wrap`; decimals are rejected.
macro_rules! visit_scalars {
    ($wrap:expr) => {
        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok($wrap(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok($wrap(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok($wrap(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok($wrap(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok($wrap(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
            Err(E::custom(UNQUOTED_DECIMAL))
        }
    };
}

// ============================================================================
// Lesson
// ============================================================================

/// One lesson page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// Stable id, `<topic>/<slug>`. Derived from the file path when omitted.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Topic slug, taken from the lesson's directory.
    #[serde(skip)]
    pub topic: String,

    /// Title and description for the document head.
    pub metadata: PageMetadata,

    /// Topic and subtopic titles rendered at the top of the page.
    pub heading: Heading,

    /// Explicit position within the topic; overrides section numbering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,

    /// Ordered page content.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Lesson {
    /// Output path of the rendered page relative to the site root.
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}.html", self.id)
    }

    /// Every block in the lesson, depth-first, with its field path.
    #[must_use]
    pub fn walk(&self) -> Vec<(String, &Block)> {
        let mut out = Vec::new();
        walk_blocks(&self.blocks, "blocks", &mut out);
        out
    }

    /// All practice questions in page order.
    pub fn questions(&self) -> impl Iterator<Item = &McqQuestion> {
        self.walk().into_iter().filter_map(|(_, block)| match block {
            Block::Mcq(q) => Some(q),
            _ => None,
        })
    }

    /// Every formula on the page with the path of the field it appears in.
    #[must_use]
    pub fn formulas(&self) -> Vec<FormulaRef> {
        let mut out = Vec::new();
        for (path, block) in self.walk() {
            if let Block::Math(math) = block {
                out.push(FormulaRef {
                    path: format!("{path}.expr"),
                    expr: math.expr.clone(),
                    display: math.display,
                });
            }
            for (field, inline) in block.inlines() {
                out.extend(inline.math().into_iter().map(|expr| FormulaRef {
                    path: format!("{path}.{field}"),
                    expr,
                    display: false,
                }));
            }
        }
        out
    }
}

/// A formula located in a lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaRef {
    /// Field path, e.g. `blocks[2].prompt`.
    pub path: String,
    /// TeX source.
    pub expr: String,
    /// Display presentation (math blocks only).
    pub display: bool,
}

fn walk_blocks<'a>(blocks: &'a [Block], prefix: &str, out: &mut Vec<(String, &'a Block)>) {
    for (i, block) in blocks.iter().enumerate() {
        let path = format!("{prefix}[{i}]");
        out.push((path.clone(), block));
        for (field, children) in block.children() {
            walk_blocks(children, &format!("{path}.{field}"), out);
        }
    }
}

/// Document head metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Document title.
    pub title: String,

    /// Short summary used for the description meta tag.
    #[serde(default)]
    pub description: String,
}

/// Topic and subtopic heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Topic title, e.g. "5. Roots and Exponents".
    pub topic: String,

    /// Subtopic title, e.g. "5.2 The Principal Square Root".
    pub subtopic: String,
}

// ============================================================================
// Blocks
// ============================================================================

/// A unit of page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of prose with optional inline math.
    Prose {
        /// Paragraph content.
        text: Inline,
    },

    /// A bulleted or numbered list.
    List(ListBlock),

    /// A highlighted key-fact box.
    Callout(Callout),

    /// A standalone formula.
    Math(MathBlock),

    /// A titled group of blocks.
    Section(Section),

    /// A multiple-choice practice question.
    Mcq(McqQuestion),

    /// A worked example or Data Sufficiency drill.
    Example(ExampleCard),

    /// A data table.
    Table(Table),

    /// A chart or figure.
    Image(Image),
}

impl Block {
    /// Nested block lists, keyed by field name.
    #[must_use]
    pub fn children(&self) -> Vec<(&'static str, &[Self])> {
        match self {
            Self::Callout(c) => vec![("body", c.body.as_slice())],
            Self::Section(s) => vec![("blocks", s.blocks.as_slice())],
            Self::Mcq(q) => vec![("solution", q.solution.as_slice())],
            Self::Example(e) => vec![("solution", e.solution.as_slice())],
            Self::Prose { .. }
            | Self::List(_)
            | Self::Math(_)
            | Self::Table(_)
            | Self::Image(_) => Vec::new(),
        }
    }

    /// Inline markup owned directly by this block, keyed by field path.
    #[must_use]
    pub fn inlines(&self) -> Vec<(String, &Inline)> {
        match self {
            Self::Prose { text } => vec![("text".to_string(), text)],
            Self::List(list) => indexed("items", &list.items),
            Self::Mcq(q) => {
                let mut out = vec![("prompt".to_string(), &q.prompt)];
                if let Some(note) = &q.note {
                    out.push(("note".to_string(), note));
                }
                out.extend(indexed("options", &q.options));
                out
            }
            Self::Example(e) => indexed("statements", &e.statements),
            Self::Table(t) => {
                let mut out = indexed("header", &t.header);
                for (r, row) in t.rows.iter().enumerate() {
                    out.extend(indexed(&format!("rows[{r}]"), row));
                }
                out
            }
            Self::Image(image) => image
                .caption
                .iter()
                .map(|caption| ("caption".to_string(), caption))
                .collect(),
            Self::Callout(_) | Self::Math(_) | Self::Section(_) => Vec::new(),
        }
    }
}

fn indexed<'a>(field: &str, items: &'a [Inline]) -> Vec<(String, &'a Inline)> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (format!("{field}[{i}]"), item))
        .collect()
}

/// A bulleted or numbered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListBlock {
    /// Render as `<ol>` instead of `<ul>`.
    #[serde(default)]
    pub ordered: bool,

    /// List items.
    pub items: Vec<Inline>,
}

/// A highlighted key-fact box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    /// Visual flavour of the box.
    #[serde(default)]
    pub kind: CalloutKind,

    /// Optional heading inside the box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Box content.
    #[serde(default)]
    pub body: Vec<Block>,
}

/// Callout flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutKind {
    /// A fact the reader must memorize.
    #[default]
    MustKnow,
    /// A shortcut or strategy hint.
    Tip,
    /// A common trap.
    Warning,
}

impl CalloutKind {
    /// Default heading shown when the callout has no title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MustKnow => "Must know",
            Self::Tip => "Tip",
            Self::Warning => "Watch out",
        }
    }

    /// CSS modifier class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MustKnow => "must-know",
            Self::Tip => "tip",
            Self::Warning => "warning",
        }
    }
}

/// A standalone formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathBlock {
    /// Formula source.
    #[serde(deserialize_with = "scalar_string")]
    pub expr: String,

    /// Accessible name; the formula itself is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Centered block presentation. Defaults to `true`.
    #[serde(default = "default_true")]
    pub display: bool,
}

const fn default_true() -> bool {
    true
}

/// A titled group of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Anchor id; derived from the title when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Section heading.
    pub title: String,

    /// Section content.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Section {
    /// Anchor id used in the rendered page.
    #[must_use]
    pub fn anchor(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| crate::slug::anchor(&self.title))
    }
}

// ============================================================================
// Practice Questions
// ============================================================================

/// A multiple-choice practice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McqQuestion {
    /// Display number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,

    /// Question stem.
    pub prompt: Inline,

    /// Extra text between the stem and the options (e.g. roman-numeral lists).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Inline>,

    /// Answer options in display order.
    pub options: Vec<Inline>,

    /// The correct option.
    pub correct: CorrectOption,

    /// Worked solution.
    #[serde(default)]
    pub solution: Vec<Block>,

    /// Difficulty tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl McqQuestion {
    /// Position of the correct option, if it names one of the options.
    #[must_use]
    pub fn correct_index(&self) -> Option<usize> {
        match &self.correct {
            CorrectOption::Index { index } => (*index < self.options.len()).then_some(*index),
            CorrectOption::Value(value) => self
                .options
                .iter()
                .position(|opt| opt.source().trim() == value.trim()),
        }
    }
}

/// How the correct option is designated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CorrectOption {
    /// Zero-based position in the option list: `correct: { index: 2 }`.
    Index {
        /// Zero-based option index.
        index: usize,
    },
    /// Option text, compared against each option's markup source.
    Value(String),
}

impl<'de> Deserialize<'de> for CorrectOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct ByIndex {
            index: usize,
        }

        struct CorrectVisitor;

        impl<'de> Visitor<'de> for CorrectVisitor {
            type Value = CorrectOption;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an option value or `{ index: N }`")
            }

            visit_scalars!(CorrectOption::Value);

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<CorrectOption, A::Error> {
                let ByIndex { index } = ByIndex::deserialize(MapAccessDeserializer::new(map))?;
                Ok(CorrectOption::Index { index })
            }
        }

        deserializer.deserialize_any(CorrectVisitor)
    }
}

/// Difficulty tag on a practice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Warm-up.
    Easy,
    /// Typical exam difficulty.
    Medium,
    /// Above typical exam difficulty.
    Hard,
}

impl Difficulty {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// The five standard Data Sufficiency answer choices.
pub const DATA_SUFFICIENCY_CHOICES: [(char, &str); 5] = [
    (
        'A',
        "Statement (1) ALONE is sufficient, but statement (2) alone is not sufficient.",
    ),
    (
        'B',
        "Statement (2) ALONE is sufficient, but statement (1) alone is not sufficient.",
    ),
    (
        'C',
        "BOTH statements TOGETHER are sufficient, but NEITHER statement ALONE is sufficient.",
    ),
    ('D', "EACH statement ALONE is sufficient."),
    ('E', "Statements (1) and (2) TOGETHER are NOT sufficient."),
];

/// A worked example card, typically a Data Sufficiency drill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleCard {
    /// Display number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,

    /// Card title.
    pub title: String,

    /// Question stem followed by the numbered statements.
    #[serde(default)]
    pub statements: Vec<Inline>,

    /// Correct Data Sufficiency letter (`A`-`E`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_letter: Option<String>,

    /// Worked solution.
    #[serde(default)]
    pub solution: Vec<Block>,
}

impl ExampleCard {
    /// The correct letter, if it is one of `A`-`E`.
    #[must_use]
    pub fn letter(&self) -> Option<char> {
        let letter = self.correct_letter.as_deref()?.trim();
        let mut chars = letter.chars();
        let c = chars.next()?.to_ascii_uppercase();
        (chars.next().is_none() && ('A'..='E').contains(&c)).then_some(c)
    }
}

/// A data table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Caption above the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Column headings.
    #[serde(default)]
    pub header: Vec<Inline>,

    /// Body rows.
    #[serde(default)]
    pub rows: Vec<Vec<Inline>>,
}

/// A chart or figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL, site-relative or absolute.
    pub src: String,

    /// Alternative text. Required for publishing.
    #[serde(default)]
    pub alt: String,

    /// Intrinsic width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Intrinsic height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Caption under the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Inline>,
}

// ============================================================================
// Inline Markup
// ============================================================================

/// Inline content: either a markup string or explicit spans.
///
/// In markup strings `$...$` is inline math, `\$` a literal dollar sign,
/// `**...**` strong and `*...*` emphasized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Inline {
    /// Markup string.
    Markup(String),
    /// Explicit spans.
    Spans(Vec<Span>),
}

impl<'de> Deserialize<'de> for Inline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InlineVisitor;

        impl<'de> Visitor<'de> for InlineVisitor {
            type Value = Inline;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a markup string or a list of spans")
            }

            visit_scalars!(Inline::Markup);

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Inline, A::Error> {
                Vec::<Span>::deserialize(SeqAccessDeserializer::new(seq)).map(Inline::Spans)
            }
        }

        deserializer.deserialize_any(InlineVisitor)
    }
}

impl Inline {
    /// Parsed spans.
    #[must_use]
    pub fn spans(&self) -> Cow<'_, [Span]> {
        match self {
            Self::Markup(source) => Cow::Owned(parse_markup(source)),
            Self::Spans(spans) => Cow::Borrowed(spans),
        }
    }

    /// Markup source; explicit spans are re-encoded.
    #[must_use]
    pub fn source(&self) -> Cow<'_, str> {
        match self {
            Self::Markup(source) => Cow::Borrowed(source),
            Self::Spans(spans) => Cow::Owned(
                spans
                    .iter()
                    .map(|span| match span {
                        Span::Math { math, .. } => format!("${math}$"),
                        Span::Strong { strong } => format!("**{}**", strong.source()),
                        Span::Emphasis { emphasis } => format!("*{}*", emphasis.source()),
                        Span::Text { text } => text.replace('$', "\\$").replace('*', "\\*"),
                    })
                    .collect(),
            ),
        }
    }

    /// Returns `true` if there is no visible content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source().trim().is_empty()
    }

    /// Inline formulas, including those inside strong or emphasized text.
    #[must_use]
    pub fn math(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_math(&self.spans(), &mut out);
        out
    }
}

fn collect_math(spans: &[Span], out: &mut Vec<String>) {
    for span in spans {
        match span {
            Span::Math { math, .. } => out.push(math.clone()),
            Span::Strong { strong: inner } | Span::Emphasis { emphasis: inner } => {
                collect_math(&inner.spans(), out);
            }
            Span::Text { .. } => {}
        }
    }
}

impl From<&str> for Inline {
    fn from(source: &str) -> Self {
        Self::Markup(source.to_string())
    }
}

/// One piece of inline content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Span {
    /// Inline formula.
    Math {
        /// Formula source.
        #[serde(deserialize_with = "scalar_string")]
        math: String,
        /// Accessible name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Strong text, which may itself contain math.
    Strong {
        /// Content.
        strong: Inline,
    },
    /// Emphasized text.
    Emphasis {
        /// Content.
        emphasis: Inline,
    },
    /// Plain text.
    Text {
        /// Text content.
        #[serde(deserialize_with = "scalar_string")]
        text: String,
    },
}

/// Accept a YAML string, integer or boolean as a string, so `correct: 48`
/// and `- 24` work without quoting.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl Visitor<'_> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, integer, or boolean")
        }

        visit_scalars!(std::convert::identity);
    }

    deserializer.deserialize_any(ScalarVisitor)
}
