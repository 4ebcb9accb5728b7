// SPDX-License-Identifier: AGPL-3.0-or-later
//! Format-neutral presentation AST
//!
//! Results tables and citation paragraphs are assembled into this AST once and
//! then handed to any [`Renderer`](crate::traits::Renderer). Math is kept as
//! LaTeX source in [`Inline::Math`] so each renderer decides how to emit it.

use serde::{Deserialize, Serialize};

/// Output format identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    PlainText,
    Markdown,
    LaTeX,
}

impl OutputFormat {
    /// File extension for this format
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Markdown => "md",
            Self::LaTeX => "tex",
        }
    }

    /// Short display name
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PlainText => "TXT",
            Self::Markdown => "MD",
            Self::LaTeX => "TEX",
        }
    }

    /// All formats
    pub const ALL: [Self; 3] = [Self::PlainText, Self::Markdown, Self::LaTeX];
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "text" | "plaintext" => Ok(Self::PlainText),
            "md" | "markdown" => Ok(Self::Markdown),
            "tex" | "latex" => Ok(Self::LaTeX),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// The root document node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub content: Vec<Block>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a single block
    pub fn from_block(block: Block) -> Self {
        Self {
            content: vec![block],
        }
    }

    /// Count table rows (body only) across all blocks
    pub fn table_rows(&self) -> usize {
        self.content
            .iter()
            .map(|b| match b {
                Block::Table { body, .. } => body.len(),
                _ => 0,
            })
            .sum()
    }
}

/// Block-level elements
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Plain paragraph
    Paragraph { content: Vec<Inline> },

    /// Table
    Table {
        caption: Option<Vec<Inline>>,
        columns: Vec<ColumnSpec>,
        header: Option<TableRow>,
        body: Vec<TableRow>,
        /// Table note printed below the body
        note: Option<Vec<Inline>>,
    },

    /// Raw content passed through untouched by the matching renderer
    Raw { format: OutputFormat, content: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlignment {
    Left,
    Center,
    Right,
    Default,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub alignment: ColumnAlignment,
}

impl ColumnSpec {
    pub fn new(alignment: ColumnAlignment) -> Self {
        Self { alignment }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    pub content: Vec<Inline>,
}

impl TableCell {
    pub fn new(content: Vec<Inline>) -> Self {
        Self { content }
    }

    /// Cell holding a single text run
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![Inline::text(content)],
        }
    }
}

/// Inline elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// Plain text
    Text { content: String },

    /// Inline math, LaTeX source without delimiters
    Math { content: String },

    /// Emphasis (usually italic)
    Emphasis { content: Vec<Inline> },

    /// Superscript
    Superscript { content: Vec<Inline> },
}

impl Inline {
    pub fn text(content: impl Into<String>) -> Self {
        Inline::Text {
            content: content.into(),
        }
    }

    pub fn math(content: impl Into<String>) -> Self {
        Inline::Math {
            content: content.into(),
        }
    }

    /// Split a string containing `$...$` segments into text and math runs
    pub fn parse_math(input: &str) -> Vec<Inline> {
        let mut out = Vec::new();
        let mut in_math = false;
        for (i, segment) in input.split('$').enumerate() {
            if i > 0 {
                in_math = !in_math;
            }
            if segment.is_empty() {
                continue;
            }
            out.push(if in_math {
                Inline::math(segment)
            } else {
                Inline::text(segment)
            });
        }
        out
    }
}
