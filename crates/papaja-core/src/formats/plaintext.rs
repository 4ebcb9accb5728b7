// SPDX-License-Identifier: AGPL-3.0-or-later
//! Plain text renderer: aligned columns, math turned into readable symbols

use crate::ast::{Block, ColumnAlignment, Document, Inline, OutputFormat, TableRow};
use crate::traits::{RenderConfig, Renderer, Result};
use unicode_segmentation::UnicodeSegmentation;

/// LaTeX fragments and their plain-text stand-ins, applied in order
const MATH_SYMBOLS: &[(&str, &str)] = &[
    ("\\mathit{df}", "df"),
    ("\\mathit{MSE}", "MSE"),
    ("\\times", "×"),
    ("\\eta", "η"),
    ("\\chi", "χ"),
    ("\\tau", "τ"),
    ("\\Delta ", "Δ"),
    ("\\Delta", "Δ"),
    ("\\%", "%"),
    ("{,}", ","),
    ("^2", "²"),
];

/// Plain text renderer
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::PlainText
    }

    fn render(&self, doc: &Document, config: &RenderConfig) -> Result<String> {
        let mut output = String::new();

        for (i, block) in doc.content.iter().enumerate() {
            if i > 0 {
                output.push_str("\n\n");
            }
            render_block(&mut output, block, config);
        }

        Ok(output)
    }
}

fn render_block(output: &mut String, block: &Block, config: &RenderConfig) {
    match block {
        Block::Paragraph { content } => {
            output.push_str(&inlines_to_text(content));
        }

        Block::Table {
            caption,
            columns,
            header,
            body,
            note,
        } => {
            let caption = caption
                .as_deref()
                .map(inlines_to_text)
                .or_else(|| config.caption.clone());
            if let Some(c) = caption.filter(|c| !c.is_empty()) {
                output.push_str(&c);
                output.push_str("\n\n");
            }

            let header = header.as_ref().map(row_to_text);
            let body: Vec<Vec<String>> = body.iter().map(row_to_text).collect();

            let width = header
                .iter()
                .chain(body.iter())
                .map(Vec::len)
                .max()
                .unwrap_or(0);
            let mut widths = vec![0usize; width];
            for row in header.iter().chain(body.iter()) {
                for (i, cell) in row.iter().enumerate() {
                    widths[i] = widths[i].max(display_width(cell));
                }
            }
            let alignments: Vec<ColumnAlignment> = (0..width)
                .map(|i| columns.get(i).map_or(ColumnAlignment::Default, |c| c.alignment))
                .collect();

            let mut lines = Vec::new();
            if let Some(h) = &header {
                lines.push(format_line(h, &widths, &alignments));
                let total = widths.iter().sum::<usize>() + 2 * width.saturating_sub(1);
                lines.push("-".repeat(total));
            }
            for row in &body {
                lines.push(format_line(row, &widths, &alignments));
            }
            output.push_str(&lines.join("\n"));

            let note = note
                .as_deref()
                .map(inlines_to_text)
                .or_else(|| config.note.clone());
            if let Some(n) = note.filter(|n| !n.is_empty()) {
                output.push_str("\n\nNote. ");
                output.push_str(&n);
            }
        }

        Block::Raw { format, content } => {
            if *format == OutputFormat::PlainText {
                output.push_str(content);
            }
        }
    }
}

fn row_to_text(row: &TableRow) -> Vec<String> {
    row.cells.iter().map(|c| inlines_to_text(&c.content)).collect()
}

fn format_line(cells: &[String], widths: &[usize], alignments: &[ColumnAlignment]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let cell = cells.get(i).map_or("", String::as_str);
            pad(cell, w, alignments[i])
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}

fn pad(cell: &str, width: usize, alignment: ColumnAlignment) -> String {
    let fill = width.saturating_sub(display_width(cell));
    let (left, right) = match alignment {
        ColumnAlignment::Right => (fill, 0),
        ColumnAlignment::Center => (fill / 2, fill - fill / 2),
        ColumnAlignment::Left | ColumnAlignment::Default => (0, fill),
    };
    format!("{}{}{}", " ".repeat(left), cell, " ".repeat(right))
}

fn display_width(s: &str) -> usize {
    s.graphemes(true).count()
}

fn inlines_to_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        render_inline(&mut out, inline);
    }
    out
}

fn render_inline(output: &mut String, inline: &Inline) {
    match inline {
        Inline::Text { content } => output.push_str(content),
        Inline::Math { content } => output.push_str(&math_to_text(content)),
        Inline::Emphasis { content } | Inline::Superscript { content } => {
            for i in content {
                render_inline(output, i);
            }
        }
    }
}

/// Readable rendering of the LaTeX used in results (`\eta^2_p` -> `η²p`)
pub fn math_to_text(math: &str) -> String {
    let mut out = math.to_string();
    for (from, to) in MATH_SYMBOLS {
        out = out.replace(from, to);
    }
    out.chars().filter(|c| !matches!(c, '{' | '}' | '_')).collect()
}
