// SPDX-License-Identifier: AGPL-3.0-or-later
//! LaTeX renderer (`table` float with `tabular`, booktabs rules by default)

use crate::ast::{Block, ColumnAlignment, Document, Inline, OutputFormat, TableRow};
use crate::traits::{RenderConfig, Renderer, Result};

pub struct LatexRenderer;

impl LatexRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LatexRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for LatexRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::LaTeX
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
            for inline in content {
                render_inline(output, inline);
            }
        }

        Block::Table {
            caption,
            columns,
            header,
            body,
            note,
        } => {
            let (top, mid, bottom) = if config.booktabs {
                ("\\toprule", "\\midrule", "\\bottomrule")
            } else {
                ("\\hline", "\\hline", "\\hline")
            };

            let width = header
                .as_ref()
                .map(|h| h.cells.len())
                .or_else(|| body.first().map(|r| r.cells.len()))
                .unwrap_or(columns.len());
            let spec: String = (0..width)
                .map(|i| match columns.get(i).map(|c| c.alignment) {
                    Some(ColumnAlignment::Center) => 'c',
                    Some(ColumnAlignment::Right) => 'r',
                    _ => 'l',
                })
                .collect();

            output.push_str(&format!("\\begin{{table}}[{}]\n", config.placement));
            output.push_str("\\centering\n");

            let mut caption_text = String::new();
            match caption {
                Some(c) => c.iter().for_each(|i| render_inline(&mut caption_text, i)),
                None => {
                    if let Some(c) = &config.caption {
                        caption_text.push_str(&escape(c));
                    }
                }
            }
            if !caption_text.is_empty() {
                output.push_str(&format!("\\caption{{{caption_text}}}\n"));
            }

            output.push_str(&format!("\\begin{{tabular}}{{{spec}}}\n"));
            output.push_str(top);
            output.push('\n');
            if let Some(h) = header {
                render_row(output, h);
                output.push_str(mid);
                output.push('\n');
            }
            for row in body {
                render_row(output, row);
            }
            output.push_str(bottom);
            output.push('\n');
            output.push_str("\\end{tabular}\n");

            let mut note_text = String::new();
            match note {
                Some(n) => n.iter().for_each(|i| render_inline(&mut note_text, i)),
                None => {
                    if let Some(n) = &config.note {
                        note_text.push_str(&escape(n));
                    }
                }
            }
            if !note_text.is_empty() {
                output.push_str(&format!(
                    "\\par\\smallskip\n\\textit{{Note.}} {note_text}\n"
                ));
            }

            output.push_str("\\end{table}");
        }

        Block::Raw { format, content } => {
            if *format == OutputFormat::LaTeX {
                output.push_str(content);
            }
        }
    }
}

fn render_row(output: &mut String, row: &TableRow) {
    let cells: Vec<String> = row
        .cells
        .iter()
        .map(|cell| {
            let mut text = String::new();
            for inline in &cell.content {
                render_inline(&mut text, inline);
            }
            text
        })
        .collect();
    output.push_str(&cells.join(" & "));
    output.push_str(" \\\\\n");
}

fn render_inline(output: &mut String, inline: &Inline) {
    match inline {
        Inline::Text { content } => output.push_str(&escape(content)),

        Inline::Math { content } => {
            output.push('$');
            output.push_str(content);
            output.push('$');
        }

        Inline::Emphasis { content } => {
            output.push_str("\\emph{");
            for i in content {
                render_inline(output, i);
            }
            output.push('}');
        }

        Inline::Superscript { content } => {
            output.push_str("\\textsuperscript{");
            for i in content {
                render_inline(output, i);
            }
            output.push('}');
        }
    }
}

/// Escape LaTeX special characters in text mode
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            // `<` and `>` print as other glyphs in text mode
            '<' => out.push_str("$<$"),
            '>' => out.push_str("$>$"),
            c => out.push(c),
        }
    }
    out
}
