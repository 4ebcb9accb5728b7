// SPDX-License-Identifier: AGPL-3.0-or-later
//! Markdown renderer (Pandoc pipe tables, `$...$` math)

use crate::ast::{Block, ColumnAlignment, ColumnSpec, Document, Inline, OutputFormat, TableRow};
use crate::traits::{RenderConfig, Renderer, Result};

/// Markdown renderer producing Pandoc-compatible pipe tables
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for MarkdownRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Markdown
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
            if config.caption_line {
                let mut caption_text = String::new();
                match caption {
                    Some(c) => c.iter().for_each(|i| render_inline(&mut caption_text, i)),
                    None => caption_text.push_str(config.caption.as_deref().unwrap_or_default()),
                }
                if !caption_text.is_empty() {
                    output.push_str("Table: ");
                    output.push_str(&caption_text);
                    output.push_str("\n\n");
                }
            }

            if let Some(h) = header {
                render_row(output, h);
                output.push('|');
                for i in 0..h.cells.len() {
                    let spec = columns
                        .get(i)
                        .map_or(ColumnAlignment::Default, |c: &ColumnSpec| c.alignment);
                    output.push_str(match spec {
                        ColumnAlignment::Left => ":---",
                        ColumnAlignment::Center => ":---:",
                        ColumnAlignment::Right => "---:",
                        ColumnAlignment::Default => "---",
                    });
                    output.push('|');
                }
                output.push('\n');
            }

            for row in body {
                render_row(output, row);
            }

            let mut note_text = String::new();
            match note {
                Some(n) => n.iter().for_each(|i| render_inline(&mut note_text, i)),
                None => note_text.push_str(config.note.as_deref().unwrap_or_default()),
            }
            if !note_text.is_empty() {
                output.push_str("\n*Note.* ");
                output.push_str(&note_text);
            }

            // Trailing newline belongs to the block separator
            if output.ends_with('\n') {
                output.pop();
            }
        }

        Block::Raw { format, content } => {
            if *format == OutputFormat::Markdown {
                output.push_str(content);
            }
        }
    }
}

fn render_row(output: &mut String, row: &TableRow) {
    output.push('|');
    for cell in &row.cells {
        output.push(' ');
        let mut text = String::new();
        for inline in &cell.content {
            render_inline(&mut text, inline);
        }
        output.push_str(&text.replace('|', "\\|"));
        output.push_str(" |");
    }
    output.push('\n');
}

fn render_inline(output: &mut String, inline: &Inline) {
    match inline {
        Inline::Text { content } => output.push_str(content),

        Inline::Math { content } => {
            output.push('$');
            output.push_str(content);
            output.push('$');
        }

        Inline::Emphasis { content } => {
            output.push('*');
            for i in content {
                render_inline(output, i);
            }
            output.push('*');
        }

        Inline::Superscript { content } => {
            output.push('^');
            for i in content {
                render_inline(output, i);
            }
            output.push('^');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{TableCell, TableRow};
    use comrak::nodes::NodeValue;
    use comrak::{parse_document, Arena, Options};
    use pretty_assertions::assert_eq;

    fn table() -> Document {
        Document::from_block(Block::Table {
            caption: Some(vec![Inline::text("ANOVA")]),
            columns: vec![
                ColumnSpec::new(ColumnAlignment::Left),
                ColumnSpec::new(ColumnAlignment::Center),
            ],
            header: Some(TableRow::new(vec![
                TableCell::text("Effect"),
                TableCell::new(vec![Inline::math("F")]),
            ])),
            body: vec![
                TableRow::new(vec![TableCell::text("Task"), TableCell::text("5.00")]),
                TableRow::new(vec![
                    TableCell::new(Inline::parse_math("Task $\\times$ Valence")),
                    TableCell::text("2,000.00"),
                ]),
            ],
            note: None,
        })
    }

    #[test]
    fn test_render_table() {
        let out = MarkdownRenderer::new()
            .render(&table(), &RenderConfig::default())
            .unwrap();
        assert_eq!(
            out,
            "Table: ANOVA\n\n\
             | Effect | $F$ |\n\
             |:---|:---:|\n\
             | Task | 5.00 |\n\
             | Task $\\times$ Valence | 2,000.00 |"
        );
    }

    #[test]
    fn test_render_table_parses_as_gfm_table() {
        let out = MarkdownRenderer::new()
            .render(&table(), &RenderConfig::default())
            .unwrap();

        let arena = Arena::new();
        let mut options = Options::default();
        options.extension.table = true;
        let root = parse_document(&arena, &out, &options);

        let rows = root
            .descendants()
            .filter(|n| matches!(n.data.borrow().value, NodeValue::TableRow(_)))
            .count();
        assert_eq!(rows, 3);
    }

    #[test]
    fn test_note_from_config() {
        let config = RenderConfig {
            note: Some("Sphericity corrected.".to_string()),
            caption_line: false,
            ..RenderConfig::default()
        };
        let out = MarkdownRenderer::new().render(&table(), &config).unwrap();
        assert!(!out.starts_with("Table:"));
        assert!(out.ends_with("\n*Note.* Sphericity corrected."));
    }

    #[test]
    fn test_escapes_pipes() {
        let doc = Document::from_block(Block::Table {
            caption: None,
            columns: vec![],
            header: None,
            body: vec![TableRow::new(vec![TableCell::text("a|b")])],
            note: None,
        });
        let out = MarkdownRenderer::new()
            .render(&doc, &RenderConfig::default())
            .unwrap();
        assert_eq!(out, "| a\\|b |");
    }

    #[test]
    fn test_paragraph_math() {
        let doc = Document::from_block(Block::Paragraph {
            content: Inline::parse_math("An effect, $F(1, 20) = 5.00$."),
        });
        let out = MarkdownRenderer::new()
            .render(&doc, &RenderConfig::default())
            .unwrap();
        assert_eq!(out, "An effect, $F(1, 20) = 5.00$.");
    }
}
