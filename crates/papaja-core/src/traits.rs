// SPDX-License-Identifier: AGPL-3.0-or-later
//! Renderer trait and registry for output formats

use crate::ast::{Document, OutputFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;

/// Error type for rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("No renderer registered for format {0:?}")]
    MissingRenderer(OutputFormat),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Configuration for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Caption used when the table block carries none
    pub caption: Option<String>,
    /// Note used when the table block carries none
    pub note: Option<String>,
    /// Use booktabs rules in LaTeX output
    pub booktabs: bool,
    /// LaTeX float placement specifier
    pub placement: String,
    /// Emit a caption line in formats without native captions
    pub caption_line: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            caption: None,
            note: None,
            booktabs: true,
            placement: "tbp".to_string(),
            caption_line: true,
        }
    }
}

/// Renderer trait: convert AST to target format
pub trait Renderer: Send + Sync {
    /// The target format this renderer produces
    fn format(&self) -> OutputFormat;

    /// Render a Document to a string
    fn render(&self, doc: &Document, config: &RenderConfig) -> Result<String>;
}

/// Extension trait for streaming operations (not dyn-compatible)
pub trait RendererExt: Renderer {
    /// Render to a writer
    fn render_writer<W: Write>(
        &self,
        doc: &Document,
        writer: &mut W,
        config: &RenderConfig,
    ) -> Result<()> {
        let output = self.render(doc, config)?;
        writer.write_all(output.as_bytes())?;
        Ok(())
    }
}

impl<T: Renderer> RendererExt for T {}

/// Registry of renderers
pub struct RendererRegistry {
    renderers: HashMap<OutputFormat, Box<dyn Renderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registry with every renderer compiled into this build
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        #[cfg(feature = "plaintext")]
        registry.register(Box::new(crate::formats::PlainTextRenderer::new()));
        #[cfg(feature = "markdown")]
        registry.register(Box::new(crate::formats::MarkdownRenderer::new()));
        #[cfg(feature = "latex")]
        registry.register(Box::new(crate::formats::LatexRenderer::new()));
        registry
    }

    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.insert(renderer.format(), renderer);
    }

    pub fn get(&self, format: OutputFormat) -> Option<&dyn Renderer> {
        self.renderers.get(&format).map(|r| r.as_ref())
    }

    /// Render a document with the renderer registered for `format`
    pub fn render(
        &self,
        doc: &Document,
        format: OutputFormat,
        config: &RenderConfig,
    ) -> Result<String> {
        let renderer = self
            .get(format)
            .ok_or(RenderError::MissingRenderer(format))?;
        tracing::debug!(format = format.label(), blocks = doc.content.len(), "rendering document");
        renderer.render(doc, config)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
