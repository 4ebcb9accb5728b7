// SPDX-License-Identifier: AGPL-3.0-or-later
//! papaja core - APA-formatted statistical results
//!
//! This crate provides:
//! - `print_anova`: citation strings and a presentation table from an ANOVA
//!   variance table, with eta-squared effect sizes
//! - `print_htest`: citation strings for t, chi-squared and z tests
//! - APA number formatting (`printnum`, `printp`, `print_df`)
//! - A small presentation AST with Markdown, LaTeX and plain text renderers
//! - `papaja.toml` configuration

pub mod anova;
pub mod ast;
pub mod config;
pub mod error;
pub mod formats;
pub mod htest;
pub mod number;
pub mod results;
pub mod terms;
pub mod traits;

pub use anova::{
    print_anova, AnovaOptions, AnovaTable, AnovaTerm, Correction, EffectSize, VarianceTable,
};
pub use ast::{Block, Document, Inline, OutputFormat};
pub use config::{ConfigError, PapajaConfig};
pub use error::{PrintError, Result};
pub use htest::{print_htest, HtestOptions, HypothesisTest};
pub use number::{print_df, printnum, printp};
pub use results::{ApaResult, ApaResults, TermStrings};
pub use traits::{RenderConfig, RenderError, Renderer, RendererExt, RendererRegistry};
