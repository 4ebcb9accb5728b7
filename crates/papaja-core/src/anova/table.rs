// SPDX-License-Identifier: AGPL-3.0-or-later
//! Presentation table for ANOVA results

use super::assemble::FormattedTerm;
use super::effect_size::EffectSize;
use super::variance_table::Correction;
use crate::ast::{
    Block, ColumnAlignment, ColumnSpec, Document, Inline, OutputFormat, TableCell, TableRow,
};
use crate::number::MATH_BIG_MARK;
use crate::traits::{RenderConfig, RendererRegistry, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Effect,
    Statistic,
    Df1,
    Df2,
    Mse,
    PValue,
    EffectSize(EffectSize),
}

impl Column {
    /// Header label, LaTeX math in `$...$`
    pub fn header(&self, correction: Correction) -> String {
        let df = |index: u8| match correction.label() {
            Some(label) => format!("$\\mathit{{df}}_{index}^{{{label}}}$"),
            None => format!("$\\mathit{{df}}_{index}$"),
        };
        match self {
            Column::Effect => "Effect".to_string(),
            Column::Statistic => "$F$".to_string(),
            Column::Df1 => df(1),
            Column::Df2 => df(2),
            Column::Mse => "$\\mathit{MSE}$".to_string(),
            Column::PValue => "$p$".to_string(),
            Column::EffectSize(measure) => format!("${}$", measure.symbol()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaTableRow {
    /// Term as given in the variance table
    pub term: String,
    /// One value per column; the first is the prettified effect label
    pub cells: Vec<String>,
}

/// Reshaped, renamed and filtered ANOVA results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaTable {
    pub correction: Correction,
    pub columns: Vec<Column>,
    pub rows: Vec<AnovaTableRow>,
}

impl AnovaTable {
    pub(crate) fn assemble(
        terms: &[FormattedTerm],
        measures: &[EffectSize],
        mse: bool,
        correction: Correction,
    ) -> Self {
        let mut columns = vec![Column::Effect, Column::Statistic, Column::Df1, Column::Df2];
        if mse {
            columns.push(Column::Mse);
        }
        columns.push(Column::PValue);
        columns.extend(measures.iter().copied().map(Column::EffectSize));

        let rows = terms
            .iter()
            .map(|t| AnovaTableRow {
                term: t.term.clone(),
                cells: columns.iter().map(|c| cell_value(t, *c)).collect(),
            })
            .collect();

        Self {
            correction,
            columns,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.header(self.correction))
            .collect()
    }

    /// Values of one column, top to bottom
    pub fn column(&self, column: Column) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|c| *c == column)?;
        Some(self.rows.iter().map(|r| r.cells[index].as_str()).collect())
    }

    /// Table block ready for any renderer
    pub fn to_block(&self, caption: Option<&str>, note: Option<&str>) -> Block {
        let columns = self
            .columns
            .iter()
            .map(|c| match c {
                Column::Effect => ColumnSpec::new(ColumnAlignment::Left),
                _ => ColumnSpec::new(ColumnAlignment::Center),
            })
            .collect();

        let header = TableRow::new(
            self.headers()
                .iter()
                .map(|h| TableCell::new(Inline::parse_math(h)))
                .collect(),
        );

        let body = self
            .rows
            .iter()
            .map(|row| {
                TableRow::new(
                    row.cells
                        .iter()
                        .map(|cell| TableCell::new(Inline::parse_math(cell)))
                        .collect(),
                )
            })
            .collect();

        Block::Table {
            caption: caption.map(Inline::parse_math),
            columns,
            header: Some(header),
            body,
            note: note.map(Inline::parse_math),
        }
    }

    pub fn to_document(&self, caption: Option<&str>, note: Option<&str>) -> Document {
        Document::from_block(self.to_block(caption, note))
    }

    /// Render with the default renderers; caption and note come from `config`
    pub fn render(&self, format: OutputFormat, config: &RenderConfig) -> Result<String> {
        let doc = self.to_document(config.caption.as_deref(), config.note.as_deref());
        RendererRegistry::with_defaults().render(&doc, format, config)
    }
}

/// Table cells are text, so the math-mode thousands separator is unwrapped
fn cell_value(term: &FormattedTerm, column: Column) -> String {
    let value: &str = match column {
        Column::Effect => return term.label.clone(),
        Column::Statistic => &term.statistic,
        Column::Df1 => &term.df,
        Column::Df2 => &term.df_res,
        Column::Mse => &term.mse,
        Column::PValue => &term.p,
        Column::EffectSize(measure) => term
            .estimates
            .iter()
            .find(|(m, _)| *m == measure)
            .map(|(_, v)| v)
            .map_or("", String::as_str),
    };
    value.replace(MATH_BIG_MARK, ",")
}
