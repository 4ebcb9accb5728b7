// SPDX-License-Identifier: AGPL-3.0-or-later
//! ANOVA variance table: the input to [`print_anova`](super::print_anova)

use crate::error::{PrintError, Result};
use crate::terms;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sphericity correction applied to the degrees of freedom
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Correction {
    #[default]
    #[serde(rename = "none", alias = "None")]
    None,
    #[serde(rename = "GG")]
    GreenhouseGeisser,
    #[serde(rename = "HF")]
    HuynhFeldt,
}

impl Correction {
    /// Superscript used in table headers, if any
    pub const fn label(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::GreenhouseGeisser => Some("GG"),
            Self::HuynhFeldt => Some("HF"),
        }
    }
}

/// One row of a variance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaTerm {
    pub term: String,
    pub sumsq: f64,
    pub sumsq_err: f64,
    pub df: f64,
    pub df_res: f64,
    /// F statistic; absent on the residual row
    pub statistic: Option<f64>,
    #[serde(rename = "p.value")]
    pub p_value: Option<f64>,
}

impl AnovaTerm {
    pub fn new(
        term: impl Into<String>,
        sumsq: f64,
        sumsq_err: f64,
        df: f64,
        df_res: f64,
        statistic: f64,
        p_value: f64,
    ) -> Self {
        Self {
            term: term.into(),
            sumsq,
            sumsq_err,
            df,
            df_res,
            statistic: Some(statistic),
            p_value: Some(p_value),
        }
    }

    /// Residual dummy row without a test
    pub fn residual(sumsq: f64, df: f64) -> Self {
        Self {
            term: "Residuals".to_string(),
            sumsq,
            sumsq_err: sumsq,
            df,
            df_res: df,
            statistic: None,
            p_value: None,
        }
    }

    /// Mean squared error of the term's error stratum
    pub fn mse(&self) -> f64 {
        self.sumsq_err / self.df_res
    }

    pub fn is_intercept(&self) -> bool {
        terms::is_intercept(&self.term)
    }

    pub fn is_residual(&self) -> bool {
        terms::is_residual(&self.term)
    }

    fn validate(&self) -> Result<()> {
        let name = &self.term;
        if name.trim().is_empty() {
            return Err(PrintError::invalid("term", "term names must not be empty"));
        }

        for (field, value) in [
            ("sumsq", self.sumsq),
            ("sumsq_err", self.sumsq_err),
            ("df", self.df),
            ("df_res", self.df_res),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PrintError::invalid(
                    field,
                    format!("must be a non-negative number for term `{name}`, got {value}"),
                ));
            }
        }

        if self.is_residual() {
            return Ok(());
        }

        if self.df_res == 0.0 {
            return Err(PrintError::invalid(
                "df_res",
                format!("must be positive for term `{name}`"),
            ));
        }

        match self.statistic {
            Some(f) if f.is_finite() && f >= 0.0 => {}
            Some(f) => {
                return Err(PrintError::invalid(
                    "statistic",
                    format!("must be a non-negative number for term `{name}`, got {f}"),
                ))
            }
            None => {
                return Err(PrintError::invalid(
                    "statistic",
                    format!("missing for term `{name}`"),
                ))
            }
        }

        match self.p_value {
            Some(p) if (0.0..=1.0).contains(&p) => Ok(()),
            Some(p) => Err(PrintError::invalid(
                "p.value",
                format!("must lie in [0, 1] for term `{name}`, got {p}"),
            )),
            None => Err(PrintError::invalid(
                "p.value",
                format!("missing for term `{name}`"),
            )),
        }
    }
}

/// Variance table tagged with its sphericity correction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VarianceTable {
    pub rows: Vec<AnovaTerm>,
    #[serde(default)]
    pub correction: Correction,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VarianceTableRepr {
    Table(VarianceTable),
    Rows(Vec<AnovaTerm>),
}

impl VarianceTable {
    pub fn new(rows: Vec<AnovaTerm>) -> Self {
        Self {
            rows,
            correction: Correction::None,
        }
    }

    pub fn with_correction(mut self, correction: Correction) -> Self {
        self.correction = correction;
        self
    }

    /// Parse either `{"rows": [...], "correction": "GG"}` or a bare row array
    pub fn from_json(input: &str) -> Result<Self> {
        let repr: VarianceTableRepr = serde_json::from_str(input)?;
        Ok(match repr {
            VarianceTableRepr::Table(table) => table,
            VarianceTableRepr::Rows(rows) => Self::new(rows),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check shape and ranges of every row
    pub fn validate(&self) -> Result<()> {
        if self.rows.is_empty() {
            return Err(PrintError::invalid("rows", "variance table is empty"));
        }

        // Results are keyed by the sanitized name, so that is what must be unique
        let mut seen = HashSet::new();
        for row in &self.rows {
            row.validate()?;
            let key = terms::sanitize(&row.term);
            if key.is_empty() {
                return Err(PrintError::invalid(
                    "term",
                    format!("term `{}` has no usable characters", row.term),
                ));
            }
            if !seen.insert(key) {
                return Err(PrintError::invalid(
                    "term",
                    format!("duplicate term `{}`", row.term),
                ));
            }
        }

        if self.rows.iter().all(AnovaTerm::is_residual) {
            return Err(PrintError::invalid(
                "rows",
                "variance table contains no model terms",
            ));
        }
        Ok(())
    }
}
