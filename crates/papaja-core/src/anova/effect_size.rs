// SPDX-License-Identifier: AGPL-3.0-or-later
//! Eta-squared effect sizes from summarized sums of squares

use super::variance_table::AnovaTerm;
use crate::error::{PrintError, Result};
use crate::terms;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported effect-size measures
///
/// Declaration order is the order measures are reported in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EffectSize {
    /// Partial eta-squared
    Pes,
    /// Generalized eta-squared
    Ges,
    /// Eta-squared
    Es,
}

impl EffectSize {
    pub const ALL: [Self; 3] = [Self::Pes, Self::Ges, Self::Es];

    /// Identifier used in options
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pes => "pes",
            Self::Ges => "ges",
            Self::Es => "es",
        }
    }

    /// LaTeX symbol without math delimiters
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Pes => "\\eta^2_p",
            Self::Ges => "\\eta^2_G",
            Self::Es => "\\eta^2",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pes => "partial eta-squared",
            Self::Ges => "generalized eta-squared",
            Self::Es => "eta-squared",
        }
    }

    /// Parse requested codes into a sorted, de-duplicated list
    ///
    /// All unsupported codes are reported together.
    pub fn parse_list<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Self>> {
        let mut measures = Vec::with_capacity(codes.len());
        let mut unsupported = Vec::new();
        for code in codes {
            match code.as_ref().parse::<Self>() {
                Ok(measure) => measures.push(measure),
                Err(_) => unsupported.push(code.as_ref().to_string()),
            }
        }
        if !unsupported.is_empty() {
            return Err(PrintError::UnsupportedEffectSize(unsupported.join(", ")));
        }
        measures.sort();
        measures.dedup();
        Ok(measures)
    }
}

impl FromStr for EffectSize {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "pes" => Ok(Self::Pes),
            "ges" => Ok(Self::Ges),
            "es" => Ok(Self::Es),
            other => Err(PrintError::UnsupportedEffectSize(other.to_string())),
        }
    }
}

/// Effect-size calculator over the model terms of one variance table
///
/// The residual row must be excluded by the caller; the intercept may be
/// present and is left out of the summed effect SS.
#[derive(Debug)]
pub struct EffectSizeCalculator<'a> {
    rows: &'a [&'a AnovaTerm],
    /// Sum of the distinct error SS (one per error stratum)
    pooled_error: f64,
    /// Sum of SS across all non-intercept terms
    total_effect: f64,
    /// Sum of SS of terms involving an observed factor
    observed_total: f64,
    observed: Vec<bool>,
}

impl<'a> EffectSizeCalculator<'a> {
    /// Fails if an observed factor is not part of any term
    pub fn new<S: AsRef<str>>(rows: &'a [&'a AnovaTerm], observed: &[S]) -> Result<Self> {
        for factor in observed {
            let factor = factor.as_ref();
            let found = !factor.trim().is_empty()
                && rows
                    .iter()
                    .any(|r| !r.is_intercept() && terms::involves(&r.term, factor));
            if !found {
                return Err(PrintError::ObservedNotFound(factor.to_string()));
            }
        }

        let observed_mask: Vec<bool> = rows
            .iter()
            .map(|r| {
                !r.is_intercept()
                    && observed
                        .iter()
                        .any(|f| terms::involves(&r.term, f.as_ref()))
            })
            .collect();

        let mut strata: Vec<f64> = Vec::new();
        for row in rows {
            if !strata.contains(&row.sumsq_err) {
                strata.push(row.sumsq_err);
            }
        }

        let total_effect = rows
            .iter()
            .filter(|r| !r.is_intercept())
            .map(|r| r.sumsq)
            .sum();
        let observed_total = rows
            .iter()
            .zip(&observed_mask)
            .filter(|(_, obs)| **obs)
            .map(|(r, _)| r.sumsq)
            .sum();

        let calculator = Self {
            rows,
            pooled_error: strata.iter().sum(),
            total_effect,
            observed_total,
            observed: observed_mask,
        };
        tracing::debug!(
            pooled_error = calculator.pooled_error,
            total_effect = calculator.total_effect,
            observed_total = calculator.observed_total,
            strata = strata.len(),
            "effect size denominators"
        );
        Ok(calculator)
    }

    pub fn pooled_error(&self) -> f64 {
        self.pooled_error
    }

    /// Effect size of row `index` (position in the slice given to `new`)
    pub fn compute(&self, index: usize, measure: EffectSize) -> Result<f64> {
        let row = self.rows[index];
        let denominator = match measure {
            EffectSize::Pes => row.sumsq + row.sumsq_err,
            EffectSize::Ges => {
                let own = if self.observed[index] { row.sumsq } else { 0.0 };
                row.sumsq + self.pooled_error + self.observed_total - own
            }
            EffectSize::Es => self.total_effect + self.pooled_error,
        };
        if denominator == 0.0 || !denominator.is_finite() {
            return Err(PrintError::DegenerateEffectSize {
                term: row.term.clone(),
                measure: measure.name(),
            });
        }
        Ok(row.sumsq / denominator)
    }

    /// All requested measures for row `index`, in report order
    pub fn compute_all(
        &self,
        index: usize,
        measures: &[EffectSize],
    ) -> Result<Vec<(EffectSize, f64)>> {
        measures
            .iter()
            .map(|&m| self.compute(index, m).map(|v| (m, v)))
            .collect()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Partial eta-squared is a proportion for non-negative SS with error SS > 0
        #[test]
        fn prop_partial_eta_squared_in_unit_interval(
            sumsq in 0.0f64..1e6,
            sumsq_err in 1e-6f64..1e6,
        ) {
            let rows = [AnovaTerm::new("A", sumsq, sumsq_err, 1.0, 10.0, 1.0, 0.5)];
            let r: Vec<&AnovaTerm> = rows.iter().collect();
            let calc = EffectSizeCalculator::new(&r, &[] as &[&str]).unwrap();
            let pes = calc.compute(0, EffectSize::Pes).unwrap();
            prop_assert!((0.0..=1.0).contains(&pes));
        }

        #[test]
        fn prop_all_measures_bounded(
            ss in prop::collection::vec(0.0f64..1e4, 1..6),
            err in 1e-3f64..1e4,
        ) {
            let rows: Vec<AnovaTerm> = ss
                .iter()
                .enumerate()
                .map(|(i, &s)| AnovaTerm::new(format!("F{i}"), s, err, 1.0, 10.0, 1.0, 0.5))
                .collect();
            let r: Vec<&AnovaTerm> = rows.iter().collect();
            let calc = EffectSizeCalculator::new(&r, &[] as &[&str]).unwrap();
            for i in 0..rows.len() {
                for m in EffectSize::ALL {
                    let v = calc.compute(i, m).unwrap();
                    prop_assert!((0.0..=1.0).contains(&v), "{:?} = {}", m, v);
                }
            }
        }
    }
}
