// SPDX-License-Identifier: AGPL-3.0-or-later
//! Citation strings for single ANOVA terms

use super::effect_size::EffectSize;
use super::options::AnovaFormats;
use super::variance_table::AnovaTerm;
use crate::error::{PrintError, Result};
use crate::number::{print_df, printp};
use crate::terms;

/// Rounded and labelled values of one term, shared by strings and table
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FormattedTerm {
    pub term: String,
    pub key: String,
    pub label: String,
    pub statistic: String,
    pub df: String,
    pub df_res: String,
    pub mse: String,
    /// `.035` or `< .001`
    pub p: String,
    /// `= .035` or `< .001`
    pub p_relation: String,
    pub estimates: Vec<(EffectSize, String)>,
}

impl FormattedTerm {
    pub fn new(
        row: &AnovaTerm,
        estimates: &[(EffectSize, f64)],
        formats: &AnovaFormats,
    ) -> Result<Self> {
        let statistic = row.statistic.ok_or_else(|| {
            PrintError::invalid("statistic", format!("missing for term `{}`", row.term))
        })?;
        let p_value = row.p_value.ok_or_else(|| {
            PrintError::invalid("p.value", format!("missing for term `{}`", row.term))
        })?;

        Ok(Self {
            term: row.term.clone(),
            key: terms::sanitize(&row.term),
            label: terms::prettify(&row.term),
            statistic: formats.statistic.format(statistic),
            df: print_df(row.df),
            df_res: print_df(row.df_res),
            mse: formats.mse.format(row.mse()),
            p: printp(p_value, false)?,
            p_relation: printp(p_value, true)?,
            estimates: estimates
                .iter()
                .map(|&(measure, value)| (measure, formats.estimate.format(value)))
                .collect(),
        })
    }

    /// `$F(1, 20) = 5.00$, $\mathit{MSE} = 2.00$, $p = .035$`
    pub fn statistic_string(&self, mse: bool) -> String {
        let mut out = format!(
            "$F({}, {}) = {}$, ",
            self.df, self.df_res, self.statistic
        );
        if mse {
            out.push_str(&format!("$\\mathit{{MSE}} = {}$, ", self.mse));
        }
        out.push_str(&format!("$p {}$", self.p_relation));
        out
    }

    /// `$\eta^2_p = .20$, $\eta^2_G = .18$`
    pub fn estimate_string(&self) -> String {
        self.estimates
            .iter()
            .map(|(measure, value)| format!("${} = {}$", measure.symbol(), value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Join statistic and estimate; the estimate may be empty
pub fn full_result(statistic: &str, estimate: &str) -> String {
    if estimate.is_empty() {
        statistic.to_string()
    } else {
        format!("{statistic}, {estimate}")
    }
}

/// Prepare a citation for use inside parentheses
///
/// Round parentheses become square brackets so the citation does not nest
/// parentheses in the surrounding sentence.
pub fn in_paren(citation: &str) -> String {
    citation
        .chars()
        .map(|c| match c {
            '(' => '[',
            ')' => ']',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn formatted(estimates: &[(EffectSize, f64)]) -> FormattedTerm {
        let row = AnovaTerm::new("A", 10.0, 40.0, 1.0, 20.0, 5.0, 0.035);
        FormattedTerm::new(&row, estimates, &AnovaFormats::default()).unwrap()
    }

    #[test]
    fn test_statistic_string_with_mse() {
        assert_eq!(
            formatted(&[]).statistic_string(true),
            "$F(1, 20) = 5.00$, $\\mathit{MSE} = 2.00$, $p = .035$"
        );
    }

    #[test]
    fn test_statistic_string_without_mse() {
        assert_eq!(
            formatted(&[]).statistic_string(false),
            "$F(1, 20) = 5.00$, $p = .035$"
        );
    }

    #[test]
    fn test_small_p() {
        let row = AnovaTerm::new("A", 10.0, 40.0, 1.0, 20.0, 25.0, 0.00001);
        let f = FormattedTerm::new(&row, &[], &AnovaFormats::default()).unwrap();
        assert_eq!(f.statistic_string(false), "$F(1, 20) = 25.00$, $p < .001$");
        assert_eq!(f.p, "< .001");
    }

    #[test]
    fn test_estimate_string() {
        let f = formatted(&[(EffectSize::Pes, 0.2), (EffectSize::Ges, 0.18)]);
        assert_eq!(f.estimate_string(), "$\\eta^2_p = .20$, $\\eta^2_G = .18$");
    }

    #[test]
    fn test_full_result() {
        assert_eq!(full_result("$F$", ""), "$F$");
        assert_eq!(full_result("$F$", "$\\eta^2$"), "$F$, $\\eta^2$");
    }

    #[test]
    fn test_in_paren() {
        assert_eq!(
            in_paren("$F(1, 20) = 5.00$, $p = .035$"),
            "$F[1, 20] = 5.00$, $p = .035$"
        );
    }

    #[test]
    fn test_corrected_df() {
        let row = AnovaTerm::new("time", 8.0, 24.0, 1.53, 15.3, 3.33, 0.07);
        let f = FormattedTerm::new(&row, &[], &AnovaFormats::default()).unwrap();
        assert_eq!(f.statistic_string(false), "$F(1.53, 15.30) = 3.33$, $p = .070$");
    }
}
