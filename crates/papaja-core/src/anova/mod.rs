// SPDX-License-Identifier: AGPL-3.0-or-later
//! APA reporting of ANOVA variance tables

pub mod assemble;
pub mod effect_size;
pub mod options;
pub mod table;
pub mod variance_table;

pub use effect_size::{EffectSize, EffectSizeCalculator};
pub use options::{AnovaFormats, AnovaOptions};
pub use table::{AnovaTable, AnovaTableRow, Column};
pub use variance_table::{AnovaTerm, Correction, VarianceTable};

use crate::error::Result;
use crate::results::{ApaResults, TermStrings};
use crate::terms;
use assemble::FormattedTerm;

/// Format an ANOVA variance table for an APA manuscript
///
/// Validation fails fast: malformed rows, unsupported effect-size codes and
/// observed factors missing from the terms abort before anything is built.
/// The residual row is always dropped; the intercept row is dropped unless
/// `options.intercept` is set.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(rows = table.len(), correction = ?table.correction)
)]
pub fn print_anova(table: &VarianceTable, options: &AnovaOptions) -> Result<ApaResults> {
    table.validate()?;
    let measures = options.effect_sizes()?;

    let model_terms: Vec<&AnovaTerm> = table.rows.iter().filter(|r| !r.is_residual()).collect();
    let calculator = EffectSizeCalculator::new(&model_terms, &options.observed)?;

    let mut retained: Vec<usize> = (0..model_terms.len())
        .filter(|&i| options.intercept || !model_terms[i].is_intercept())
        .collect();
    if options.sort_effects {
        terms::sort_by_order(&mut retained, |&i| model_terms[i].term.as_str());
    }
    tracing::debug!(
        retained = retained.len(),
        dropped = table.len() - retained.len(),
        "filtered terms"
    );

    let formatted = retained
        .iter()
        .map(|&i| {
            let estimates = calculator.compute_all(i, &measures)?;
            tracing::debug!(term = %model_terms[i].term, ?estimates, "effect sizes");
            FormattedTerm::new(model_terms[i], &estimates, &options.formats)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut estimate = TermStrings::new();
    let mut statistic = TermStrings::new();
    let mut full_result = TermStrings::new();
    for term in &formatted {
        let mut stat = term.statistic_string(options.mse);
        let mut est = term.estimate_string();
        let mut full = assemble::full_result(&stat, &est);
        if options.in_paren {
            stat = assemble::in_paren(&stat);
            est = assemble::in_paren(&est);
            full = assemble::in_paren(&full);
        }
        statistic.push(term.key.clone(), stat);
        estimate.push(term.key.clone(), est);
        full_result.push(term.key.clone(), full);
    }

    let table = AnovaTable::assemble(&formatted, &measures, options.mse, table.correction);
    Ok(ApaResults {
        estimate,
        statistic,
        full_result,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrintError;
    use pretty_assertions::assert_eq;

    fn single() -> VarianceTable {
        VarianceTable::new(vec![AnovaTerm::new("A", 10.0, 40.0, 1.0, 20.0, 5.0, 0.035)])
    }

    fn mixed() -> VarianceTable {
        VarianceTable::new(vec![
            AnovaTerm::new("(Intercept)", 500.0, 60.0, 1.0, 10.0, 83.33, 0.00001),
            AnovaTerm::new("group:time", 4.0, 24.0, 2.0, 20.0, 1.67, 0.21),
            AnovaTerm::new("group", 12.0, 60.0, 1.0, 10.0, 2.0, 0.19),
            AnovaTerm::new("time", 8.0, 24.0, 2.0, 20.0, 3.33, 0.056),
            AnovaTerm::residual(24.0, 20.0),
        ])
    }

    #[test]
    fn test_reference_example() {
        let options = AnovaOptions::new().with_es(["pes"]).with_mse(true);
        let results = print_anova(&single(), &options).unwrap();

        assert_eq!(
            &results.statistic["A"],
            "$F(1, 20) = 5.00$, $\\mathit{MSE} = 2.00$, $p = .035$"
        );
        assert_eq!(&results.estimate["A"], "$\\eta^2_p = .20$");
        assert_eq!(
            &results.full_result["A"],
            "$F(1, 20) = 5.00$, $\\mathit{MSE} = 2.00$, $p = .035$, $\\eta^2_p = .20$"
        );
        assert_eq!(results.table.len(), 1);
    }

    #[test]
    fn test_drops_intercept_and_residual() {
        let results = print_anova(&mixed(), &AnovaOptions::default()).unwrap();
        assert_eq!(results.table.len(), 3);
        assert_eq!(
            results.statistic.keys().collect::<Vec<_>>(),
            vec!["group_time", "group", "time"]
        );
        assert!(results.statistic.get("Intercept").is_none());
    }

    #[test]
    fn test_keeps_intercept_on_request() {
        let options = AnovaOptions::default().with_intercept(true);
        let results = print_anova(&mixed(), &options).unwrap();
        assert_eq!(results.table.len(), 4);
        assert_eq!(results.table.rows[0].cells[0], "Intercept");
        assert!(results.statistic["Intercept"].contains("$p < .001$"));
    }

    #[test]
    fn test_sort_effects() {
        let options = AnovaOptions::default().with_sort_effects(true);
        let results = print_anova(&mixed(), &options).unwrap();
        assert_eq!(
            results.table.column(Column::Effect).unwrap(),
            vec!["Group", "Time", "Group $\\times$ Time"]
        );
    }

    #[test]
    fn test_generalized_eta_squared_default() {
        let results = print_anova(&mixed(), &AnovaOptions::default()).unwrap();
        // time: 8 / (8 + 60 + 24)
        assert_eq!(&results.estimate["time"], "$\\eta^2_G = .09$");
    }

    #[test]
    fn test_multiple_effect_sizes_in_fixed_order() {
        let options = AnovaOptions::default().with_es(["es", "ges", "pes"]);
        let results = print_anova(&single(), &options).unwrap();
        assert_eq!(
            &results.estimate["A"],
            "$\\eta^2_p = .20$, $\\eta^2_G = .20$, $\\eta^2 = .20$"
        );
        assert_eq!(results.table.columns.len(), 9);
    }

    #[test]
    fn test_no_effect_sizes() {
        let options = AnovaOptions::default().with_es(Vec::<String>::new()).with_mse(false);
        let results = print_anova(&single(), &options).unwrap();
        assert_eq!(&results.estimate["A"], "");
        assert_eq!(&results.full_result["A"], "$F(1, 20) = 5.00$, $p = .035$");
    }

    #[test]
    fn test_in_paren() {
        let options = AnovaOptions::default().with_in_paren(true).with_mse(false);
        let results = print_anova(&single(), &options).unwrap();
        assert_eq!(&results.statistic["A"], "$F[1, 20] = 5.00$, $p = .035$");
        assert!(results.full_result["A"].starts_with("$F[1, 20]"));
    }

    #[test]
    fn test_unsupported_effect_size_fails_fast() {
        let options = AnovaOptions::default().with_es(["pes", "omega"]);
        let err = print_anova(&single(), &options).unwrap_err();
        assert!(matches!(err, PrintError::UnsupportedEffectSize(ref c) if c == "omega"));
        assert_eq!(
            err.to_string(),
            "Requested effect size measure(s) currently not supported: omega"
        );
    }

    #[test]
    fn test_observed_not_found_fails_fast() {
        let options = AnovaOptions::default().with_observed(["age"]);
        let err = print_anova(&mixed(), &options).unwrap_err();
        assert_eq!(err.to_string(), "Observed variable not in data: age");
    }

    #[test]
    fn test_observed_changes_generalized_eta_squared() {
        let plain = print_anova(&mixed(), &AnovaOptions::default()).unwrap();
        let observed =
            print_anova(&mixed(), &AnovaOptions::default().with_observed(["group"])).unwrap();
        // time: 8 / (8 + 84 + 16)
        assert_eq!(&observed.estimate["time"], "$\\eta^2_G = .07$");
        assert_eq!(&plain.estimate["time"], "$\\eta^2_G = .09$");
        // group: 12 / (12 + 84 + 16 - 12)
        assert_eq!(&observed.estimate["group"], "$\\eta^2_G = .12$");
    }

    #[test]
    fn test_invalid_rows_fail() {
        let mut table = single();
        table.rows[0].df = -1.0;
        assert!(matches!(
            print_anova(&table, &AnovaOptions::default()),
            Err(PrintError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_terms_with_the_same_key_fail() {
        let table = VarianceTable::new(vec![
            AnovaTerm::new("a b", 10.0, 40.0, 1.0, 20.0, 5.0, 0.035),
            AnovaTerm::new("a_b", 30.0, 40.0, 1.0, 20.0, 15.0, 0.001),
        ]);
        assert!(matches!(
            print_anova(&table, &AnovaOptions::default()),
            Err(PrintError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_correction_reaches_table() {
        let table = mixed().with_correction(Correction::HuynhFeldt);
        let results = print_anova(&table, &AnovaOptions::default()).unwrap();
        assert_eq!(results.table.headers()[2], "$\\mathit{df}_1^{HF}$");
    }

    #[test]
    fn test_results_serialize() {
        let results = print_anova(&single(), &AnovaOptions::default()).unwrap();
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["statistic"]["A"].as_str(), results.statistic.get("A"));
        assert_eq!(json["table"]["rows"].as_array().map(Vec::len), Some(1));
    }
}
