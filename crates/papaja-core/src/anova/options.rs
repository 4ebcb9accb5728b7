// SPDX-License-Identifier: AGPL-3.0-or-later
//! Options controlling what [`print_anova`](super::print_anova) reports

use super::effect_size::EffectSize;
use crate::error::Result;
use crate::number::NumberFormat;
use serde::{Deserialize, Serialize};

/// Rounding rules for each reported quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnovaFormats {
    pub statistic: NumberFormat,
    pub mse: NumberFormat,
    pub estimate: NumberFormat,
}

impl Default for AnovaFormats {
    fn default() -> Self {
        Self {
            statistic: NumberFormat::new(2, true),
            mse: NumberFormat::new(2, true),
            estimate: NumberFormat::new(2, false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnovaOptions {
    /// Keep the intercept row
    pub intercept: bool,
    /// Measured (non-manipulated) factors, used by generalized eta-squared
    pub observed: Vec<String>,
    /// Effect-size codes: `pes`, `ges`, `es`
    pub es: Vec<String>,
    /// Report the mean squared error
    pub mse: bool,
    /// Citation goes inside parentheses: use brackets instead
    pub in_paren: bool,
    /// Re-sort terms by interaction order
    pub sort_effects: bool,
    pub formats: AnovaFormats,
}

impl Default for AnovaOptions {
    fn default() -> Self {
        Self {
            intercept: false,
            observed: Vec::new(),
            es: vec![EffectSize::Ges.code().to_string()],
            mse: true,
            in_paren: false,
            sort_effects: false,
            formats: AnovaFormats::default(),
        }
    }
}

impl AnovaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_es<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.es = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_observed<I, S>(mut self, factors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.observed = factors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_intercept(mut self, intercept: bool) -> Self {
        self.intercept = intercept;
        self
    }

    pub fn with_mse(mut self, mse: bool) -> Self {
        self.mse = mse;
        self
    }

    pub fn with_in_paren(mut self, in_paren: bool) -> Self {
        self.in_paren = in_paren;
        self
    }

    pub fn with_sort_effects(mut self, sort_effects: bool) -> Self {
        self.sort_effects = sort_effects;
        self
    }

    /// Validated effect-size measures in report order
    pub fn effect_sizes(&self) -> Result<Vec<EffectSize>> {
        EffectSize::parse_list(&self.es)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrintError;

    #[test]
    fn test_defaults() {
        let options = AnovaOptions::default();
        assert!(!options.intercept);
        assert!(options.mse);
        assert_eq!(options.effect_sizes().unwrap(), vec![EffectSize::Ges]);
        assert_eq!(options.formats.estimate, NumberFormat::new(2, false));
    }

    #[test]
    fn test_builder() {
        let options = AnovaOptions::new()
            .with_es(["es", "pes"])
            .with_observed(["age"])
            .with_mse(false)
            .with_in_paren(true);
        assert_eq!(
            options.effect_sizes().unwrap(),
            vec![EffectSize::Pes, EffectSize::Es]
        );
        assert_eq!(options.observed, vec!["age".to_string()]);
        assert!(!options.mse);
        assert!(options.in_paren);
    }

    #[test]
    fn test_unsupported_code() {
        let options = AnovaOptions::new().with_es(["omega"]);
        assert!(matches!(
            options.effect_sizes(),
            Err(PrintError::UnsupportedEffectSize(_))
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let input = r#"{"es": ["pes"], "formats": {"estimate": {"digits": 3, "gt1": false}}}"#;
        let options: AnovaOptions = serde_json::from_str(input).unwrap();
        assert_eq!(options.es, vec!["pes".to_string()]);
        assert!(options.mse);
        assert_eq!(options.formats.estimate.digits, 3);
        assert_eq!(options.formats.statistic.digits, 2);
    }
}
