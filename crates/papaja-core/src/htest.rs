// SPDX-License-Identifier: AGPL-3.0-or-later
//! APA reporting of single hypothesis tests (t, chi-squared, z) and their
//! estimates with confidence intervals

use crate::anova::assemble::in_paren;
use crate::error::{PrintError, Result};
use crate::number::{print_df, printp, NumberFormat};
use crate::results::ApaResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatistic {
    T,
    Chi2,
    Z,
}

impl TestStatistic {
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::T => "t",
            Self::Chi2 => "\\chi^2",
            Self::Z => "z",
        }
    }

    const fn needs_df(&self) -> bool {
        matches!(self, Self::T | Self::Chi2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateKind {
    /// Pearson correlation
    Correlation,
    /// Kendall's tau
    Tau,
    MeanDifference,
    Mean,
    CohensD,
    /// Any other estimate, LaTeX symbol and whether it can exceed 1
    Custom { symbol: String, gt1: bool },
}

impl EstimateKind {
    pub fn symbol(&self) -> &str {
        match self {
            Self::Correlation => "r",
            Self::Tau => "\\tau",
            Self::MeanDifference => "\\Delta M",
            Self::Mean => "M",
            Self::CohensD => "d",
            Self::Custom { symbol, .. } => symbol,
        }
    }

    /// Whether the estimate can exceed 1 in magnitude
    pub fn gt1(&self) -> bool {
        match self {
            Self::Correlation | Self::Tau => false,
            Self::MeanDifference | Self::Mean | Self::CohensD => true,
            Self::Custom { gt1, .. } => *gt1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    /// Confidence level, e.g. 0.95
    pub level: f64,
}

impl ConfidenceInterval {
    pub fn new(lower: f64, upper: f64, level: f64) -> Self {
        Self {
            lower,
            upper,
            level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub kind: EstimateKind,
    pub value: f64,
    #[serde(default)]
    pub ci: Option<ConfidenceInterval>,
}

/// Result of a single test as reported by the upstream analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisTest {
    pub statistic: TestStatistic,
    pub value: f64,
    #[serde(default)]
    pub df: Option<f64>,
    /// Sample size, reported for chi-squared tests
    #[serde(default)]
    pub n: Option<u64>,
    #[serde(rename = "p.value")]
    pub p_value: f64,
    #[serde(default)]
    pub estimate: Option<Estimate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtestOptions {
    pub in_paren: bool,
    pub statistic: NumberFormat,
    /// Decimals of the estimate and its interval
    pub estimate_digits: usize,
}

impl Default for HtestOptions {
    fn default() -> Self {
        Self {
            in_paren: false,
            statistic: NumberFormat::new(2, true),
            estimate_digits: 2,
        }
    }
}

/// `95\% CI $[.12, .70]$`
pub fn print_confint(ci: &ConfidenceInterval, digits: usize, gt1: bool) -> Result<String> {
    if !(ci.level > 0.0 && ci.level < 1.0) {
        return Err(PrintError::invalid(
            "ci.level",
            format!("confidence level must lie in (0, 1), got {}", ci.level),
        ));
    }
    if !ci.lower.is_finite() || !ci.upper.is_finite() || ci.lower > ci.upper {
        return Err(PrintError::invalid(
            "ci",
            format!("invalid interval [{}, {}]", ci.lower, ci.upper),
        ));
    }

    let format = NumberFormat::new(digits, gt1);
    let percent = (ci.level * 1000.0).round() / 10.0;
    Ok(format!(
        "{}\\% CI $[{}, {}]$",
        percent,
        format.format(ci.lower),
        format.format(ci.upper)
    ))
}

/// Format a hypothesis test
pub fn print_htest(test: &HypothesisTest, options: &HtestOptions) -> Result<ApaResult> {
    if !test.value.is_finite() {
        return Err(PrintError::invalid(
            "statistic",
            format!("must be finite, got {}", test.value),
        ));
    }

    let symbol = test.statistic.symbol();
    let df = match (test.statistic.needs_df(), test.df) {
        (true, Some(df)) if df.is_finite() && df > 0.0 => Some(print_df(df)),
        (true, _) => {
            return Err(PrintError::invalid(
                "df",
                format!("${symbol}$ requires positive degrees of freedom"),
            ))
        }
        (false, _) => None,
    };

    let mut params = Vec::new();
    if let Some(df) = df {
        params.push(df);
    }
    if let (TestStatistic::Chi2, Some(n)) = (test.statistic, test.n) {
        params.push(format!("n = {}", print_df(n as f64)));
    }
    let params = if params.is_empty() {
        String::new()
    } else {
        format!("({})", params.join(", "))
    };

    let mut statistic = format!(
        "${symbol}{params} = {}$, $p {}$",
        options.statistic.format(test.value),
        printp(test.p_value, true)?
    );

    let mut estimate = match &test.estimate {
        Some(est) => {
            let gt1 = est.kind.gt1();
            let mut out = format!(
                "${} = {}$",
                est.kind.symbol(),
                NumberFormat::new(options.estimate_digits, gt1).format(est.value)
            );
            if let Some(ci) = &est.ci {
                out.push_str(", ");
                out.push_str(&print_confint(ci, options.estimate_digits, gt1)?);
            }
            Some(out)
        }
        None => None,
    };

    let mut full_result = match &estimate {
        Some(est) => format!("{est}, {statistic}"),
        None => statistic.clone(),
    };

    if options.in_paren {
        statistic = in_paren(&statistic);
        estimate = estimate.map(|e| in_paren(&e));
        full_result = in_paren(&full_result);
    }

    tracing::debug!(%full_result, "formatted hypothesis test");
    Ok(ApaResult {
        estimate,
        statistic,
        full_result,
    })
}
