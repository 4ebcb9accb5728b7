// SPDX-License-Identifier: AGPL-3.0-or-later
//! Number formatting following APA conventions
//!
//! - values are rounded to a fixed number of decimals and padded with zeros
//! - quantities that cannot exceed 1 (p-values, proportions of variance,
//!   correlations) drop the leading zero
//! - large numbers get a thousands separator that is safe inside LaTeX math

use crate::error::{PrintError, Result};
use serde::{Deserialize, Serialize};

/// p-values below this render as `< .001`
pub const P_LOWER: f64 = 0.001;

/// Thousands separator usable inside `$...$`
pub const MATH_BIG_MARK: &str = "{,}";

/// Rounding rule for one kind of quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Decimal places
    pub digits: usize,
    /// Whether the quantity can exceed 1 (keeps the leading zero)
    pub gt1: bool,
    /// Separator inserted every three integral digits
    pub big_mark: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            digits: 2,
            gt1: true,
            big_mark: MATH_BIG_MARK.to_string(),
        }
    }
}

impl NumberFormat {
    pub fn new(digits: usize, gt1: bool) -> Self {
        Self {
            digits,
            gt1,
            ..Self::default()
        }
    }

    /// Format a single value
    pub fn format(&self, x: f64) -> String {
        if !x.is_finite() {
            return "NA".to_string();
        }

        let rounded = format!("{:.*}", self.digits, x.abs());
        // A value that rounds to zero never carries a sign
        let negative = x < 0.0 && rounded.bytes().any(|b| b.is_ascii_digit() && b != b'0');

        let (int_part, frac_part) = match rounded.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (rounded.as_str(), None),
        };

        let mut out = String::with_capacity(rounded.len() + 4);
        if negative {
            out.push('-');
        }
        match frac_part {
            Some(frac) => {
                if self.gt1 || int_part != "0" {
                    out.push_str(&group_thousands(int_part, &self.big_mark));
                }
                out.push('.');
                out.push_str(frac);
            }
            None => out.push_str(&group_thousands(int_part, &self.big_mark)),
        }
        out
    }
}

/// Insert `mark` between groups of three digits
fn group_thousands(digits: &str, mark: &str) -> String {
    if digits.len() <= 3 || mark.is_empty() {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + mark.len() * (digits.len() / 3));
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push_str(mark);
        }
        out.push(c);
    }
    out
}

/// Round and pad `x` to `digits` decimals
pub fn printnum(x: f64, digits: usize, gt1: bool) -> String {
    NumberFormat::new(digits, gt1).format(x)
}

/// Format a p-value
///
/// Returns `< .001` or `.XXX`; with `add_equals` the latter is
/// prefixed by `= ` so the result can follow `p` directly.
pub fn printp(p: f64, add_equals: bool) -> Result<String> {
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(PrintError::invalid(
            "p.value",
            format!("p-values must lie in [0, 1], got {p}"),
        ));
    }

    if p < P_LOWER {
        Ok("< .001".to_string())
    } else {
        let value = printnum(p, 3, false);
        Ok(if add_equals {
            format!("= {value}")
        } else {
            value
        })
    }
}

/// Format degrees of freedom
///
/// Whole numbers print without decimals; corrected (fractional) df get two.
pub fn print_df(df: f64) -> String {
    if df.is_finite() && (df - df.round()).abs() < 1e-9 {
        NumberFormat::new(0, true).format(df.round())
    } else {
        printnum(df, 2, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_printnum_pads_zeros() {
        assert_eq!(printnum(5.0, 2, true), "5.00");
        assert_eq!(printnum(4.5, 2, true), "4.50");
        assert_eq!(printnum(0.2, 2, true), "0.20");
    }

    #[test]
    fn test_printnum_drops_leading_zero_when_bounded() {
        assert_eq!(printnum(0.2, 2, false), ".20");
        assert_eq!(printnum(0.18, 2, false), ".18");
        assert_eq!(printnum(-0.45, 2, false), "-.45");
        assert_eq!(printnum(1.0, 2, false), "1.00");
    }

    #[test]
    fn test_printnum_negative_zero() {
        assert_eq!(printnum(-0.001, 2, true), "0.00");
        assert_eq!(printnum(-1.234, 2, true), "-1.23");
    }

    #[test]
    fn test_printnum_big_mark() {
        assert_eq!(printnum(1234.5, 2, true), "1{,}234.50");
        assert_eq!(printnum(1234567.0, 0, true), "1{,}234{,}567");
        assert_eq!(printnum(999.0, 1, true), "999.0");

        let plain = NumberFormat {
            big_mark: ",".to_string(),
            ..NumberFormat::new(1, true)
        };
        assert_eq!(plain.format(123456.0), "123,456.0");
    }

    #[test]
    fn test_printnum_non_finite() {
        assert_eq!(printnum(f64::NAN, 2, true), "NA");
        assert_eq!(printnum(f64::INFINITY, 2, true), "NA");
    }

    #[test]
    fn test_printp() {
        assert_eq!(printp(0.035, true).unwrap(), "= .035");
        assert_eq!(printp(0.035, false).unwrap(), ".035");
        assert_eq!(printp(0.0009, true).unwrap(), "< .001");
        assert_eq!(printp(0.001, true).unwrap(), "= .001");
        assert_eq!(printp(0.999, true).unwrap(), "= .999");
        assert_eq!(printp(0.9996, true).unwrap(), "= 1.000");
        assert_eq!(printp(1.0, false).unwrap(), "1.000");
        assert_eq!(printp(0.5, true).unwrap(), "= .500");
    }

    #[test]
    fn test_printp_rejects_out_of_range() {
        assert!(matches!(
            printp(1.5, true),
            Err(PrintError::InvalidInput { .. })
        ));
        assert!(printp(-0.1, true).is_err());
        assert!(printp(f64::NAN, true).is_err());
    }

    #[test]
    fn test_print_df() {
        assert_eq!(print_df(1.0), "1");
        assert_eq!(print_df(20.0), "20");
        assert_eq!(print_df(1.534), "1.53");
        assert_eq!(print_df(28.71), "28.71");
        assert_eq!(print_df(1200.0), "1{,}200");
    }
}
