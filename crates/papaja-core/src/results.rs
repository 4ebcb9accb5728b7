// SPDX-License-Identifier: AGPL-3.0-or-later
//! Formatted result bundles

use crate::anova::AnovaTable;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::ops::Index;

/// Formatted strings keyed by sanitized term name, in table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermStrings {
    entries: Vec<(String, String)>,
}

impl TermStrings {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: String, value: String) {
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for TermStrings {
    type Output = str;

    fn index(&self, key: &str) -> &str {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no formatted result for term `{key}`"),
        }
    }
}

impl Serialize for TermStrings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Output of [`print_anova`](crate::anova::print_anova)
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApaResults {
    /// Effect-size strings, e.g. `$\eta^2_p = .20$`
    pub estimate: TermStrings,
    /// Test strings, e.g. `$F(1, 20) = 5.00$, $p = .035$`
    pub statistic: TermStrings,
    /// Test and effect size joined
    pub full_result: TermStrings,
    pub table: AnovaTable,
}

/// Output of [`print_htest`](crate::htest::print_htest)
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ApaResult {
    pub estimate: Option<String>,
    pub statistic: String,
    pub full_result: String,
}
