// SPDX-License-Identifier: AGPL-3.0-or-later
//! Errors raised while validating and formatting results

use crate::traits::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("Requested effect size measure(s) currently not supported: {0}")]
    UnsupportedEffectSize(String),

    #[error("Observed variable not in data: {0}")]
    ObservedNotFound(String),

    #[error("Invalid input `{field}`: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Cannot compute {measure} for term `{term}`: denominator is zero")]
    DegenerateEffectSize { term: String, measure: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl PrintError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        PrintError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrintError>;
