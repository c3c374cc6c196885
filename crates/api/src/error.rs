// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use arrival_plan_domain::DomainError;
use thiserror::Error;

/// Errors raised while decoding a plan job, before any domain rule runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestDecodeError {
    /// The body is not valid JSON.
    #[error("Cannot decode the request body: {0}")]
    MalformedJson(String),

    /// The job carries no usable plan id.
    #[error("Plan id is missing, the job cannot be processed")]
    MissingPlanId,

    /// The job is valid JSON but does not have the expected shape.
    #[error("Malformed plan job: {0}")]
    InvalidShape(String),

    /// A date field is not a `YYYY-MM-DD` calendar date.
    #[error("Field '{field}' is not a valid YYYY-MM-DD date: '{value}'")]
    InvalidDate {
        /// The job field holding the date.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The job was valid but produced no arrivals.
    EmptyPlan {
        /// The plan that came out empty.
        plan_id: i64,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::EmptyPlan { plan_id } => {
                write!(
                    f,
                    "Plan {plan_id} produced no arrivals, check the planning period and capacity"
                )
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<RequestDecodeError> for ApiError {
    fn from(err: RequestDecodeError) -> Self {
        let field: &str = match &err {
            RequestDecodeError::MalformedJson(_) | RequestDecodeError::InvalidShape(_) => "body",
            RequestDecodeError::MissingPlanId => "id",
            RequestDecodeError::InvalidDate { field, .. } => *field,
        };
        Self::InvalidInput {
            field: field.to_string(),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidParameter { field, .. }
        | DomainError::OutOfRange { field, .. }
        | DomainError::InvalidRange { field, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::RangeNotContained { .. } => ApiError::DomainRuleViolation {
            rule: String::from("within_planning_period"),
            message,
        },
        DomainError::MissingDependency { .. } => ApiError::DomainRuleViolation {
            rule: String::from("parameter_dependency"),
            message,
        },
        DomainError::TooRestrictive { .. } => ApiError::DomainRuleViolation {
            rule: String::from("open_check_in_day"),
            message,
        },
    }
}
