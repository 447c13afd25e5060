//! Errors raised while loading or validating rulesets.
//!
//! The simulation step itself never fails; disallowed player actions are
//! reported as alerts, not errors.

use thiserror::Error;

use crate::enums::AircraftType;

#[derive(Debug, Error)]
pub enum RulesetError {
    #[error("failed to read ruleset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse ruleset JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("aircraft selection table is empty or has zero total weight")]
    EmptyTypeTable,

    #[error("no profile registered for aircraft type {0}")]
    MissingProfile(AircraftType),

    #[error("unknown variant `{0}` (expected classic, tactical, aerodynamic or elite)")]
    UnknownVariant(String),
}

impl RulesetError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RulesetError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
