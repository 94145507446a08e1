//! Input validation for contact form submissions

pub mod contact;
pub mod rules;

pub use contact::validate_contact_form;
pub use rules::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
    pub error_codes: BTreeMap<String, String>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
            error_codes: BTreeMap::new(),
        }
    }

    /// Records the failure for `field` unless that field already has one.
    pub fn add_error(&mut self, field: &str, error: &ValidationError) {
        self.is_valid = false;
        if self.errors.contains_key(field) {
            return;
        }
        self.errors.insert(field.to_string(), rules::error_message(error));
        self.error_codes.insert(field.to_string(), error.code.to_string());
    }

    /// Convenience for chaining rule checks on one field.
    pub fn check(&mut self, field: &str, outcome: Result<(), ValidationError>) -> bool {
        match outcome {
            Ok(()) => true,
            Err(error) => {
                self.add_error(field, &error);
                false
            }
        }
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn code_for(&self, field: &str) -> Option<&str> {
        self.error_codes.get(field).map(String::as_str)
    }
}

pub trait Validatable {
    type Output;

    fn validate_comprehensive(&self) -> Result<Self::Output, ValidationResult>;
}
