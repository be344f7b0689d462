use crate::api::middleware::error::{ApiError, ApiResult, FieldErrors};

/// Collects field-level rule violations for one inbound request.
///
/// Rules are evaluated in declaration order and short-circuit per field: once
/// a field has failed, later `check`/`max_len`/`min_int` calls for it are
/// skipped, so a missing required field does not also report a length error.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_failed(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Record a violation unconditionally (used for cross-entity checks)
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    /// Record a violation unless the field already failed an earlier rule
    pub fn check(&mut self, field: &str, ok: bool, message: &str) {
        if !ok && !self.is_failed(field) {
            self.add_error(field, message);
        }
    }

    pub fn required(&mut self, field: &str, present: bool, message: &str) {
        self.check(field, present, message);
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize, message: &str) {
        if self.is_failed(field) {
            return;
        }
        self.check(field, value.chars().count() <= max, message);
    }

    pub fn min_int(&mut self, field: &str, value: i64, min: i64, message: &str) {
        self.check(field, value >= min, message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Fail the request with a Validation envelope if any rule was violated
    pub fn finish(self, message: &str) -> ApiResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(message, self.errors))
        }
    }
}
