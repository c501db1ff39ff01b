use std::fmt;

/// A plan request that cannot be computed as entered. Front ends surface
/// `detail` to the user as guidance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanInputError {
    pub field: &'static str,
    pub detail: String,
}

impl PlanInputError {
    pub fn new(field: &'static str, detail: impl Into<String>) -> Self {
        Self {
            field,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PlanInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid plan input (field={}): {}", self.field, self.detail)
    }
}

impl std::error::Error for PlanInputError {}
