use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

impl ModelError {
    pub fn invalid(field: &'static str, value: &str) -> Self {
        Self::InvalidField { field, value: value.to_string() }
    }

    pub fn field(&self) -> &'static str {
        match self {
            ModelError::InvalidField { field, .. } => *field,
        }
    }
}
