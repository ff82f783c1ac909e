use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid filter operator: '{0}'")]
    InvalidOperator(String),

    #[error(
        "filter lists differ in length: {fields} fields, {values} values, {operators} operators"
    )]
    LengthMismatch {
        fields: usize,
        values: usize,
        operators: usize,
    },

    #[error("malformed filter expression: '{0}'")]
    MalformedFilter(String),

    #[error("invalid sort direction: '{0}' (expected asc or dsc)")]
    InvalidSortDirection(String),
}

impl Error {
    pub fn invalid_operator(op: impl Into<String>) -> Self {
        Self::InvalidOperator(op.into())
    }

    pub fn malformed_filter(raw: impl Into<String>) -> Self {
        Self::MalformedFilter(raw.into())
    }
}
