use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown entity kind: '{token}'")]
    UnknownEntityKind { token: String },

    #[error("Missing required field '{field}' for {kind}")]
    MissingField { kind: &'static str, field: String },

    #[error("Invalid value for field '{field}' of {kind}: {message}")]
    InvalidField {
        kind: &'static str,
        field: String,
        message: String,
    },
}

impl ModelError {
    pub fn unknown_entity_kind(token: impl Into<String>) -> Self {
        Self::UnknownEntityKind {
            token: token.into(),
        }
    }

    pub fn missing_field(kind: &'static str, field: impl Into<String>) -> Self {
        Self::MissingField {
            kind,
            field: field.into(),
        }
    }

    pub fn invalid_field(
        kind: &'static str,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }
}
