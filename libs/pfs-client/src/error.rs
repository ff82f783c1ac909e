use thiserror::Error;

/// Errors surfaced by session operations.
#[derive(Error, Debug)]
pub enum PfsError {
    /// Non-2xx status, undecodable body, or a request that never completed
    /// (`status` is `None` then).
    #[error("{}", transport_message(.status, .message))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Username and password are required")]
    AuthenticationPrecondition,

    #[error(transparent)]
    Query(#[from] odata_core::Error),

    #[error(transparent)]
    Model(#[from] pfs_model::ModelError),
}

fn transport_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Transport failure (HTTP {code}): {message}"),
        None => format!("Transport failure: {message}"),
    }
}

impl PfsError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by a transport failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}
