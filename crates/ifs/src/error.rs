use std::fmt;

/// Error type shared by all engines and transforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IfsError {
    InvalidArgument { reason: String },
}

impl IfsError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for IfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
        }
    }
}

impl std::error::Error for IfsError {}

pub type Result<T> = std::result::Result<T, IfsError>;
