use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmoothError {
    #[error("Invalid manifest: {0}")]
    InvalidManifest(#[from] ManifestError),

    /// Raised by an injected collaborator (XML adapter or digest) and passed through as is.
    #[error(transparent)]
    Dependency(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl SmoothError {
    pub fn dependency<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Dependency(Box::new(error))
    }

    pub fn is_invalid_manifest(&self) -> bool {
        matches!(self, Self::InvalidManifest(_))
    }
}

/// Describes which precondition of a manifest was violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    #[error("missing field `{field}` in `{parent}`")]
    MissingField {
        field: &'static str,
        parent: &'static str,
    },

    #[error("field `{field}` is not a valid integer: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("field `{field}` has an unexpected shape, expected {expected}")]
    UnexpectedShape {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unknown stream type: {0}")]
    UnknownStreamType(String),

    #[error("timeline overflows at cursor {cursor} with duration {duration}")]
    TimelineOverflow { cursor: u64, duration: u64 },

    #[error("timeline expands to more than {limit} fragments")]
    TooManyFragments { limit: u64 },
}

pub type SmoothResult<T> = Result<T, SmoothError>;
