use crate::session::status::Status;

/// Convenience result type used across cellmorph.
pub type MorphResult<T> = Result<T, MorphError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    /// The target (reference) image could not be fetched or decoded.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// A user-supplied image could not be decoded.
    #[error("unreadable input: {0}")]
    UnreadableInput(String),

    /// A transformation was requested before the target cells were prepared.
    #[error("not ready: target cells are not prepared yet")]
    NotReady,

    /// Invalid configuration or malformed pixel data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while writing frames to an output sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    /// Build a [`MorphError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`MorphError::UnreadableInput`] value.
    pub fn unreadable_input(msg: impl Into<String>) -> Self {
        Self::UnreadableInput(msg.into())
    }

    /// Build a [`MorphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MorphError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Status message this error surfaces as at the session boundary, if any.
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::AssetLoad(_) => Some(Status::TargetLoadFailed),
            Self::UnreadableInput(_) => Some(Status::Unreadable),
            Self::NotReady => Some(Status::StillLoading),
            Self::Validation(_) | Self::Encode(_) | Self::Other(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
