//! Error types for Horizon Tk.

use thiserror::Error;

/// A script evaluation failure reported by the interpreter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("script `{script}` failed: {message}")]
pub struct InterpError {
    /// The script that was evaluated.
    pub script: String,
    /// The interpreter's error message.
    pub message: String,
}

impl InterpError {
    /// Create a new interpreter error.
    pub fn new(script: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            message: message.into(),
        }
    }
}

/// Result type for interpreter round trips.
pub type InterpResult<T> = std::result::Result<T, InterpError>;

/// The main error type for Horizon Tk operations.
#[derive(Error, Debug)]
pub enum TkError {
    /// Structural validation failed before the interpreter was contacted
    /// (empty tag, malformed event pattern, dead widget).
    #[error("invalid: {0}")]
    Invalid(String),

    /// A required argument was missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The interpreter rejected a script.
    #[error("interpreter error: {0}")]
    Interp(#[from] InterpError),

    /// A photo object could not be located after it was created.
    #[error("photo image `{0}` not found")]
    ImageNotFound(String),

    /// A local image file could not be opened or decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Session configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TkError {
    /// Shorthand for [`TkError::Invalid`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }

    /// Returns `true` for structural validation failures.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_) | Self::InvalidArgument(_))
    }
}

/// A specialized Result type for Horizon Tk operations.
pub type TkResult<T> = std::result::Result<T, TkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_error_display() {
        let err = InterpError::new("bind . <Key>", "bad window path name");
        assert_eq!(
            err.to_string(),
            "script `bind . <Key>` failed: bad window path name"
        );
    }

    #[test]
    fn test_is_invalid() {
        assert!(TkError::invalid("empty tag").is_invalid());
        assert!(TkError::InvalidArgument("file".into()).is_invalid());
        assert!(!TkError::ImageNotFound("img1".into()).is_invalid());
        assert!(!TkError::from(InterpError::new("x", "y")).is_invalid());
    }
}
