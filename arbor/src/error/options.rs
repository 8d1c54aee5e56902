//! Payload decoding errors

/// The render payload could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// The payload is not valid JSON or does not match the expected shape.
    #[error("invalid payload: {0}")]
    Json(#[from] serde_json::Error),

    /// An option holds a value outside its accepted range.
    #[error("invalid option {name}: {message}")]
    Invalid {
        /// JSON name of the option.
        name: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

impl OptionsError {
    /// Creates an invalid-option error.
    pub fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            message: message.into(),
        }
    }
}
