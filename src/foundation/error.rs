/// Result alias used across the crate.
pub type GradientResult<T> = Result<T, GradientError>;

/// Errors surfaced by the synthesizer.
///
/// Every failure is reported synchronously before any output is returned; there is no
/// partial-buffer mode.
#[derive(thiserror::Error, Debug)]
pub enum GradientError {
    /// Gradient or noise parameters are outside their allowed ranges.
    #[error("invalid spec: {0}")]
    InvalidSpec(String),

    /// Raster target (or raster options) cannot produce a buffer.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// The image codec rejected the buffer.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A parameter document failed to (de)serialize.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GradientError {
    /// Build [`GradientError::InvalidSpec`].
    pub fn invalid_spec(msg: impl Into<String>) -> Self {
        Self::InvalidSpec(msg.into())
    }

    /// Build [`GradientError::InvalidTarget`].
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }

    /// Build [`GradientError::Encoding`].
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build [`GradientError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GradientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

impl From<image::ImageError> for GradientError {
    fn from(err: image::ImageError) -> Self {
        Self::Encoding(err.to_string())
    }
}
