use thiserror::Error;

// Everything that can go wrong while generating terrain
#[derive(Error, Debug)]
pub enum TerrainError {
    // Rejected before any sampling starts, never clamped
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl TerrainError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TerrainError::InvalidConfiguration(msg.into())
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, TerrainError::InvalidConfiguration(_))
    }
}

pub type Result<T> = std::result::Result<T, TerrainError>;
