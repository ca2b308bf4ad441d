//! Error types shared by the mapper, decoder and generator.

use crate::provider::ProviderError;

/// Errors that can occur while turning image bytes into glyph text.
#[derive(Debug, thiserror::Error)]
pub enum GlyphError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid image ({width}x{height}): {reason}")]
    InvalidImage {
        width: u32,
        height: u32,
        /// What is wrong with the pixel data
        reason: String,
    },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = GlyphError::InvalidConfig("palette is empty".to_string());
        assert_eq!(err.to_string(), "Invalid config: palette is empty");
    }

    #[test]
    fn test_invalid_image_display() {
        let err = GlyphError::InvalidImage {
            width: 0,
            height: 4,
            reason: "zero width".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid image (0x4): zero width");
    }

    #[test]
    fn test_provider_error_converts() {
        let err: GlyphError = ProviderError::EmptyPrompt.into();
        assert!(matches!(err, GlyphError::Provider(ProviderError::EmptyPrompt)));
    }
}
