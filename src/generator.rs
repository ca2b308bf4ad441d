//! Prompt or bytes in, glyph grid out.

use crate::ascii::{map_image, GlyphGrid, MapperConfig};
use crate::decode::decode_image;
use crate::error::GlyphError;
use crate::provider::ImageProvider;

/// A mapped image together with the bytes it came from.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image_bytes: Vec<u8>,
    pub grid: GlyphGrid,
}

/// Decode encoded image bytes and map them with `config`.
pub fn render_bytes(bytes: &[u8], config: &MapperConfig) -> Result<GlyphGrid, GlyphError> {
    config.validate()?;
    let pixels = decode_image(bytes)?;
    map_image(&pixels, config)
}

/// Ask `provider` for an image and map it.
///
/// The config is checked before the provider is contacted, so a bad config
/// never costs a request.
pub async fn generate<P: ImageProvider>(
    provider: &P,
    prompt: &str,
    config: &MapperConfig,
) -> Result<Rendered, GlyphError> {
    config.validate()?;
    let image_bytes = provider.generate(prompt).await?;
    let grid = render_bytes(&image_bytes, config)?;
    Ok(Rendered { image_bytes, grid })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::ascii::GlyphPalette;
    use crate::provider::ProviderError;

    struct FixedProvider {
        bytes: Vec<u8>,
        calls: AtomicUsize,
    }

    impl ImageProvider for FixedProvider {
        async fn generate(&self, _prompt: &str) -> Result<Vec<u8>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.bytes.clone())
        }
    }

    struct FailingProvider;

    impl ImageProvider for FailingProvider {
        async fn generate(&self, _prompt: &str) -> Result<Vec<u8>, ProviderError> {
            Err(ProviderError::ApiError("boom".to_string()))
        }
    }

    fn black_white_png() -> Vec<u8> {
        let img = image::RgbaImage::from_raw(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn config() -> MapperConfig {
        MapperConfig {
            target_width: 2,
            palette: GlyphPalette::custom(" #"),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_bytes() {
        let grid = render_bytes(&black_white_png(), &config()).unwrap();
        assert_eq!(grid.to_plain(), " #");
    }

    #[tokio::test]
    async fn test_generate_keeps_original_bytes() {
        let provider = FixedProvider {
            bytes: black_white_png(),
            calls: AtomicUsize::new(0),
        };
        let rendered = generate(&provider, "checkerboard", &config()).await.unwrap();
        assert_eq!(rendered.image_bytes, provider.bytes);
        assert_eq!(rendered.grid.to_plain(), " #");
    }

    #[tokio::test]
    async fn test_generate_bad_config_skips_provider() {
        let provider = FixedProvider {
            bytes: black_white_png(),
            calls: AtomicUsize::new(0),
        };
        let bad = MapperConfig {
            target_width: 0,
            ..config()
        };
        let result = generate(&provider, "anything", &bad).await;
        assert!(matches!(result, Err(GlyphError::InvalidConfig(_))));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_provider_failure() {
        let result = generate(&FailingProvider, "anything", &config()).await;
        assert!(matches!(
            result,
            Err(GlyphError::Provider(ProviderError::ApiError(_)))
        ));
    }

    #[tokio::test]
    async fn test_generate_undecodable_bytes() {
        let provider = FixedProvider {
            bytes: b"<html>not a png</html>".to_vec(),
            calls: AtomicUsize::new(0),
        };
        let result = generate(&provider, "anything", &config()).await;
        assert!(matches!(result, Err(GlyphError::Decode(_))));
    }
}
