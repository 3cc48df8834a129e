use std::path::Path;

use crate::AssetError;

/// Decoded RGBA8 image, row-major, `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl SpriteImage {
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(AssetError::InvalidImage {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an image file of any enabled format.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::decode(&bytes)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// White disc whose alpha falls off linearly from the center to the edge.
    pub fn radial(size: u32) -> Self {
        let size = size.max(1);
        let half = size as f32 / 2.0;
        let mut pixels = Vec::with_capacity(size as usize * size as usize * 4);
        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let falloff = (1.0 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
                let alpha = (falloff * 255.0).round() as u8;
                pixels.extend_from_slice(&[255, 255, 255, alpha]);
            }
        }
        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[i..i + 4].try_into().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radial_is_opaque_center_transparent_corner() {
        let sprite = SpriteImage::radial(16);
        assert_eq!(sprite.pixels.len(), 16 * 16 * 4);
        assert!(sprite.pixel(8, 8).unwrap()[3] > 200);
        assert_eq!(sprite.pixel(0, 0).unwrap()[3], 0);
        assert_eq!(sprite.pixel(16, 0), None);
    }

    #[test]
    fn from_rgba8_checks_length() {
        assert!(SpriteImage::from_rgba8(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            SpriteImage::from_rgba8(2, 2, vec![0; 15]),
            Err(AssetError::InvalidImage { len: 15, .. })
        ));
    }

    #[test]
    fn decode_png_bytes() {
        let mut bytes = Vec::new();
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 40]))
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let sprite = SpriteImage::decode(&bytes).unwrap();
        assert_eq!((sprite.width, sprite.height), (3, 2));
        assert_eq!(sprite.pixel(2, 1), Some([10, 20, 30, 40]));
    }

    #[test]
    fn decode_garbage_fails() {
        assert!(matches!(
            SpriteImage::decode(b"not an image"),
            Err(AssetError::Decode(_))
        ));
    }
}
