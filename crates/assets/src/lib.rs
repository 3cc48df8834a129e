//! Sprite asset loading.
//!
//! One image is decoded off the render thread and handed back through a
//! one-shot channel. There is no progress report and no retry: a failed
//! load simply never completes from the receiver's point of view.

mod sprite;

pub use sprite::SpriteImage;

use std::path::PathBuf;
use tokio::sync::oneshot;
use voxsprite_common::SpriteConfig;

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image {width}x{height} does not match {len} bytes of RGBA8")]
    InvalidImage { width: u32, height: u32, len: usize },
}

/// Where a sprite comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    File(PathBuf),
    Procedural { size: u32 },
}

impl AssetSource {
    /// Produce the image synchronously.
    pub fn resolve(&self) -> Result<SpriteImage, AssetError> {
        match self {
            AssetSource::File(path) => SpriteImage::open(path),
            AssetSource::Procedural { size } => Ok(SpriteImage::radial(*size)),
        }
    }
}

impl From<&SpriteConfig> for AssetSource {
    fn from(config: &SpriteConfig) -> Self {
        match config {
            SpriteConfig::Procedural { size } => AssetSource::Procedural { size: *size },
            SpriteConfig::File { path } => AssetSource::File(path.clone()),
        }
    }
}

/// Decode `source` on a background thread.
///
/// The receiver yields the image exactly once on success. On failure the
/// sender is dropped without a value, so the receiver reports closed.
pub fn load_sprite(source: AssetSource) -> oneshot::Receiver<SpriteImage> {
    let (tx, rx) = oneshot::channel();
    let spawned = std::thread::Builder::new()
        .name("sprite-loader".into())
        .spawn(move || match source.resolve() {
            Ok(image) => {
                tracing::debug!(?source, width = image.width, height = image.height, "sprite decoded");
                // receiver may already be gone at teardown
                let _ = tx.send(image);
            }
            Err(e) => {
                tracing::warn!(?source, "sprite load failed: {e}");
            }
        });
    if let Err(e) = spawned {
        tracing::warn!("failed to spawn sprite loader: {e}");
    }
    rx
}

pub fn crate_info() -> &'static str {
    "voxsprite-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("assets"));
    }

    #[test]
    fn procedural_load_completes() {
        let rx = load_sprite(AssetSource::Procedural { size: 8 });
        let image = rx.blocking_recv().unwrap();
        assert_eq!((image.width, image.height), (8, 8));
    }

    #[test]
    fn file_load_completes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let image = load_sprite(AssetSource::File(path)).blocking_recv().unwrap();
        assert_eq!(image.pixel(0, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn missing_file_never_completes() {
        let rx = load_sprite(AssetSource::File(PathBuf::from("/nonexistent/sprite.png")));
        assert!(rx.blocking_recv().is_err());
    }

    #[test]
    fn source_from_config() {
        let source = AssetSource::from(&SpriteConfig::Procedural { size: 12 });
        assert_eq!(source, AssetSource::Procedural { size: 12 });
        let source = AssetSource::from(&SpriteConfig::File {
            path: PathBuf::from("a.png"),
        });
        assert_eq!(source, AssetSource::File(PathBuf::from("a.png")));
    }
}
