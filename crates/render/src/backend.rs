use std::convert::Infallible;

use glam::{Mat4, Vec3};

use crate::drawable::{Drawable, Primitive};

/// Opaque handle to geometry uploaded to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u32);

/// Opaque handle to a texture uploaded to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Pixel data handed to [`RasterBackend::create_texture`].
#[derive(Debug, Clone, Copy)]
pub enum TextureSource<'a> {
    /// Sprite image, row-major RGBA8.
    Rgba8 {
        width: u32,
        height: u32,
        pixels: &'a [u8],
    },
    /// Single-channel float data, one value per texel.
    Float32 {
        width: u32,
        height: u32,
        values: &'a [f32],
    },
}

impl TextureSource<'_> {
    pub fn size(&self) -> (u32, u32) {
        match *self {
            TextureSource::Rgba8 { width, height, .. } => (width, height),
            TextureSource::Float32 { width, height, .. } => (width, height),
        }
    }
}

/// Per-frame uniform block shared by every draw strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub focus: Vec3,
    pub particle_size: f32,
    pub point_scale: f32,
}

/// One draw of the startup geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub geometry: GeometryHandle,
    pub primitive: Primitive,
    pub sprite: TextureHandle,
    /// Float field texture, for the fullscreen strategy only.
    pub field: Option<TextureHandle>,
}

/// Rasterization backend. The frame loop only talks to the GPU through this
/// trait, so it runs unchanged against a real device or a recorder.
///
/// Resource creation happens once at startup (geometry) or once when the gate
/// opens (sprite). Per frame the loop calls `clear`, `write_uniforms` and
/// exactly one `draw`.
pub trait RasterBackend {
    type Error: std::error::Error + 'static;

    fn create_geometry(&mut self, drawable: &Drawable) -> Result<GeometryHandle, Self::Error>;

    fn create_texture(&mut self, source: TextureSource<'_>) -> Result<TextureHandle, Self::Error>;

    fn clear(&mut self, color: [f64; 4]) -> Result<(), Self::Error>;

    fn write_uniforms(&mut self, uniforms: &FrameUniforms) -> Result<(), Self::Error>;

    fn draw(&mut self, call: &DrawCall) -> Result<(), Self::Error>;
}

/// A command observed by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum RasterCommand {
    CreateGeometry {
        handle: GeometryHandle,
        primitive: Primitive,
    },
    CreateTexture {
        handle: TextureHandle,
        width: u32,
        height: u32,
    },
    Clear([f64; 4]),
    WriteUniforms(FrameUniforms),
    Draw(DrawCall),
}

/// Backend that records every call instead of rasterizing.
///
/// Used for headless simulation and tests.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<RasterCommand>,
    next_geometry: u32,
    next_texture: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RasterCommand] {
        &self.commands
    }

    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RasterCommand::Draw(_)))
            .count()
    }

    pub fn draws(&self) -> impl Iterator<Item = &DrawCall> {
        self.commands.iter().filter_map(|c| match c {
            RasterCommand::Draw(call) => Some(call),
            _ => None,
        })
    }

    pub fn last_uniforms(&self) -> Option<&FrameUniforms> {
        self.commands.iter().rev().find_map(|c| match c {
            RasterCommand::WriteUniforms(u) => Some(u),
            _ => None,
        })
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl RasterBackend for RecordingBackend {
    type Error = Infallible;

    fn create_geometry(&mut self, drawable: &Drawable) -> Result<GeometryHandle, Infallible> {
        let handle = GeometryHandle(self.next_geometry);
        self.next_geometry += 1;
        self.commands.push(RasterCommand::CreateGeometry {
            handle,
            primitive: drawable.primitive(),
        });
        Ok(handle)
    }

    fn create_texture(&mut self, source: TextureSource<'_>) -> Result<TextureHandle, Infallible> {
        let handle = TextureHandle(self.next_texture);
        self.next_texture += 1;
        let (width, height) = source.size();
        self.commands.push(RasterCommand::CreateTexture {
            handle,
            width,
            height,
        });
        Ok(handle)
    }

    fn clear(&mut self, color: [f64; 4]) -> Result<(), Infallible> {
        self.commands.push(RasterCommand::Clear(color));
        Ok(())
    }

    fn write_uniforms(&mut self, uniforms: &FrameUniforms) -> Result<(), Infallible> {
        self.commands.push(RasterCommand::WriteUniforms(*uniforms));
        Ok(())
    }

    fn draw(&mut self, call: &DrawCall) -> Result<(), Infallible> {
        self.commands.push(RasterCommand::Draw(*call));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::FieldImage;

    #[test]
    fn recorder_hands_out_sequential_handles() {
        let mut backend = RecordingBackend::new();
        let drawable = Drawable::FullscreenField(FieldImage {
            width: 1,
            height: 1,
            values: vec![0.5],
        });
        let a = backend.create_geometry(&drawable).unwrap();
        let b = backend.create_geometry(&drawable).unwrap();
        assert_eq!((a, b), (GeometryHandle(0), GeometryHandle(1)));

        let t = backend
            .create_texture(TextureSource::Rgba8 {
                width: 2,
                height: 1,
                pixels: &[0; 8],
            })
            .unwrap();
        assert_eq!(t, TextureHandle(0));
        assert_eq!(
            backend.commands().last(),
            Some(&RasterCommand::CreateTexture {
                handle: t,
                width: 2,
                height: 1
            })
        );
    }

    #[test]
    fn recorder_counts_draws() {
        let mut backend = RecordingBackend::new();
        let call = DrawCall {
            geometry: GeometryHandle(0),
            primitive: Primitive::Fullscreen,
            sprite: TextureHandle(0),
            field: None,
        };
        backend.clear([0.0; 4]).unwrap();
        backend.draw(&call).unwrap();
        backend.draw(&call).unwrap();
        assert_eq!(backend.draw_count(), 2);
        assert_eq!(backend.draws().count(), 2);
        assert!(backend.last_uniforms().is_none());

        backend.clear_commands();
        assert_eq!(backend.draw_count(), 0);
    }
}
