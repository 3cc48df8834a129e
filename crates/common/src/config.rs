use crate::types::{DrawableKind, GridDims, IndexWidth, SceneKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading or validating a viewer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Field provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub size: usize,
    pub depth: usize,
    pub scene: SceneKind,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            size: 128,
            depth: 32,
            scene: SceneKind::Emblem,
        }
    }
}

impl FieldConfig {
    pub fn dims(&self) -> GridDims {
        GridDims::volume(self.size, self.depth)
    }
}

/// Mesh builder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Divisor applied to a cell value to get the quad's z offset.
    pub value_scale: f32,
    pub index_width: IndexWidth,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            value_scale: 4.0,
            index_width: IndexWidth::U16,
        }
    }
}

/// Frame loop and projection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub drawable: DrawableKind,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Half extent of a quad particle in view space.
    pub particle_size: f32,
    /// Point sprite size numerator; the on-screen size is `point_scale / clip.w` pixels.
    pub point_scale: f32,
    pub clear_color: [f64; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            drawable: DrawableKind::Quads,
            fov_degrees: 45.0,
            near: 0.01,
            far: 100.0,
            particle_size: 0.004,
            point_scale: 6.0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Orbit camera settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Look-at target; the orbit center (origin) when absent.
    pub focus: Option<[f32; 3]>,
}

/// Where the particle sprite comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpriteConfig {
    /// Radial falloff generated in memory.
    Procedural { size: u32 },
    /// Image file decoded on a background thread.
    File { path: PathBuf },
}

impl Default for SpriteConfig {
    fn default() -> Self {
        SpriteConfig::Procedural { size: 32 }
    }
}

/// Complete viewer configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub field: FieldConfig,
    pub mesh: MeshConfig,
    pub render: RenderConfig,
    pub camera: CameraConfig,
    pub sprite: SpriteConfig,
}

impl ViewerConfig {
    /// Load and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading viewer config");
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field.size == 0 || self.field.depth == 0 {
            return Err(ConfigError::Invalid(
                "field.size and field.depth must be non-zero".into(),
            ));
        }
        if !(self.mesh.value_scale.is_finite() && self.mesh.value_scale > 0.0) {
            return Err(ConfigError::Invalid(
                "mesh.value_scale must be positive".into(),
            ));
        }
        if !(self.render.fov_degrees > 0.0 && self.render.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(
                "render.fov_degrees must be in (0, 180)".into(),
            ));
        }
        if !(self.render.near > 0.0 && self.render.far > self.render.near) {
            return Err(ConfigError::Invalid(
                "render.near must be positive and below render.far".into(),
            ));
        }
        if let SpriteConfig::Procedural { size: 0 } = self.sprite {
            return Err(ConfigError::Invalid("sprite.size must be non-zero".into()));
        }
        Ok(())
    }

    /// Look-at target; origin when unset.
    pub fn focus(&self) -> glam::Vec3 {
        self.camera
            .focus
            .map(glam::Vec3::from_array)
            .unwrap_or(glam::Vec3::ZERO)
    }
}
