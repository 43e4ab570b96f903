//! Engine configuration loaded from TOML.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use skarn_voxel::MaterialTable;
use skarn_world::GenParams;

/// Streaming and meshing tunables. Every field has a default so a config
/// file only needs to name what it overrides.
#[derive(Clone, Debug, Deserialize)]
pub struct EngineConfig {
    /// Planar radius, in chunks, inside which resident chunks get meshes.
    #[serde(default = "default_draw_radius")]
    pub draw_radius: i32,
    /// Extra planar chunks kept loaded beyond the draw radius so every mesh
    /// candidate finds its neighborhood resident.
    #[serde(default = "default_expansion")]
    pub expansion: i32,
    /// Spherical radius, in chunks, inside which collision boxes are built.
    #[serde(default = "default_collision_radius")]
    pub collision_radius: i32,
    /// Half-width of the terrain blur window feeding ambient occlusion.
    #[serde(default = "default_blur_radius")]
    pub blur_radius: i32,
    /// Mesh pool size. Defaults to the machine's parallelism minus two.
    #[serde(default = "default_mesh_workers")]
    pub mesh_workers: usize,
    /// Palette TOML path. The built-in palette when absent.
    #[serde(default)]
    pub materials: Option<PathBuf>,
    #[serde(default)]
    pub r#gen: GenParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            draw_radius: default_draw_radius(),
            expansion: default_expansion(),
            collision_radius: default_collision_radius(),
            blur_radius: default_blur_radius(),
            mesh_workers: default_mesh_workers(),
            materials: None,
            r#gen: GenParams::default(),
        }
    }
}

impl EngineConfig {
    /// Planar radius inside which chunks are requested from the generator.
    pub fn load_radius(&self) -> i32 {
        self.draw_radius + self.expansion
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let config: EngineConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| format!("read config {}: {e}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Loads the palette named by `materials`, or the built-in one.
    pub fn material_table(&self) -> Result<MaterialTable, Box<dyn Error>> {
        match &self.materials {
            Some(path) => MaterialTable::from_path(path),
            None => Ok(MaterialTable::default_palette()),
        }
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.draw_radius < 1 {
            return Err(format!("draw_radius must be at least 1, got {}", self.draw_radius).into());
        }
        if self.expansion < 0 {
            return Err(format!("expansion must be non-negative, got {}", self.expansion).into());
        }
        if self.collision_radius < 0 {
            return Err(format!(
                "collision_radius must be non-negative, got {}",
                self.collision_radius
            )
            .into());
        }
        if self.blur_radius < 0 {
            return Err(format!(
                "blur_radius must be non-negative, got {}",
                self.blur_radius
            )
            .into());
        }
        Ok(())
    }
}

fn default_draw_radius() -> i32 {
    2
}
fn default_expansion() -> i32 {
    2
}
fn default_collision_radius() -> i32 {
    2
}
fn default_blur_radius() -> i32 {
    3
}
fn default_mesh_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .saturating_sub(2)
        .max(1)
}
