use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::Voxel;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelMaterial {
    pub name: String,
    /// Vertex color, linear 8-bit RGB.
    pub color: [u8; 3],
}

/// Dense palette indexed by voxel id. The generator and any edit source must
/// only write ids this table covers; the mesher looks ids up without a
/// fallback and treats a gap as a logic error.
#[derive(Default, Clone, Debug)]
pub struct MaterialTable {
    materials: Vec<Option<VoxelMaterial>>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
        }
    }

    /// Palette matching the stock terrain generator: ids 0..=14.
    pub fn default_palette() -> Self {
        let entries: &[(&str, [u8; 3])] = &[
            ("air", [0, 0, 0]),
            ("grass", [1, 142, 14]),
            ("stone", [55, 55, 55]),
            ("snow", [255, 255, 255]),
            ("blue", [0, 0, 255]),
            ("red", [255, 0, 0]),
            ("magenta", [255, 0, 255]),
            ("cyan", [0, 255, 255]),
            ("yellow", [255, 255, 0]),
            ("dirt", [121, 85, 58]),
            ("meadow", [88, 128, 34]),
            ("leaves_dark", [34, 85, 28]),
            ("trunk", [94, 66, 40]),
            ("leaves", [52, 118, 36]),
            ("leaves_bright", [84, 150, 48]),
        ];
        Self {
            materials: entries
                .iter()
                .map(|(name, color)| {
                    Some(VoxelMaterial {
                        name: (*name).to_string(),
                        color: *color,
                    })
                })
                .collect(),
        }
    }

    pub fn get(&self, voxel: Voxel) -> Option<&VoxelMaterial> {
        self.materials
            .get(voxel.id() as usize)
            .and_then(|m| m.as_ref())
    }

    /// Vertex color for a voxel id.
    ///
    /// Panics when the id has no palette entry: the generator only emits ids
    /// from its configured palette, so a miss means corrupted data or an
    /// unvetted edit path.
    #[inline]
    pub fn color(&self, voxel: Voxel) -> [u8; 3] {
        match self.get(voxel) {
            Some(m) => m.color,
            None => panic!("no material for voxel id {}", voxel.id()),
        }
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut table = MaterialTable::new();
        for entry in cfg.materials {
            let idx = entry.id as usize;
            if table.materials.len() <= idx {
                table.materials.resize(idx + 1, None);
            }
            if table.materials[idx].is_some() {
                return Err(format!("duplicate material id {}", entry.id).into());
            }
            table.materials[idx] = Some(VoxelMaterial {
                name: entry.name,
                color: entry.color,
            });
        }
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
struct MaterialsConfig {
    materials: Vec<MaterialEntry>,
}

#[derive(Deserialize)]
struct MaterialEntry {
    id: u8,
    name: String,
    color: [u8; 3],
}
