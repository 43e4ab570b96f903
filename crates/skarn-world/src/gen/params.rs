use serde::Deserialize;

/// Terrain synthesis parameters. Every field has a TOML default so a config
/// file only needs to name what it overrides.
#[derive(Clone, Debug, Deserialize)]
pub struct GenParams {
    /// Use the ridged-multifractal sampler instead of the plain fractal sum.
    #[serde(default)]
    pub ridged: bool,
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_octaves")]
    pub octaves: i32,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,
    #[serde(default = "default_persistence")]
    pub persistence: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Stamp trees on surface caps.
    #[serde(default = "default_trees")]
    pub trees: bool,
    #[serde(default = "default_tree_scale")]
    pub tree_scale: f32,
    #[serde(default = "default_tree_octaves")]
    pub tree_octaves: i32,
    /// Fraction of surface caps that root a tree, 0..1.
    #[serde(default = "default_tree_density")]
    pub tree_density: f32,
    /// Voxel id written onto the first empty cell above a solid column top.
    #[serde(default = "default_cap_voxel")]
    pub cap_voxel: u8,
    /// Voxel id of the near-surface terrain band.
    #[serde(default = "default_topsoil_voxel")]
    pub topsoil_voxel: u8,
    #[serde(default)]
    pub snow_on_trees: bool,
}

fn default_seed() -> i32 {
    123
}
fn default_octaves() -> i32 {
    2
}
fn default_frequency() -> f32 {
    1.0
}
fn default_lacunarity() -> f32 {
    2.0
}
fn default_persistence() -> f32 {
    0.5
}
fn default_scale() -> f32 {
    0.01
}
fn default_trees() -> bool {
    true
}
fn default_tree_scale() -> f32 {
    0.1
}
fn default_tree_octaves() -> i32 {
    2
}
fn default_tree_density() -> f32 {
    0.01
}
fn default_cap_voxel() -> u8 {
    1
}
fn default_topsoil_voxel() -> u8 {
    10
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            ridged: false,
            seed: default_seed(),
            octaves: default_octaves(),
            frequency: default_frequency(),
            lacunarity: default_lacunarity(),
            persistence: default_persistence(),
            scale: default_scale(),
            trees: default_trees(),
            tree_scale: default_tree_scale(),
            tree_octaves: default_tree_octaves(),
            tree_density: default_tree_density(),
            cap_voxel: default_cap_voxel(),
            topsoil_voxel: default_topsoil_voxel(),
            snow_on_trees: false,
        }
    }
}
