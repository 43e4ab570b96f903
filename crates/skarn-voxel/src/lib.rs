//! Voxel ids and the material palette that shades mesh vertices.
#![forbid(unsafe_code)]

pub mod material;
pub mod types;

pub use material::{MaterialTable, VoxelMaterial};
pub use types::Voxel;
