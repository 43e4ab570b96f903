//! World sizing, coordinate math, noise sampling, and terrain synthesis.
#![forbid(unsafe_code)]

pub mod coords;
pub mod r#gen;

pub use coords::{
    CHUNK_AREA, CHUNK_SHIFT, CHUNK_SIZE, CHUNK_SIZE_MASK, CHUNK_VOLUME, ChunkCoord, WORLD_HEIGHT,
    WORLD_HEIGHT_CHUNKS, Y_SHIFT, Z_SHIFT, chunk_to_world, column_index, voxel_index,
    world_to_chunk, world_to_local,
};
pub use r#gen::{GenParams, NoiseField, generate_voxels};
