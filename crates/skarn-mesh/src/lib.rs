//! CPU greedy mesher: padded voxel snapshots in, packed vertex/index
//! buffers and collision boxes out.
#![forbid(unsafe_code)]

pub mod ao;
mod collide;
mod face;
mod greedy;
mod mesh;

pub use collide::collision_boxes;
pub use face::{Face, TangentBasis, tangent_bases};
pub use greedy::build_chunk_mesh;
pub use mesh::{ChunkMeshCpu, MeshBatch, PackedVertex};

use skarn_world::{CHUNK_SIZE, ChunkCoord};

/// Cells per edge of the mesher's voxel snapshot: the chunk plus a one-cell
/// border read from its neighbors.
pub const SNAPSHOT_DIM: usize = CHUNK_SIZE as usize + 2;

/// Corners per edge of the vertex grid a chunk's quads can touch.
pub const VERTEX_GRID: usize = CHUNK_SIZE as usize + 1;

/// World minimum corner of the snapshot box for `coord`.
#[inline]
pub fn snapshot_min(coord: ChunkCoord) -> (i32, i32, i32) {
    let (x, y, z) = coord.world_origin();
    (x - 1, y - 1, z - 1)
}

/// Heightmap window the occlusion blur reads: the snapshot footprint widened
/// by the blur radius on every side.
#[inline]
pub fn height_window(coord: ChunkCoord, blur_radius: i32) -> ((i32, i32), (usize, usize)) {
    let (x, y, _) = coord.world_origin();
    let pad = blur_radius + 1;
    let side = SNAPSHOT_DIM + 2 * blur_radius as usize;
    ((x - pad, y - pad), (side, side))
}
