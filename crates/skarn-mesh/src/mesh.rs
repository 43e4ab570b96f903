use skarn_geom::{Aabb, Vec3};
use skarn_voxel::Voxel;
use skarn_world::{CHUNK_SIZE, ChunkCoord};

use crate::face::Face;

/// 8-byte mesh vertex. Positions are chunk-local corner coordinates,
/// 0..=32 per axis; color is the palette entry of the quad's material;
/// ao is baked sky brightness, 0 buried to 255 open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackedVertex {
    pub pos: [u8; 3],
    pub pad: u8,
    pub color: [u8; 3],
    pub ao: u8,
}

/// Contiguous index range covering every quad of one material that faces
/// one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshBatch {
    pub material: Voxel,
    pub face: Face,
    pub first_index: u32,
    pub num_tris: u32,
}

/// Finished CPU mesh for one chunk. Vertices are chunk-local; `bbox` is the
/// world-space chunk box for culling.
#[derive(Clone, Debug)]
pub struct ChunkMeshCpu {
    pub coord: ChunkCoord,
    pub bbox: Aabb,
    pub vertices: Vec<PackedVertex>,
    pub indices: Vec<u16>,
    pub batches: Vec<MeshBatch>,
}

impl ChunkMeshCpu {
    pub(crate) fn empty(coord: ChunkCoord) -> Self {
        let (x, y, z) = coord.world_origin();
        let min = Vec3::new(x as f32, y as f32, z as f32);
        ChunkMeshCpu {
            coord,
            bbox: Aabb::new(min, min + Vec3::splat(CHUNK_SIZE as f32)),
            vertices: Vec::new(),
            indices: Vec::new(),
            batches: Vec::new(),
        }
    }

    /// Number of emitted quads.
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
