use serde::{Deserialize, Serialize};

/// Chunk edge length in voxels. Must stay a power of two so chunk/local
/// splits stay single shift/mask ops.
pub const CHUNK_SIZE: i32 = 32;
pub const CHUNK_SHIFT: u32 = 5;
pub const CHUNK_SIZE_MASK: i32 = CHUNK_SIZE - 1;

/// Shifts for the flat voxel index `x | y << Y_SHIFT | z << Z_SHIFT`.
pub const Y_SHIFT: u32 = CHUNK_SHIFT;
pub const Z_SHIFT: u32 = 2 * CHUNK_SHIFT;

pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
pub const CHUNK_VOLUME: usize = CHUNK_AREA * CHUNK_SIZE as usize;

/// Vertical world extent. Chunk z coordinates run 0..WORLD_HEIGHT_CHUNKS.
pub const WORLD_HEIGHT_CHUNKS: i32 = 4;
pub const WORLD_HEIGHT: i32 = CHUNK_SIZE * WORLD_HEIGHT_CHUNKS;

/// Floor-divides a world voxel coordinate down to its chunk coordinate.
/// Arithmetic shift keeps negatives correct: -1 >> 5 == -1.
#[inline]
pub const fn world_to_chunk(w: i32) -> i32 {
    w >> CHUNK_SHIFT
}

/// World coordinate of a chunk's minimum corner.
#[inline]
pub const fn chunk_to_world(c: i32) -> i32 {
    c << CHUNK_SHIFT
}

/// Offset of a world coordinate within its chunk, always in 0..CHUNK_SIZE.
#[inline]
pub const fn world_to_local(w: i32) -> usize {
    (w & CHUNK_SIZE_MASK) as usize
}

/// Flat index of a local voxel coordinate into a chunk's voxel array.
#[inline]
pub const fn voxel_index(x: usize, y: usize, z: usize) -> usize {
    x | (y << Y_SHIFT) | (z << Z_SHIFT)
}

/// Flat index of a local column coordinate into a chunk's heightmap.
#[inline]
pub const fn column_index(x: usize, y: usize) -> usize {
    x | (y << Y_SHIFT)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    /// Chunk containing the given world voxel coordinate.
    #[inline]
    pub const fn of_world(wx: i32, wy: i32, wz: i32) -> Self {
        Self {
            cx: world_to_chunk(wx),
            cy: world_to_chunk(wy),
            cz: world_to_chunk(wz),
        }
    }

    /// World voxel coordinate of the chunk's minimum corner.
    #[inline]
    pub const fn world_origin(self) -> (i32, i32, i32) {
        (
            chunk_to_world(self.cx),
            chunk_to_world(self.cy),
            chunk_to_world(self.cz),
        )
    }

    #[inline]
    pub fn with_z(self, cz: i32) -> Self {
        Self { cz, ..self }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dy = i64::from(self.cy - other.cy);
        let dz = i64::from(self.cz - other.cz);
        dx * dx + dy * dy + dz * dz
    }

    /// Horizontal squared distance, ignoring z. Load and mesh radii are
    /// columnar so they use this instead of the full 3D distance.
    #[inline]
    pub fn planar_distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dy = i64::from(self.cy - other.cy);
        dx * dx + dy * dy
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}
