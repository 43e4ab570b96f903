//! Chunk storage, heightmap upkeep, and generation glue.
#![forbid(unsafe_code)]

use skarn_voxel::Voxel;
use skarn_world::{
    CHUNK_AREA, CHUNK_SIZE, CHUNK_VOLUME, ChunkCoord, GenParams, NoiseField, column_index,
    generate_voxels, voxel_index,
};

/// One 32x32x32 block of the world, plus a per-column heightmap.
///
/// Plain data: edits go through the owning store, which also keeps the
/// heightmap and neighbor rebuild flags in step.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub voxels: Vec<Voxel>,
    /// Topmost solid local z per column, or -1 when the column is empty.
    pub heights: Vec<i8>,
}

impl Chunk {
    /// Wraps a voxel buffer, padding or truncating to the chunk volume, and
    /// scans the heightmap from it.
    pub fn from_voxels(coord: ChunkCoord, voxels: Vec<Voxel>) -> Self {
        let mut voxels = voxels;
        if voxels.len() != CHUNK_VOLUME {
            voxels.resize(CHUNK_VOLUME, Voxel::AIR);
        }
        let mut chunk = Chunk {
            coord,
            voxels,
            heights: vec![-1; CHUNK_AREA],
        };
        chunk.rescan_heights();
        chunk
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Voxel {
        self.voxels[voxel_index(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, voxel: Voxel) {
        self.voxels[voxel_index(x, y, z)] = voxel;
    }

    /// Topmost solid local z of a column, or -1.
    #[inline]
    pub fn height_local(&self, x: usize, y: usize) -> i8 {
        self.heights[column_index(x, y)]
    }

    /// Recomputes every column of the heightmap from the voxel buffer.
    pub fn rescan_heights(&mut self) {
        for y in 0..CHUNK_SIZE as usize {
            for x in 0..CHUNK_SIZE as usize {
                let mut height: i8 = -1;
                for z in (0..CHUNK_SIZE as usize).rev() {
                    if self.voxels[voxel_index(x, y, z)].is_solid() {
                        height = z as i8;
                        break;
                    }
                }
                self.heights[column_index(x, y)] = height;
            }
        }
    }

    #[inline]
    pub fn has_solid(&self) -> bool {
        self.voxels.iter().any(|v| v.is_solid())
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        !self.has_solid()
    }
}

/// Synthesizes a chunk at `coord` and wraps it with a fresh heightmap.
pub fn generate_chunk(params: &GenParams, noise: &NoiseField, coord: ChunkCoord) -> Chunk {
    Chunk::from_voxels(coord, generate_voxels(params, noise, coord))
}

/// A box of voxels copied out of the store, in world alignment. Cells that
/// fall outside any resident chunk read as air.
#[derive(Clone, Debug)]
pub struct VoxelRegion {
    /// World coordinate of the minimum corner.
    pub min: (i32, i32, i32),
    pub dim: (usize, usize, usize),
    pub voxels: Vec<Voxel>,
}

impl VoxelRegion {
    pub fn empty(min: (i32, i32, i32), dim: (usize, usize, usize)) -> Self {
        VoxelRegion {
            min,
            dim,
            voxels: vec![Voxel::AIR; dim.0 * dim.1 * dim.2],
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.dim.0 + z * self.dim.0 * self.dim.1
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Voxel {
        self.voxels[self.index(x, y, z)]
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.voxels.iter().all(|v| v.is_air())
    }
}

/// A rectangle of column heights copied out of the store, in world
/// alignment. Values are world z of the topmost solid voxel, or -1 for
/// columns with none loaded.
#[derive(Clone, Debug)]
pub struct HeightGrid {
    /// World xy coordinate of the minimum corner.
    pub min: (i32, i32),
    pub dim: (usize, usize),
    pub heights: Vec<i32>,
}

impl HeightGrid {
    pub fn empty(min: (i32, i32), dim: (usize, usize)) -> Self {
        HeightGrid {
            min,
            dim,
            heights: vec![-1; dim.0 * dim.1],
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.dim.0
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> i32 {
        self.heights[self.index(x, y)]
    }
}
