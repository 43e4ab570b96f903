use std::sync::Mutex;

use hashbrown::{HashMap, HashSet};
use skarn_chunk::{Chunk, HeightGrid, VoxelRegion};
use skarn_voxel::Voxel;
use skarn_world::{
    CHUNK_SIZE, ChunkCoord, WORLD_HEIGHT_CHUNKS, chunk_to_world, voxel_index, world_to_chunk,
    world_to_local,
};

/// Owns every resident chunk plus the set of coordinates requested but not
/// yet delivered. One mutex guards all of it; critical sections are index
/// lookups, row copies, or a single-chunk heightmap rescan, and never call
/// out while held.
pub struct ChunkStore {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    chunks: Vec<Chunk>,
    index: HashMap<ChunkCoord, usize>,
    pending: HashSet<ChunkCoord>,
}

impl Default for ChunkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkStore {
    pub fn new() -> Self {
        ChunkStore {
            inner: Mutex::new(StoreInner::default()),
        }
    }

    pub fn has_chunk(&self, coord: ChunkCoord) -> bool {
        self.inner.lock().unwrap().index.contains_key(&coord)
    }

    pub fn is_pending(&self, coord: ChunkCoord) -> bool {
        self.inner.lock().unwrap().pending.contains(&coord)
    }

    /// Records that generation has been requested for `coord`.
    pub fn mark_pending(&self, coord: ChunkCoord) {
        self.inner.lock().unwrap().pending.insert(coord);
    }

    pub fn resident_count(&self) -> usize {
        self.inner.lock().unwrap().chunks.len()
    }

    pub fn pending_count(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }

    /// Inserts a freshly generated chunk and clears its pending mark.
    ///
    /// A coordinate is adopted at most once for the store's lifetime; the
    /// request path guarantees that, so a duplicate here is a caller bug.
    pub fn adopt_chunk(&self, chunk: Chunk) {
        let mut chunk = chunk;
        chunk.rescan_heights();
        let coord = chunk.coord;
        let mut inner = self.inner.lock().unwrap();
        if inner.index.contains_key(&coord) {
            panic!("chunk {coord:?} adopted twice");
        }
        let slot = inner.chunks.len();
        inner.chunks.push(chunk);
        inner.index.insert(coord, slot);
        inner.pending.remove(&coord);
    }

    /// Voxel at a world coordinate; air wherever no chunk is resident.
    pub fn get_voxel(&self, wx: i32, wy: i32, wz: i32) -> Voxel {
        let inner = self.inner.lock().unwrap();
        match inner.index.get(&ChunkCoord::of_world(wx, wy, wz)) {
            Some(&slot) => inner.chunks[slot].get_local(
                world_to_local(wx),
                world_to_local(wy),
                world_to_local(wz),
            ),
            None => Voxel::AIR,
        }
    }

    /// Writes a voxel. Returns false without effect when the chunk is not
    /// resident; on success the caller is responsible for dirty propagation.
    pub fn set_voxel(&self, wx: i32, wy: i32, wz: i32, voxel: Voxel) -> bool {
        let mut inner = self.inner.lock().unwrap();
        match inner.index.get(&ChunkCoord::of_world(wx, wy, wz)).copied() {
            Some(slot) => {
                inner.chunks[slot].set_local(
                    world_to_local(wx),
                    world_to_local(wy),
                    world_to_local(wz),
                    voxel,
                );
                true
            }
            None => false,
        }
    }

    /// Rescans one chunk's heightmap.
    ///
    /// Panics when the chunk is not resident: this runs on the edit path,
    /// after a write already confirmed residency, so a miss is a caller bug.
    pub fn recompute_heights(&self, coord: ChunkCoord) {
        let mut inner = self.inner.lock().unwrap();
        match inner.index.get(&coord).copied() {
            Some(slot) => inner.chunks[slot].rescan_heights(),
            None => panic!("heightmap rescan for non-resident chunk {coord:?}"),
        }
    }

    /// Runs `f` against a resident chunk.
    pub fn with_chunk<R>(&self, coord: ChunkCoord, f: impl FnOnce(&Chunk) -> R) -> Option<R> {
        let inner = self.inner.lock().unwrap();
        inner.index.get(&coord).map(|&slot| f(&inner.chunks[slot]))
    }

    /// True when the chunk and all 8 of its planar neighbors are resident.
    pub fn neighbors_resident(&self, coord: ChunkCoord) -> bool {
        let inner = self.inner.lock().unwrap();
        for i in 0..9 {
            let probe = coord.offset(i % 3 - 1, i / 3 - 1, 0);
            if !inner.index.contains_key(&probe) {
                return false;
            }
        }
        true
    }

    /// Copies an inclusive world-aligned box of voxels into a dense buffer.
    /// Space not covered by a resident chunk reads as air.
    pub fn voxel_region(&self, min: (i32, i32, i32), max: (i32, i32, i32)) -> VoxelRegion {
        debug_assert!(min.0 <= max.0 && min.1 <= max.1 && min.2 <= max.2);
        let dim = (
            (max.0 + 1 - min.0) as usize,
            (max.1 + 1 - min.1) as usize,
            (max.2 + 1 - min.2) as usize,
        );
        let mut region = VoxelRegion::empty(min, dim);

        let inner = self.inner.lock().unwrap();
        for ccz in world_to_chunk(min.2)..=world_to_chunk(max.2) {
            for ccy in world_to_chunk(min.1)..=world_to_chunk(max.1) {
                for ccx in world_to_chunk(min.0)..=world_to_chunk(max.0) {
                    let Some(&slot) = inner.index.get(&ChunkCoord::new(ccx, ccy, ccz)) else {
                        continue;
                    };
                    let chunk = &inner.chunks[slot];
                    let (ox, oy, oz) = chunk.coord.world_origin();
                    let lx0 = (min.0 - ox).max(0);
                    let lx1 = (max.0 - ox).min(CHUNK_SIZE - 1);
                    let ly0 = (min.1 - oy).max(0);
                    let ly1 = (max.1 - oy).min(CHUNK_SIZE - 1);
                    let lz0 = (min.2 - oz).max(0);
                    let lz1 = (max.2 - oz).min(CHUNK_SIZE - 1);
                    let span = (lx1 - lx0) as usize;
                    for lz in lz0..=lz1 {
                        for ly in ly0..=ly1 {
                            // Rows are x-contiguous in both layouts.
                            let src = voxel_index(lx0 as usize, ly as usize, lz as usize);
                            let dst = region.index(
                                (ox + lx0 - min.0) as usize,
                                (oy + ly - min.1) as usize,
                                (oz + lz - min.2) as usize,
                            );
                            region.voxels[dst..=dst + span]
                                .copy_from_slice(&chunk.voxels[src..=src + span]);
                        }
                    }
                }
            }
        }
        region
    }

    /// World z of the topmost solid voxel in a column, scanning resident
    /// chunks top-down. -1 when nothing solid is loaded there.
    pub fn height_at(&self, wx: i32, wy: i32) -> i32 {
        let inner = self.inner.lock().unwrap();
        let (ccx, ccy) = (world_to_chunk(wx), world_to_chunk(wy));
        let (lx, ly) = (world_to_local(wx), world_to_local(wy));
        for ccz in (0..WORLD_HEIGHT_CHUNKS).rev() {
            if let Some(&slot) = inner.index.get(&ChunkCoord::new(ccx, ccy, ccz)) {
                let h = inner.chunks[slot].height_local(lx, ly);
                if h >= 0 {
                    return chunk_to_world(ccz) + i32::from(h);
                }
            }
        }
        -1
    }

    /// Copies an inclusive world-aligned rectangle of column heights.
    /// Columns with nothing solid loaded read as -1.
    pub fn height_region(&self, min: (i32, i32), max: (i32, i32)) -> HeightGrid {
        debug_assert!(min.0 <= max.0 && min.1 <= max.1);
        let dim = ((max.0 + 1 - min.0) as usize, (max.1 + 1 - min.1) as usize);
        let mut grid = HeightGrid::empty(min, dim);

        let inner = self.inner.lock().unwrap();
        for ccy in world_to_chunk(min.1)..=world_to_chunk(max.1) {
            for ccx in world_to_chunk(min.0)..=world_to_chunk(max.0) {
                let ox = chunk_to_world(ccx);
                let oy = chunk_to_world(ccy);
                let lx0 = (min.0 - ox).max(0);
                let lx1 = (max.0 - ox).min(CHUNK_SIZE - 1);
                let ly0 = (min.1 - oy).max(0);
                let ly1 = (max.1 - oy).min(CHUNK_SIZE - 1);
                // Top-down: the first chunk with a solid column wins.
                for ccz in (0..WORLD_HEIGHT_CHUNKS).rev() {
                    let Some(&slot) = inner.index.get(&ChunkCoord::new(ccx, ccy, ccz)) else {
                        continue;
                    };
                    let chunk = &inner.chunks[slot];
                    for ly in ly0..=ly1 {
                        for lx in lx0..=lx1 {
                            let dst =
                                grid.index((ox + lx - min.0) as usize, (oy + ly - min.1) as usize);
                            if grid.heights[dst] < 0 {
                                let h = chunk.height_local(lx as usize, ly as usize);
                                if h >= 0 {
                                    grid.heights[dst] = chunk_to_world(ccz) + i32::from(h);
                                }
                            }
                        }
                    }
                }
            }
        }
        grid
    }
}
