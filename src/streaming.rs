//! Per-tick streaming scans around the observer's chunk.
//!
//! All three scans walk the enclosing coordinate square row-major (x outer,
//! y inner) and compare squared distances strictly, so a radius of `r` keeps
//! chunks whose center-to-center distance is less than `r` chunks.

use skarn_store::ChunkStore;
use skarn_world::{ChunkCoord, WORLD_HEIGHT_CHUNKS};

/// First chunk the loader should request around `focus`, or `None` when
/// everything inside the load disc is resident or already pending.
///
/// Columns are visited in scan order and walked bottom-up, so terrain fills
/// in from the ground and one call never requests more than one chunk.
pub fn next_load_request(
    store: &ChunkStore,
    focus: ChunkCoord,
    radius: i32,
) -> Option<ChunkCoord> {
    let r_sq = i64::from(radius) * i64::from(radius);
    for cx in (focus.cx - radius)..=(focus.cx + radius) {
        for cy in (focus.cy - radius)..=(focus.cy + radius) {
            let column = ChunkCoord::new(cx, cy, 0);
            if column.planar_distance_sq(focus) >= r_sq {
                continue;
            }
            for cz in 0..WORLD_HEIGHT_CHUNKS {
                let coord = column.with_z(cz);
                if !store.has_chunk(coord) && !store.is_pending(coord) {
                    return Some(coord);
                }
            }
        }
    }
    None
}

/// Chunks inside the draw disc whose full planar neighborhood is resident,
/// in scan order. Only these can be meshed without seams; the caller decides
/// which of them actually need a build.
pub fn mesh_candidates(store: &ChunkStore, focus: ChunkCoord, radius: i32) -> Vec<ChunkCoord> {
    let r_sq = i64::from(radius) * i64::from(radius);
    let mut out = Vec::new();
    for cx in (focus.cx - radius)..=(focus.cx + radius) {
        for cy in (focus.cy - radius)..=(focus.cy + radius) {
            let column = ChunkCoord::new(cx, cy, 0);
            if column.planar_distance_sq(focus) >= r_sq {
                continue;
            }
            for cz in 0..WORLD_HEIGHT_CHUNKS {
                let coord = column.with_z(cz);
                if store.neighbors_resident(coord) {
                    out.push(coord);
                }
            }
        }
    }
    out
}

/// Chunks inside the collision sphere whose planar neighborhood is resident.
/// Unlike the planar discs this one is a true 3D ball, centered on the
/// observer's chunk with its z clipped into the world column.
pub fn collision_candidates(store: &ChunkStore, focus: ChunkCoord, radius: i32) -> Vec<ChunkCoord> {
    let r_sq = i64::from(radius) * i64::from(radius);
    let center = focus.with_z(focus.cz.clamp(0, WORLD_HEIGHT_CHUNKS - 1));
    let mut out = Vec::new();
    for cx in (center.cx - radius)..=(center.cx + radius) {
        for cy in (center.cy - radius)..=(center.cy + radius) {
            for cz in 0..WORLD_HEIGHT_CHUNKS {
                let coord = ChunkCoord::new(cx, cy, cz);
                if coord.distance_sq(center) >= r_sq {
                    continue;
                }
                if store.neighbors_resident(coord) {
                    out.push(coord);
                }
            }
        }
    }
    out
}
