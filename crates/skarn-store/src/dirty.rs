use skarn_world::{CHUNK_SIZE, ChunkCoord, WORLD_HEIGHT_CHUNKS, world_to_local};

use crate::{ArtifactMap, ChunkStore};

/// Reconciles derived state after an edit to one world voxel: rescans the
/// chunk's heightmap, then flags neighbor artifacts whose AO sampling window
/// can reach the edited column. Call only after a successful write; the
/// rescan is fatal on a non-resident chunk.
///
/// A planar neighbor is touched only when the edit sits within `blur_radius`
/// of that boundary; the edited chunk itself is always touched. Meshes go
/// stale for the whole column up through one level above the edit (sky
/// visibility looks down from there); collision only for the adjacent
/// levels.
pub fn mark_voxel_dirty<M, C>(
    store: &ChunkStore,
    mesh: &ArtifactMap<M>,
    collision: &ArtifactMap<C>,
    wx: i32,
    wy: i32,
    wz: i32,
    blur_radius: i32,
) {
    let coord = ChunkCoord::of_world(wx, wy, wz);
    store.recompute_heights(coord);

    let lx = world_to_local(wx) as i32;
    let ly = world_to_local(wy) as i32;

    let mut marked = [false; 9];
    marked[4] = true;
    marked[3] = lx - blur_radius < 0;
    marked[5] = lx + blur_radius >= CHUNK_SIZE;
    marked[1] = ly - blur_radius < 0;
    marked[7] = ly + blur_radius >= CHUNK_SIZE;
    marked[0] = marked[3] && marked[1];
    marked[2] = marked[5] && marked[1];
    marked[6] = marked[3] && marked[7];
    marked[8] = marked[5] && marked[7];

    mark_neighbors(&marked, coord, mesh, collision);
}

/// Coarse variant for edits whose footprint within the chunk is unknown:
/// rescans the heightmap and flags the full Moore neighborhood. The chunk
/// must be resident.
pub fn mark_chunk_dirty<M, C>(
    store: &ChunkStore,
    mesh: &ArtifactMap<M>,
    collision: &ArtifactMap<C>,
    coord: ChunkCoord,
) {
    store.recompute_heights(coord);
    mark_neighbors(&[true; 9], coord, mesh, collision);
}

fn mark_neighbors<M, C>(
    marked: &[bool; 9],
    coord: ChunkCoord,
    mesh: &ArtifactMap<M>,
    collision: &ArtifactMap<C>,
) {
    let mesh_top = (coord.cz + 1).min(WORLD_HEIGHT_CHUNKS - 1);
    let collision_lo = (coord.cz - 1).max(0);
    let collision_hi = (coord.cz + 1).min(WORLD_HEIGHT_CHUNKS - 1);
    for (i, &hit) in marked.iter().enumerate() {
        if !hit {
            continue;
        }
        let ncx = coord.cx + (i as i32 % 3) - 1;
        let ncy = coord.cy + (i as i32 / 3) - 1;
        for cz in 0..=mesh_top {
            mesh.mark_stale(ChunkCoord::new(ncx, ncy, cz));
        }
        for cz in collision_lo..=collision_hi {
            collision.mark_stale(ChunkCoord::new(ncx, ncy, cz));
        }
    }
}
