use skarn::streaming::{collision_candidates, mesh_candidates, next_load_request};
use skarn_chunk::Chunk;
use skarn_store::ChunkStore;
use skarn_world::{ChunkCoord, WORLD_HEIGHT_CHUNKS};

fn blank_chunk(coord: ChunkCoord) -> Chunk {
    Chunk::from_voxels(coord, Vec::new())
}

/// Makes every chunk with |cx|, |cy| <= half resident, all four levels.
fn resident_square(store: &ChunkStore, half: i32) {
    for cx in -half..=half {
        for cy in -half..=half {
            for cz in 0..WORLD_HEIGHT_CHUNKS {
                store.adopt_chunk(blank_chunk(ChunkCoord::new(cx, cy, cz)));
            }
        }
    }
}

#[test]
fn load_scan_walks_the_square_row_major_inside_the_strict_disc() {
    let store = ChunkStore::new();
    let focus = ChunkCoord::new(0, 0, 0);
    // Radius 4: the whole cx = -4 row misses the disc (16 >= 16), so the
    // first qualifying column in scan order is (-3, -2).
    assert_eq!(
        next_load_request(&store, focus, 4),
        Some(ChunkCoord::new(-3, -2, 0))
    );
    // Radius 1 keeps only the focal column itself.
    assert_eq!(
        next_load_request(&store, focus, 1),
        Some(ChunkCoord::new(0, 0, 0))
    );
}

#[test]
fn load_scan_fills_columns_bottom_up_and_skips_pending() {
    let store = ChunkStore::new();
    let focus = ChunkCoord::new(0, 0, 0);

    store.adopt_chunk(blank_chunk(ChunkCoord::new(-3, -2, 0)));
    assert_eq!(
        next_load_request(&store, focus, 4),
        Some(ChunkCoord::new(-3, -2, 1))
    );

    store.mark_pending(ChunkCoord::new(-3, -2, 1));
    assert_eq!(
        next_load_request(&store, focus, 4),
        Some(ChunkCoord::new(-3, -2, 2))
    );
}

#[test]
fn load_scan_returns_none_once_the_disc_is_covered() {
    let store = ChunkStore::new();
    let focus = ChunkCoord::new(0, 0, 0);

    store.adopt_chunk(blank_chunk(ChunkCoord::new(0, 0, 0)));
    store.adopt_chunk(blank_chunk(ChunkCoord::new(0, 0, 1)));
    store.mark_pending(ChunkCoord::new(0, 0, 2));
    store.adopt_chunk(blank_chunk(ChunkCoord::new(0, 0, 3)));

    assert_eq!(next_load_request(&store, focus, 1), None);
}

#[test]
fn mesh_candidates_need_the_full_planar_ring() {
    let store = ChunkStore::new();
    resident_square(&store, 1);

    // Only the center column has all nine neighbor columns resident.
    let expected: Vec<ChunkCoord> = (0..WORLD_HEIGHT_CHUNKS)
        .map(|cz| ChunkCoord::new(0, 0, cz))
        .collect();
    assert_eq!(mesh_candidates(&store, ChunkCoord::new(0, 0, 0), 2), expected);
}

#[test]
fn mesh_candidates_stop_strictly_at_the_draw_radius() {
    let store = ChunkStore::new();
    resident_square(&store, 3);

    let out = mesh_candidates(&store, ChunkCoord::new(0, 0, 0), 2);
    // Nine columns satisfy dx^2 + dy^2 < 4, each contributing four levels.
    assert_eq!(out.len(), 36);
    assert!(out.contains(&ChunkCoord::new(1, 1, 3)));
    // (2, 0) sits exactly on the radius and has a resident ring, but the
    // comparison is strict.
    assert!(!out.contains(&ChunkCoord::new(2, 0, 0)));
}

#[test]
fn collision_candidates_form_a_ball_clipped_to_the_world() {
    let store = ChunkStore::new();
    resident_square(&store, 3);

    // Observer far above the world: the center z clamps to the top level.
    let high = collision_candidates(&store, ChunkCoord::of_world(16, 16, 200), 2);
    assert_eq!(high.len(), 18);
    assert_eq!(high[0], ChunkCoord::new(-1, -1, 2));
    assert!(high.contains(&ChunkCoord::new(1, 1, 2)));
    assert!(high.contains(&ChunkCoord::new(0, 0, 3)));
    assert!(!high.contains(&ChunkCoord::new(0, 0, 1)));

    // And far below: the center clamps to the bottom level.
    let low = collision_candidates(&store, ChunkCoord::of_world(16, 16, -64), 2);
    assert_eq!(low.len(), 18);
    assert!(low.contains(&ChunkCoord::new(0, 0, 1)));
    assert!(!low.contains(&ChunkCoord::new(0, 0, 2)));
}

#[test]
fn collision_candidates_require_the_ring_too() {
    let store = ChunkStore::new();
    resident_square(&store, 1);

    // Only the center column has its ring resident, and its top level sits
    // exactly on the radius, so three levels qualify.
    let out = collision_candidates(&store, ChunkCoord::new(0, 0, 1), 2);
    let expected: Vec<ChunkCoord> = (0..3).map(|cz| ChunkCoord::new(0, 0, cz)).collect();
    assert_eq!(out, expected);
}
