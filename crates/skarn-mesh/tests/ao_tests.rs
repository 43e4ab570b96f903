use proptest::prelude::*;

use skarn_chunk::HeightGrid;
use skarn_mesh::ao::{occlusion_volume, vertex_ao};
use skarn_mesh::{SNAPSHOT_DIM, VERTEX_GRID, height_window};
use skarn_world::ChunkCoord;

const BLUR: i32 = 3;

fn grid_for(coord: ChunkCoord, fill: i32) -> HeightGrid {
    let (min, dim) = height_window(coord, BLUR);
    let mut grid = HeightGrid::empty(min, dim);
    for h in grid.heights.iter_mut() {
        *h = fill;
    }
    grid
}

fn vertex_at(ao: &[u8], x: usize, y: usize, z: usize) -> u8 {
    ao[x + y * VERTEX_GRID + z * VERTEX_GRID * VERTEX_GRID]
}

#[test]
fn empty_terrain_saturates_every_vertex() {
    let coord = ChunkCoord::new(0, 0, 0);
    let heights = grid_for(coord, -1);
    let ao = vertex_ao(&occlusion_volume(&heights, coord.world_origin(), BLUR));
    assert_eq!(ao.len(), VERTEX_GRID * VERTEX_GRID * VERTEX_GRID);
    assert!(ao.iter().all(|&v| v == 255));
}

#[test]
fn chunk_below_the_surface_is_fully_dark() {
    let coord = ChunkCoord::new(0, 0, 0);
    let heights = grid_for(coord, 100);
    let volume = occlusion_volume(&heights, coord.world_origin(), BLUR);
    assert_eq!(volume.len(), SNAPSHOT_DIM * SNAPSHOT_DIM * SNAPSHOT_DIM);
    assert!(volume.iter().all(|&v| v == 0));
    let ao = vertex_ao(&volume);
    assert!(ao.iter().all(|&v| v == 0));
}

#[test]
fn cliff_shades_vertices_partially() {
    // Tall terrain west of world x = 0, open to the east. The chunk above
    // the open side sees a horizontal occlusion gradient near the cliff.
    let coord = ChunkCoord::new(0, 0, 1);
    let (min, dim) = height_window(coord, BLUR);
    let mut heights = HeightGrid::empty(min, dim);
    for y in 0..dim.1 {
        for x in 0..dim.0 {
            let world_x = min.0 + x as i32;
            heights.heights[x + y * dim.0] = if world_x < 0 { 60 } else { -1 };
        }
    }
    let ao = vertex_ao(&occlusion_volume(&heights, coord.world_origin(), BLUR));

    let far = vertex_at(&ao, 16, 16, 10);
    let near = vertex_at(&ao, 0, 16, 10);
    assert_eq!(far, 255);
    assert!(near > 0 && near < 255, "near-cliff vertex was {near}");
    assert!(near < far);
}

#[test]
fn brightness_steps_at_the_terrain_surface() {
    let coord = ChunkCoord::new(0, 0, 0);
    let heights = grid_for(coord, 10);
    let ao = vertex_ao(&occlusion_volume(&heights, coord.world_origin(), BLUR));
    // Vertices at or below the surface are buried; one level above, the
    // half-open corner already saturates.
    assert_eq!(vertex_at(&ao, 16, 16, 10), 0);
    assert_eq!(vertex_at(&ao, 16, 16, 11), 255);
}

proptest! {
    // Raising any column can only darken vertices, never brighten them.
    #[test]
    fn raising_terrain_never_brightens(
        base in prop::collection::vec(-1i32..=40, (SNAPSHOT_DIM + 6) * (SNAPSHOT_DIM + 6)),
        column in 0usize..(SNAPSHOT_DIM + 6) * (SNAPSHOT_DIM + 6),
        lift in 1i32..=20,
    ) {
        let coord = ChunkCoord::new(0, 0, 0);
        let (min, dim) = height_window(coord, BLUR);
        prop_assert_eq!(dim.0 * dim.1, base.len());

        let mut before = HeightGrid::empty(min, dim);
        before.heights.copy_from_slice(&base);
        let mut after = HeightGrid::empty(min, dim);
        after.heights.copy_from_slice(&base);
        after.heights[column] += lift;

        let ao_before = vertex_ao(&occlusion_volume(&before, coord.world_origin(), BLUR));
        let ao_after = vertex_ao(&occlusion_volume(&after, coord.world_origin(), BLUR));
        for (b, a) in ao_before.iter().zip(ao_after.iter()) {
            prop_assert!(a <= b);
        }
    }
}
