//! Collision hulls: one unit box per exposed solid voxel.

use skarn_chunk::VoxelRegion;
use skarn_geom::{Aabb, Vec3};
use skarn_world::CHUNK_SIZE;

use crate::SNAPSHOT_DIM;

const NEIGHBORS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Unit boxes, in chunk-local coordinates, for every solid voxel with at
/// least one open face. Fully buried voxels produce no box. Takes the same
/// padded snapshot the mesher reads so border voxels see their neighbors.
pub fn collision_boxes(region: &VoxelRegion) -> Vec<Aabb> {
    debug_assert_eq!(region.dim, (SNAPSHOT_DIM, SNAPSHOT_DIM, SNAPSHOT_DIM));
    let size = CHUNK_SIZE as usize;
    let mut boxes = Vec::new();
    for z in 0..size {
        for y in 0..size {
            for x in 0..size {
                if region.get(x + 1, y + 1, z + 1).is_air() {
                    continue;
                }
                let exposed = NEIGHBORS.iter().any(|&(dx, dy, dz)| {
                    region
                        .get(
                            (x as i32 + 1 + dx) as usize,
                            (y as i32 + 1 + dy) as usize,
                            (z as i32 + 1 + dz) as usize,
                        )
                        .is_air()
                });
                if exposed {
                    boxes.push(Aabb::unit_cube(Vec3::new(x as f32, y as f32, z as f32)));
                }
            }
        }
    }
    boxes
}
