use proptest::prelude::*;

use skarn_chunk::VoxelRegion;
use skarn_mesh::{SNAPSHOT_DIM, collision_boxes, snapshot_min};
use skarn_voxel::Voxel;
use skarn_world::ChunkCoord;

fn empty_snapshot() -> VoxelRegion {
    VoxelRegion::empty(
        snapshot_min(ChunkCoord::new(0, 0, 0)),
        (SNAPSHOT_DIM, SNAPSHOT_DIM, SNAPSHOT_DIM),
    )
}

fn set_local(region: &mut VoxelRegion, x: usize, y: usize, z: usize) {
    let idx = region.index(x + 1, y + 1, z + 1);
    region.voxels[idx] = Voxel(2);
}

#[test]
fn isolated_voxel_gets_one_unit_box() {
    let mut region = empty_snapshot();
    set_local(&mut region, 4, 5, 6);
    let boxes = collision_boxes(&region);
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].min.x, 4.0);
    assert_eq!(boxes[0].min.y, 5.0);
    assert_eq!(boxes[0].min.z, 6.0);
    assert_eq!(boxes[0].max.x, 5.0);
    assert_eq!(boxes[0].max.y, 6.0);
    assert_eq!(boxes[0].max.z, 7.0);
}

#[test]
fn buried_voxel_is_skipped() {
    let mut region = empty_snapshot();
    set_local(&mut region, 10, 10, 10);
    for &(dx, dy, dz) in &[
        (1i32, 0i32, 0i32),
        (-1, 0, 0),
        (0, 1, 0),
        (0, -1, 0),
        (0, 0, 1),
        (0, 0, -1),
    ] {
        set_local(
            &mut region,
            (10 + dx) as usize,
            (10 + dy) as usize,
            (10 + dz) as usize,
        );
    }
    let boxes = collision_boxes(&region);
    // The six shell voxels are exposed; the center is not.
    assert_eq!(boxes.len(), 6);
    assert!(
        !boxes
            .iter()
            .any(|b| b.min.x == 10.0 && b.min.y == 10.0 && b.min.z == 10.0)
    );
}

#[test]
fn solid_snapshot_produces_no_boxes() {
    let mut region = empty_snapshot();
    for v in region.voxels.iter_mut() {
        *v = Voxel(2);
    }
    assert!(collision_boxes(&region).is_empty());
}

#[test]
fn slab_keeps_only_its_shell() {
    let mut region = empty_snapshot();
    for z in 0..3 {
        for y in 0..32 {
            for x in 0..32 {
                set_local(&mut region, x, y, z);
            }
        }
    }
    // Top and bottom layers are fully exposed; the middle layer only at its
    // rim: 2*32*32 + (32*32 - 30*30).
    assert_eq!(collision_boxes(&region).len(), 2172);
}

proptest! {
    // Every box sits on a solid voxel with an open face, and every such
    // voxel gets exactly one box.
    #[test]
    fn boxes_match_exposed_solids(
        cells in prop::collection::hash_set((0usize..32, 0usize..32, 0usize..32), 0..60),
    ) {
        let mut region = empty_snapshot();
        for &(x, y, z) in &cells {
            set_local(&mut region, x, y, z);
        }
        let boxes = collision_boxes(&region);

        let solid = |x: i32, y: i32, z: i32| {
            x >= 0 && y >= 0 && z >= 0
                && cells.contains(&(x as usize, y as usize, z as usize))
        };
        let mut expected = 0usize;
        for &(x, y, z) in &cells {
            let (x, y, z) = (x as i32, y as i32, z as i32);
            let open = [
                (1, 0, 0), (-1, 0, 0), (0, 1, 0), (0, -1, 0), (0, 0, 1), (0, 0, -1),
            ]
            .iter()
            .any(|&(dx, dy, dz)| !solid(x + dx, y + dy, z + dz));
            if open {
                expected += 1;
            }
        }
        prop_assert_eq!(boxes.len(), expected);
        for b in &boxes {
            prop_assert!(solid(b.min.x as i32, b.min.y as i32, b.min.z as i32));
            prop_assert_eq!(b.max.x - b.min.x, 1.0);
        }
    }
}
