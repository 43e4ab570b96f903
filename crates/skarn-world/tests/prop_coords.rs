use proptest::prelude::*;

use skarn_world::{
    CHUNK_SIZE, ChunkCoord, chunk_to_world, column_index, voxel_index, world_to_chunk,
    world_to_local,
};

proptest! {
    #[test]
    fn world_coordinate_round_trips(w in -1_000_000i32..1_000_000) {
        let c = world_to_chunk(w);
        let l = world_to_local(w);
        prop_assert!(l < CHUNK_SIZE as usize);
        prop_assert_eq!(chunk_to_world(c) + l as i32, w);
    }

    #[test]
    fn voxel_index_bits_decode(x in 0usize..32, y in 0usize..32, z in 0usize..32) {
        let i = voxel_index(x, y, z);
        prop_assert_eq!(i & 31, x);
        prop_assert_eq!((i >> 5) & 31, y);
        prop_assert_eq!(i >> 10, z);
        prop_assert_eq!(column_index(x, y), i & 0x3ff);
    }

    #[test]
    fn chunk_origin_brackets_world_coord(
        wx in -100_000i32..100_000,
        wy in -100_000i32..100_000,
        wz in -100_000i32..100_000,
    ) {
        let c = ChunkCoord::of_world(wx, wy, wz);
        let (ox, oy, oz) = c.world_origin();
        prop_assert!(ox <= wx && wx < ox + CHUNK_SIZE);
        prop_assert!(oy <= wy && wy < oy + CHUNK_SIZE);
        prop_assert!(oz <= wz && wz < oz + CHUNK_SIZE);
    }

    #[test]
    fn planar_distance_ignores_z(
        a in (-1000i32..1000, -1000i32..1000, -1000i32..1000),
        b in (-1000i32..1000, -1000i32..1000, -1000i32..1000),
    ) {
        let a = ChunkCoord::from(a);
        let b = ChunkCoord::from(b);
        prop_assert_eq!(a.planar_distance_sq(b), b.planar_distance_sq(a));
        prop_assert_eq!(a.planar_distance_sq(b), a.with_z(0).planar_distance_sq(b.with_z(7)));
        prop_assert!(a.distance_sq(b) >= a.planar_distance_sq(b));
    }
}

#[test]
fn negative_world_coordinates_floor() {
    assert_eq!(world_to_chunk(-1), -1);
    assert_eq!(world_to_local(-1), 31);
    assert_eq!(world_to_chunk(-32), -1);
    assert_eq!(world_to_local(-32), 0);
    assert_eq!(world_to_chunk(-33), -2);
    assert_eq!(world_to_chunk(31), 0);
    assert_eq!(world_to_chunk(32), 1);
}
