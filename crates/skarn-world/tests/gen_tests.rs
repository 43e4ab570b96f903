use skarn_voxel::Voxel;
use skarn_world::{CHUNK_SIZE, ChunkCoord, GenParams, NoiseField, generate_voxels, voxel_index};

fn generate(params: &GenParams, coord: ChunkCoord) -> Vec<Voxel> {
    let noise = NoiseField::new(params.seed);
    generate_voxels(params, &noise, coord)
}

#[test]
fn generation_is_deterministic() {
    let params = GenParams::default();
    for coord in [
        ChunkCoord::new(0, 0, 0),
        ChunkCoord::new(5, -3, 1),
        ChunkCoord::new(-17, 40, 2),
    ] {
        assert_eq!(generate(&params, coord), generate(&params, coord));
    }
}

#[test]
fn ridged_generation_is_deterministic() {
    let params = GenParams {
        ridged: true,
        ..GenParams::default()
    };
    let coord = ChunkCoord::new(2, 2, 1);
    assert_eq!(generate(&params, coord), generate(&params, coord));
}

#[test]
fn bottom_layer_is_rock() {
    // At world z=0 the height fraction is 0, and no noise amplitude under
    // the default octave count can push the surface value out of the rock
    // band. Holds for both samplers.
    for ridged in [false, true] {
        let params = GenParams {
            ridged,
            ..GenParams::default()
        };
        let voxels = generate(&params, ChunkCoord::new(0, 0, 0));
        for y in 0..CHUNK_SIZE as usize {
            for x in 0..CHUNK_SIZE as usize {
                assert_eq!(voxels[voxel_index(x, y, 0)], Voxel(2), "at ({x},{y},0)");
            }
        }
    }
}

#[test]
fn top_layer_is_air() {
    // World z=127 sits too high for any band, cap, or canopy to reach.
    let params = GenParams {
        snow_on_trees: true,
        ..GenParams::default()
    };
    let voxels = generate(&params, ChunkCoord::new(0, 0, 3));
    let top = CHUNK_SIZE as usize - 1;
    for y in 0..CHUNK_SIZE as usize {
        for x in 0..CHUNK_SIZE as usize {
            assert_eq!(voxels[voxel_index(x, y, top)], Voxel::AIR, "at ({x},{y},{top})");
        }
    }
}

#[test]
fn trees_disabled_leaves_no_tree_voxels() {
    let params = GenParams {
        trees: false,
        ..GenParams::default()
    };
    for coord in [
        ChunkCoord::new(0, 0, 1),
        ChunkCoord::new(3, 7, 1),
        ChunkCoord::new(-4, -9, 2),
    ] {
        for v in generate(&params, coord) {
            assert!(
                !(11..=14).contains(&v.id()),
                "tree voxel {} in chunk {:?}",
                v.id(),
                coord
            );
        }
    }
}

#[test]
fn caps_rest_on_solid_ground() {
    let params = GenParams {
        trees: false,
        ..GenParams::default()
    };
    let voxels = generate(&params, ChunkCoord::new(0, 0, 1));
    for z in 1..CHUNK_SIZE as usize {
        for y in 0..CHUNK_SIZE as usize {
            for x in 0..CHUNK_SIZE as usize {
                if voxels[voxel_index(x, y, z)].id() == params.cap_voxel {
                    let beneath = voxels[voxel_index(x, y, z - 1)];
                    assert!(beneath.is_solid(), "floating cap at ({x},{y},{z})");
                    assert_ne!(beneath.id(), params.cap_voxel);
                }
            }
        }
    }
}

#[test]
fn params_parse_from_empty_toml_as_defaults() {
    let parsed: GenParams = toml::from_str("").unwrap();
    let defaults = GenParams::default();
    assert_eq!(parsed.seed, defaults.seed);
    assert_eq!(parsed.octaves, defaults.octaves);
    assert_eq!(parsed.frequency, defaults.frequency);
    assert_eq!(parsed.lacunarity, defaults.lacunarity);
    assert_eq!(parsed.persistence, defaults.persistence);
    assert_eq!(parsed.scale, defaults.scale);
    assert_eq!(parsed.ridged, defaults.ridged);
    assert_eq!(parsed.trees, defaults.trees);
    assert_eq!(parsed.tree_scale, defaults.tree_scale);
    assert_eq!(parsed.tree_octaves, defaults.tree_octaves);
    assert_eq!(parsed.tree_density, defaults.tree_density);
    assert_eq!(parsed.cap_voxel, defaults.cap_voxel);
    assert_eq!(parsed.topsoil_voxel, defaults.topsoil_voxel);
    assert_eq!(parsed.snow_on_trees, defaults.snow_on_trees);
}

#[test]
fn params_parse_overrides() {
    let parsed: GenParams = toml::from_str(
        r#"
        seed = 7
        ridged = true
        tree_density = 0.5
        cap_voxel = 3
        "#,
    )
    .unwrap();
    assert_eq!(parsed.seed, 7);
    assert!(parsed.ridged);
    assert_eq!(parsed.tree_density, 0.5);
    assert_eq!(parsed.cap_voxel, 3);
    assert_eq!(parsed.topsoil_voxel, 10);
}
