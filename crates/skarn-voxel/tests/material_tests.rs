use skarn_voxel::{MaterialTable, Voxel};

#[test]
fn default_palette_covers_generator_output() {
    let table = MaterialTable::default_palette();
    // Terrain bands, caps, and tree stamps write ids in 0..=14.
    for id in 0..=14u8 {
        assert!(
            table.get(Voxel(id)).is_some(),
            "missing palette entry for id {id}"
        );
    }
    assert_eq!(table.len(), 15);
}

#[test]
fn default_palette_fixed_colors() {
    let table = MaterialTable::default_palette();
    assert_eq!(table.color(Voxel(0)), [0, 0, 0]);
    assert_eq!(table.color(Voxel(1)), [1, 142, 14]);
    assert_eq!(table.color(Voxel(2)), [55, 55, 55]);
    assert_eq!(table.color(Voxel(3)), [255, 255, 255]);
    assert_eq!(table.color(Voxel(8)), [255, 255, 0]);
}

#[test]
fn toml_palette_parses_sparse_ids() {
    let table = MaterialTable::from_toml_str(
        r#"
        [[materials]]
        id = 0
        name = "air"
        color = [0, 0, 0]

        [[materials]]
        id = 7
        name = "cyan"
        color = [0, 255, 255]
    "#,
    )
    .unwrap();
    assert_eq!(table.color(Voxel(7)), [0, 255, 255]);
    assert!(table.get(Voxel(3)).is_none());
    assert_eq!(table.len(), 8);
}

#[test]
fn toml_palette_rejects_duplicate_id() {
    let err = MaterialTable::from_toml_str(
        r#"
        [[materials]]
        id = 2
        name = "stone"
        color = [55, 55, 55]

        [[materials]]
        id = 2
        name = "basalt"
        color = [20, 20, 20]
    "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("duplicate material id 2"));
}

#[test]
#[should_panic(expected = "no material for voxel id 200")]
fn color_lookup_of_unknown_id_is_fatal() {
    let table = MaterialTable::default_palette();
    let _ = table.color(Voxel(200));
}
