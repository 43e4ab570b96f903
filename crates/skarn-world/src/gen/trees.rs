use skarn_voxel::Voxel;

pub(super) const LEAF_DARK: u8 = 11;
pub(super) const LEAF_MID: u8 = 13;
pub(super) const LEAF_BRIGHT: u8 = 14;
/// Stamp order for canopy variants.
pub(super) const LEAF_VARIANTS: [u8; 3] = [LEAF_DARK, LEAF_MID, LEAF_BRIGHT];

const TRUNK: Voxel = Voxel(12);
const TREE_SNOW: Voxel = Voxel(3);

/// Trunk cells relative to the rooting cap cell.
const TRUNK_OFFSETS: [(i32, i32, i32); 4] = [(0, 0, 1), (0, 0, 2), (0, 0, 3), (0, 0, 4)];

/// Canopy cells relative to the rooting cap cell: a 3x3 base tier, three
/// wider middle tiers (3x3 plus an edge ring), and a 3x3 top tier.
const LEAF_OFFSETS: [(i32, i32, i32); 81] = [
    // z+5 square
    (-1, -1, 5), (0, -1, 5), (1, -1, 5),
    (-1, 0, 5), (0, 0, 5), (1, 0, 5),
    (-1, 1, 5), (0, 1, 5), (1, 1, 5),
    // z+6 square
    (-1, -1, 6), (0, -1, 6), (1, -1, 6),
    (-1, 0, 6), (0, 0, 6), (1, 0, 6),
    (-1, 1, 6), (0, 1, 6), (1, 1, 6),
    // z+6 edges
    (-1, -2, 6), (0, -2, 6), (1, -2, 6),
    (-1, 2, 6), (0, 2, 6), (1, 2, 6),
    (-2, 1, 6), (-2, 0, 6), (-2, -1, 6),
    (2, 1, 6), (2, 0, 6), (2, -1, 6),
    // z+7 square
    (-1, -1, 7), (0, -1, 7), (1, -1, 7),
    (-1, 0, 7), (0, 0, 7), (1, 0, 7),
    (-1, 1, 7), (0, 1, 7), (1, 1, 7),
    // z+7 edges
    (-1, -2, 7), (0, -2, 7), (1, -2, 7),
    (-1, 2, 7), (0, 2, 7), (1, 2, 7),
    (-2, 1, 7), (-2, 0, 7), (-2, -1, 7),
    (2, 1, 7), (2, 0, 7), (2, -1, 7),
    // z+8 square
    (-1, -1, 8), (0, -1, 8), (1, -1, 8),
    (-1, 0, 8), (0, 0, 8), (1, 0, 8),
    (-1, 1, 8), (0, 1, 8), (1, 1, 8),
    // z+8 edges
    (-1, -2, 8), (0, -2, 8), (1, -2, 8),
    (-1, 2, 8), (0, 2, 8), (1, 2, 8),
    (-2, 1, 8), (-2, 0, 8), (-2, -1, 8),
    (2, 1, 8), (2, 0, 8), (2, -1, 8),
    // z+9 square
    (-1, -1, 9), (0, -1, 9), (1, -1, 9),
    (-1, 0, 9), (0, 0, 9), (1, 0, 9),
    (-1, 1, 9), (0, 1, 9), (1, 1, 9),
];

/// Snow shell: the top tier's rim plus a 3x3 lid one cell higher.
const SNOW_OFFSETS: [(i32, i32, i32); 21] = [
    (-1, -2, 9), (0, -2, 9), (1, -2, 9),
    (-1, 2, 9), (0, 2, 9), (1, 2, 9),
    (-2, 1, 9), (-2, 0, 9), (-2, -1, 9),
    (2, 1, 9), (2, 0, 9), (2, -1, 9),
    (-1, -1, 10), (0, -1, 10), (1, -1, 10),
    (-1, 0, 10), (0, 0, 10), (1, 0, 10),
    (-1, 1, 10), (0, 1, 10), (1, 1, 10),
];

/// Stamps one tree into the padded buffer, clipping every write to the
/// buffer bounds.
///
/// Before writing, the tree scans its own canopy footprint: if a different
/// leaf variant is already present there, that variant is adopted for the
/// whole canopy, so adjacent trees fuse into one continuous crown.
pub(super) fn stamp_tree(
    leaf: u8,
    root: (i32, i32, i32),
    lb: (i32, i32, i32),
    dim: (usize, usize, usize),
    snow_on_trees: bool,
    buf: &mut [Voxel],
) {
    let mut leaf_type = leaf;
    for &off in &LEAF_OFFSETS {
        if let Some(i) = offset_index(root, off, lb, dim) {
            let current = buf[i].id();
            if current != leaf && LEAF_VARIANTS.contains(&current) {
                leaf_type = current;
                break;
            }
        }
    }

    for &off in &LEAF_OFFSETS {
        if let Some(i) = offset_index(root, off, lb, dim) {
            buf[i] = Voxel(leaf_type);
        }
    }

    for &off in &TRUNK_OFFSETS {
        if let Some(i) = offset_index(root, off, lb, dim) {
            buf[i] = TRUNK;
        }
    }

    if snow_on_trees {
        for &off in &SNOW_OFFSETS {
            if let Some(i) = offset_index(root, off, lb, dim) {
                buf[i] = TREE_SNOW;
            }
        }
    }
}

#[inline]
fn offset_index(
    root: (i32, i32, i32),
    off: (i32, i32, i32),
    lb: (i32, i32, i32),
    dim: (usize, usize, usize),
) -> Option<usize> {
    let lx = root.0 - lb.0 + off.0;
    let ly = root.1 - lb.1 + off.1;
    let lz = root.2 - lb.2 + off.2;
    if lx < 0 || ly < 0 || lz < 0 {
        return None;
    }
    let (lx, ly, lz) = (lx as usize, ly as usize, lz as usize);
    if lx >= dim.0 || ly >= dim.1 || lz >= dim.2 {
        return None;
    }
    Some(lx + ly * dim.0 + lz * dim.0 * dim.1)
}
