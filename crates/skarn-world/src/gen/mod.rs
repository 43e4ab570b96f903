mod noise;
mod params;
mod trees;

pub use noise::NoiseField;
pub use params::GenParams;

use skarn_voxel::Voxel;

use crate::coords::{CHUNK_SIZE, CHUNK_VOLUME, ChunkCoord, WORLD_HEIGHT, voxel_index};

/// Horizontal padding around the chunk footprint, wide enough that a canopy
/// rooted in a neighbor chunk still reaches in.
const MARGIN_XY: i32 = 3;
/// Depth below the chunk floor a tree can be rooted at and still push its
/// top leaf tier (or snow lid) into this chunk.
const MARGIN_Z_BELOW: i32 = 11;

/// The deep terrain band is always plain rock.
const ROCK: Voxel = Voxel(2);

struct TreeSite {
    x: i32,
    y: i32,
    z: i32,
    leaf: u8,
}

/// Synthesizes one chunk's voxels. Pure: identical `params` and `coord`
/// always produce a byte-identical buffer, indexed by [`voxel_index`].
pub fn generate_voxels(params: &GenParams, noise: &NoiseField, coord: ChunkCoord) -> Vec<Voxel> {
    let (ox, oy, oz) = coord.world_origin();

    // Padded working volume: chunk plus margins. Cells below world z=0 are
    // never written and stay air.
    let lb = (ox - MARGIN_XY, oy - MARGIN_XY, oz - MARGIN_Z_BELOW);
    let ub = (
        ox + CHUNK_SIZE - 1 + MARGIN_XY,
        oy + CHUNK_SIZE - 1 + MARGIN_XY,
        oz + CHUNK_SIZE - 1,
    );
    let dim = (
        (ub.0 - lb.0 + 1) as usize,
        (ub.1 - lb.1 + 1) as usize,
        (ub.2 - lb.2 + 1) as usize,
    );

    let mut padded = vec![Voxel::AIR; dim.0 * dim.1 * dim.2];
    let mut sites: Vec<TreeSite> = Vec::new();

    for x in lb.0..=ub.0 {
        for y in lb.1..=ub.1 {
            for z in lb.2..=ub.2 {
                if z < 0 {
                    continue;
                }
                let lx = (x - lb.0) as usize;
                let ly = (y - lb.1) as usize;
                let lz = (z - lb.2) as usize;

                let n = if params.ridged {
                    noise.ridged3(
                        (x + params.seed * 59) as f32 * params.scale,
                        y as f32 * params.scale,
                        0.0,
                        params.octaves,
                        params.frequency,
                        params.lacunarity,
                    )
                } else {
                    noise.fractal3(
                        (x + params.seed * 59) as f32 * params.scale,
                        y as f32 * params.scale,
                        z as f32 * params.scale,
                        params.octaves,
                        params.frequency,
                        params.lacunarity,
                        params.persistence,
                    )
                };

                // Height fraction shifted by noise; bands of the result pick
                // the material.
                let surface = z as f32 / WORLD_HEIGHT as f32 - n * 0.25;

                let mut voxel = if (0.4..0.5).contains(&surface) {
                    Voxel(params.topsoil_voxel)
                } else if surface < 0.4 {
                    ROCK
                } else {
                    Voxel::AIR
                };

                if voxel.is_air() {
                    let beneath = if lz == 0 || z == 0 {
                        Voxel::AIR
                    } else {
                        padded[pad_index(lx, ly, lz - 1, dim)]
                    };
                    if beneath.is_solid() && beneath.id() != params.cap_voxel {
                        // First empty cell above a column top: cap it, and
                        // maybe root a tree here.
                        voxel = Voxel(params.cap_voxel);

                        let tree_noise = noise.fractal3(
                            (x + params.seed * 31) as f32 * params.tree_scale,
                            (y + params.seed * 37) as f32 * params.tree_scale,
                            0.0,
                            params.tree_octaves,
                            1.0,
                            2.0,
                            0.5,
                        );
                        let tree_prob = (tree_noise + 1.0) * 0.5;

                        let color_noise = noise.fractal3(
                            (x + params.seed * 19) as f32 * params.tree_scale,
                            (y + params.seed * 17) as f32 * params.tree_scale,
                            0.0,
                            params.tree_octaves,
                            1.0,
                            2.0,
                            0.5,
                        );

                        if tree_prob < params.tree_density {
                            let leaf = if color_noise < -0.5 {
                                trees::LEAF_DARK
                            } else if color_noise < 0.3 {
                                trees::LEAF_MID
                            } else {
                                trees::LEAF_BRIGHT
                            };
                            sites.push(TreeSite { x, y, z, leaf });
                        }
                    }
                }

                padded[pad_index(lx, ly, lz, dim)] = voxel;
            }
        }
    }

    if params.trees {
        // One variant is stamped to completion before the next so that
        // overlapping canopies always resolve in the same order.
        for variant in trees::LEAF_VARIANTS {
            for site in sites.iter().filter(|s| s.leaf == variant) {
                trees::stamp_tree(
                    variant,
                    (site.x, site.y, site.z),
                    lb,
                    dim,
                    params.snow_on_trees,
                    &mut padded,
                );
            }
        }
    }

    // Copy the unpadded interior into canonical chunk indexing.
    let mut voxels = vec![Voxel::AIR; CHUNK_VOLUME];
    for x in 0..CHUNK_SIZE as usize {
        for y in 0..CHUNK_SIZE as usize {
            for z in 0..CHUNK_SIZE as usize {
                voxels[voxel_index(x, y, z)] = padded[pad_index(
                    x + MARGIN_XY as usize,
                    y + MARGIN_XY as usize,
                    z + MARGIN_Z_BELOW as usize,
                    dim,
                )];
            }
        }
    }
    voxels
}

#[inline]
fn pad_index(x: usize, y: usize, z: usize, dim: (usize, usize, usize)) -> usize {
    x + y * dim.0 + z * dim.0 * dim.1
}
