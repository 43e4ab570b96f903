use std::collections::BTreeMap;
use std::time::Instant;

use skarn_chunk::{HeightGrid, VoxelRegion};
use skarn_voxel::{MaterialTable, Voxel};
use skarn_world::{CHUNK_SIZE, ChunkCoord};

use crate::ao::{occlusion_volume, vertex_ao};
use crate::face::Face;
use crate::mesh::{ChunkMeshCpu, MeshBatch, PackedVertex};
use crate::{SNAPSHOT_DIM, VERTEX_GRID, snapshot_min};

const SIZE: usize = CHUNK_SIZE as usize;

/// One visible cell in a sweep slice: voxel id plus the four corner AO
/// samples in (origin, +u, +v, +u+v) order. Quads merge only across
/// identical cells, so a merged rectangle is flat in both id and shading.
#[derive(Clone, Copy, PartialEq, Eq)]
struct MaskCell {
    id: u8,
    ao: [u8; 4],
}

#[derive(Default)]
struct QuadSink {
    vertices: Vec<PackedVertex>,
    indices: Vec<u16>,
}

impl QuadSink {
    fn push_quad(&mut self, corners: [[i32; 3]; 4], ao: [u8; 4], color: [u8; 3]) {
        debug_assert!(self.vertices.len() + 4 <= usize::from(u16::MAX) + 1);
        let base = self.vertices.len() as u16;
        for i in 0..4 {
            self.vertices.push(PackedVertex {
                pos: [
                    corners[i][0] as u8,
                    corners[i][1] as u8,
                    corners[i][2] as u8,
                ],
                pad: 0,
                color,
                ao: ao[i],
            });
        }
        self.indices.extend_from_slice(&[
            base + 2,
            base,
            base + 1,
            base + 1,
            base + 3,
            base + 2,
        ]);
    }
}

/// Greedy-meshes one chunk from its padded snapshot.
///
/// Returns `None` when the snapshot holds no solid voxel at all. A solid but
/// fully buried chunk returns an empty mesh instead: it was meshed, it just
/// has no visible surface.
pub fn build_chunk_mesh(
    region: &VoxelRegion,
    heights: &HeightGrid,
    materials: &MaterialTable,
    blur_radius: i32,
    coord: ChunkCoord,
) -> Option<ChunkMeshCpu> {
    let t0 = Instant::now();
    debug_assert_eq!(region.min, snapshot_min(coord));
    debug_assert_eq!(region.dim, (SNAPSHOT_DIM, SNAPSHOT_DIM, SNAPSHOT_DIM));
    if region.is_all_air() {
        return None;
    }

    let volume = occlusion_volume(heights, coord.world_origin(), blur_radius);
    let ao = vertex_ao(&volume);

    // Keyed (material id, face index): BTreeMap iteration is already the
    // batch order the renderer expects.
    let mut buckets: BTreeMap<(u8, u8), QuadSink> = BTreeMap::new();
    sweep(region, &ao, materials, &mut buckets);

    let mut mesh = ChunkMeshCpu::empty(coord);
    for ((id, face), sink) in buckets {
        debug_assert!(mesh.vertices.len() + sink.vertices.len() <= usize::from(u16::MAX) + 1);
        mesh.batches.push(MeshBatch {
            material: Voxel(id),
            face: Face::from_index(face as usize),
            first_index: mesh.indices.len() as u32,
            num_tris: (sink.indices.len() / 3) as u32,
        });
        let shift = mesh.vertices.len() as u16;
        mesh.indices.extend(sink.indices.iter().map(|&i| i + shift));
        mesh.vertices.extend(sink.vertices);
    }

    let ms: u32 = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::info!(
        target: "perf",
        "ms={} mesh_build chunk=({}, {}, {}) quads={} batches={}",
        ms,
        coord.cx,
        coord.cy,
        coord.cz,
        mesh.quad_count(),
        mesh.batches.len()
    );
    Some(mesh)
}

/// Sweeps all six face directions, merging visible cells into maximal
/// rectangles per slice.
fn sweep(
    region: &VoxelRegion,
    ao: &[u8],
    materials: &MaterialTable,
    buckets: &mut BTreeMap<(u8, u8), QuadSink>,
) {
    let mut mask: Vec<Option<MaskCell>> = vec![None; SIZE * SIZE];
    for back_face in [true, false] {
        for d in 0..3 {
            let u = (d + 1) % 3;
            let v = (d + 2) % 3;
            let mut q = [0i32; 3];
            q[d] = 1;
            let face = sweep_face(d, back_face);

            let mut x = [0i32; 3];
            for slice in 0..SIZE as i32 {
                x[d] = slice;

                let mut n = 0;
                for xv in 0..SIZE as i32 {
                    x[v] = xv;
                    for xu in 0..SIZE as i32 {
                        x[u] = xu;
                        mask[n] = mask_cell(region, ao, &x, &q, u, v, back_face);
                        n += 1;
                    }
                }

                let mut n = 0;
                for j in 0..SIZE {
                    let mut i = 0;
                    while i < SIZE {
                        let Some(cell) = mask[n] else {
                            i += 1;
                            n += 1;
                            continue;
                        };
                        let mut w = 1;
                        while i + w < SIZE && mask[n + w] == Some(cell) {
                            w += 1;
                        }
                        let mut h = 1;
                        'grow: while j + h < SIZE {
                            for k in 0..w {
                                if mask[n + k + h * SIZE] != Some(cell) {
                                    break 'grow;
                                }
                            }
                            h += 1;
                        }

                        x[u] = i as i32;
                        x[v] = j as i32;
                        let mut base = x;
                        if !back_face {
                            for a in 0..3 {
                                base[a] += q[a];
                            }
                        }
                        let mut du = [0i32; 3];
                        du[u] = w as i32;
                        let mut dv = [0i32; 3];
                        dv[v] = h as i32;

                        let color = materials.color(Voxel(cell.id));
                        let sink = buckets.entry((cell.id, face.index() as u8)).or_default();
                        emit_quad(sink, back_face, base, du, dv, &cell, color);

                        for l in 0..h {
                            for k in 0..w {
                                mask[n + k + l * SIZE] = None;
                            }
                        }
                        i += w;
                        n += w;
                    }
                }
            }
        }
    }
}

/// Slice-local visibility: solid voxel whose cell on the face's side is air.
fn mask_cell(
    region: &VoxelRegion,
    ao: &[u8],
    x: &[i32; 3],
    q: &[i32; 3],
    u: usize,
    v: usize,
    back_face: bool,
) -> Option<MaskCell> {
    let voxel = region.get((x[0] + 1) as usize, (x[1] + 1) as usize, (x[2] + 1) as usize);
    if voxel.is_air() {
        return None;
    }
    let (sx, sy, sz) = if back_face {
        (x[0] + 1 - q[0], x[1] + 1 - q[1], x[2] + 1 - q[2])
    } else {
        (x[0] + 1 + q[0], x[1] + 1 + q[1], x[2] + 1 + q[2])
    };
    if region.get(sx as usize, sy as usize, sz as usize).is_solid() {
        return None;
    }
    // The face plane sits at the voxel's low corner for back faces and one
    // cell further along the sweep axis for front faces.
    let mut corner = *x;
    if !back_face {
        for a in 0..3 {
            corner[a] += q[a];
        }
    }
    Some(MaskCell {
        id: voxel.id(),
        ao: corner_ao(ao, corner, u, v),
    })
}

/// The four vertex-grid AO samples for a face cell, (origin, +u, +v, +u+v).
fn corner_ao(ao: &[u8], corner: [i32; 3], u: usize, v: usize) -> [u8; 4] {
    let sample = |c: [i32; 3]| {
        ao[c[0] as usize + c[1] as usize * VERTEX_GRID + c[2] as usize * VERTEX_GRID * VERTEX_GRID]
    };
    let mut cu = corner;
    cu[u] += 1;
    let mut cv = corner;
    cv[v] += 1;
    let mut cuv = cu;
    cuv[v] += 1;
    [sample(corner), sample(cu), sample(cv), sample(cuv)]
}

fn sweep_face(d: usize, back_face: bool) -> Face {
    match (d, back_face) {
        (0, true) => Face::Left,
        (0, false) => Face::Right,
        (1, true) => Face::Back,
        (1, false) => Face::Front,
        (2, true) => Face::Bottom,
        _ => Face::Top,
    }
}

/// Emits the merged rectangle with the winding the renderer expects. Front
/// and back faces list corners in mirrored order; each vertex carries the AO
/// sample of its own geometric corner.
fn emit_quad(
    sink: &mut QuadSink,
    back_face: bool,
    base: [i32; 3],
    du: [i32; 3],
    dv: [i32; 3],
    cell: &MaskCell,
    color: [u8; 3],
) {
    let add = |a: [i32; 3], b: [i32; 3]| [a[0] + b[0], a[1] + b[1], a[2] + b[2]];
    let (corners, ao) = if back_face {
        (
            [add(base, du), add(add(base, du), dv), base, add(base, dv)],
            [cell.ao[1], cell.ao[3], cell.ao[0], cell.ao[2]],
        )
    } else {
        (
            [base, add(base, dv), add(base, du), add(add(base, du), dv)],
            [cell.ao[0], cell.ao[2], cell.ao[1], cell.ao[3]],
        )
    };
    sink.push_quad(corners, ao, color);
}
