//! Heightmap-blurred sky occlusion, baked per mesh vertex.

use skarn_chunk::HeightGrid;

use crate::{SNAPSHOT_DIM, VERTEX_GRID};

/// Sky exposure for every cell of the snapshot box. A cell counts the
/// columns in a (2r+1)^2 window around it whose terrain tops out below the
/// cell, scaled to 0..=255. Columns with no recorded height read as open.
pub fn occlusion_volume(
    heights: &HeightGrid,
    origin: (i32, i32, i32),
    blur_radius: i32,
) -> Vec<u8> {
    let r = blur_radius;
    debug_assert!(r >= 0);
    let window = ((2 * r + 1) * (2 * r + 1)) as u32;
    let full = SNAPSHOT_DIM + 2 * r as usize;
    debug_assert_eq!(heights.dim, (full, full));
    debug_assert_eq!(heights.min, (origin.0 - 1 - r, origin.1 - 1 - r));

    let mut volume = vec![0u8; SNAPSHOT_DIM * SNAPSHOT_DIM * SNAPSHOT_DIM];
    // Horizontal pass scratch. The y extent stays at the full window so the
    // vertical pass can blur without re-reading the heightmap.
    let mut row_open = vec![0u8; SNAPSHOT_DIM * full];
    for z in 0..SNAPSHOT_DIM {
        let world_z = origin.2 - 1 + z as i32;
        for y in 0..full {
            for x in 0..SNAPSHOT_DIM {
                let mut open = 0u8;
                for ox in -r..=r {
                    let gx = (x as i32 + ox + r) as usize;
                    if world_z > heights.heights[gx + y * full] {
                        open += 1;
                    }
                }
                row_open[x + y * SNAPSHOT_DIM] = open;
            }
        }
        let layer = z * SNAPSHOT_DIM * SNAPSHOT_DIM;
        for y in 0..SNAPSHOT_DIM {
            for x in 0..SNAPSHOT_DIM {
                let mut open = 0u32;
                for oy in -r..=r {
                    let gy = (y as i32 + oy + r) as usize;
                    open += u32::from(row_open[x + gy * SNAPSHOT_DIM]);
                }
                volume[layer + y * SNAPSHOT_DIM + x] = (open * 255 / window) as u8;
            }
        }
    }
    volume
}

/// Brightness per vertex corner: the eight snapshot cells meeting at the
/// corner, summed over four instead of eight and clamped, so a corner
/// saturates once half its cells are open.
pub fn vertex_ao(volume: &[u8]) -> Vec<u8> {
    debug_assert_eq!(volume.len(), SNAPSHOT_DIM * SNAPSHOT_DIM * SNAPSHOT_DIM);
    let mut grid = vec![0u8; VERTEX_GRID * VERTEX_GRID * VERTEX_GRID];
    for z in 0..VERTEX_GRID {
        for y in 0..VERTEX_GRID {
            for x in 0..VERTEX_GRID {
                let mut sum = 0u32;
                for corner in 0..8usize {
                    let cx = x + (corner & 1);
                    let cy = y + ((corner >> 1) & 1);
                    let cz = z + (corner >> 2);
                    sum += u32::from(
                        volume[cx + cy * SNAPSHOT_DIM + cz * SNAPSHOT_DIM * SNAPSHOT_DIM],
                    );
                }
                grid[x + y * VERTEX_GRID + z * VERTEX_GRID * VERTEX_GRID] =
                    (sum / 4).min(255) as u8;
            }
        }
    }
    grid
}
