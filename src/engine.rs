//! The engine: owns the chunk store, the background workers, and the derived
//! artifact maps, and advances them one tick at a time.

use std::error::Error;
use std::sync::Arc;

use skarn_chunk::VoxelRegion;
use skarn_geom::{Aabb, Vec3};
use skarn_mesh::{ChunkMeshCpu, SNAPSHOT_DIM, collision_boxes, height_window, snapshot_min};
use skarn_runtime::{GenWorker, MeshJob, MeshPool};
use skarn_store::{ArtifactMap, ChunkStore, mark_chunk_dirty, mark_voxel_dirty};
use skarn_voxel::{MaterialTable, Voxel};
use skarn_world::ChunkCoord;

use crate::config::EngineConfig;
use crate::streaming;

/// What one tick did. The driver logs these; tests assert on them.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickStats {
    pub adopted: usize,
    pub meshes_installed: usize,
    pub mesh_jobs: usize,
    pub collision_built: usize,
    pub load_requested: Option<ChunkCoord>,
}

pub struct Engine {
    store: ChunkStore,
    r#gen: GenWorker,
    mesh_pool: MeshPool,
    mesh: ArtifactMap<ChunkMeshCpu>,
    collision: ArtifactMap<Vec<Aabb>>,
    materials: Arc<MaterialTable>,
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, Box<dyn Error>> {
        let materials = Arc::new(config.material_table()?);
        let r#gen = GenWorker::new(config.r#gen.clone());
        let mesh_pool = MeshPool::new(config.mesh_workers);
        log::info!(
            "engine up: seed={} draw={} load={} collision={} mesh_workers={}",
            config.r#gen.seed,
            config.draw_radius,
            config.load_radius(),
            config.collision_radius,
            mesh_pool.workers,
        );
        Ok(Self {
            store: ChunkStore::new(),
            r#gen,
            mesh_pool,
            mesh: ArtifactMap::new(),
            collision: ArtifactMap::new(),
            materials,
            config,
        })
    }

    /// Advances the world one tick: adopts finished generation, installs
    /// finished meshes, then runs the load, mesh, and collision scans around
    /// the observer. At most one chunk is requested from the generator per
    /// tick; mesh builds go to the pool, collision boxes are built inline.
    pub fn tick(&self, observer: Vec3) -> TickStats {
        let mut stats = TickStats::default();

        for out in self.r#gen.drain_completed() {
            let coord = out.chunk.coord;
            self.store.adopt_chunk(out.chunk);
            log::info!(
                "adopted chunk ({}, {}, {}) gen_ms={}",
                coord.cx,
                coord.cy,
                coord.cz,
                out.t_gen_ms
            );
            stats.adopted += 1;
        }

        for out in self.mesh_pool.drain_completed() {
            match out.cpu {
                Some(cpu) => {
                    log::debug!(
                        "mesh ready ({}, {}, {}) quads={} mesh_ms={}",
                        out.coord.cx,
                        out.coord.cy,
                        out.coord.cz,
                        cpu.quad_count(),
                        out.t_mesh_ms
                    );
                    self.mesh.install(out.coord, cpu);
                    stats.meshes_installed += 1;
                }
                None => {
                    // All-air snapshot. The build claim stays in place so
                    // the chunk is not resubmitted until an edit marks it
                    // stale.
                    log::debug!(
                        "mesh empty ({}, {}, {})",
                        out.coord.cx,
                        out.coord.cy,
                        out.coord.cz
                    );
                }
            }
        }

        let focus = ChunkCoord::of_world(
            observer.x.floor() as i32,
            observer.y.floor() as i32,
            observer.z.floor() as i32,
        );

        if let Some(coord) =
            streaming::next_load_request(&self.store, focus, self.config.load_radius())
        {
            self.store.mark_pending(coord);
            self.r#gen.enqueue(coord);
            log::debug!("requested chunk ({}, {}, {})", coord.cx, coord.cy, coord.cz);
            stats.load_requested = Some(coord);
        }

        for coord in streaming::mesh_candidates(&self.store, focus, self.config.draw_radius) {
            if self.mesh.take_build(coord) {
                self.submit_mesh(coord);
                stats.mesh_jobs += 1;
            }
        }

        for coord in
            streaming::collision_candidates(&self.store, focus, self.config.collision_radius)
        {
            if self.collision.take_build(coord) {
                let region = self.snapshot(coord);
                self.collision.install(coord, collision_boxes(&region));
                stats.collision_built += 1;
            }
        }

        stats
    }

    fn submit_mesh(&self, coord: ChunkCoord) {
        let region = self.snapshot(coord);
        let (hmin, hdim) = height_window(coord, self.config.blur_radius);
        let hmax = (hmin.0 + hdim.0 as i32 - 1, hmin.1 + hdim.1 as i32 - 1);
        let heights = self.store.height_region(hmin, hmax);
        self.mesh_pool.submit(MeshJob {
            coord,
            region,
            heights,
            materials: Arc::clone(&self.materials),
            blur_radius: self.config.blur_radius,
        });
    }

    /// One-voxel border snapshot feeding mesh and collision builds.
    fn snapshot(&self, coord: ChunkCoord) -> VoxelRegion {
        let min = snapshot_min(coord);
        let max = (
            min.0 + SNAPSHOT_DIM as i32 - 1,
            min.1 + SNAPSHOT_DIM as i32 - 1,
            min.2 + SNAPSHOT_DIM as i32 - 1,
        );
        self.store.voxel_region(min, max)
    }

    /// Writes one voxel and flags every artifact the edit can affect.
    /// Returns false when the chunk is not resident.
    pub fn set_voxel(&self, wx: i32, wy: i32, wz: i32, voxel: Voxel) -> bool {
        if !self.store.set_voxel(wx, wy, wz, voxel) {
            return false;
        }
        mark_voxel_dirty(
            &self.store,
            &self.mesh,
            &self.collision,
            wx,
            wy,
            wz,
            self.config.blur_radius,
        );
        true
    }

    pub fn get_voxel(&self, wx: i32, wy: i32, wz: i32) -> Voxel {
        self.store.get_voxel(wx, wy, wz)
    }

    /// Flags a whole resident chunk for rebuild, for edits whose footprint
    /// within the chunk is unknown.
    pub fn invalidate_chunk(&self, coord: ChunkCoord) {
        mark_chunk_dirty(&self.store, &self.mesh, &self.collision, coord);
    }

    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mesh artifacts holding an installed payload.
    pub fn mesh_ready(&self) -> usize {
        self.mesh.ready_count()
    }

    pub fn collision_ready(&self) -> usize {
        self.collision.ready_count()
    }

    pub fn with_mesh<R>(&self, coord: ChunkCoord, f: impl FnOnce(&ChunkMeshCpu) -> R) -> Option<R> {
        self.mesh.with_payload(coord, f)
    }

    pub fn with_collision<R>(&self, coord: ChunkCoord, f: impl FnOnce(&[Aabb]) -> R) -> Option<R> {
        self.collision.with_payload(coord, |boxes| f(boxes))
    }

    /// Generation requests not yet picked up by the worker.
    pub fn gen_queued(&self) -> usize {
        self.r#gen.queued_count()
    }

    /// Mesh jobs waiting for or occupying a pool thread.
    pub fn mesh_pending(&self) -> usize {
        self.mesh_pool.queued_count() + self.mesh_pool.inflight_count()
    }

    /// Stops the generation worker. Queued requests are dropped.
    pub fn shutdown(&mut self) {
        self.r#gen.shutdown();
    }
}
