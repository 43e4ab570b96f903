//! Background workers: the dedicated terrain generation thread and the
//! rayon meshing pool, fed and drained over crossbeam channels.
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, unbounded};
use rayon::{ThreadPool, ThreadPoolBuilder};

use skarn_chunk::{Chunk, HeightGrid, VoxelRegion, generate_chunk};
use skarn_mesh::{ChunkMeshCpu, build_chunk_mesh};
use skarn_voxel::MaterialTable;
use skarn_world::{ChunkCoord, GenParams, NoiseField};

/// A generated chunk coming back from the worker thread.
pub struct GenOut {
    pub chunk: Chunk,
    pub t_gen_ms: u32,
}

/// Owns the single generation thread. Generation is deterministic per seed,
/// so one worker keeps chunk arrival order stable and the noise state
/// private to the thread.
pub struct GenWorker {
    job_tx: Option<Sender<ChunkCoord>>,
    res_rx: Receiver<GenOut>,
    handle: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
    queued: Arc<AtomicUsize>,
}

impl GenWorker {
    pub fn new(params: GenParams) -> Self {
        let (job_tx, job_rx) = unbounded::<ChunkCoord>();
        let (res_tx, res_rx) = unbounded::<GenOut>();
        let stop = Arc::new(AtomicBool::new(false));
        let queued = Arc::new(AtomicUsize::new(0));
        let handle = {
            let stop = Arc::clone(&stop);
            let queued = Arc::clone(&queued);
            thread::spawn(move || {
                let noise = NoiseField::new(params.seed);
                while let Ok(coord) = job_rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    // On shutdown, drain the queue without generating so
                    // pending requests are simply dropped.
                    if stop.load(Ordering::Relaxed) {
                        continue;
                    }
                    let t0 = Instant::now();
                    let chunk = generate_chunk(&params, &noise, coord);
                    let t_gen_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
                    if res_tx.send(GenOut { chunk, t_gen_ms }).is_err() {
                        break;
                    }
                }
            })
        };
        Self {
            job_tx: Some(job_tx),
            res_rx,
            handle: Some(handle),
            stop,
            queued,
        }
    }

    /// Queues a chunk for generation. No-op after shutdown.
    pub fn enqueue(&self, coord: ChunkCoord) {
        let Some(tx) = &self.job_tx else {
            log::warn!(
                "gen worker is shut down; dropping request for ({}, {}, {})",
                coord.cx,
                coord.cy,
                coord.cz
            );
            return;
        };
        self.queued.fetch_add(1, Ordering::Relaxed);
        if tx.send(coord).is_err() {
            self.queued.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Everything the worker has finished since the last call.
    pub fn drain_completed(&self) -> Vec<GenOut> {
        self.res_rx.try_iter().collect()
    }

    pub fn queued_count(&self) -> usize {
        self.queued.load(Ordering::Relaxed)
    }

    /// Stops the worker and joins it. Queued requests are discarded, not
    /// generated. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.job_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for GenWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Everything a mesh build needs, snapshotted on the submitting thread so
/// the pool never touches the chunk store.
pub struct MeshJob {
    pub coord: ChunkCoord,
    pub region: VoxelRegion,
    pub heights: HeightGrid,
    pub materials: Arc<MaterialTable>,
    pub blur_radius: i32,
}

pub struct MeshOut {
    pub coord: ChunkCoord,
    /// `None` when the snapshot was entirely air.
    pub cpu: Option<ChunkMeshCpu>,
    pub t_mesh_ms: u32,
}

/// Fixed-size rayon pool running mesh builds. Field order matters on drop:
/// closing `job_tx` lets the pump loops exit before the pool joins its
/// threads.
pub struct MeshPool {
    job_tx: Sender<MeshJob>,
    res_rx: Receiver<MeshOut>,
    _pool: Arc<ThreadPool>,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    pub workers: usize,
}

impl MeshPool {
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        let (job_tx, job_rx) = unbounded::<MeshJob>();
        let (res_tx, res_rx) = unbounded::<MeshOut>();
        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));
        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("skarn-mesh-{i}"))
                .build()
                .expect("mesh pool"),
        );
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            let queued = Arc::clone(&queued);
            let inflight = Arc::clone(&inflight);
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    let t0 = Instant::now();
                    let cpu = build_chunk_mesh(
                        &job.region,
                        &job.heights,
                        &job.materials,
                        job.blur_radius,
                        job.coord,
                    );
                    let t_mesh_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
                    let out = MeshOut {
                        coord: job.coord,
                        cpu,
                        t_mesh_ms,
                    };
                    inflight.fetch_sub(1, Ordering::Relaxed);
                    if tx.send(out).is_err() {
                        break;
                    }
                }
            });
        }
        Self {
            job_tx,
            res_rx,
            _pool: pool,
            queued,
            inflight,
            workers,
        }
    }

    pub fn submit(&self, job: MeshJob) {
        let coord = job.coord;
        self.queued.fetch_add(1, Ordering::Relaxed);
        if self.job_tx.send(job).is_err() {
            self.queued.fetch_sub(1, Ordering::Relaxed);
            log::warn!(
                "mesh pool is closed; dropping job for ({}, {}, {})",
                coord.cx,
                coord.cy,
                coord.cz
            );
        }
    }

    /// Everything the pool has finished since the last call.
    pub fn drain_completed(&self) -> Vec<MeshOut> {
        self.res_rx.try_iter().collect()
    }

    pub fn queued_count(&self) -> usize {
        self.queued.load(Ordering::Relaxed)
    }

    pub fn inflight_count(&self) -> usize {
        self.inflight.load(Ordering::Relaxed)
    }
}
