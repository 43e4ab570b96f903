use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use skarn::{Engine, EngineConfig};
use skarn_geom::Vec3;
use skarn_voxel::Voxel;

/// Streams, meshes, and logs a seeded voxel world around a moving observer.
#[derive(Parser, Debug)]
#[command(name = "skarn", version, about)]
struct Args {
    /// Engine config TOML. Built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the generator seed.
    #[arg(long)]
    seed: Option<i32>,
    /// Ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Observer speed in voxels per tick, heading +X.
    #[arg(long, default_value_t = 0.5)]
    speed: f32,
    /// Override the draw radius, in chunks.
    #[arg(long)]
    radius: Option<i32>,
    /// Carve a crater under the observer mid-run to exercise the edit path.
    #[arg(long)]
    dig: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.r#gen.seed = seed;
    }
    if let Some(radius) = args.radius {
        config.draw_radius = radius;
    }

    let mut engine = Engine::new(config)?;
    let mut observer = Vec3::new(16.0, 16.0, 72.0);

    for tick in 0..args.ticks {
        engine.tick(observer);

        if args.dig && tick == args.ticks / 2 {
            dig_crater(&engine, observer);
        }

        if tick % 30 == 0 {
            log::info!(
                "tick={tick} observer=({:.0}, {:.0}, {:.0}) resident={} pending={} gen_queue={} mesh_queue={} meshes={} collision={}",
                observer.x,
                observer.y,
                observer.z,
                engine.store().resident_count(),
                engine.store().pending_count(),
                engine.gen_queued(),
                engine.mesh_pending(),
                engine.mesh_ready(),
                engine.collision_ready(),
            );
        }

        observer.x += args.speed;
        std::thread::sleep(Duration::from_millis(10));
    }

    engine.shutdown();
    log::info!(
        "done: resident={} meshes={} collision={}",
        engine.store().resident_count(),
        engine.mesh_ready(),
        engine.collision_ready(),
    );
    Ok(())
}

/// Digs a 5x5x3 pocket below the surface under the observer. Edits land only
/// in resident chunks; the count tells how many actually applied.
fn dig_crater(engine: &Engine, observer: Vec3) {
    let ox = observer.x.floor() as i32;
    let oy = observer.y.floor() as i32;
    let top = engine.store().height_at(ox, oy);
    if top < 0 {
        return;
    }
    let mut cleared = 0;
    for dz in 0..3 {
        for dy in -2..=2 {
            for dx in -2..=2 {
                if engine.set_voxel(ox + dx, oy + dy, top - dz, Voxel::AIR) {
                    cleared += 1;
                }
            }
        }
    }
    log::info!("dug crater at ({ox}, {oy}, {top}): {cleared} voxels cleared");
}
