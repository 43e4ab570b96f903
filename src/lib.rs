//! Headless chunked-terrain engine: streams chunks around an observer,
//! generates terrain on a worker thread, and greedy-meshes it on a pool.
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod streaming;

pub use config::EngineConfig;
pub use engine::{Engine, TickStats};
