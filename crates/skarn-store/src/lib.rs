//! Resident chunk ownership, derived-artifact bookkeeping, and dirty
//! propagation after voxel edits.
#![forbid(unsafe_code)]

mod artifact;
mod dirty;
mod store;

pub use artifact::ArtifactMap;
pub use dirty::{mark_chunk_dirty, mark_voxel_dirty};
pub use store::ChunkStore;
