use std::sync::Mutex;

use hashbrown::HashMap;
use skarn_world::ChunkCoord;

struct ArtifactEntry<T> {
    stale: bool,
    payload: Option<T>,
}

/// Per-chunk derived state (meshes, collision boxes) keyed by coordinate,
/// with a stale flag driving rebuilds.
///
/// Entries are created the first time a build is claimed and never removed.
/// The stale flag outlives an in-flight build: a mark landing between claim
/// and install still forces the next rebuild.
pub struct ArtifactMap<T> {
    inner: Mutex<HashMap<ChunkCoord, ArtifactEntry<T>>>,
}

impl<T> Default for ArtifactMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ArtifactMap<T> {
    pub fn new() -> Self {
        ArtifactMap {
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.inner.lock().unwrap().contains_key(&coord)
    }

    pub fn is_stale(&self, coord: ChunkCoord) -> bool {
        self.inner
            .lock()
            .unwrap()
            .get(&coord)
            .is_some_and(|e| e.stale)
    }

    /// Flags an existing artifact for rebuild. Coordinates that never had a
    /// build claimed are ignored: they will be built fresh when first seen.
    pub fn mark_stale(&self, coord: ChunkCoord) -> bool {
        match self.inner.lock().unwrap().get_mut(&coord) {
            Some(entry) => {
                entry.stale = true;
                true
            }
            None => false,
        }
    }

    /// Decides whether a build should be dispatched for `coord`: true on
    /// first sight (creating the entry) or when the entry is stale
    /// (consuming the flag), false while the artifact is current.
    pub fn take_build(&self, coord: ChunkCoord) -> bool {
        let mut map = self.inner.lock().unwrap();
        match map.get_mut(&coord) {
            Some(entry) => {
                if entry.stale {
                    entry.stale = false;
                    true
                } else {
                    false
                }
            }
            None => {
                map.insert(
                    coord,
                    ArtifactEntry {
                        stale: false,
                        payload: None,
                    },
                );
                true
            }
        }
    }

    /// Stores a finished build result. The entry must have been created by
    /// [`ArtifactMap::take_build`] before the build was dispatched.
    pub fn install(&self, coord: ChunkCoord, payload: T) {
        match self.inner.lock().unwrap().get_mut(&coord) {
            Some(entry) => entry.payload = Some(payload),
            None => panic!("artifact installed at {coord:?} without a build claim"),
        }
    }

    pub fn with_payload<R>(&self, coord: ChunkCoord, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.inner
            .lock()
            .unwrap()
            .get(&coord)
            .and_then(|e| e.payload.as_ref())
            .map(f)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }

    /// Entries holding an installed payload.
    pub fn ready_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.payload.is_some())
            .count()
    }
}
