use std::ops::RangeInclusive;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::{Ref, RefMut};
use rayon::prelude::*;

use super::chunk::Chunk;
use super::generator::TerrainGenerator;
use super::position::ChunkIndex;

/// Lazily generated, never evicted chunk cache.
///
/// Lock-sharded by chunk index, so generation of distinct chunks can run in
/// parallel while each chunk is still generated at most once.
pub struct ChunkStore {
    generator: Arc<dyn TerrainGenerator>,
    chunks: DashMap<ChunkIndex, Chunk>,
}

impl ChunkStore {
    pub fn new(generator: Arc<dyn TerrainGenerator>) -> Self {
        Self {
            generator,
            chunks: DashMap::new(),
        }
    }

    /// Return the chunk, generating and caching it on first request.
    ///
    /// The shard lock is held across generation, so a concurrent writer can
    /// never observe (or overwrite) a half-built chunk.
    pub fn ensure(&self, index: ChunkIndex) -> Ref<'_, ChunkIndex, Chunk> {
        self.ensure_mut(index).downgrade()
    }

    pub fn ensure_mut(&self, index: ChunkIndex) -> RefMut<'_, ChunkIndex, Chunk> {
        self.chunks.entry(index).or_insert_with(|| {
            tracing::trace!("Generating chunk {}", index.0);
            self.generator.generate(index)
        })
    }

    pub fn contains(&self, index: ChunkIndex) -> bool {
        self.chunks.contains_key(&index)
    }

    /// Generate every missing chunk in `range`, in parallel.
    ///
    /// Chunks are built off-lock and then inserted with the write-once entry
    /// API: if another caller got there first, its chunk (including any edits
    /// written into it since) wins and the late copy is discarded.
    ///
    /// Returns the number of chunks actually inserted.
    pub fn prewarm(&self, range: RangeInclusive<i64>) -> usize {
        let built: Vec<Chunk> = range
            .into_par_iter()
            .map(ChunkIndex)
            .filter(|index| !self.contains(*index))
            .map(|index| self.generator.generate(index))
            .collect();

        let mut inserted = 0;
        for chunk in built {
            if let Entry::Vacant(slot) = self.chunks.entry(chunk.index()) {
                slot.insert(chunk);
                inserted += 1;
            }
        }
        inserted
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Indices of all generated chunks, sorted.
    pub fn indices(&self) -> Vec<ChunkIndex> {
        let mut out: Vec<ChunkIndex> = self.chunks.iter().map(|e| *e.key()).collect();
        out.sort();
        out
    }
}
