use super::chunk::Chunk;
use super::position::ChunkIndex;

/// Source of freshly generated chunk contents.
///
/// Implementations must be **pure**: the output may depend only on the chunk
/// index and whatever immutable parameters (seed, constants) the generator
/// was built with. Generation of chunk `i` must never read another chunk's
/// stored tiles, which is what makes generation order immaterial and lets
/// the store generate chunks in parallel.
pub trait TerrainGenerator: Send + Sync + 'static {
    fn generate(&self, index: ChunkIndex) -> Chunk;
}
