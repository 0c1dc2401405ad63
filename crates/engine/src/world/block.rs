/// Opaque block identifier. The engine stores these without interpreting them.
/// Game-specific layers assign meaning to specific IDs (e.g. 0 = air, 10 = sand)
/// and describe them through a [`BlockCatalog`](super::catalog::BlockCatalog).
///
/// The only semantic the engine enforces is that `BlockId::AIR` (0) is the
/// "empty" block: placement only succeeds onto air, and gravity only falls
/// into air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BlockId(pub u16);

impl BlockId {
    /// The universal "empty" block.
    pub const AIR: BlockId = BlockId(0);

    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}
