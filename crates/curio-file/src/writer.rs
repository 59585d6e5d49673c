//! Block writing

use crate::block::{Block, StructKind};
use crate::format::BlockFile;
use curio_core::{DataId, Result};
use serde::Serialize;

/// Sink for records being saved
pub trait BlockWriter {
    /// Emit the fixed-layout portion of a record of the declared kind
    fn write_struct<T: Serialize>(
        &mut self,
        kind: StructKind,
        address: DataId,
        record: &T,
    ) -> Result<()>;

    /// Emit a string blob that a record refers to by `address`
    fn write_string(&mut self, address: DataId, text: &str) -> Result<()>;
}

/// Writer that accumulates blocks in memory, in write order
#[derive(Debug, Default)]
pub struct MemoryWriter {
    blocks: Vec<Block>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks written so far
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Finish writing and produce a checksummed file
    pub fn into_file(self) -> Result<BlockFile> {
        BlockFile::from_blocks(self.blocks)
    }
}

impl BlockWriter for MemoryWriter {
    fn write_struct<T: Serialize>(
        &mut self,
        kind: StructKind,
        address: DataId,
        record: &T,
    ) -> Result<()> {
        let payload = toml::Value::try_from(record)?;
        tracing::debug!(%kind, %address, "write struct");
        self.blocks.push(Block {
            kind,
            address,
            payload,
        });
        Ok(())
    }

    fn write_string(&mut self, address: DataId, text: &str) -> Result<()> {
        tracing::debug!(%address, len = text.len(), "write string");
        self.blocks.push(Block {
            kind: StructKind::Data,
            address,
            payload: toml::Value::String(text.to_string()),
        });
        Ok(())
    }
}
