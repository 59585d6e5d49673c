//! Block reading

use crate::block::{Block, Linked, ListBase, StructKind};
use crate::format::BlockFile;
use curio_core::{CurioError, DataId, Result};
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};

/// Source of records being loaded
pub trait BlockReader {
    /// Materialize the fixed-layout record stored at `address`
    fn read_struct<T: DeserializeOwned>(&self, kind: StructKind, address: DataId) -> Result<T>;

    /// Resolve a string reference. `None` in, `None` out.
    fn read_data_address(&self, slot: Option<DataId>) -> Result<Option<String>>;

    /// Reconstruct an ordered list by walking `first -> next` links
    fn read_list<T: DeserializeOwned + Linked>(&self, list: ListBase) -> Result<Vec<T>>;
}

/// Reader over a loaded file.
///
/// Construction indexes every block by address; nothing is decoded until a
/// record is asked for.
#[derive(Debug)]
pub struct MemoryReader {
    blocks: Vec<Block>,
    index: HashMap<DataId, usize>,
}

impl MemoryReader {
    pub fn new(file: BlockFile) -> Self {
        let blocks = file.blocks;
        let index = blocks
            .iter()
            .enumerate()
            .map(|(i, block)| (block.address, i))
            .collect();
        Self { blocks, index }
    }

    /// Addresses of all blocks of `kind`, in file order
    pub fn addresses_of(&self, kind: StructKind) -> Vec<DataId> {
        self.blocks
            .iter()
            .filter(|b| b.kind == kind)
            .map(|b| b.address)
            .collect()
    }

    /// Number of blocks in the file
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn block(&self, kind: StructKind, address: DataId) -> Result<&Block> {
        let block = self
            .index
            .get(&address)
            .map(|&i| &self.blocks[i])
            .ok_or_else(|| CurioError::MissingBlock {
                kind: kind.to_string(),
                address: address.raw(),
            })?;

        if block.kind != kind {
            return Err(CurioError::KindMismatch {
                address: address.raw(),
                expected: kind.to_string(),
                found: block.kind.to_string(),
            });
        }
        Ok(block)
    }
}

impl BlockReader for MemoryReader {
    fn read_struct<T: DeserializeOwned>(&self, kind: StructKind, address: DataId) -> Result<T> {
        let block = self.block(kind, address)?;
        let record: T = block.payload.clone().try_into()?;
        Ok(record)
    }

    fn read_data_address(&self, slot: Option<DataId>) -> Result<Option<String>> {
        let Some(address) = slot else {
            return Ok(None);
        };

        let block = self.block(StructKind::Data, address)?;
        match block.payload.as_str() {
            Some(text) => Ok(Some(text.to_string())),
            None => Err(CurioError::TomlParseError(format!(
                "DATA block at address {} is not a string",
                address
            ))),
        }
    }

    fn read_list<T: DeserializeOwned + Linked>(&self, list: ListBase) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut visited = HashSet::new();
        let mut prev = None;
        let mut cursor = list.first;

        while let Some(address) = cursor {
            if !visited.insert(address) {
                return Err(CurioError::BrokenList(format!(
                    "cycle at address {}",
                    address
                )));
            }

            let item: T = self.read_struct(T::KIND, address)?;
            if item.prev() != prev {
                return Err(CurioError::BrokenList(format!(
                    "element {} does not link back to its predecessor",
                    address
                )));
            }

            prev = Some(address);
            cursor = item.next();
            items.push(item);
        }

        if prev != list.last {
            return Err(CurioError::BrokenList(
                "list does not end at its recorded last element".to_string(),
            ));
        }

        Ok(items)
    }
}
