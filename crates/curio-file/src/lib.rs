//! Curio File - Block-based persistence
//!
//! Records are written as typed blocks keyed by address. Other records refer
//! to a block by its address, so variable-length data (strings, linked lists)
//! lives in blocks of its own. Reading is two-phase: [`MemoryReader::new`]
//! indexes every block, then owners resolve their references through
//! [`BlockReader`].

mod block;
mod format;
mod reader;
mod writer;

pub use block::{Block, Linked, ListBase, StructKind};
pub use format::{BlockFile, FileHeader, FILE_VERSION};
pub use reader::{BlockReader, MemoryReader};
pub use writer::{BlockWriter, MemoryWriter};
