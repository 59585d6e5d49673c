//! On-disk file format

use crate::block::Block;
use curio_core::{ContentHash, CurioError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current file format version
pub const FILE_VERSION: u32 = 1;

/// File header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileHeader {
    pub version: u32,
    /// Prefixed SHA-256 over the serialized block list
    pub checksum: String,
}

/// A complete saved file: header plus blocks in write order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockFile {
    pub header: FileHeader,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Serialize)]
struct BlockSection<'a> {
    blocks: &'a [Block],
}

impl BlockFile {
    /// Wrap blocks in a file with a freshly computed checksum
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self> {
        let checksum = Self::checksum_of(&blocks)?;
        Ok(Self {
            header: FileHeader {
                version: FILE_VERSION,
                checksum: checksum.to_prefixed_hex(),
            },
            blocks,
        })
    }

    /// Checksum of a block list as it would be serialized
    pub fn checksum_of(blocks: &[Block]) -> Result<ContentHash> {
        let content = toml::to_string(&BlockSection { blocks })?;
        Ok(ContentHash::from_str(&content))
    }

    /// Check version and checksum
    pub fn verify(&self) -> Result<()> {
        if self.header.version != FILE_VERSION {
            return Err(CurioError::UnsupportedVersion(self.header.version));
        }

        let found = Self::checksum_of(&self.blocks)?.to_prefixed_hex();
        if found != self.header.checksum {
            return Err(CurioError::ChecksumMismatch {
                expected: self.header.checksum.clone(),
                found,
            });
        }
        Ok(())
    }

    /// Serialize to a TOML string
    pub fn to_toml_string(&self) -> Result<String> {
        let content = toml::to_string_pretty(self)?;
        Ok(content)
    }

    /// Parse and verify a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: BlockFile = toml::from_str(content)?;
        file.verify()?;
        Ok(file)
    }

    /// Save to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_toml_string()?)?;
        tracing::info!(path = %path.display(), blocks = self.blocks.len(), "saved file");
        Ok(())
    }

    /// Load and verify a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let file = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), blocks = file.blocks.len(), "loaded file");
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::StructKind;
    use crate::writer::{BlockWriter, MemoryWriter};
    use curio_core::DataId;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("curio_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_file() -> BlockFile {
        let mut writer = MemoryWriter::new();
        writer
            .write_string(DataId::from_raw(10), "a sturdy oak chair")
            .unwrap();
        writer.write_string(DataId::from_raw(11), "props").unwrap();
        writer.into_file().unwrap()
    }

    #[test]
    fn test_toml_roundtrip() {
        let file = sample_file();
        let text = file.to_toml_string().unwrap();
        let parsed = BlockFile::from_toml_str(&text).unwrap();
        assert_eq!(parsed, file);
        assert_eq!(parsed.blocks[0].kind, StructKind::Data);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let text = sample_file().to_toml_string().unwrap();
        let tampered = text.replace("oak", "pine");
        let result = BlockFile::from_toml_str(&tampered);
        assert!(matches!(result, Err(CurioError::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_unsupported_version() {
        let mut file = sample_file();
        file.header.version = 99;
        assert!(matches!(file.verify(), Err(CurioError::UnsupportedVersion(99))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = temp_dir();
        let path = dir.join("props.curio");

        let file = sample_file();
        file.save(&path).unwrap();
        let loaded = BlockFile::load(&path).unwrap();
        assert_eq!(loaded.blocks.len(), 2);
        assert_eq!(loaded.blocks[1].payload.as_str(), Some("props"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let result = BlockFile::load("/nonexistent/curio/file.curio");
        assert!(matches!(result, Err(CurioError::IoError(_))));
    }
}
