//! Top-level session: content items, their asset metadata, and save/load

use crate::config::SessionConfig;
use crate::metadata::{AssetMetadata, AssetMetadataRecord};
use crate::preview::{PreviewImage, PreviewSource};
#[cfg(feature = "catalog-registry")]
use crate::registry::{CatalogRegistry, CatalogRegistryHandle};
use curio_core::{truncate_name, unique_name, DataId, Result, MAX_NAME, NAME_DELIMITER};
use curio_file::{BlockFile, BlockReader, BlockWriter, MemoryReader, MemoryWriter, StructKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A content item as stored in a file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    asset_data: Option<DataId>,
}

/// A reusable content item that may be marked as an asset
#[derive(Debug)]
pub struct ContentItem {
    id: DataId,
    name: String,
    asset_data: Option<AssetMetadata>,
    preview: Option<PreviewImage>,
}

impl ContentItem {
    fn new(name: String) -> Self {
        Self {
            id: DataId::new(),
            name,
            asset_data: None,
            preview: None,
        }
    }

    pub fn id(&self) -> DataId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_asset(&self) -> bool {
        self.asset_data.is_some()
    }

    pub fn asset_data(&self) -> Option<&AssetMetadata> {
        self.asset_data.as_ref()
    }

    pub fn asset_data_mut(&mut self) -> Option<&mut AssetMetadata> {
        self.asset_data.as_mut()
    }

    /// Attach a preview. Previews stay in memory and are not saved.
    pub fn set_preview(&mut self, preview: Option<PreviewImage>) {
        self.preview = preview;
    }
}

impl PreviewSource for ContentItem {
    fn preview(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }
}

/// Everything loaded from, or about to be saved to, one file
#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    items: Vec<ContentItem>,
    #[cfg(feature = "catalog-registry")]
    catalogs: CatalogRegistryHandle,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Add a content item. Item names are unique within the session.
    pub fn add_item(&mut self, name: &str) -> &mut ContentItem {
        let requested = truncate_name(name, MAX_NAME);
        let name = unique_name(&requested, NAME_DELIMITER, MAX_NAME, |candidate| {
            self.items.iter().any(|i| i.name == candidate)
        });

        let index = self.items.len();
        self.items.push(ContentItem::new(name));
        &mut self.items[index]
    }

    pub fn item(&self, name: &str) -> Option<&ContentItem> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn item_mut(&mut self, name: &str) -> Option<&mut ContentItem> {
        self.items.iter_mut().find(|i| i.name == name)
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn remove_item(&mut self, name: &str) -> Option<ContentItem> {
        let index = self.items.iter().position(|i| i.name == name)?;
        Some(self.items.remove(index))
    }

    /// Give an item asset metadata, seeded from the configured defaults.
    ///
    /// Existing metadata is returned unchanged.
    pub fn mark_as_asset(&mut self, name: &str) -> Option<&mut AssetMetadata> {
        let author = self.config.default_author().map(str::to_string);
        let catalog = self.config.default_catalog().map(str::to_string);

        let item = self.items.iter_mut().find(|i| i.name == name)?;
        if item.asset_data.is_none() {
            let mut metadata = AssetMetadata::new();
            if let Some(author) = &author {
                metadata.set_author(author);
            }
            if let Some(catalog) = &catalog {
                metadata.set_catalog(catalog);
            }
            tracing::debug!(item = %item.name, "marked as asset");
            item.asset_data = Some(metadata);
        }
        item.asset_data.as_mut()
    }

    /// Drop an item's asset metadata. Returns false if it had none.
    pub fn clear_asset(&mut self, name: &str) -> bool {
        match self.item_mut(name).and_then(|i| i.asset_data.take()) {
            Some(metadata) => {
                metadata.destroy();
                true
            }
            None => false,
        }
    }

    /// Preview of an asset, looked up through its content item
    pub fn query_preview(&self, name: &str) -> Option<&PreviewImage> {
        let item = self.item(name)?;
        item.asset_data()?.query_preview(item)
    }

    /// Write every item followed by its asset metadata
    pub fn write<W: BlockWriter>(&self, writer: &mut W) -> Result<()> {
        for item in &self.items {
            let record = ItemRecord {
                name: item.name.clone(),
                asset_data: item.asset_data.as_ref().map(AssetMetadata::id),
            };
            writer.write_struct(StructKind::Item, item.id, &record)?;

            if let Some(metadata) = &item.asset_data {
                metadata.write(writer)?;
            }
        }
        Ok(())
    }

    pub fn to_file(&self) -> Result<BlockFile> {
        let mut writer = MemoryWriter::new();
        self.write(&mut writer)?;
        writer.into_file()
    }

    pub fn save_to_string(&self) -> Result<String> {
        self.to_file()?.to_toml_string()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_file()?.save(path)
    }

    /// Replace the session's items with those of `file`.
    ///
    /// On success the catalog registry of the previous file is discarded.
    /// On error the session is left as it was.
    pub fn load_file(&mut self, file: BlockFile) -> Result<()> {
        let reader = MemoryReader::new(file);
        let mut items = Vec::new();

        for address in reader.addresses_of(StructKind::Item) {
            let record: ItemRecord = reader.read_struct(StructKind::Item, address)?;
            let asset_data = match record.asset_data {
                Some(asset_address) => {
                    let fixed: AssetMetadataRecord =
                        reader.read_struct(StructKind::AssetMetadata, asset_address)?;
                    Some(AssetMetadata::read(&reader, fixed)?)
                }
                None => None,
            };

            let mut item = ContentItem::new(truncate_name(&record.name, MAX_NAME));
            item.asset_data = asset_data;
            items.push(item);
        }

        tracing::info!(items = items.len(), "loaded session");
        self.items = items;
        #[cfg(feature = "catalog-registry")]
        self.catalogs.on_file_load();
        Ok(())
    }

    pub fn load_from_str(&mut self, content: &str) -> Result<()> {
        let file = BlockFile::from_toml_str(content)?;
        self.load_file(file)
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = BlockFile::load(path)?;
        self.load_file(file)
    }

    /// The catalog registry, created on first access
    #[cfg(feature = "catalog-registry")]
    pub fn ensure_catalogs(&mut self) -> &mut CatalogRegistry {
        self.catalogs.ensure_global()
    }

    #[cfg(feature = "catalog-registry")]
    pub fn free_catalogs(&mut self) {
        self.catalogs.free_global();
    }

    #[cfg(feature = "catalog-registry")]
    pub fn catalogs(&self) -> Option<&CatalogRegistry> {
        self.catalogs.get()
    }
}
