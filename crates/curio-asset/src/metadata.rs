//! Asset metadata record and its save/load protocol

use crate::preview::{PreviewImage, PreviewSource};
use crate::tag::{Tag, TagEnsureResult, TagStore};
use curio_core::{truncate_name, DataId, Result, MAX_NAME};
use curio_file::{BlockReader, BlockWriter, Linked, ListBase, StructKind};
use serde::{Deserialize, Serialize};

/// Fixed-layout portion of an asset metadata record as stored in a file.
///
/// The description and the tags live in blocks of their own; this record only
/// holds their addresses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadataRecord {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub catalog: String,
    #[serde(default)]
    pub active_tag: i16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<DataId>,
    #[serde(default)]
    pub tags: ListBase,
}

/// A tag as stored in a file, linked to its neighbours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<DataId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<DataId>,
    pub name: String,
}

impl Linked for TagRecord {
    const KIND: StructKind = StructKind::Tag;

    fn prev(&self) -> Option<DataId> {
        self.prev
    }

    fn next(&self) -> Option<DataId> {
        self.next
    }
}

/// Descriptive data for one content item
#[derive(Debug, Clone)]
pub struct AssetMetadata {
    id: DataId,
    description_id: DataId,
    description: Option<String>,
    author: String,
    catalog: String,
    active_tag: i16,
    tags: TagStore,
}

impl AssetMetadata {
    /// Create a record with schema defaults: no description, no tags, empty
    /// author and catalog, first tag active
    pub fn new() -> Self {
        Self {
            id: DataId::new(),
            description_id: DataId::new(),
            description: None,
            author: String::new(),
            catalog: String::new(),
            active_tag: 0,
            tags: TagStore::new(),
        }
    }

    /// Free the description and every tag, then the record itself
    pub fn destroy(mut self) {
        tracing::debug!(id = %self.id, tags = self.tags.len(), "destroying asset metadata");
        self.description = None;
        self.tags.clear();
    }

    /// Identity, used as the record's address when saved
    pub fn id(&self) -> DataId {
        self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn clear_description(&mut self) {
        self.description = None;
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn set_author(&mut self, author: &str) {
        self.author = truncate_name(author, MAX_NAME);
    }

    /// Name of the catalog this asset is classified under
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    pub fn set_catalog(&mut self, catalog: &str) {
        self.catalog = truncate_name(catalog, MAX_NAME);
    }

    pub fn tags(&self) -> &TagStore {
        &self.tags
    }

    pub fn add_tag(&mut self, name: &str) -> &Tag {
        self.tags.add(name)
    }

    pub fn ensure_tag(&mut self, name: &str) -> Option<TagEnsureResult<'_>> {
        self.tags.ensure(name)
    }

    pub fn rename_tag(&mut self, id: DataId, name: &str) -> Option<&Tag> {
        self.tags.rename(id, name)
    }

    /// Remove a tag, keeping the active index on the same tag where possible
    pub fn remove_tag(&mut self, id: DataId) -> Option<Tag> {
        let index = self.tags.index_of(id)?;
        let tag = self.tags.remove(id)?;

        let active = self.active_tag.max(0) as usize;
        if index < active || active >= self.tags.len() {
            self.active_tag = (active.saturating_sub(1)).min(i16::MAX as usize) as i16;
        }
        Some(tag)
    }

    pub fn active_tag(&self) -> i16 {
        self.active_tag
    }

    /// The active tag, if the index points at one
    pub fn active(&self) -> Option<&Tag> {
        usize::try_from(self.active_tag)
            .ok()
            .and_then(|i| self.tags.iter().nth(i))
    }

    pub fn set_active_tag(&mut self, index: i16) {
        self.active_tag = index;
    }

    /// Look up the preview of the content item this metadata describes.
    ///
    /// Previews are keyed by the item, so this only delegates.
    pub fn query_preview<'a, S: PreviewSource>(&self, item: &'a S) -> Option<&'a PreviewImage> {
        item.preview()
    }

    /// Write the record, then its description if present, then each tag in order
    pub fn write<W: BlockWriter>(&self, writer: &mut W) -> Result<()> {
        let tag_ids: Vec<DataId> = self.tags.iter().map(Tag::id).collect();
        let (list, links) = ListBase::link(&tag_ids);

        let record = AssetMetadataRecord {
            author: self.author.clone(),
            catalog: self.catalog.clone(),
            active_tag: self.active_tag,
            description: self.description.as_ref().map(|_| self.description_id),
            tags: list,
        };
        writer.write_struct(StructKind::AssetMetadata, self.id, &record)?;

        if let Some(description) = &self.description {
            writer.write_string(self.description_id, description)?;
        }

        for (tag, (prev, next)) in self.tags.iter().zip(links) {
            let tag_record = TagRecord {
                prev,
                next,
                name: tag.name().to_string(),
            };
            writer.write_struct(StructKind::Tag, tag.id(), &tag_record)?;
        }

        Ok(())
    }

    /// Rebuild a record from its already-materialized fixed portion, resolving
    /// the description and the tag list through `reader`.
    ///
    /// Tags come back in file order under fresh identities and are not
    /// renamed.
    pub fn read<R: BlockReader>(reader: &R, record: AssetMetadataRecord) -> Result<Self> {
        let mut metadata = Self::new();
        metadata.author = truncate_name(&record.author, MAX_NAME);
        metadata.catalog = truncate_name(&record.catalog, MAX_NAME);
        metadata.description = reader.read_data_address(record.description)?;

        let tags: Vec<TagRecord> = reader.read_list(record.tags)?;
        for tag in &tags {
            metadata.tags.push_verbatim(&tag.name);
        }

        let in_range = record.active_tag >= 0
            && (record.active_tag == 0 || (record.active_tag as usize) < metadata.tags.len());
        metadata.active_tag = if in_range {
            record.active_tag
        } else {
            let clamped = metadata.tags.len().saturating_sub(1).min(i16::MAX as usize) as i16;
            tracing::warn!(
                active_tag = record.active_tag,
                clamped,
                "active tag out of range, clamping"
            );
            clamped
        };

        Ok(metadata)
    }
}

impl Default for AssetMetadata {
    fn default() -> Self {
        Self::new()
    }
}
