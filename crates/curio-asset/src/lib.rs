//! Curio Asset - Asset metadata for reusable content items
//!
//! This crate provides the metadata record attached to a content item
//! (description, tags, author and catalog fields), its save/load protocol,
//! and an optional catalog registry that is reset whenever a file is loaded.

mod catalog;
mod config;
mod metadata;
mod preview;
#[cfg(feature = "catalog-registry")]
mod registry;
mod session;
mod tag;

pub use catalog::{create_catalog, destroy_catalog, Catalog};
pub use config::{AssetDefaults, SessionConfig};
pub use metadata::{AssetMetadata, AssetMetadataRecord, TagRecord};
pub use preview::{PreviewImage, PreviewSource};
#[cfg(feature = "catalog-registry")]
pub use registry::{free, update_for_file_read, CatalogRegistry, CatalogRegistryHandle};
pub use session::{ContentItem, Session};
pub use tag::{Tag, TagEnsureResult, TagStore};
