//! Session-wide catalog registry
//!
//! The registry is created lazily and torn down on every file load, so
//! catalogs from a previously loaded file never leak into the next one.
//!
//! Lifecycle: `absent -> ensure -> present -> free | file load -> absent`.
//! Freeing an absent registry does nothing.

use crate::catalog::{destroy_catalog, Catalog};
use curio_core::DataId;

/// Ordered list of catalogs
#[derive(Debug, Default)]
pub struct CatalogRegistry {
    catalogs: Vec<Catalog>,
}

impl CatalogRegistry {
    /// Link a catalog at the end of the list
    pub fn link(&mut self, catalog: Catalog) -> &Catalog {
        let index = self.catalogs.len();
        self.catalogs.push(catalog);
        &self.catalogs[index]
    }

    /// Unlink a catalog by identity, handing ownership back to the caller
    pub fn unlink(&mut self, id: DataId) -> Option<Catalog> {
        let index = self.catalogs.iter().position(|c| c.id() == id)?;
        Some(self.catalogs.remove(index))
    }

    /// First catalog with the given name
    pub fn find(&self, name: &str) -> Option<&Catalog> {
        self.catalogs.iter().find(|c| c.name() == name)
    }

    pub fn get(&self, id: DataId) -> Option<&Catalog> {
        self.catalogs.iter().find(|c| c.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Catalog> {
        self.catalogs.iter()
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

/// Destroy every catalog in the registry held by `slot`, then the registry.
pub fn free(slot: &mut Option<CatalogRegistry>) {
    let Some(registry) = slot.take() else {
        return;
    };

    let count = registry.catalogs.len();
    for catalog in registry.catalogs {
        destroy_catalog(catalog);
    }
    tracing::info!(catalogs = count, "freed catalog registry");
}

/// Discard the registry of the previous file. Always a full reset, never a merge.
pub fn update_for_file_read(slot: &mut Option<CatalogRegistry>) {
    free(slot);
}

/// Handle to the one registry of a session
#[derive(Debug, Default)]
pub struct CatalogRegistryHandle {
    registry: Option<CatalogRegistry>,
}

impl CatalogRegistryHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the registry, creating an empty one on first access
    pub fn ensure_global(&mut self) -> &mut CatalogRegistry {
        if self.registry.is_none() {
            tracing::info!("created catalog registry");
        }
        self.registry.get_or_insert_with(CatalogRegistry::default)
    }

    /// Free the registry; the next `ensure_global` starts empty
    pub fn free_global(&mut self) {
        free(&mut self.registry);
    }

    /// Called whenever a new file has been loaded
    pub fn on_file_load(&mut self) {
        update_for_file_read(&mut self.registry);
    }

    /// The registry, if it currently exists
    pub fn get(&self) -> Option<&CatalogRegistry> {
        self.registry.as_ref()
    }

    pub fn is_present(&self) -> bool {
        self.registry.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::create_catalog;

    #[test]
    fn test_ensure_creates_once() {
        let mut handle = CatalogRegistryHandle::new();
        assert!(!handle.is_present());

        handle.ensure_global().link(create_catalog("Props"));
        assert_eq!(handle.ensure_global().len(), 1);
    }

    #[test]
    fn test_file_load_resets_registry() {
        let mut handle = CatalogRegistryHandle::new();
        handle.ensure_global().link(create_catalog("Props"));

        handle.on_file_load();
        assert!(!handle.is_present());
        assert!(handle.ensure_global().is_empty());
    }

    #[test]
    fn test_free_global_never_created() {
        let mut handle = CatalogRegistryHandle::new();
        handle.free_global();
        assert!(handle.get().is_none());
    }

    #[test]
    fn test_free_global_then_recreate() {
        let mut handle = CatalogRegistryHandle::new();
        let registry = handle.ensure_global();
        registry.link(create_catalog("Props"));
        registry.link(create_catalog("Vegetation"));

        handle.free_global();
        handle.free_global();
        assert!(handle.ensure_global().is_empty());
    }

    #[test]
    fn test_free_absent_slot() {
        let mut slot: Option<CatalogRegistry> = None;
        free(&mut slot);
        update_for_file_read(&mut slot);
        assert!(slot.is_none());
    }

    #[test]
    fn test_link_unlink() {
        let mut registry = CatalogRegistry::default();
        let props = registry.link(create_catalog("Props")).id();
        registry.link(create_catalog("Props"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("Props").map(Catalog::id), Some(props));

        let unlinked = registry.unlink(props).unwrap();
        destroy_catalog(unlinked);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(props).is_none());
        assert!(registry.unlink(props).is_none());
    }
}
