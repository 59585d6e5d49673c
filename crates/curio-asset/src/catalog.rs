//! Named catalogs used to classify assets

use curio_core::{truncate_name, DataId, MAX_NAME};

/// A named classification bucket.
///
/// Names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    id: DataId,
    name: String,
}

impl Catalog {
    pub fn id(&self) -> DataId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Allocate a catalog. It is not linked into any registry.
pub fn create_catalog(name: &str) -> Catalog {
    Catalog {
        id: DataId::new(),
        name: truncate_name(name, MAX_NAME),
    }
}

/// Free a single catalog that has already been unlinked
pub fn destroy_catalog(catalog: Catalog) {
    tracing::trace!(id = %catalog.id, name = %catalog.name, "destroying catalog");
}
