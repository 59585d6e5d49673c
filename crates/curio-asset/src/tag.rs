//! Uniquely-named tags owned by one asset metadata record

use curio_core::{truncate_name, unique_name, DataId, MAX_NAME, NAME_DELIMITER};

/// A user-defined tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: DataId,
    name: String,
}

impl Tag {
    fn new(name: &str) -> Self {
        Self {
            id: DataId::new(),
            name: truncate_name(name, MAX_NAME),
        }
    }

    pub fn id(&self) -> DataId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Result of [`TagStore::ensure`]
#[derive(Debug)]
pub struct TagEnsureResult<'a> {
    pub tag: &'a Tag,
    /// False if a tag with the requested name already existed
    pub is_new: bool,
}

/// Insertion-ordered tags with store-wide unique names.
///
/// [`add`](Self::add) always inserts and renames on collision;
/// [`ensure`](Self::ensure) never creates a duplicate.
#[derive(Debug, Clone, Default)]
pub struct TagStore {
    tags: Vec<Tag>,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag, renaming it to `name.001`, `name.002`, ... if `name` is taken
    pub fn add(&mut self, name: &str) -> &Tag {
        let mut tag = Tag::new(name);
        let unique = unique_name(&tag.name, NAME_DELIMITER, MAX_NAME, |candidate| {
            self.tags.iter().any(|t| t.name == candidate)
        });
        if unique != tag.name {
            tracing::debug!(requested = %tag.name, name = %unique, "disambiguated tag name");
            tag.name = unique;
        }

        self.push(tag)
    }

    /// Return the tag called `name`, creating it if needed.
    ///
    /// An empty name is ignored and yields `None`.
    pub fn ensure(&mut self, name: &str) -> Option<TagEnsureResult<'_>> {
        if name.is_empty() {
            return None;
        }

        let name = truncate_name(name, MAX_NAME);
        if let Some(index) = self.tags.iter().position(|t| t.name == name) {
            return Some(TagEnsureResult {
                tag: &self.tags[index],
                is_new: false,
            });
        }

        let tag = self.push(Tag::new(&name));
        Some(TagEnsureResult { tag, is_new: true })
    }

    /// Remove and return the tag with identity `id`.
    ///
    /// Returns `None`, leaving the store untouched, if the tag is not in this store.
    pub fn remove(&mut self, id: DataId) -> Option<Tag> {
        let index = self.index_of(id)?;
        Some(self.tags.remove(index))
    }

    /// Rename a tag, disambiguating against every other tag in the store
    pub fn rename(&mut self, id: DataId, name: &str) -> Option<&Tag> {
        let index = self.index_of(id)?;
        let requested = truncate_name(name, MAX_NAME);
        let unique = unique_name(&requested, NAME_DELIMITER, MAX_NAME, |candidate| {
            self.tags
                .iter()
                .enumerate()
                .any(|(i, t)| i != index && t.name == candidate)
        });

        tracing::debug!(from = %self.tags[index].name, to = %unique, "renamed tag");
        self.tags[index].name = unique;
        Some(&self.tags[index])
    }

    /// Find a tag by exact name
    pub fn find(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Get a tag by identity
    pub fn get(&self, id: DataId) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    /// Position of a tag in insertion order
    pub fn index_of(&self, id: DataId) -> Option<usize> {
        self.tags.iter().position(|t| t.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// Tag names in order
    pub fn names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Destroy every tag
    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// Append without disambiguation, for tags read back from a file
    pub(crate) fn push_verbatim(&mut self, name: &str) -> &Tag {
        self.push(Tag::new(name))
    }

    fn push(&mut self, tag: Tag) -> &Tag {
        let index = self.tags.len();
        self.tags.push(tag);
        &self.tags[index]
    }
}

impl<'a> IntoIterator for &'a TagStore {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_add_duplicate_gets_suffix() {
        let mut store = TagStore::new();
        store.add("color");
        let second = store.add("color").name().to_string();

        assert_eq!(second, "color.001");
        assert_eq!(store.names(), vec!["color", "color.001"]);
    }

    #[test]
    fn test_add_many_duplicates_stay_unique() {
        let mut store = TagStore::new();
        for _ in 0..25 {
            store.add("wood");
        }
        store.add("wood.003");
        store.add("");
        store.add("");

        let names: HashSet<_> = store.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), store.len());
        assert_eq!(store.len(), 28);
        assert!(store.find("wood.024").is_some());
        assert!(store.find("wood.025").is_some());
        assert!(store.find(".001").is_some());
    }

    #[test]
    fn test_add_truncates_long_name() {
        let mut store = TagStore::new();
        let long = "t".repeat(200);
        let tag = store.add(&long);
        assert_eq!(tag.name().len(), MAX_NAME - 1);
    }

    #[test]
    fn test_ensure_twice_returns_same_tag() {
        let mut store = TagStore::new();

        let first = store.ensure("metal").unwrap();
        assert!(first.is_new);
        let first_id = first.tag.id();

        let second = store.ensure("metal").unwrap();
        assert!(!second.is_new);
        assert_eq!(second.tag.id(), first_id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ensure_empty_is_noop() {
        let mut store = TagStore::new();
        store.add("a");
        assert!(store.ensure("").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ensure_long_name_is_idempotent() {
        let mut store = TagStore::new();
        let long = "n".repeat(100);
        assert!(store.ensure(&long).unwrap().is_new);
        assert!(!store.ensure(&long).unwrap().is_new);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut store = TagStore::new();
        let a = store.add("a").id();
        let b = store.add("b").id();

        let removed = store.remove(a).unwrap();
        assert_eq!(removed.name(), "a");
        assert_eq!(store.names(), vec!["b"]);
        assert!(store.get(b).is_some());
    }

    #[test]
    fn test_remove_foreign_tag_is_noop() {
        let mut store = TagStore::new();
        store.add("a");

        let mut other = TagStore::new();
        let foreign = other.add("a").id();

        assert!(store.remove(foreign).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_removed_name_can_be_reused() {
        let mut store = TagStore::new();
        let id = store.add("chair").id();
        store.remove(id);
        assert_eq!(store.add("chair").name(), "chair");
    }

    #[test]
    fn test_rename_disambiguates() {
        let mut store = TagStore::new();
        store.add("stone");
        let id = store.add("brick").id();

        assert_eq!(store.rename(id, "stone").unwrap().name(), "stone.001");
        // Renaming to its own name keeps it unchanged
        assert_eq!(store.rename(id, "stone.001").unwrap().name(), "stone.001");
    }

    #[test]
    fn test_order_is_insertion_order() {
        let mut store = TagStore::new();
        for name in ["z", "a", "m"] {
            store.add(name);
        }
        let names: Vec<_> = (&store).into_iter().map(Tag::name).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }
}
