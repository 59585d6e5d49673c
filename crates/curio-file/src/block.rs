//! Block and list header definitions

use curio_core::DataId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared kind of a block, stored as a short code in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructKind {
    /// A content item that may carry asset metadata
    #[serde(rename = "ID")]
    Item,
    #[serde(rename = "AS")]
    AssetMetadata,
    #[serde(rename = "TG")]
    Tag,
    /// Raw string data
    #[serde(rename = "DATA")]
    Data,
}

impl StructKind {
    /// The code written to the file for this kind
    pub fn code(&self) -> &'static str {
        match self {
            StructKind::Item => "ID",
            StructKind::AssetMetadata => "AS",
            StructKind::Tag => "TG",
            StructKind::Data => "DATA",
        }
    }
}

impl fmt::Display for StructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single addressed record in a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub kind: StructKind,
    pub address: DataId,
    pub payload: toml::Value,
}

/// Header of a linked list stored inside an owning record.
///
/// Only the ends are stored; the elements carry their own `prev`/`next` links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<DataId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<DataId>,
}

impl ListBase {
    /// Build the header and per-element `(prev, next)` links for elements
    /// written in the order of `addresses`
    pub fn link(addresses: &[DataId]) -> (Self, Vec<(Option<DataId>, Option<DataId>)>) {
        let header = ListBase {
            first: addresses.first().copied(),
            last: addresses.last().copied(),
        };

        let links = (0..addresses.len())
            .map(|i| {
                let prev = i.checked_sub(1).map(|p| addresses[p]);
                let next = addresses.get(i + 1).copied();
                (prev, next)
            })
            .collect();

        (header, links)
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

/// A record that is an element of an on-disk linked list
pub trait Linked {
    /// Kind every element of the list must have
    const KIND: StructKind;

    fn prev(&self) -> Option<DataId>;
    fn next(&self) -> Option<DataId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_empty() {
        let (header, links) = ListBase::link(&[]);
        assert!(header.is_empty());
        assert_eq!(header.last, None);
        assert!(links.is_empty());
    }

    #[test]
    fn test_link_three() {
        let ids = [DataId::from_raw(1), DataId::from_raw(2), DataId::from_raw(3)];
        let (header, links) = ListBase::link(&ids);

        assert_eq!(header.first, Some(ids[0]));
        assert_eq!(header.last, Some(ids[2]));
        assert_eq!(links[0], (None, Some(ids[1])));
        assert_eq!(links[1], (Some(ids[0]), Some(ids[2])));
        assert_eq!(links[2], (Some(ids[1]), None));
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(StructKind::AssetMetadata.to_string(), "AS");
        assert_eq!(StructKind::Data.code(), "DATA");
    }
}
