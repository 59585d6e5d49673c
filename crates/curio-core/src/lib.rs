//! Curio Core - Foundational types for Curio asset metadata
//!
//! This crate provides the types every other Curio crate depends on:
//! - `DataId` - Stable identities, also used as file block addresses
//! - `ContentHash` - SHA-256 based checksums for saved files
//! - Bounded names and collision-free name disambiguation
//! - Error types and Result alias

mod error;
mod hash;
mod id;
pub mod name;

pub use error::{CurioError, Result};
pub use hash::ContentHash;
pub use id::DataId;
pub use name::{truncate_name, unique_name, MAX_NAME, NAME_DELIMITER};
