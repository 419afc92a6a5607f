//! Persistence for a FORGE chain: atoms, sealed blocks, the plaintext
//! action sidecar, and witness receipts.
//!
//! [`Store`] is the abstract contract; [`FileStore`] realises it on disk
//! with atomic (write-temp-then-rename) writes, and [`InMemoryStore`] is a
//! zero-I/O implementation for tests and embedding. Both also implement
//! [`forge_witness::WitnessHierarchy`], since witness persistence shares
//! the same root directory / same in-process map as the chain itself.

mod atomic;
mod error;
mod file;
mod memory;
mod model;
mod path;
mod store;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use model::{ActionEntry, ActionsDocument, ChainDocument, ExportedChain, HistoryEntry};
pub use path::default_store_root;
pub use store::Store;
