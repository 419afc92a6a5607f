use std::ops::Range;

use serde_json::Value;

use forge_atom::Atom;
use forge_chain::Block;

use crate::error::StoreError;
use crate::model::{ActionEntry, ExportedChain, HistoryEntry};

/// Persistence contract for a single chain's atoms, blocks, and plaintext
/// sidecar, independent of backing medium.
///
/// Witness receipts are a separate concern, covered by
/// [`forge_witness::WitnessHierarchy`] — a store implementation is expected
/// to implement both traits.
pub trait Store {
    fn append_atom(&mut self, atom: Atom) -> Result<u64, StoreError>;
    fn get_atoms(&self, range: Range<u64>) -> Result<Vec<Atom>, StoreError>;
    fn get_atom(&self, index: u64) -> Result<Option<Atom>, StoreError>;
    fn atom_count(&self) -> u64;

    /// The tip atom's `proof`, or the genesis marker if the chain is empty.
    fn last_proof(&self) -> String;

    fn append_block(&mut self, block: Block) -> Result<u64, StoreError>;
    fn get_blocks(&self) -> Result<Vec<Block>, StoreError>;

    fn save_action(
        &mut self,
        action_hash: &str,
        plaintext: &str,
        metadata: Value,
    ) -> Result<(), StoreError>;
    fn get_action(&self, action_hash: &str) -> Result<Option<ActionEntry>, StoreError>;

    /// The last `limit` atoms, oldest first, each joined against its
    /// plaintext sidecar entry if one was recorded.
    fn get_history(&self, limit: usize) -> Result<Vec<HistoryEntry>, StoreError>;

    fn export_all(&self) -> Result<ExportedChain, StoreError>;
    fn import_chain(&mut self, data: ExportedChain) -> Result<(), StoreError>;
}
