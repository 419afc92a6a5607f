use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

use serde_json::Value;

use forge_atom::Atom;
use forge_chain::Block;
use forge_witness::{Receipt, WitnessHierarchy};

use crate::error::StoreError;
use crate::model::{ActionEntry, ExportedChain, HistoryEntry};
use crate::store::Store;

/// An entirely in-process [`Store`] + [`WitnessHierarchy`]. No file ever
/// touches disk — useful for tests and for embedding FORGE in a host
/// process that defers persistence to its own layer, grounded in the same
/// "owned aggregate, no global singleton" shape as [`forge_chain::Chain`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    owner: String,
    atoms: Vec<Atom>,
    blocks: Vec<Block>,
    actions: BTreeMap<String, ActionEntry>,
    witnesses: HashMap<String, Vec<Receipt>>,
}

impl InMemoryStore {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            ..Self::default()
        }
    }
}

impl Store for InMemoryStore {
    fn append_atom(&mut self, atom: Atom) -> Result<u64, StoreError> {
        self.atoms.push(atom);
        Ok(self.atoms.len() as u64 - 1)
    }

    fn get_atoms(&self, range: Range<u64>) -> Result<Vec<Atom>, StoreError> {
        let start = range.start as usize;
        let end = (range.end as usize).min(self.atoms.len());
        Ok(self.atoms.get(start.min(end)..end).unwrap_or_default().to_vec())
    }

    fn get_atom(&self, index: u64) -> Result<Option<Atom>, StoreError> {
        Ok(self.atoms.get(index as usize).cloned())
    }

    fn atom_count(&self) -> u64 {
        self.atoms.len() as u64
    }

    fn last_proof(&self) -> String {
        self.atoms
            .last()
            .map(|a| a.proof.clone())
            .unwrap_or_else(|| "genesis".to_string())
    }

    fn append_block(&mut self, block: Block) -> Result<u64, StoreError> {
        self.blocks.push(block);
        Ok(self.blocks.len() as u64 - 1)
    }

    fn get_blocks(&self) -> Result<Vec<Block>, StoreError> {
        Ok(self.blocks.clone())
    }

    fn save_action(
        &mut self,
        action_hash: &str,
        plaintext: &str,
        metadata: Value,
    ) -> Result<(), StoreError> {
        self.actions.insert(
            action_hash.to_string(),
            ActionEntry {
                plaintext: plaintext.to_string(),
                recorded_at: chrono::Utc::now().timestamp_millis(),
                metadata,
            },
        );
        Ok(())
    }

    fn get_action(&self, action_hash: &str) -> Result<Option<ActionEntry>, StoreError> {
        Ok(self.actions.get(action_hash).cloned())
    }

    fn get_history(&self, limit: usize) -> Result<Vec<HistoryEntry>, StoreError> {
        let start = self.atoms.len().saturating_sub(limit);
        Ok(self.atoms[start..]
            .iter()
            .enumerate()
            .map(|(offset, atom)| HistoryEntry {
                index: (start + offset) as u64,
                when: atom.when,
                proof: atom.proof.clone(),
                action_hash: atom.action.clone(),
                action_text: self.actions.get(&atom.action).map(|e| e.plaintext.clone()),
            })
            .collect())
    }

    fn export_all(&self) -> Result<ExportedChain, StoreError> {
        Ok(ExportedChain {
            identity_hash: forge_hash::hash(&self.owner),
            atom_count: self.atoms.len() as u64,
            block_count: self.blocks.len() as u64,
            atoms: self.atoms.clone(),
            blocks: self
                .blocks
                .iter()
                .cloned()
                .map(|mut b| {
                    b.layers = None;
                    b
                })
                .collect(),
            exported_at: chrono::Utc::now().timestamp_millis(),
        })
    }

    fn import_chain(&mut self, data: ExportedChain) -> Result<(), StoreError> {
        self.atoms = data.atoms;
        self.blocks = data.blocks;
        Ok(())
    }
}

impl WitnessHierarchy for InMemoryStore {
    fn save_witness(&mut self, root: &str, receipt: Receipt) {
        self.witnesses.entry(root.to_string()).or_default().push(receipt);
    }

    fn load_witnesses(&self, root: &str) -> Vec<Receipt> {
        self.witnesses.get(root).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use forge_atom::{create_atom, Prev};

    fn atom(action: &str) -> Atom {
        create_atom("ops", &Value::Null, action, &Value::Null, Prev::Genesis)
    }

    #[test]
    fn append_and_read_back_atoms() {
        let mut store = InMemoryStore::new("ops");
        store.append_atom(atom("a")).unwrap();
        store.append_atom(atom("b")).unwrap();

        assert_eq!(store.atom_count(), 2);
        assert_eq!(store.get_atoms(0..2).unwrap().len(), 2);
        assert!(store.get_atom(5).unwrap().is_none());
    }

    #[test]
    fn last_proof_defaults_to_genesis() {
        let store = InMemoryStore::new("ops");
        assert_eq!(store.last_proof(), "genesis");
    }

    #[test]
    fn history_joins_plaintext_sidecar() {
        let mut store = InMemoryStore::new("ops");
        let a = atom("apt update");
        let action_hash = a.action.clone();
        store.append_atom(a).unwrap();
        store
            .save_action(&action_hash, "apt update", Value::Null)
            .unwrap();

        let history = store.get_history(10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action_text.as_deref(), Some("apt update"));
    }

    #[test]
    fn export_strips_merkle_layers() {
        let mut store = InMemoryStore::new("ops");
        store.append_atom(atom("a")).unwrap();
        let block = forge_chain::Block::seal(
            &[store.get_atom(0).unwrap().unwrap().proof],
            forge_chain::AtomRange { start: 0, end: 0 },
            "genesis".to_string(),
            0,
        );
        store.append_block(block).unwrap();

        let exported = store.export_all().unwrap();
        assert!(exported.blocks[0].layers.is_none());
    }
}
