use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use tracing::warn;

use forge_atom::Atom;
use forge_chain::Block;
use forge_witness::{Receipt, WitnessHierarchy};

use crate::atomic::write_atomic;
use crate::error::StoreError;
use crate::model::{ActionEntry, ActionsDocument, ChainDocument, ExportedChain, HistoryEntry};
use crate::store::Store;

fn chain_path(root: &Path) -> PathBuf {
    root.join("chain.json")
}

fn actions_path(root: &Path) -> PathBuf {
    root.join("actions.json")
}

fn witness_path(root: &Path, merkle_root: &str) -> PathBuf {
    root.join("witnesses").join(format!("{merkle_root}.json"))
}

fn load_or_default<T: serde::de::DeserializeOwned>(path: &Path, label: &str, default: T) -> T {
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(path = %path.display(), label, error = %e, "discarding corrupt store file, starting fresh");
                default
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => default,
        Err(e) => {
            warn!(path = %path.display(), label, error = %e, "failed to read store file, starting fresh");
            default
        }
    }
}

/// A [`Store`] + [`WitnessHierarchy`] backed by JSON files under a root
/// directory, matching the persisted-state layout: `chain.json`,
/// `actions.json`, and one `witnesses/<merkle_root>.json` per witnessed
/// root. Every write goes through [`write_atomic`] — a reader never
/// observes a half-written file.
///
/// The full chain and actions documents are held resident in memory and
/// rewritten wholesale on every mutation. Witness entries are the
/// exception: read-modify-write per root, since each root's file is
/// independent of the others.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    chain: ChainDocument,
    actions: ActionsDocument,
}

impl FileStore {
    /// Open (or initialise) a store rooted at `root`, owned by `owner`.
    /// `owner` is only used the first time a store is created at this
    /// path — an existing `chain.json` keeps its recorded owner.
    pub fn open(root: impl Into<PathBuf>, owner: &str) -> Self {
        let root = root.into();
        let now = Utc::now().timestamp_millis();

        let chain = load_or_default(&chain_path(&root), "chain.json", ChainDocument::empty(owner, now));
        let actions = load_or_default(&actions_path(&root), "actions.json", ActionsDocument::empty(now));

        Self { root, chain, actions }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn owner(&self) -> &str {
        &self.chain.owner
    }

    fn persist_chain(&self) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&self.chain)?;
        write_atomic(&chain_path(&self.root), &bytes)
    }

    fn persist_actions(&self) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&self.actions)?;
        write_atomic(&actions_path(&self.root), &bytes)
    }
}

impl Store for FileStore {
    fn append_atom(&mut self, atom: Atom) -> Result<u64, StoreError> {
        self.chain.atoms.push(atom);
        self.persist_chain()?;
        Ok(self.chain.atoms.len() as u64 - 1)
    }

    fn get_atoms(&self, range: Range<u64>) -> Result<Vec<Atom>, StoreError> {
        let start = (range.start as usize).min(self.chain.atoms.len());
        let end = (range.end as usize).min(self.chain.atoms.len());
        Ok(self.chain.atoms.get(start.min(end)..end).unwrap_or_default().to_vec())
    }

    fn get_atom(&self, index: u64) -> Result<Option<Atom>, StoreError> {
        Ok(self.chain.atoms.get(index as usize).cloned())
    }

    fn atom_count(&self) -> u64 {
        self.chain.atoms.len() as u64
    }

    fn last_proof(&self) -> String {
        self.chain
            .atoms
            .last()
            .map(|a| a.proof.clone())
            .unwrap_or_else(|| "genesis".to_string())
    }

    fn append_block(&mut self, block: Block) -> Result<u64, StoreError> {
        self.chain.blocks.push(block);
        self.persist_chain()?;
        Ok(self.chain.blocks.len() as u64 - 1)
    }

    fn get_blocks(&self) -> Result<Vec<Block>, StoreError> {
        Ok(self.chain.blocks.clone())
    }

    fn save_action(
        &mut self,
        action_hash: &str,
        plaintext: &str,
        metadata: Value,
    ) -> Result<(), StoreError> {
        self.actions.entries.insert(
            action_hash.to_string(),
            ActionEntry {
                plaintext: plaintext.to_string(),
                recorded_at: Utc::now().timestamp_millis(),
                metadata,
            },
        );
        self.persist_actions()
    }

    fn get_action(&self, action_hash: &str) -> Result<Option<ActionEntry>, StoreError> {
        Ok(self.actions.entries.get(action_hash).cloned())
    }

    fn get_history(&self, limit: usize) -> Result<Vec<HistoryEntry>, StoreError> {
        let start = self.chain.atoms.len().saturating_sub(limit);
        Ok(self.chain.atoms[start..]
            .iter()
            .enumerate()
            .map(|(offset, atom)| HistoryEntry {
                index: (start + offset) as u64,
                when: atom.when,
                proof: atom.proof.clone(),
                action_hash: atom.action.clone(),
                action_text: self
                    .actions
                    .entries
                    .get(&atom.action)
                    .map(|e| e.plaintext.clone()),
            })
            .collect())
    }

    fn export_all(&self) -> Result<ExportedChain, StoreError> {
        Ok(ExportedChain {
            identity_hash: forge_hash::hash(&self.chain.owner),
            atom_count: self.chain.atoms.len() as u64,
            block_count: self.chain.blocks.len() as u64,
            atoms: self.chain.atoms.clone(),
            blocks: self
                .chain
                .blocks
                .iter()
                .cloned()
                .map(|mut b| {
                    b.layers = None;
                    b
                })
                .collect(),
            exported_at: Utc::now().timestamp_millis(),
        })
    }

    fn import_chain(&mut self, data: ExportedChain) -> Result<(), StoreError> {
        self.chain.atoms = data.atoms;
        self.chain.blocks = data.blocks;
        self.persist_chain()
    }
}

impl WitnessHierarchy for FileStore {
    fn save_witness(&mut self, root: &str, receipt: Receipt) {
        let path = witness_path(&self.root, root);
        let mut receipts: Vec<Receipt> = load_or_default(&path, "witness", Vec::new());
        receipts.push(receipt);

        match serde_json::to_vec_pretty(&receipts) {
            Ok(bytes) => {
                if let Err(e) = write_atomic(&path, &bytes) {
                    warn!(root, error = %e, "failed to persist witness receipt");
                }
            }
            Err(e) => warn!(root, error = %e, "failed to serialise witness receipt"),
        }
    }

    fn load_witnesses(&self, root: &str) -> Vec<Receipt> {
        load_or_default(&witness_path(&self.root, root), "witness", Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tempfile::tempdir;

    use super::*;
    use forge_atom::{create_atom, Prev};

    #[test]
    fn round_trips_atoms_through_a_fresh_directory() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::open(dir.path(), "ops@example.com");

        let atom = create_atom("ops", &Value::Null, "apt update", &Value::Null, Prev::Genesis);
        store.append_atom(atom.clone()).unwrap();

        let reopened = FileStore::open(dir.path(), "ops@example.com");
        assert_eq!(reopened.atom_count(), 1);
        assert_eq!(reopened.get_atom(0).unwrap().unwrap().proof, atom.proof);
    }

    #[test]
    fn missing_store_starts_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("does-not-exist-yet"), "ops");
        assert_eq!(store.atom_count(), 0);
        assert_eq!(store.last_proof(), "genesis");
    }

    #[test]
    fn corrupt_chain_file_recovers_to_empty_state() {
        let dir = tempdir().unwrap();
        fs::write(chain_path(dir.path()), b"{ not json").unwrap();

        let store = FileStore::open(dir.path(), "ops");
        assert_eq!(store.atom_count(), 0);
    }

    #[test]
    fn witness_receipts_persist_across_reopen() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::open(dir.path(), "ops");
        store.save_witness(
            "root-hash",
            Receipt::Bilateral {
                merkle_root: "root-hash".into(),
                counterparty: "ops@x".into(),
                created_at: 0,
                receipt_hash: forge_witness::bilateral_receipt_hash("root-hash", "ops@x", 0),
            },
        );

        let reopened = FileStore::open(dir.path(), "ops");
        assert_eq!(reopened.load_witnesses("root-hash").len(), 1);
        assert!(reopened.load_witnesses("unknown-root").is_empty());
    }

    #[test]
    fn save_action_joins_into_history() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::open(dir.path(), "ops");

        let atom = create_atom("ops", &Value::Null, "apt update", &Value::Null, Prev::Genesis);
        let action_hash = atom.action.clone();
        store.append_atom(atom).unwrap();
        store.save_action(&action_hash, "apt update", Value::Null).unwrap();

        let history = store.get_history(10).unwrap();
        assert_eq!(history[0].action_text.as_deref(), Some("apt update"));
    }
}
