use serde::{Deserialize, Serialize};
use serde_json::Value;

use forge_atom::Atom;
use forge_chain::Block;

const CHAIN_DOCUMENT_VERSION: u32 = 1;
const ACTIONS_DOCUMENT_VERSION: u32 = 1;

/// On-disk shape of `chain.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainDocument {
    pub version: u32,
    pub created_at: i64,
    pub owner: String,
    pub atoms: Vec<Atom>,
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub meta: Value,
}

impl ChainDocument {
    pub fn empty(owner: impl Into<String>, created_at: i64) -> Self {
        Self {
            version: CHAIN_DOCUMENT_VERSION,
            created_at,
            owner: owner.into(),
            atoms: Vec::new(),
            blocks: Vec::new(),
            meta: Value::Object(Default::default()),
        }
    }
}

/// One plaintext-sidecar entry, keyed by action hash in [`ActionsDocument::entries`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEntry {
    pub plaintext: String,
    pub recorded_at: i64,
    #[serde(default)]
    pub metadata: Value,
}

/// On-disk shape of `actions.json`. Never exported — see
/// [`crate::ExportedChain`], which carries only hashes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsDocument {
    pub version: u32,
    pub note: String,
    pub created_at: i64,
    #[serde(default)]
    pub entries: std::collections::BTreeMap<String, ActionEntry>,
}

impl ActionsDocument {
    pub fn empty(created_at: i64) -> Self {
        Self {
            version: ACTIONS_DOCUMENT_VERSION,
            note: "LOCAL ONLY — do not share. Plaintext action descriptions, never exported."
                .to_string(),
            created_at,
            entries: std::collections::BTreeMap::new(),
        }
    }
}

/// One row of `Store::get_history`: a chain atom joined against its
/// plaintext sidecar entry, if one was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub index: u64,
    pub when: i64,
    pub proof: String,
    pub action_hash: String,
    pub action_text: Option<String>,
}

/// The export-format document: atoms and blocks stripped of any local-only
/// fields (plaintext, Merkle layers), suitable for handing to a verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedChain {
    pub identity_hash: String,
    pub atom_count: u64,
    pub block_count: u64,
    pub atoms: Vec<Atom>,
    pub blocks: Vec<Block>,
    pub exported_at: i64,
}
