use serde::{Deserialize, Serialize};

use forge_hash::hash_bytes;
use forge_merkle::{build_tree, MerkleTree};

/// Inclusive range of global atom indices a block covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomRange {
    pub start: u64,
    pub end: u64,
}

/// A sealed Merkle block over a contiguous slice of a chain's atoms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub root: String,
    /// Tree layers bottom-up. Rebuildable from the covered atoms, so this is
    /// `None` on shapes that have been exported or otherwise stripped of
    /// proving material (see `forge-chain::export`).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub layers: Option<Vec<Vec<String>>>,
    pub atom_count: u64,
    pub atom_range: AtomRange,
    pub prev_block: String,
    pub block_hash: String,
    pub created_at: i64,
}

fn compute_block_hash(root: &str, prev_block: &str, created_at: i64) -> String {
    hash_bytes(format!("{root}{prev_block}{created_at}").as_bytes())
}

impl Block {
    /// Seal `leaf_proofs` (the atom `proof` hashes in chain order, for the
    /// half-open suffix `[atom_range.start, atom_range.end]`) into a new
    /// block chained onto `prev_block`.
    pub fn seal(
        leaf_proofs: &[String],
        atom_range: AtomRange,
        prev_block: String,
        created_at: i64,
    ) -> Self {
        let MerkleTree { root, layers } = build_tree(leaf_proofs);
        let block_hash = compute_block_hash(&root, &prev_block, created_at);

        Self {
            root,
            layers: Some(layers),
            atom_count: leaf_proofs.len() as u64,
            atom_range,
            prev_block,
            block_hash,
            created_at,
        }
    }

    /// Recompute `block_hash` from the other fields, e.g. to validate a
    /// block loaded from storage.
    pub fn recompute_hash(&self) -> String {
        compute_block_hash(&self.root, &self.prev_block, self.created_at)
    }
}
