use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use forge_atom::{create_atom, Atom, Prev};
use forge_merkle::{build_tree, get_merkle_proof, verify_merkle_proof, ProofStep};

use crate::block::{AtomRange, Block};
use crate::error::ChainError;

/// The result of [`Chain::prove_atom`]: everything a third party needs to
/// independently re-verify that one atom was included in a sealed block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomProof {
    pub atom: Atom,
    pub merkle_proof: Vec<ProofStep>,
    pub merkle_root: String,
    pub block_hash: String,
}

/// An append-only ordered sequence of atoms plus the blocks sealed over
/// them.
///
/// Owns its atoms and blocks directly — there is deliberately no
/// process-global singleton; callers construct one `Chain` per identity and
/// hand it to whichever components need it (the store, the OTS client).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    owner: String,
    atoms: Vec<Atom>,
    blocks: Vec<Block>,
}

impl Chain {
    /// Start a new, empty chain owned by `owner` (an identity label, e.g.
    /// an email or hostname — hashed into every atom's `who` field).
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            atoms: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Record one operation as a new atom, chained onto the current tip.
    pub fn record(&mut self, action: &str, from: &Value, to: &Value) -> &Atom {
        let prev = match self.atoms.last() {
            Some(tip) => Prev::single(tip.proof.clone()),
            None => Prev::Genesis,
        };

        let atom = create_atom(&self.owner, from, action, to, prev);
        self.atoms.push(atom);
        self.atoms.last().expect("just pushed")
    }

    /// Seal the suffix of atoms not yet covered by any block into a new
    /// block. Returns `None` if there is nothing new to seal.
    pub fn seal(&mut self) -> Option<&Block> {
        let block = seal_suffix(&self.atoms, &self.blocks, Utc::now().timestamp_millis())?;
        self.blocks.push(block);
        self.blocks.last()
    }

    /// Build a selective-disclosure proof for the atom at `global_index`, if
    /// it has been sealed into a block. Returns `None` if the index is not
    /// yet covered by any block (`NotSealed`, per the spec's error design).
    pub fn prove_atom(&self, global_index: u64) -> Option<AtomProof> {
        prove_atom_in(&self.atoms, &self.blocks, global_index)
    }

    /// Look up a block by the global atom index it contains, if any.
    pub fn block_for_atom(&self, global_index: u64) -> Result<&Block, ChainError> {
        self.blocks
            .iter()
            .find(|b| b.atom_range.start <= global_index && global_index <= b.atom_range.end)
            .ok_or(ChainError::BlockNotFound(global_index))
    }
}

/// Seal the suffix of `atoms` not yet covered by any of `blocks`.
///
/// A free function over slices so a store-backed caller (no in-memory
/// [`Chain`]) can seal without duplicating this logic — [`Chain::seal`]
/// delegates here.
pub fn seal_suffix(atoms: &[Atom], blocks: &[Block], created_at: i64) -> Option<Block> {
    let start = blocks.last().map(|b| b.atom_range.end + 1).unwrap_or(0);
    let end = atoms.len().checked_sub(1)? as u64;

    if start > end {
        return None;
    }

    let leaf_proofs: Vec<String> = atoms[start as usize..=end as usize]
        .iter()
        .map(|a| a.proof.clone())
        .collect();

    let prev_block = blocks
        .last()
        .map(|b| b.block_hash.clone())
        .unwrap_or_else(|| "genesis".to_string());

    Some(Block::seal(&leaf_proofs, AtomRange { start, end }, prev_block, created_at))
}

/// Build a selective-disclosure proof for `global_index` against `atoms`
/// and `blocks`, rebuilding a block's Merkle layers from its covered atoms
/// when they weren't persisted. `Chain::prove_atom` delegates here.
pub fn prove_atom_in(atoms: &[Atom], blocks: &[Block], global_index: u64) -> Option<AtomProof> {
    let block = blocks
        .iter()
        .find(|b| b.atom_range.start <= global_index && global_index <= b.atom_range.end)?;

    let local_index = (global_index - block.atom_range.start) as usize;

    let layers = match &block.layers {
        Some(layers) => layers.clone(),
        None => {
            let covered: Vec<String> = atoms
                [block.atom_range.start as usize..=block.atom_range.end as usize]
                .iter()
                .map(|a| a.proof.clone())
                .collect();
            build_tree(&covered).layers
        }
    };

    let merkle_proof = get_merkle_proof(&layers, local_index).ok()?;
    let atom = atoms[global_index as usize].clone();

    Some(AtomProof {
        atom,
        merkle_proof,
        merkle_root: block.root.clone(),
        block_hash: block.block_hash.clone(),
    })
}

/// Verify a leaf/proof/root triple. A thin delegation to the Merkle
/// verifier, kept here so callers can verify without importing
/// `forge-merkle` directly.
pub fn verify_proof(leaf_hash: &str, proof: &[ProofStep], expected_root: &str) -> bool {
    verify_merkle_proof(leaf_hash, proof, expected_root)
}
