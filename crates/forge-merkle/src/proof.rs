use serde::{Deserialize, Serialize};

use forge_hash::hash_bytes;

/// Which side a sibling hash sits on when folding a proof step into the
/// running digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

/// One step in a Merkle inclusion proof: a sibling hash plus which side it
/// sits on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub hash: String,
    pub direction: Direction,
}

/// Fold a leaf hash up through a proof path and return the resulting root
/// candidate.
fn fold(leaf_hash: &str, path: &[ProofStep]) -> String {
    let mut current = leaf_hash.to_string();
    for step in path {
        let combined = match step.direction {
            Direction::Left => format!("{}{}", step.hash, current),
            Direction::Right => format!("{}{}", current, step.hash),
        };
        current = hash_bytes(combined.as_bytes());
    }
    current
}

/// Verify that folding `proof` from `leaf_hash` reproduces `expected_root`.
pub fn verify_merkle_proof(leaf_hash: &str, proof: &[ProofStep], expected_root: &str) -> bool {
    fold(leaf_hash, proof) == expected_root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_means_leaf_is_root() {
        assert!(verify_merkle_proof("abc", &[], "abc"));
    }
}
