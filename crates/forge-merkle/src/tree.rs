use forge_hash::hash;

use crate::error::MerkleError;
use crate::proof::{Direction, ProofStep};

/// A binary Merkle tree built over a sequence of leaf hashes (in FORGE,
/// always an atom's `proof` field, in chain order).
///
/// `layers[0]` is the leaf sequence, `layers.last()` is `[root]`. Each layer
/// is stored at its *natural* width — an odd-length layer is not padded in
/// storage; the duplicate-last-node rule is applied transiently when
/// deriving the next layer and again when deriving a proof, mirroring the
/// build step exactly so the two stay consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    pub root: String,
    pub layers: Vec<Vec<String>>,
}

fn hash_pair(left: &str, right: &str) -> String {
    hash(&format!("{left}{right}"))
}

/// Build a tree over `leaves`. An empty slice yields the fixed root
/// `hash("empty")` and a single empty layer; a single leaf yields that leaf
/// as the root.
pub fn build_tree(leaves: &[String]) -> MerkleTree {
    if leaves.is_empty() {
        return MerkleTree {
            root: hash(&"empty".to_string()),
            layers: vec![Vec::new()],
        };
    }

    if leaves.len() == 1 {
        return MerkleTree {
            root: leaves[0].clone(),
            layers: vec![leaves.to_vec()],
        };
    }

    let mut layers = vec![leaves.to_vec()];
    let mut current = leaves.to_vec();

    while current.len() > 1 {
        let mut padded = current.clone();
        if padded.len() % 2 != 0 {
            let last = padded.last().cloned().expect("non-empty by loop guard");
            padded.push(last);
        }

        let parent: Vec<String> = padded
            .chunks(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();

        layers.push(parent.clone());
        current = parent;
    }

    let root = layers.last().and_then(|l| l.first()).cloned().expect("root always present");

    MerkleTree { root, layers }
}

/// Derive an inclusion proof for the leaf at `leaf_index` against `layers`
/// (as produced by [`build_tree`]).
pub fn get_merkle_proof(
    layers: &[Vec<String>],
    leaf_index: usize,
) -> Result<Vec<ProofStep>, MerkleError> {
    let leaf_count = layers.first().map(|l| l.len()).unwrap_or(0);
    if leaf_index >= leaf_count {
        return Err(MerkleError::IndexOutOfRange {
            index: leaf_index,
            len: leaf_count,
        });
    }

    let mut path = Vec::new();
    let mut index = leaf_index;

    for level in &layers[..layers.len().saturating_sub(1)] {
        let sibling_index = if index % 2 == 0 { index + 1 } else { index - 1 };
        let direction = if index % 2 == 0 {
            Direction::Right
        } else {
            Direction::Left
        };
        let sibling_hash = level
            .get(sibling_index)
            .cloned()
            .unwrap_or_else(|| level[index].clone());

        path.push(ProofStep {
            hash: sibling_hash,
            direction,
        });

        index /= 2;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::verify_merkle_proof;

    fn leaves(n: usize) -> Vec<String> {
        (0..n).map(|i| hash(&format!("leaf-{i}"))).collect()
    }

    #[test]
    fn empty_tree_has_fixed_root() {
        let tree = build_tree(&[]);
        assert_eq!(tree.root, hash(&"empty".to_string()));
        assert_eq!(tree.layers, vec![Vec::<String>::new()]);
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        let l = leaves(1);
        let tree = build_tree(&l);
        assert_eq!(tree.root, l[0]);
    }

    #[test]
    fn eight_leaf_proof_has_three_steps_and_verifies() {
        let l = leaves(8);
        let tree = build_tree(&l);
        let proof = get_merkle_proof(&tree.layers, 3).unwrap();
        assert_eq!(proof.len(), 3);
        assert!(verify_merkle_proof(&l[3], &proof, &tree.root));
    }

    #[test]
    fn odd_leaf_count_self_pairs_correctly() {
        let l = leaves(5);
        let tree = build_tree(&l);
        for (i, leaf) in l.iter().enumerate() {
            let proof = get_merkle_proof(&tree.layers, i).unwrap();
            assert!(
                verify_merkle_proof(leaf, &proof, &tree.root),
                "proof failed for leaf {i}"
            );
        }
    }

    #[test]
    fn tampered_leaf_fails_verification() {
        let l = leaves(4);
        let tree = build_tree(&l);
        let proof = get_merkle_proof(&tree.layers, 0).unwrap();
        let wrong_leaf = hash(&"not-the-real-leaf".to_string());
        assert!(!verify_merkle_proof(&wrong_leaf, &proof, &tree.root));
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let l = leaves(4);
        let tree = build_tree(&l);
        assert!(get_merkle_proof(&tree.layers, 4).is_err());
    }
}
