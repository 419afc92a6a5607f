use serde::{Deserialize, Serialize};

use crate::atom::Atom;

/// A single reason a chain verification can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationFailure {
    /// An atom's stored `proof` does not match its recomputed proof.
    ProofMismatch,
    /// An atom's `prev` does not name its predecessor's `proof`.
    ChainBreak,
    /// An atom's `when` is earlier than its predecessor's.
    TimeReversal,
}

/// Structured result of verifying a chain of atoms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainVerification {
    pub valid: bool,
    /// Index of the first failing atom, or `-1` if `valid` (or the chain is
    /// empty).
    pub broken_at: i64,
    pub reason: Option<VerificationFailure>,
}

impl ChainVerification {
    fn ok() -> Self {
        Self {
            valid: true,
            broken_at: -1,
            reason: None,
        }
    }

    fn failure(index: usize, reason: VerificationFailure) -> Self {
        Self {
            valid: false,
            broken_at: index as i64,
            reason: Some(reason),
        }
    }
}

/// Recompute `atom`'s proof and compare it against the stored value.
pub fn verify_atom(atom: &Atom) -> bool {
    atom.proof == atom.recompute_proof()
}

/// Verify an ordered sequence of atoms end to end.
///
/// Checks, per atom in order: self-consistency (`ProofMismatch`), linkage
/// against the predecessor (`ChainBreak`, for every atom after the first),
/// and non-decreasing timestamps (`TimeReversal`). Returns the *first*
/// failure encountered; an empty sequence is vacuously valid.
pub fn verify_chain(atoms: &[Atom]) -> ChainVerification {
    for (i, atom) in atoms.iter().enumerate() {
        if !verify_atom(atom) {
            return ChainVerification::failure(i, VerificationFailure::ProofMismatch);
        }

        if i > 0 {
            let predecessor = &atoms[i - 1];
            if !atom.prev.contains(&predecessor.proof) {
                return ChainVerification::failure(i, VerificationFailure::ChainBreak);
            }
            if atom.when < predecessor.when {
                return ChainVerification::failure(i, VerificationFailure::TimeReversal);
            }
        }
    }

    ChainVerification::ok()
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::atom::create_atom;
    use crate::prev::Prev;

    fn build_chain(actions: &[&str]) -> Vec<Atom> {
        let mut atoms = Vec::new();
        let mut prev = Prev::Genesis;
        for action in actions {
            let atom = create_atom(
                "ops@example.com",
                &Value::String("s0".into()),
                action,
                &Value::String("s1".into()),
                prev,
            );
            prev = Prev::single(atom.proof.clone());
            atoms.push(atom);
        }
        atoms
    }

    #[test]
    fn empty_chain_is_valid() {
        let result = verify_chain(&[]);
        assert!(result.valid);
        assert_eq!(result.broken_at, -1);
    }

    #[test]
    fn five_atom_chain_verifies() {
        let atoms = build_chain(&[
            "apt update",
            "install nginx",
            "configure firewall",
            "deploy app",
            "enable ssl",
        ]);
        assert!(verify_chain(&atoms).valid);
    }

    #[test]
    fn mutated_action_breaks_at_mutated_index() {
        let mut atoms = build_chain(&[
            "apt update",
            "install nginx",
            "configure firewall",
            "deploy app",
            "enable ssl",
        ]);
        atoms[2].action = forge_hash::hash(&"something else".to_string());

        let result = verify_chain(&atoms);
        assert!(!result.valid);
        assert_eq!(result.broken_at, 2);
        assert_eq!(result.reason, Some(VerificationFailure::ProofMismatch));
    }

    #[test]
    fn broken_linkage_is_detected() {
        let mut atoms = build_chain(&["a", "b", "c"]);
        // Sever the link without touching proof/content of atom 1 itself.
        atoms[1].prev = Prev::single("not-the-real-predecessor");
        atoms[1].proof = atoms[1].recompute_proof();

        let result = verify_chain(&atoms);
        assert!(!result.valid);
        assert_eq!(result.broken_at, 1);
        assert_eq!(result.reason, Some(VerificationFailure::ChainBreak));
    }

    #[test]
    fn time_reversal_is_detected() {
        let mut atoms = build_chain(&["a", "b"]);
        atoms[1].when = atoms[0].when - 1_000;
        atoms[1].proof = atoms[1].recompute_proof();

        let result = verify_chain(&atoms);
        assert!(!result.valid);
        assert_eq!(result.broken_at, 1);
        assert_eq!(result.reason, Some(VerificationFailure::TimeReversal));
    }
}
