use serde::{Deserialize, Serialize};

use forge_atom::Atom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivergenceReason {
    /// The two chains recorded different actions or state at the same index.
    ContentMismatch,
    /// The chains agree everywhere they overlap but have different lengths.
    LengthMismatch,
}

/// Result of comparing two atom sequences for bilateral dispute resolution.
///
/// Timestamps are reported for context but never participate in the
/// equality test — two honest parties may time-stamp the same action
/// microseconds apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divergence {
    pub diverged: bool,
    pub at_index: Option<u64>,
    pub reason: Option<DivergenceReason>,
    pub action_match: Option<bool>,
    pub state_match: Option<bool>,
    pub when_a: Option<i64>,
    pub when_b: Option<i64>,
}

impl Divergence {
    fn none() -> Self {
        Self {
            diverged: false,
            at_index: None,
            reason: None,
            action_match: None,
            state_match: None,
            when_a: None,
            when_b: None,
        }
    }
}

/// Compare two atom sequences pairwise up to their shared length. The first
/// index at which `(action, from, to)` differ is the divergence point. If no
/// pairwise difference is found but the sequences have different lengths,
/// the divergence is reported at the shared length with `LengthMismatch`.
pub fn find_divergence(a: &[Atom], b: &[Atom]) -> Divergence {
    let min_len = a.len().min(b.len());

    for i in 0..min_len {
        let atom_a = &a[i];
        let atom_b = &b[i];

        let action_match = atom_a.action == atom_b.action;
        let state_match = atom_a.from == atom_b.from && atom_a.to == atom_b.to;

        if !action_match || !state_match {
            return Divergence {
                diverged: true,
                at_index: Some(i as u64),
                reason: Some(DivergenceReason::ContentMismatch),
                action_match: Some(action_match),
                state_match: Some(state_match),
                when_a: Some(atom_a.when),
                when_b: Some(atom_b.when),
            };
        }
    }

    if a.len() != b.len() {
        return Divergence {
            diverged: true,
            at_index: Some(min_len as u64),
            reason: Some(DivergenceReason::LengthMismatch),
            action_match: None,
            state_match: None,
            when_a: a.get(min_len).map(|atom| atom.when),
            when_b: b.get(min_len).map(|atom| atom.when),
        };
    }

    Divergence::none()
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use forge_atom::{create_atom, Prev};

    fn build(actions: &[&str]) -> Vec<Atom> {
        let mut atoms = Vec::new();
        let mut prev = Prev::Genesis;
        for action in actions {
            let atom = create_atom(
                "ops",
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
    fn identical_chains_do_not_diverge() {
        let a = build(&["x", "y", "z"]);
        assert!(!find_divergence(&a, &a.clone()).diverged);
    }

    #[test]
    fn shared_prefix_then_content_divergence() {
        let a = build(&["x", "y", "z"]);
        let mut b = a[..3].to_vec();
        b.push(build(&["different"]).remove(0));
        let a_full = {
            let mut v = a.clone();
            v.push(build(&["z2"]).remove(0));
            v
        };

        let result = find_divergence(&a_full, &b);
        assert!(result.diverged);
        assert_eq!(result.at_index, Some(3));
    }

    #[test]
    fn shared_prefix_then_length_mismatch() {
        let a = build(&["x", "y", "z"]);
        let b = a[..2].to_vec();

        let result = find_divergence(&a, &b);
        assert!(result.diverged);
        assert_eq!(result.at_index, Some(2));
        assert_eq!(result.reason, Some(DivergenceReason::LengthMismatch));
    }
}
