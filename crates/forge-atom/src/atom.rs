use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use forge_hash::{hash, hash_many_str};

use crate::prev::Prev;

/// One immutable state-transition record.
///
/// `proof` is a pure function of every other field: `hash_many(who, from,
/// action, to, when, *prev)`. Two atoms with identical content always carry
/// identical proofs, which is what makes a sequence of atoms independently
/// verifiable by any party holding the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    /// Hash of the identity string that performed the operation.
    pub who: String,
    /// Hash of the pre-state snapshot.
    pub from: String,
    /// Hash of the operation description.
    pub action: String,
    /// Hash of the post-state snapshot.
    pub to: String,
    /// Creation timestamp, milliseconds since the Unix epoch.
    pub when: i64,
    /// Predecessor proof hashes, or the genesis marker.
    pub prev: Prev,
    /// `hash_many(who, from, action, to, when, *prev)`.
    pub proof: String,
}

fn compute_proof(who: &str, from: &str, action: &str, to: &str, when: i64, prev: &Prev) -> String {
    let when_str = when.to_string();
    let mut parts: Vec<&str> = vec![who, from, action, to, when_str.as_str()];
    parts.extend(prev.parents().iter().map(|s| s.as_str()));
    hash_many_str(&parts)
}

/// Construct a new atom.
///
/// `who` and `action` are raw descriptive strings (an identity label, an
/// operation description); `from`/`to` are state snapshots expressed as JSON
/// values. All four are hashed via [`forge_hash::hash`] to produce the
/// atom's stored fields. `prev` defaults to [`Prev::Genesis`] when omitted by
/// the caller (pass `Prev::Genesis` explicitly for the first atom in a
/// chain).
///
/// The only failure mode is an unreadable wall clock, which this
/// implementation treats as unrecoverable (matching the spec: "no failure
/// modes beyond clock read").
pub fn create_atom(who: &str, from: &Value, action: &str, to: &Value, prev: Prev) -> Atom {
    let who_hash = hash(&who.to_string());
    let from_hash = hash(from);
    let action_hash = hash(&action.to_string());
    let to_hash = hash(to);
    let when = Utc::now().timestamp_millis();

    let proof = compute_proof(&who_hash, &from_hash, &action_hash, &to_hash, when, &prev);

    Atom {
        who: who_hash,
        from: from_hash,
        action: action_hash,
        to: to_hash,
        when,
        prev,
        proof,
    }
}

impl Atom {
    /// Recompute this atom's proof from its other fields.
    pub fn recompute_proof(&self) -> String {
        compute_proof(
            &self.who,
            &self.from,
            &self.action,
            &self.to,
            self.when,
            &self.prev,
        )
    }
}
