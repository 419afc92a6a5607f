//! Canonical hashing primitives shared by every FORGE crate.
//!
//! Two operations are exposed: [`hash`] for a single value and [`hash_many`]
//! for an ordered list of components joined by `|`. Both are pure functions
//! of their input's *semantic* content — object keys are sorted before
//! serialisation so that two callers anywhere, given equal data, always
//! produce the same digest.

pub mod canonical;

pub use canonical::Canonical;

use sha2::{Digest, Sha256};

/// Hash a single canonicalisable value, returning lowercase hex.
pub fn hash<T: Canonical>(input: &T) -> String {
    let bytes = input.canonical_bytes();
    hex::encode(Sha256::digest(&bytes))
}

/// Hash a raw byte string directly (used internally for concatenation
/// hashing of already-hex digests, e.g. Merkle parent nodes and block
/// hashes).
pub fn hash_bytes(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

/// Hash an ordered sequence of components joined by the literal ASCII pipe
/// `|`. Ordering is significant and is entirely the caller's responsibility.
pub fn hash_many<T: Canonical>(parts: &[T]) -> String {
    let joined = parts
        .iter()
        .map(|p| p.canonical_string())
        .collect::<Vec<_>>()
        .join("|");
    hash_bytes(joined.as_bytes())
}

/// Hash heterogeneous components by pre-rendering each to its canonical
/// string form. Used where the parts are not all the same Rust type (e.g.
/// an atom's `who`/`from`/`action`/`to` hex hashes alongside its numeric
/// `when` timestamp and `prev` hash list).
pub fn hash_many_str<S: AsRef<str>>(parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("|");
    hash_bytes(joined.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_of_hello_matches_known_vector() {
        assert_eq!(
            hash(&"hello".to_string()),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn hash_is_deterministic() {
        let a = hash(&"apt update".to_string());
        let b = hash(&"apt update".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_inputs_hash_differently() {
        assert_ne!(
            hash(&"a".to_string()),
            hash(&"b".to_string())
        );
    }

    #[test]
    fn object_hash_ignores_key_order() {
        let a = serde_json::json!({"x": 1, "y": 2});
        let b = serde_json::json!({"y": 2, "x": 1});
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn hash_many_is_order_sensitive() {
        let a = hash_many_str(&["a", "b"]);
        let b = hash_many_str(&["b", "a"]);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_many_matches_hash_many_str_for_equivalent_strings() {
        let parts = vec!["who".to_string(), "from".to_string(), "action".to_string()];
        assert_eq!(hash_many(&parts), hash_many_str(&parts));
    }

    #[test]
    fn hash_many_is_order_sensitive_over_canonical_values() {
        let a = hash_many(&["a".to_string(), "b".to_string()]);
        let b = hash_many(&["b".to_string(), "a".to_string()]);
        assert_ne!(a, b);
    }

    #[test]
    fn absent_input_hashes_as_empty_string() {
        let empty = hash(&"".to_string());
        assert_eq!(empty, hash_bytes(b""));
    }
}
