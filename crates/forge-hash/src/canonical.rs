//! The canonicalisation adapter called for by the design notes: rather than
//! admitting arbitrary dynamic values, each shape FORGE actually hashes
//! (identity strings, action descriptions, JSON state snapshots) implements
//! [`Canonical`] explicitly.

use serde_json::Value;

/// A value that can be reduced to the canonical textual form the hash
/// primitives operate on.
///
/// - Scalars (strings, numbers, bools) canonicalise to their plain textual
///   representation — *not* their JSON-quoted form.
/// - Objects and arrays canonicalise to JSON text with object keys sorted
///   lexicographically (guaranteed here because `serde_json::Value`'s `Map`
///   is a `BTreeMap` by default, i.e. without the `preserve_order` feature).
/// - `None` / JSON `null` canonicalise to the empty string.
pub trait Canonical {
    fn canonical_string(&self) -> String;

    fn canonical_bytes(&self) -> Vec<u8> {
        self.canonical_string().into_bytes()
    }
}

impl Canonical for str {
    fn canonical_string(&self) -> String {
        self.to_string()
    }
}

impl Canonical for String {
    fn canonical_string(&self) -> String {
        self.clone()
    }
}

impl Canonical for &str {
    fn canonical_string(&self) -> String {
        (*self).to_string()
    }
}

macro_rules! impl_canonical_display {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Canonical for $t {
                fn canonical_string(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

impl_canonical_display!(bool, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64, usize);

impl<T: Canonical> Canonical for Option<T> {
    fn canonical_string(&self) -> String {
        match self {
            Some(v) => v.canonical_string(),
            None => String::new(),
        }
    }
}

impl Canonical for Value {
    fn canonical_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(_) | Value::Object(_) => {
                // serde_json::Map is a BTreeMap without `preserve_order`, so
                // this serialisation already sorts object keys recursively.
                serde_json::to_string(self).expect("Value serialisation is infallible")
            }
        }
    }
}

impl<T: Canonical> Canonical for &T {
    fn canonical_string(&self) -> String {
        (*self).canonical_string()
    }
}
