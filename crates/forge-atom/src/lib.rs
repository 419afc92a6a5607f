//! Atom construction and hash-chain verification.
//!
//! An [`Atom`] is one immutable state-transition record. Its `proof` field is
//! a pure function of every other field, which makes a sequence of atoms a
//! self-verifying hash chain: each atom names its predecessor's `proof`, so
//! mutating any atom anywhere in the chain is detectable by recomputing
//! proofs forward from the mutation point.

pub mod atom;
pub mod prev;
pub mod verify;

pub use atom::{create_atom, Atom};
pub use prev::Prev;
pub use verify::{verify_atom, verify_chain, ChainVerification, VerificationFailure};
