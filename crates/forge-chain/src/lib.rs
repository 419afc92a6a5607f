//! The ordered atom chain, its Merkle sealing policy, and the cross-chain
//! divergence detector used for bilateral dispute resolution.

pub mod block;
pub mod chain;
pub mod divergence;
pub mod error;

pub use block::{AtomRange, Block};
pub use chain::{prove_atom_in, seal_suffix, verify_proof, AtomProof, Chain};
pub use divergence::{find_divergence, Divergence, DivergenceReason};
pub use error::ChainError;
