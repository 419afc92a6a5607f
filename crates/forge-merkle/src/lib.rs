pub mod error;
pub mod proof;
pub mod tree;

pub use error::MerkleError;
pub use proof::{verify_merkle_proof, Direction, ProofStep};
pub use tree::{build_tree, get_merkle_proof, MerkleTree};
