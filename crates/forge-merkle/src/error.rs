use thiserror::Error;

#[derive(Debug, Error)]
pub enum MerkleError {
    #[error("leaf index {index} out of range for a tree of {len} leaves")]
    IndexOutOfRange { index: usize, len: usize },
}
