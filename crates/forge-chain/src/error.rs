use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("merkle error: {0}")]
    Merkle(#[from] forge_merkle::MerkleError),

    #[error("block index {0} not found")]
    BlockNotFound(u64),
}
