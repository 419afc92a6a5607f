use std::collections::HashMap;

use chrono::Utc;

use crate::receipt::{bilateral_receipt_hash, Receipt};
use crate::summary::{level_of, summarize, LevelInfo, WitnessSummary};

/// Persistence contract for witness receipts, keyed by Merkle root.
///
/// A backing store (in-memory here, file-backed in `forge-store`) only
/// needs to implement [`save_witness`](WitnessHierarchy::save_witness) and
/// [`load_witnesses`](WitnessHierarchy::load_witnesses); the level/summary/
/// bilateral-witness operations are derived from those two and provided as
/// default methods.
pub trait WitnessHierarchy {
    fn save_witness(&mut self, root: &str, receipt: Receipt);
    fn load_witnesses(&self, root: &str) -> Vec<Receipt>;

    fn witness_level(&self, root: &str) -> LevelInfo {
        level_of(&self.load_witnesses(root))
    }

    fn witness_summary(&self, root: &str) -> WitnessSummary {
        summarize(root, &self.load_witnesses(root))
    }

    fn create_bilateral_witness(&mut self, root: &str, counterparty: &str) -> Receipt {
        let created_at = Utc::now().timestamp_millis();
        let receipt = Receipt::Bilateral {
            merkle_root: root.to_string(),
            counterparty: counterparty.to_string(),
            created_at,
            receipt_hash: bilateral_receipt_hash(root, counterparty, created_at),
        };
        self.save_witness(root, receipt.clone());
        receipt
    }
}

/// The simplest [`WitnessHierarchy`]: an in-process map, one receipt list
/// per root. Used directly in tests and as a building block for richer
/// stores.
#[derive(Debug, Default, Clone)]
pub struct InMemoryWitnessRegistry {
    receipts: HashMap<String, Vec<Receipt>>,
}

impl InMemoryWitnessRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WitnessHierarchy for InMemoryWitnessRegistry {
    fn save_witness(&mut self, root: &str, receipt: Receipt) {
        self.receipts.entry(root.to_string()).or_default().push(receipt);
    }

    fn load_witnesses(&self, root: &str) -> Vec<Receipt> {
        self.receipts.get(root).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_root_reports_level_one() {
        let registry = InMemoryWitnessRegistry::new();
        assert_eq!(registry.witness_level("r").level, 1);
    }

    #[test]
    fn bilateral_then_anchored_wins() {
        let mut registry = InMemoryWitnessRegistry::new();
        registry.create_bilateral_witness("r", "ops@x");
        assert_eq!(registry.witness_level("r").level, 2);

        registry.save_witness(
            "r",
            Receipt::OtsConfirmed {
                original_hash: "r".into(),
                bitcoin_attestations: vec![],
                confirmed_at: 0,
            },
        );
        assert_eq!(registry.witness_level("r").level, 4);
    }

    #[test]
    fn summary_lists_upgrade_path() {
        let registry = InMemoryWitnessRegistry::new();
        let summary = registry.witness_summary("r");
        assert_eq!(summary.upgrade_path.len(), 3);
    }
}
