use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::receipt::Receipt;

/// The effective trust level of a root, with the receipt (if any) that
/// justifies it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelInfo {
    pub level: u8,
    pub label: String,
    pub description: String,
    pub witness: Option<Receipt>,
}

/// A compact, human-facing view of one stored receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WitnessView {
    pub level: u8,
    pub label: String,
    pub summary: String,
}

/// Level + receipt count + per-witness detail + an upgrade path describing
/// every action available to raise the root's trust level further.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WitnessSummary {
    pub merkle_root: String,
    pub level: u8,
    pub label: String,
    pub witness_count: usize,
    pub witnesses: Vec<WitnessView>,
    pub upgrade_path: Vec<String>,
}

/// Effective trust level is the maximum level across stored receipts,
/// defaulting to [`Level::SelfAttested`] when none are stored. This is a
/// max-monoid: adding any receipt can only preserve or raise the result.
pub fn level_of(receipts: &[Receipt]) -> LevelInfo {
    let best = receipts.iter().max_by_key(|r| r.level().rank());

    match best {
        Some(receipt) if receipt.level().rank() > Level::SelfAttested.rank() => LevelInfo {
            level: receipt.level().rank(),
            label: receipt.level().label().to_string(),
            description: receipt.level().description().to_string(),
            witness: Some(receipt.clone()),
        },
        _ => LevelInfo {
            level: Level::SelfAttested.rank(),
            label: Level::SelfAttested.label().to_string(),
            description: Level::SelfAttested.description().to_string(),
            witness: None,
        },
    }
}

fn upgrade_action(target: Level) -> String {
    match target {
        Level::SelfAttested => String::new(),
        Level::Bilateral => {
            "call create_bilateral_witness(root, counterparty) to record a bilateral witness"
                .to_string()
        }
        Level::Public => {
            "call submit_to_ots(root) to submit this root to public OTS calendars".to_string()
        }
        Level::Anchored => {
            "call check_ots_upgrade(root) once a calendar has anchored the submission to Bitcoin"
                .to_string()
        }
    }
}

pub fn summarize(root: &str, receipts: &[Receipt]) -> WitnessSummary {
    let info = level_of(receipts);
    let current_level = Level::SelfAttested.rank().max(info.level);
    let current =
        [Level::SelfAttested, Level::Bilateral, Level::Public, Level::Anchored]
            .into_iter()
            .find(|l| l.rank() == current_level)
            .unwrap_or(Level::SelfAttested);

    let upgrade_path = current
        .all_above()
        .into_iter()
        .map(|l| format!("reach level {} ({}): {}", l.rank(), l.label(), upgrade_action(l)))
        .collect();

    let witnesses = receipts
        .iter()
        .map(|r| WitnessView {
            level: r.level().rank(),
            label: r.level().label().to_string(),
            summary: r.summary(),
        })
        .collect();

    WitnessSummary {
        merkle_root: root.to_string(),
        level: info.level,
        label: info.label,
        witness_count: receipts.len(),
        witnesses,
        upgrade_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::bilateral_receipt_hash;

    #[test]
    fn unknown_root_defaults_to_level_one() {
        let info = level_of(&[]);
        assert_eq!(info.level, 1);
    }

    #[test]
    fn bilateral_receipt_raises_to_level_two() {
        let receipt = Receipt::Bilateral {
            merkle_root: "root".into(),
            counterparty: "ops@x".into(),
            created_at: 0,
            receipt_hash: bilateral_receipt_hash("root", "ops@x", 0),
        };
        let info = level_of(&[receipt]);
        assert_eq!(info.level, 2);
    }

    #[test]
    fn anchored_wins_regardless_of_bilateral_presence() {
        let bilateral = Receipt::Bilateral {
            merkle_root: "root".into(),
            counterparty: "ops@x".into(),
            created_at: 0,
            receipt_hash: bilateral_receipt_hash("root", "ops@x", 0),
        };
        let anchored = Receipt::OtsConfirmed {
            original_hash: "root".into(),
            bitcoin_attestations: vec![],
            confirmed_at: 0,
        };
        let info = level_of(&[bilateral, anchored]);
        assert_eq!(info.level, 4);
    }
}
