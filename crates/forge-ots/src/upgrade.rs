use chrono::Utc;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::info;

use forge_witness::{BitcoinAttestation, Receipt, SubmissionStatus, WitnessHierarchy};

use crate::client::OtsClient;
use crate::constants::ATTESTATION_BITCOIN;
use crate::error::OtsError;

/// Result of one `check_ots_upgrade` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeOutcome {
    /// No `ots_pending` receipt exists for this root yet.
    NoPending,
    /// At least one calendar was polled; none has attested yet.
    StillPending { checked_calendars: usize },
    /// One or more calendars returned a Bitcoin attestation; an
    /// `ots_confirmed` receipt (level 4) has been persisted.
    Upgraded { new_level: u8, attestations: usize },
}

struct CalendarCheck {
    calendar: String,
    upgraded: bool,
    body_hex: String,
}

async fn check_one(http: &reqwest::Client, calendar: &str, digest_hex: &str) -> CalendarCheck {
    let url = format!("{calendar}/timestamp/{digest_hex}");

    let response = http
        .get(&url)
        .header("Accept", "application/vnd.opentimestamps.v1")
        .send()
        .await;

    match response {
        Ok(resp) if resp.status().is_success() => match resp.bytes().await {
            Ok(body) => CalendarCheck {
                calendar: calendar.to_string(),
                upgraded: body.contains(&ATTESTATION_BITCOIN),
                body_hex: hex::encode(&body),
            },
            Err(_) => CalendarCheck {
                calendar: calendar.to_string(),
                upgraded: false,
                body_hex: String::new(),
            },
        },
        _ => CalendarCheck {
            calendar: calendar.to_string(),
            upgraded: false,
            body_hex: String::new(),
        },
    }
}

/// Poll every calendar a pending submission for `root` reports as
/// `submitted`, looking for a Bitcoin-block-header attestation.
///
/// Finds the most recently stored `ots_pending` receipt for `root`; if none
/// exists, returns [`UpgradeOutcome::NoPending`] without making any
/// requests. Every submitted calendar is polled concurrently and joined
/// with an all-settled policy, matching `submit_to_ots`.
pub async fn check_ots_upgrade<W: WitnessHierarchy>(
    store: &mut W,
    client: &OtsClient,
    root: &str,
) -> Result<UpgradeOutcome, OtsError> {
    let receipts = store.load_witnesses(root);
    let pending = receipts.into_iter().rev().find_map(|r| match r {
        Receipt::OtsPending { .. } => Some(r),
        _ => None,
    });

    let (original_hash, digest, calendars) = match pending {
        Some(Receipt::OtsPending {
            original_hash,
            digest,
            calendars,
            ..
        }) => (original_hash, digest, calendars),
        _ => return Ok(UpgradeOutcome::NoPending),
    };

    let submitted: Vec<_> = calendars
        .iter()
        .filter(|c| c.status == SubmissionStatus::Submitted)
        .collect();

    let checks = join_all(
        submitted
            .iter()
            .map(|c| check_one(client.http(), &c.calendar_url, &digest)),
    )
    .await;

    let confirmed_at = Utc::now().timestamp_millis();
    let attestations: Vec<BitcoinAttestation> = checks
        .into_iter()
        .filter(|c| c.upgraded)
        .map(|c| BitcoinAttestation {
            calendar: c.calendar,
            proof_hex: c.body_hex,
            confirmed_at,
        })
        .collect();

    if attestations.is_empty() {
        return Ok(UpgradeOutcome::StillPending {
            checked_calendars: submitted.len(),
        });
    }

    info!(
        root,
        attestations = attestations.len(),
        "root upgraded to anchored via OTS"
    );

    let receipt = Receipt::OtsConfirmed {
        original_hash,
        bitcoin_attestations: attestations.clone(),
        confirmed_at,
    };
    store.save_witness(root, receipt);

    Ok(UpgradeOutcome::Upgraded {
        new_level: 4,
        attestations: attestations.len(),
    })
}

#[cfg(test)]
mod tests {
    use forge_witness::InMemoryWitnessRegistry;

    use super::*;

    #[tokio::test]
    async fn no_pending_receipt_returns_no_pending() {
        let mut store = InMemoryWitnessRegistry::default();
        let client = OtsClient::new().unwrap();

        let outcome = check_ots_upgrade(&mut store, &client, "deadbeef").await.unwrap();
        assert_eq!(outcome, UpgradeOutcome::NoPending);
    }

    #[tokio::test]
    async fn pending_with_no_submitted_calendars_stays_pending() {
        let mut store = InMemoryWitnessRegistry::default();
        let client = OtsClient::new().unwrap();

        let receipt = Receipt::OtsPending {
            original_hash: "deadbeef".to_string(),
            nonce: "00".to_string(),
            digest: "00".to_string(),
            calendars: vec![],
            successful_submissions: 0,
            total_calendars: 0,
            created_at: 0,
        };
        store.save_witness("deadbeef", receipt);

        let outcome = check_ots_upgrade(&mut store, &client, "deadbeef").await.unwrap();
        assert_eq!(outcome, UpgradeOutcome::StillPending { checked_calendars: 0 });
    }
}
