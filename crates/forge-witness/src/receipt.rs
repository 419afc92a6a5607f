use serde::{Deserialize, Serialize};

use forge_hash::hash_bytes;

use crate::level::Level;

/// Outcome of submitting a blinded digest to one OTS calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,
    Error,
}

/// Per-calendar record of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSubmission {
    pub calendar_url: String,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub response_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    pub submitted_at: i64,
}

/// A calendar's Bitcoin-block-header attestation for a submitted digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitcoinAttestation {
    pub calendar: String,
    pub proof_hex: String,
    pub confirmed_at: i64,
}

/// One piece of evidence that a Merkle root existed at a given time.
///
/// `SelfAttested` is deliberately absent from this enum: level 1 is
/// implicit and requires no stored receipt (see [`crate::level::Level::SelfAttested`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Receipt {
    Bilateral {
        merkle_root: String,
        counterparty: String,
        created_at: i64,
        receipt_hash: String,
    },
    OtsPending {
        original_hash: String,
        nonce: String,
        digest: String,
        calendars: Vec<CalendarSubmission>,
        successful_submissions: u32,
        total_calendars: u32,
        created_at: i64,
    },
    OtsConfirmed {
        original_hash: String,
        bitcoin_attestations: Vec<BitcoinAttestation>,
        confirmed_at: i64,
    },
}

impl Receipt {
    /// The trust level this receipt, on its own, establishes.
    ///
    /// An `OtsPending` receipt with zero successful submissions still only
    /// attests level 1 — pending-but-unsent evidence is not evidence.
    pub fn level(&self) -> Level {
        match self {
            Receipt::Bilateral { .. } => Level::Bilateral,
            Receipt::OtsPending {
                successful_submissions,
                ..
            } if *successful_submissions == 0 => Level::SelfAttested,
            Receipt::OtsPending { .. } => Level::Public,
            Receipt::OtsConfirmed { .. } => Level::Anchored,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Receipt::Bilateral { counterparty, .. } => {
                format!("bilateral witness from {counterparty}")
            }
            Receipt::OtsPending {
                successful_submissions,
                total_calendars,
                ..
            } => format!(
                "submitted to {successful_submissions}/{total_calendars} OTS calendars, awaiting confirmation"
            ),
            Receipt::OtsConfirmed {
                bitcoin_attestations,
                ..
            } => format!(
                "anchored via {} Bitcoin attestation(s)",
                bitcoin_attestations.len()
            ),
        }
    }
}

/// Build the `receipt_hash` for a bilateral witness, per spec:
/// `hash("bilateral:" ‖ root ‖ ":" ‖ counterparty ‖ ":" ‖ created_at_ms)`.
pub fn bilateral_receipt_hash(root: &str, counterparty: &str, created_at: i64) -> String {
    hash_bytes(format!("bilateral:{root}:{counterparty}:{created_at}").as_bytes())
}
