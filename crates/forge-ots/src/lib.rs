//! OpenTimestamps calendar client.
//!
//! Wraps the blind-submission and upgrade-polling protocol used to anchor a
//! Merkle root to the Bitcoin blockchain: [`submit_to_ots`] blinds a hash
//! with a random nonce and fans the blinded digest out to every configured
//! calendar, storing an `ots_pending` receipt; [`check_ots_upgrade`] later
//! polls those same calendars for a Bitcoin attestation and, once found,
//! upgrades the stored receipt to `ots_confirmed`.
//!
//! Persistence is generic over [`forge_witness::WitnessHierarchy`] — this
//! crate never touches a filesystem directly.

mod client;
mod constants;
mod error;
mod submit;
mod upgrade;

pub use client::{OtsClient, CALENDAR_TIMEOUT, DEFAULT_CALENDARS};
pub use constants::{
    ATTESTATION_BITCOIN, ATTESTATION_PENDING, OP_APPEND, OP_PREPEND, OP_SHA256, OTS_MAGIC,
};
pub use error::OtsError;
pub use submit::submit_to_ots;
pub use upgrade::{check_ots_upgrade, UpgradeOutcome};
