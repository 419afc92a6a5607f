use chrono::Utc;
use futures::future::join_all;
use rand::RngCore;
use tracing::{info, warn};

use forge_witness::{CalendarSubmission, Receipt, SubmissionStatus, WitnessHierarchy};

use crate::client::OtsClient;
use crate::error::OtsError;

fn validate_hash_hex(hash_hex: &str) -> Result<Vec<u8>, OtsError> {
    if hash_hex.len() != 64 || !hash_hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(OtsError::InvalidHash(hash_hex.len()));
    }
    // Length and hex-digit checks above guarantee this decodes.
    Ok(hex::decode(hash_hex).expect("validated 64 hex chars"))
}

async fn submit_one(
    http: &reqwest::Client,
    calendar: &str,
    digest: &[u8],
) -> CalendarSubmission {
    let submitted_at = Utc::now().timestamp_millis();
    let url = format!("{calendar}/digest");

    let attempt = http
        .post(&url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Accept", "application/vnd.opentimestamps.v1")
        .body(digest.to_vec())
        .send()
        .await;

    match attempt {
        Ok(response) if response.status().is_success() => match response.bytes().await {
            Ok(body) => CalendarSubmission {
                calendar_url: calendar.to_string(),
                status: SubmissionStatus::Submitted,
                response_hex: Some(hex::encode(&body)),
                error: None,
                submitted_at,
            },
            Err(e) => CalendarSubmission {
                calendar_url: calendar.to_string(),
                status: SubmissionStatus::Error,
                response_hex: None,
                error: Some(e.to_string()),
                submitted_at,
            },
        },
        Ok(response) => CalendarSubmission {
            calendar_url: calendar.to_string(),
            status: SubmissionStatus::Error,
            response_hex: None,
            error: Some(format!("calendar returned HTTP {}", response.status())),
            submitted_at,
        },
        Err(e) => CalendarSubmission {
            calendar_url: calendar.to_string(),
            status: SubmissionStatus::Error,
            response_hex: None,
            error: Some(e.to_string()),
            submitted_at,
        },
    }
}

/// Submit `hash_hex` to every configured calendar, blinded by a fresh
/// random nonce.
///
/// Every calendar is raced concurrently and joined with an all-settled
/// policy: a timeout or network failure on one calendar never aborts the
/// others, and is simply recorded as that calendar's outcome. The resulting
/// receipt is persisted under `hash_hex` only if at least one submission
/// succeeded — an all-failed attempt is not worth remembering and leaves
/// the root at level 1.
pub async fn submit_to_ots<W: WitnessHierarchy>(
    store: &mut W,
    client: &OtsClient,
    hash_hex: &str,
) -> Result<Receipt, OtsError> {
    let hash_bytes = validate_hash_hex(hash_hex)?;

    let mut nonce = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut nonce);

    let mut blinded = Vec::with_capacity(nonce.len() + hash_bytes.len());
    blinded.extend_from_slice(&nonce);
    blinded.extend_from_slice(&hash_bytes);
    let digest_hex = forge_hash::hash_bytes(&blinded);
    let digest_raw = hex::decode(&digest_hex).expect("hash_bytes always returns valid hex");

    let submissions = join_all(
        client
            .calendars()
            .iter()
            .map(|calendar| submit_one(client.http(), calendar, &digest_raw)),
    )
    .await;

    let successful_submissions = submissions
        .iter()
        .filter(|c| c.status == SubmissionStatus::Submitted)
        .count() as u32;
    let total_calendars = submissions.len() as u32;

    if successful_submissions == 0 {
        warn!(hash = hash_hex, "all OTS calendar submissions failed");
    } else {
        info!(
            hash = hash_hex,
            successful_submissions, total_calendars, "submitted digest to OTS calendars"
        );
    }

    let receipt = Receipt::OtsPending {
        original_hash: hash_hex.to_string(),
        nonce: hex::encode(nonce),
        digest: digest_hex,
        calendars: submissions,
        successful_submissions,
        total_calendars,
        created_at: Utc::now().timestamp_millis(),
    };

    if successful_submissions >= 1 {
        store.save_witness(hash_hex, receipt.clone());
    }

    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_length_hash() {
        assert!(validate_hash_hex("abc").is_err());
    }

    #[test]
    fn rejects_non_hex_characters() {
        let bad = "z".repeat(64);
        assert!(validate_hash_hex(&bad).is_err());
    }

    #[test]
    fn accepts_64_hex_chars() {
        let good = "a".repeat(64);
        assert!(validate_hash_hex(&good).is_ok());
    }
}
