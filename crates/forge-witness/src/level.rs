use serde::{Deserialize, Serialize};

/// The four discrete trust levels a Merkle root can carry, strictly ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Level {
    /// Level 1 — only the recording party vouches for the root. Implicit;
    /// no stored receipt is required to hold this level.
    SelfAttested = 1,
    /// Level 2 — a named counterparty has acknowledged the root out of
    /// band.
    Bilateral = 2,
    /// Level 3 — the root has been submitted to one or more public
    /// OpenTimestamps calendars and is pending blockchain confirmation.
    Public = 3,
    /// Level 4 — a calendar has returned a Bitcoin-block-header attestation
    /// for the root. Terminal; the strongest level this system models.
    Anchored = 4,
}

impl Level {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::SelfAttested => "self",
            Level::Bilateral => "bilateral",
            Level::Public => "public",
            Level::Anchored => "anchored",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Level::SelfAttested => {
                "Only the recording party vouches for this root; no external witness exists yet."
            }
            Level::Bilateral => {
                "A named counterparty has acknowledged this root out of band."
            }
            Level::Public => {
                "This root has been submitted to one or more public OpenTimestamps calendars and is awaiting blockchain confirmation."
            }
            Level::Anchored => {
                "This root is bound to a Bitcoin block header via an OpenTimestamps attestation."
            }
        }
    }

    pub fn all_above(self) -> Vec<Level> {
        [Level::Bilateral, Level::Public, Level::Anchored]
            .into_iter()
            .filter(|l| l.rank() > self.rank())
            .collect()
    }
}
