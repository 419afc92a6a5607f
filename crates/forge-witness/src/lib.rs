//! The four-level witness hierarchy: `self < bilateral < public < anchored`.
//!
//! A Merkle root's effective trust level is the maximum level across every
//! receipt stored for it, defaulting to `self` when none are stored.

pub mod level;
pub mod receipt;
pub mod registry;
pub mod summary;

pub use level::Level;
pub use receipt::{bilateral_receipt_hash, BitcoinAttestation, CalendarSubmission, Receipt, SubmissionStatus};
pub use registry::{InMemoryWitnessRegistry, WitnessHierarchy};
pub use summary::{level_of, summarize, LevelInfo, WitnessSummary, WitnessView};
