use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line front-end for a local FORGE audit chain.
///
/// Thin by design: every command below does argument parsing, store
/// construction, and result formatting only — the actual hashing, sealing,
/// witnessing, and OTS logic lives in the `forge-*` library crates.
#[derive(Parser, Debug)]
#[command(
    name = "forge",
    version,
    about = "Tamper-evident operational audit log",
    long_about = "Records operations as a cryptographically chained audit log, \
                  seals batches into Merkle blocks, and escalates trust in a \
                  block's root through a local-to-blockchain-anchored witness hierarchy."
)]
pub struct Cli {
    /// Store root directory. Defaults to `$XDG_CONFIG_HOME/forge` (or
    /// `$HOME/.config/forge`).
    #[arg(long, env = "FORGE_STORE")]
    pub store: Option<PathBuf>,

    /// Identity label hashed into every atom's `who` field.
    #[arg(long, default_value = "local", env = "FORGE_OWNER")]
    pub owner: String,

    /// Suppress log output to stderr.
    #[arg(short, long, default_value_t = false, env = "FORGE_QUIET")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record one operation as a new atom.
    Log {
        action: String,
        /// Pre-state snapshot, recorded as a string if not valid JSON.
        #[arg(long)]
        from: Option<String>,
        /// Post-state snapshot, recorded as a string if not valid JSON.
        #[arg(long)]
        to: Option<String>,
    },

    /// Verify the local chain's self-consistency, linkage, and time order.
    Verify,

    /// Seal any unsealed suffix of atoms into a new Merkle block.
    Seal,

    /// Print the tip block's witness summary, or create a bilateral receipt.
    Witness {
        /// Counterparty identity to witness the tip root for.
        #[arg(long)]
        bilateral: Option<String>,
    },

    /// Submit the tip root to OpenTimestamps, or poll for its upgrade.
    Anchor {
        /// Poll for a Bitcoin attestation instead of submitting.
        #[arg(long, default_value_t = false)]
        upgrade: bool,
    },

    /// Print atom/block counts and the tip's witness level.
    Status,

    /// Write the export-format JSON document.
    Export {
        /// Destination path. Defaults to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the last `n` history entries (default 10).
    History { n: Option<usize> },
}
