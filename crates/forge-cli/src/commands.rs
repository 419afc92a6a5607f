use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::info;

use forge_atom::{create_atom, verify_chain, Prev};
use forge_chain::seal_suffix;
use forge_ots::{check_ots_upgrade, submit_to_ots, OtsClient, UpgradeOutcome};
use forge_store::{FileStore, Store};
use forge_witness::WitnessHierarchy;

fn parse_state(raw: Option<&str>) -> Value {
    match raw {
        None => Value::Null,
        Some(s) => serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string())),
    }
}

/// The root of the most recently sealed block, if any have been sealed yet.
fn tip_root(store: &FileStore) -> Result<String> {
    let blocks = store.get_blocks()?;
    blocks
        .last()
        .map(|b| b.root.clone())
        .context("no block has been sealed yet — run `forge seal` first")
}

pub fn log(store: &mut FileStore, action: &str, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let from_value = parse_state(from);
    let to_value = parse_state(to);

    let prev = match store.last_proof().as_str() {
        "genesis" => Prev::Genesis,
        proof => Prev::single(proof),
    };

    let atom = create_atom(store.owner(), &from_value, action, &to_value, prev);
    let action_hash = atom.action.clone();
    let proof = atom.proof.clone();

    let index = store.append_atom(atom)?;
    store.save_action(&action_hash, action, json!({ "from": from_value, "to": to_value }))?;

    info!(index, proof = %proof, "recorded atom");
    println!("atom #{index} recorded, proof={proof}");
    Ok(())
}

/// Returns `true` when the chain verified valid (the CLI exit code).
pub fn verify(store: &FileStore) -> Result<bool> {
    let atoms = store.get_atoms(0..store.atom_count())?;
    let result = verify_chain(&atoms);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(result.valid)
}

pub fn seal(store: &mut FileStore) -> Result<()> {
    let atoms = store.get_atoms(0..store.atom_count())?;
    let blocks = store.get_blocks()?;

    match seal_suffix(&atoms, &blocks, chrono::Utc::now().timestamp_millis()) {
        Some(block) => {
            let root = block.root.clone();
            let atom_count = block.atom_count;
            store.append_block(block)?;
            info!(root = %root, atom_count, "sealed block");
            println!("sealed {atom_count} atoms into block, root={root}");
        }
        None => println!("nothing new to seal"),
    }

    Ok(())
}

pub fn witness(store: &mut FileStore, bilateral: Option<&str>) -> Result<()> {
    let root = tip_root(store)?;

    match bilateral {
        Some(counterparty) => {
            let receipt = store.create_bilateral_witness(&root, counterparty);
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        None => {
            let summary = store.witness_summary(&root);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

pub async fn anchor(store: &mut FileStore, upgrade: bool) -> Result<()> {
    let root = tip_root(store)?;
    let client = OtsClient::new().context("failed to build OTS client")?;

    if upgrade {
        match check_ots_upgrade(store, &client, &root).await? {
            UpgradeOutcome::NoPending => println!("no pending OTS submission for this root"),
            UpgradeOutcome::StillPending { checked_calendars } => {
                println!("still pending, checked {checked_calendars} calendar(s)")
            }
            UpgradeOutcome::Upgraded { new_level, attestations } => {
                println!("upgraded to level {new_level} ({attestations} Bitcoin attestation(s))")
            }
        }
    } else {
        let receipt = submit_to_ots(store, &client, &root).await?;
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    }

    Ok(())
}

pub fn status(store: &FileStore) -> Result<()> {
    let blocks = store.get_blocks()?;
    let level = match blocks.last() {
        Some(block) => store.witness_level(&block.root).level,
        None => 1,
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "owner": store.owner(),
            "atom_count": store.atom_count(),
            "block_count": blocks.len(),
            "tip_root": blocks.last().map(|b| b.root.clone()),
            "tip_witness_level": level,
        }))?
    );
    Ok(())
}

pub fn export(store: &FileStore, out: Option<PathBuf>) -> Result<()> {
    let exported = store.export_all()?;
    let json = serde_json::to_string_pretty(&exported)?;

    match out {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("writing export to {}", path.display()))?;
            println!("exported to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

pub fn history(store: &FileStore, n: Option<usize>) -> Result<()> {
    let entries = store.get_history(n.unwrap_or(10))?;
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
