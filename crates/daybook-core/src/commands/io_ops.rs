use std::fs;
use std::io::{self, Read};

use anyhow::{anyhow, Context};
use tracing::{info, instrument};

use crate::store::{Backup, Store};

use super::confirm;

#[instrument(skip(store, args))]
pub(super) fn cmd_export(store: &Store, args: &[String]) -> anyhow::Result<()> {
    info!("command export");

    let backup = store.export_backup();
    let out = serde_json::to_string_pretty(&backup)?;

    match args.first() {
        Some(path) => {
            fs::write(path, out).with_context(|| format!("failed to write {path}"))?;
            println!("Exported backup to {path}.");
        }
        None => println!("{out}"),
    }
    Ok(())
}

#[instrument(skip(store, args))]
pub(super) fn cmd_import(store: &mut Store, args: &[String]) -> anyhow::Result<()> {
    info!("command import");

    let raw = match args.first().map(String::as_str) {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed reading stdin")?;
            buffer
        }
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("import: empty input"));
    }

    let backup: Backup =
        serde_json::from_str(trimmed).map_err(|err| anyhow!("invalid backup file: {err}"))?;
    store.import_backup(backup);

    println!("Import successful.");
    Ok(())
}

#[instrument(skip(store))]
pub(super) fn cmd_clear(store: &mut Store) -> anyhow::Result<()> {
    info!("command clear");

    if !confirm("Clear ALL data?")? {
        println!("Aborted.");
        return Ok(());
    }

    store.clear_all();
    println!("All data cleared.");
    Ok(())
}
