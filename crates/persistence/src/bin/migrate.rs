#![deny(warnings)]

//! Rewrite a save at the current format version.
//!
//! Usage: `migrate [SAVE_DIR]`. Accepts either raw JSON or a portable
//! export string in the stored record.

use anyhow::{bail, Context};
use persistence::{
    decode_json, default_save_dir, from_portable_string, write_state, FileStore, SaveStore,
    EXPORT_PREFIX, SAVE_KEY,
};

fn main() -> anyhow::Result<()> {
    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| default_save_dir().to_string());
    let mut store = FileStore::new(&dir);
    let Some(raw) = store.read(SAVE_KEY)? else {
        bail!("no save at {}", store.path_for(SAVE_KEY).display());
    };
    let from_version = serde_json::from_str::<serde_json::Value>(&raw)
        .ok()
        .and_then(|v| v.get("saveVersion").and_then(|n| n.as_u64()));
    let state = if raw.trim_start().starts_with(EXPORT_PREFIX) {
        from_portable_string(&raw)
    } else {
        decode_json(raw.as_bytes())
    }
    .context("save is not valid")?;
    write_state(&mut store, &state)?;
    println!(
        "Save migrated at {} | version {:?} -> {}",
        store.path_for(SAVE_KEY).display(),
        from_version,
        state.save_version
    );
    Ok(())
}
