#![deny(warnings)]

//! Persistence layer: save codec, portable export strings, storage port and
//! debounced auto-save.

pub mod autosave;
pub mod codec;
pub mod migrate;
pub mod store;

pub use autosave::AutoSaver;
pub use codec::{decode_json, from_portable_string, serialize, to_portable_string, DecodeError};
pub use migrate::migrate;
pub use store::{load_or_default, write_state, FileStore, MemoryStore, SaveStore, StoreError};

/// Storage key holding the full JSON save.
pub const SAVE_KEY: &str = "xiuzhen_idle_save_v1";

/// Literal tag at the start of every portable save string.
pub const EXPORT_PREFIX: &str = "XZ1:";

/// Default debounce window for auto-save writes.
pub const AUTOSAVE_DEBOUNCE_MS: i64 = 800;

/// Returns the default directory used for local saves.
pub fn default_save_dir() -> &'static str {
    "./saves"
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn save_dir_is_relative() {
        assert!(default_save_dir().starts_with("./"));
    }
}
