//! Bring decoded saves up to the current format.

use tracing::debug;
use xiuzhen_core::catalog::STARTER_BUNDLE_MARKER;
use xiuzhen_core::{recompute, GameState, CURRENT_SAVE_VERSION};

/// Upgrade a decoded save: raise the version tag, repair cursors and
/// rebuild the indexes derived from entity flags. Identity on states the
/// engine produced.
pub fn migrate(mut state: GameState) -> GameState {
    if state.save_version < CURRENT_SAVE_VERSION {
        debug!(
            from = state.save_version,
            to = CURRENT_SAVE_VERSION,
            "upgrading save format"
        );
        state.save_version = CURRENT_SAVE_VERSION;
    }
    if !state.starter_claimed
        && state
            .logs
            .iter()
            .any(|l| l.text.contains(STARTER_BUNDLE_MARKER))
    {
        state.starter_claimed = true;
    }
    if !state.realms.is_empty() && state.realm_index >= state.realms.len() {
        state.realm_index = state.realms.len() - 1;
    }
    if !state.roots.is_empty() && state.root_index >= state.roots.len() {
        state.root_index = state.roots.len() - 1;
    }
    state.normalize_indexes();
    recompute(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xiuzhen_core::default_state;

    #[test]
    fn identity_on_fresh_state() {
        let s = default_state(99);
        assert_eq!(migrate(s.clone()), s);
    }

    #[test]
    fn legacy_starter_log_counts_as_claimed() {
        let mut s = default_state(0);
        s.save_version = 1;
        s.push_log(0, "你领取了新手补给，行囊稍显充实。", 80);
        let m = migrate(s);
        assert!(m.starter_claimed);
        assert_eq!(m.save_version, CURRENT_SAVE_VERSION);
    }

    #[test]
    fn rebuilds_equipped_index() {
        let mut s = default_state(0);
        s.equipped_items.clear();
        s.active_pet = None;
        let m = migrate(s);
        assert_eq!(m.equipped_items.len(), 2);
        assert_eq!(m.active_pet.as_deref(), Some("spirit-cat"));
    }

    #[test]
    fn clamps_out_of_range_cursor() {
        let mut s = default_state(0);
        s.realm_index = 500;
        assert_eq!(migrate(s).realm_index, 51);
    }
}
