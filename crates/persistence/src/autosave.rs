//! Debounced auto-save.
//!
//! The first request after a write opens a window; requests inside the
//! window replace the pending snapshot; the latest snapshot is written once
//! the window elapses. Write failures are logged and dropped: the next state
//! change schedules another attempt.

use crate::store::{write_state, SaveStore};
use tracing::{debug, warn};
use xiuzhen_core::GameState;

struct Pending {
    due_at_ms: i64,
    state: GameState,
}

pub struct AutoSaver<S: SaveStore> {
    store: S,
    debounce_ms: i64,
    pending: Option<Pending>,
}

impl<S: SaveStore> AutoSaver<S> {
    pub fn new(store: S, debounce_ms: i64) -> Self {
        Self {
            store,
            debounce_ms: debounce_ms.max(0),
            pending: None,
        }
    }

    /// Schedule `state` to be written.
    pub fn request(&mut self, state: &GameState, now_ms: i64) {
        match &mut self.pending {
            Some(p) => p.state = state.clone(),
            None => {
                self.pending = Some(Pending {
                    due_at_ms: now_ms + self.debounce_ms,
                    state: state.clone(),
                })
            }
        }
    }

    /// Write the pending snapshot if its window has elapsed. Returns whether
    /// a write was attempted.
    pub fn poll(&mut self, now_ms: i64) -> bool {
        match &self.pending {
            Some(p) if now_ms >= p.due_at_ms => self.flush(),
            _ => false,
        }
    }

    /// Write the pending snapshot immediately, if any.
    pub fn flush(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        match write_state(&mut self.store, &pending.state) {
            Ok(()) => debug!(at = pending.state.last_tick_at_ms, "auto-saved"),
            Err(e) => warn!(error = %e, "auto-save failed"),
        }
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{load_or_default, MemoryStore};
    use xiuzhen_core::default_state;

    #[test]
    fn requests_inside_window_collapse_to_latest() {
        let mut saver = AutoSaver::new(MemoryStore::default(), 800);
        let mut s = default_state(0);
        saver.request(&s, 0);
        s.lingshi = 1.0;
        saver.request(&s, 300);
        s.lingshi = 2.0;
        saver.request(&s, 700);
        assert!(!saver.poll(799));
        assert!(saver.poll(800));
        assert!(!saver.is_pending());
        assert_eq!(saver.store().writes, 1);
        assert_eq!(load_or_default(saver.store(), 0).lingshi, 2.0);
    }

    #[test]
    fn new_window_opens_after_write() {
        let mut saver = AutoSaver::new(MemoryStore::default(), 800);
        let s = default_state(0);
        saver.request(&s, 0);
        saver.poll(800);
        saver.request(&s, 900);
        assert!(!saver.poll(1_600));
        assert!(saver.poll(1_700));
        assert_eq!(saver.store().writes, 2);
    }

    #[test]
    fn failed_write_is_swallowed() {
        let store = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        let mut saver = AutoSaver::new(store, 0);
        saver.request(&default_state(0), 0);
        assert!(saver.poll(0));
        assert!(!saver.is_pending());
        assert!(saver.into_store().entries.is_empty());
    }
}
