//! Tick/catch-up settlement.
//!
//! Elapsed wall-clock time is converted into whole ticks. The watermark
//! advances by exactly `ticks * tick_ms`, so any sub-tick remainder carries
//! into the next settlement.

use tracing::{debug, info};
use xiuzhen_core::catalog::YEARS_PER_TICK;
use xiuzhen_core::{EngineConfig, GameState};

/// Which driver asked for settlement. Only the journal phrasing differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickMode {
    /// Periodic driver signal while the game is open.
    Live,
    /// One-shot settlement of time spent closed, at startup.
    Offline,
}

/// Outcome of a settlement that applied at least one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settlement {
    pub ticks: i64,
    pub xiuwei_gain: f64,
    pub years_gain: f64,
}

/// Whole ticks that would be settled at `now_ms`. Zero on clock regression
/// or when less than one period has elapsed.
pub fn pending_ticks(state: &GameState, now_ms: i64, config: &EngineConfig) -> i64 {
    if now_ms <= state.last_tick_at_ms {
        return 0;
    }
    let elapsed = now_ms.saturating_sub(state.last_tick_at_ms);
    if elapsed < config.tick_ms {
        return 0;
    }
    let capped = elapsed.min(config.catch_up_cap_ms);
    capped / config.tick_ms
}

/// Settle every whole tick elapsed since the watermark (up to the cap),
/// appending one journal line. Returns the state untouched when nothing is
/// due.
pub fn settle(
    mut state: GameState,
    now_ms: i64,
    mode: TickMode,
    config: &EngineConfig,
) -> (GameState, Option<Settlement>) {
    let ticks = pending_ticks(&state, now_ms, config);
    if ticks <= 0 {
        return (state, None);
    }

    let xiuwei_gain = state.derived.gain_per_tick * ticks as f64;
    let years_gain = YEARS_PER_TICK * ticks as f64;
    state.xiuwei += xiuwei_gain;
    state.years_cultivated += years_gain;
    state.last_tick_at_ms += ticks * config.tick_ms;

    let text = match mode {
        TickMode::Live if ticks == 1 => format!("你静心吐纳，修为+{xiuwei_gain}。"),
        TickMode::Live => format!("你静心吐纳（×{ticks}），修为+{xiuwei_gain}。"),
        TickMode::Offline => format!("你离线修行了{years_gain}年，修为+{xiuwei_gain}。"),
    };
    state.push_log(now_ms, text, config.log_capacity);

    match mode {
        TickMode::Live => debug!(ticks, gain = xiuwei_gain, "settled ticks"),
        TickMode::Offline => info!(ticks, gain = xiuwei_gain, "settled offline progress"),
    }
    (
        state,
        Some(Settlement {
            ticks,
            xiuwei_gain,
            years_gain,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use xiuzhen_core::default_state;

    const T: i64 = 1_700_000_000_000;

    #[test]
    fn seventeen_seconds_is_three_ticks() {
        let cfg = EngineConfig::default();
        let s = default_state(T);
        let gain = s.derived.gain_per_tick;
        let (s, out) = settle(s, T + 17_000, TickMode::Live, &cfg);
        let out = out.unwrap();
        assert_eq!(out.ticks, 3);
        assert_eq!(s.last_tick_at_ms, T + 15_000);
        assert_eq!(s.xiuwei, 3.0 * gain);
        assert_eq!(s.years_cultivated, 15.0);
        assert!(s.logs.last().unwrap().text.contains("×3"));
    }

    #[test]
    fn single_tick_uses_singular_phrase() {
        let cfg = EngineConfig::default();
        let (s, _) = settle(default_state(T), T + 5_000, TickMode::Live, &cfg);
        assert!(!s.logs.last().unwrap().text.contains('×'));
    }

    #[test]
    fn regression_and_short_gaps_are_noops() {
        let cfg = EngineConfig::default();
        let s = default_state(T);
        for now in [T - 1, T, T + 4_999] {
            let (after, out) = settle(s.clone(), now, TickMode::Live, &cfg);
            assert!(out.is_none());
            assert_eq!(after, s);
        }
    }

    #[test]
    fn extreme_watermarks_do_not_overflow() {
        let cfg = EngineConfig::default();
        let mut s = default_state(T);
        s.last_tick_at_ms = i64::MIN;
        assert_eq!(pending_ticks(&s, i64::MAX, &cfg), 5_760);
        let (s, out) = settle(s, T, TickMode::Live, &cfg);
        assert_eq!(out.unwrap().ticks, 5_760);
        assert_eq!(s.last_tick_at_ms, i64::MIN + cfg.catch_up_cap_ms);

        let mut s = default_state(T);
        s.last_tick_at_ms = i64::MAX;
        assert_eq!(pending_ticks(&s, i64::MIN, &cfg), 0);
    }

    #[test]
    fn catch_up_is_capped_per_settlement() {
        let cfg = EngineConfig::default();
        let s = default_state(T);
        let three_days = 3 * 24 * 60 * 60 * 1000;
        let (s, out) = settle(s, T + three_days, TickMode::Offline, &cfg);
        assert_eq!(out.unwrap().ticks, 5_760);
        assert_eq!(s.last_tick_at_ms, T + cfg.catch_up_cap_ms);
        assert!(s.logs.last().unwrap().text.contains("离线修行了28800年"));
    }
}
