//! Derived-stat calculator.
//!
//! Efficiency is the product of five independent multipliers: root tier,
//! learned manuals, cave, equipped gear and active pets.

use crate::model::{Derived, GameState};

/// Lower bound of the composed efficiency.
pub const EFFICIENCY_FLOOR: f64 = 0.2;
/// Upper bound of the composed efficiency.
pub const EFFICIENCY_CEIL: f64 = 99.0;

/// Flat per-tick base before realm scaling.
pub const BASE_GAIN: f64 = 25.0;
/// Base growth per realm step.
pub const REALM_GROWTH: f64 = 0.15;

/// Compute derived stats from the rest of the aggregate.
pub fn compute_derived(state: &GameState) -> Derived {
    let root = state.current_root().map_or(1.0, |r| r.efficiency_bonus);
    let manuals: f64 = state
        .manuals
        .iter()
        .filter(|m| m.learned)
        .map(|m| m.efficiency_bonus)
        .product();
    let cave = state.cave.efficiency_bonus;
    let gear: f64 = state
        .equipment
        .iter()
        .filter(|e| e.equipped)
        .map(|e| 1.0 + e.stats.efficiency_bonus.unwrap_or(0.0))
        .product();
    let pets: f64 = state
        .pets
        .iter()
        .filter(|p| p.active)
        .map(|p| 1.0 + p.bonus.efficiency_bonus)
        .product();

    let efficiency = clamp_efficiency(root * manuals * cave * gear * pets);
    let base_per_tick = (BASE_GAIN * (1.0 + state.realm_index as f64 * REALM_GROWTH)).floor();
    let gain_per_tick = (base_per_tick * efficiency).floor();

    Derived {
        efficiency,
        base_per_tick,
        gain_per_tick,
    }
}

/// Return `state` with its `derived` cache refreshed. Idempotent.
pub fn recompute(mut state: GameState) -> GameState {
    state.derived = compute_derived(&state);
    state
}

fn clamp_efficiency(raw: f64) -> f64 {
    if raw.is_nan() {
        return EFFICIENCY_FLOOR;
    }
    raw.clamp(EFFICIENCY_FLOOR, EFFICIENCY_CEIL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_state;
    use proptest::prelude::*;

    #[test]
    fn realm_scales_base() {
        let mut s = default_state(0);
        s.realm_index = 10;
        let d = compute_derived(&s);
        assert_eq!(d.base_per_tick, 62.0);
    }

    #[test]
    fn missing_root_counts_as_neutral() {
        let mut s = default_state(0);
        let with_root = compute_derived(&s).efficiency;
        s.root_index = 99;
        assert_eq!(compute_derived(&s).efficiency, with_root);
    }

    #[test]
    fn nan_bonus_collapses_to_floor() {
        let mut s = default_state(0);
        s.cave.efficiency_bonus = f64::NAN;
        assert_eq!(compute_derived(&s).efficiency, EFFICIENCY_FLOOR);
    }

    proptest! {
        #[test]
        fn efficiency_stays_clamped(root in 0.0f64..1e6, cave in 0.0f64..1e6, pet in -1.0f64..1e3) {
            let mut s = default_state(0);
            s.roots[0].efficiency_bonus = root;
            s.cave.efficiency_bonus = cave;
            s.pets[0].bonus.efficiency_bonus = pet;
            let d = compute_derived(&s);
            prop_assert!(d.efficiency >= EFFICIENCY_FLOOR);
            prop_assert!(d.efficiency <= EFFICIENCY_CEIL);
        }

        #[test]
        fn recompute_is_idempotent(
            realm in 0usize..52,
            root in 0usize..4,
            learned in proptest::collection::vec(any::<bool>(), 10),
        ) {
            let mut s = default_state(0);
            s.realm_index = realm;
            s.root_index = root;
            for (m, l) in s.manuals.iter_mut().zip(learned) {
                m.learned = l;
            }
            let once = recompute(s);
            let twice = recompute(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
