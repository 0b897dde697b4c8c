//! Realm breakthrough, root reroll and manual study.

use super::Ctx;
use tracing::debug;
use xiuzhen_core::catalog::{ROOT_REROLL_COST_GROWTH, ROOT_TIER_BANDS};
use xiuzhen_core::GameState;

/// Share of the next realm's threshold paid in lingshi on breakthrough.
const BREAKTHROUGH_LINGSHI_RATE: f64 = 0.12;
/// Share of the next realm's threshold burned from xiuwei on breakthrough.
const BREAKTHROUGH_XIUWEI_BURN: f64 = 0.18;

pub(crate) fn breakthrough(mut state: GameState, ctx: &mut Ctx<'_>) -> GameState {
    let Some(next) = state.next_realm().cloned() else {
        ctx.log(&mut state, "你已登临绝巅，再无境界可破。");
        return state;
    };
    if state.xiuwei < next.need_xiuwei {
        ctx.log(
            &mut state,
            format!("修为未足，突破「{}」尚需{}修为。", next.name, next.need_xiuwei),
        );
        return state;
    }

    let cost = (next.need_xiuwei * BREAKTHROUGH_LINGSHI_RATE).floor();
    let paid = cost.min(state.lingshi).max(0.0);
    let reputation = 5.0 + state.realm_index as f64;
    let burn = (next.need_xiuwei * BREAKTHROUGH_XIUWEI_BURN).floor();

    state.realm_index += 1;
    state.lingshi -= paid;
    state.shengwang += reputation;
    state.xiuwei = (state.xiuwei - burn).max(0.0);
    debug!(realm = %next.id, paid, "breakthrough");
    ctx.log(
        &mut state,
        format!("你一鼓作气，突破至「{}」！声望+{reputation}。", next.name),
    );
    state
}

/// Map a unit draw onto a root tier via the cumulative bands.
fn draw_tier(roll: f64) -> usize {
    ROOT_TIER_BANDS
        .iter()
        .position(|&upper| roll < upper)
        .unwrap_or(ROOT_TIER_BANDS.len() - 1)
}

pub(crate) fn reroll_root(mut state: GameState, ctx: &mut Ctx<'_>) -> GameState {
    let cost = state.root_reroll_cost;
    if state.lingshi < cost {
        ctx.log(&mut state, format!("灵石不足，洗髓需{cost}灵石。"));
        return state;
    }

    let mut tier = draw_tier(ctx.rng.next_unit());
    if tier == state.root_index {
        // One redraw only; a second repeat stands.
        tier = draw_tier(ctx.rng.next_unit());
    }
    let tier = tier.min(state.roots.len().saturating_sub(1));

    state.lingshi -= cost;
    state.root_reroll_cost = (cost * ROOT_REROLL_COST_GROWTH).floor();
    state.root_index = tier;
    let name = state
        .current_root()
        .map_or_else(|| "未知灵根".to_string(), |r| r.name.clone());
    debug!(tier, "root rerolled");
    ctx.log(&mut state, format!("你洗髓伐骨，灵根化为「{name}」。"));
    state
}

pub(crate) fn learn_manual(mut state: GameState, manual_id: &str, ctx: &mut Ctx<'_>) -> GameState {
    let Some(pos) = state.manuals.iter().position(|m| m.id == manual_id) else {
        return state;
    };
    let manual = &state.manuals[pos];
    let (name, cost) = (manual.name.clone(), manual.cost_lingshi);
    if manual.learned {
        ctx.log(&mut state, format!("你早已参透「{name}」。"));
        return state;
    }
    if state.lingshi < cost {
        ctx.log(&mut state, format!("灵石不足，研习「{name}」需{cost}灵石。"));
        return state;
    }
    state.lingshi -= cost;
    state.manuals[pos].learned = true;
    ctx.log(&mut state, format!("你研读「{name}」，气机更为顺畅。"));
    state
}

pub(crate) fn learn_secret_manual(
    mut state: GameState,
    manual_id: &str,
    ctx: &mut Ctx<'_>,
) -> GameState {
    let Some(pos) = state.secret_manuals.iter().position(|m| m.id == manual_id) else {
        return state;
    };
    let manual = state.secret_manuals[pos].clone();
    if manual.learned {
        ctx.log(&mut state, format!("你已掌握{}。", manual.name));
        return state;
    }
    // Requirement names that do not appear in the realm ladder cannot be
    // judged and are treated as met.
    let unmet = manual.requirements.iter().find(|req| {
        state
            .realms
            .iter()
            .position(|r| &r.name == *req)
            .is_some_and(|idx| idx > state.realm_index)
    });
    if let Some(req) = unmet {
        let text = format!("境界不足，需达到{req}方可参悟{}。", manual.name);
        ctx.log(&mut state, text);
        return state;
    }

    let entry = &mut state.secret_manuals[pos];
    entry.learned = true;
    entry.count = entry.count.saturating_sub(1);
    ctx.log(
        &mut state,
        format!("你学会了{}：{}", manual.name, manual.effect),
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{Harness, T};
    use xiuzhen_core::default_state;

    #[test]
    fn failed_breakthrough_only_logs() {
        let mut h = Harness::new([]);
        let s = default_state(T);
        let out = breakthrough(s.clone(), &mut h.ctx());
        assert_eq!(out.logs.len(), s.logs.len() + 1);
        assert_eq!(out.lingshi, s.lingshi);
        assert_eq!(out.xiuwei, s.xiuwei);
        assert_eq!(out.shengwang, s.shengwang);
        assert_eq!(out.realm_index, s.realm_index);
    }

    #[test]
    fn breakthrough_pays_and_burns() {
        let mut h = Harness::new([]);
        let mut s = default_state(T);
        let need = s.realms[1].need_xiuwei;
        s.xiuwei = need + 7.0;
        s.lingshi = 1.0;
        let out = breakthrough(s, &mut h.ctx());
        assert_eq!(out.realm_index, 1);
        assert_eq!(out.lingshi, 0.0);
        assert_eq!(out.shengwang, 5.0);
        assert_eq!(out.xiuwei, need + 7.0 - (need * 0.18).floor());
    }

    #[test]
    fn breakthrough_at_peak_is_rejected() {
        let mut h = Harness::new([]);
        let mut s = default_state(T);
        s.realm_index = s.realms.len() - 1;
        s.xiuwei = f64::MAX;
        let out = breakthrough(s.clone(), &mut h.ctx());
        assert_eq!(out.realm_index, s.realm_index);
        assert_eq!(out.logs.len(), s.logs.len() + 1);
    }

    #[test]
    fn tier_bands() {
        assert_eq!(draw_tier(0.0), 0);
        assert_eq!(draw_tier(0.599), 0);
        assert_eq!(draw_tier(0.60), 1);
        assert_eq!(draw_tier(0.90), 2);
        assert_eq!(draw_tier(0.99), 3);
    }

    #[test]
    fn reroll_redraws_once_on_repeat() {
        let s = default_state(T);
        // First draw repeats tier 0, redraw lands on tier 2.
        let mut h = Harness::new([0.1, 0.9]);
        let out = reroll_root(s.clone(), &mut h.ctx());
        assert_eq!(out.root_index, 2);
        assert_eq!(out.lingshi, 400.0);
        assert_eq!(out.root_reroll_cost, 1_160.0);
        // Second repeat is accepted.
        let mut h = Harness::new([0.1, 0.2, 0.99]);
        let out = reroll_root(s, &mut h.ctx());
        assert_eq!(out.root_index, 0);
        assert_eq!(h.rng.remaining(), 1);
    }

    #[test]
    fn reroll_without_funds_is_rejected() {
        let mut h = Harness::new([0.99]);
        let mut s = default_state(T);
        s.lingshi = 799.0;
        let out = reroll_root(s.clone(), &mut h.ctx());
        assert_eq!(out.root_index, 0);
        assert_eq!(out.root_reroll_cost, 800.0);
        assert_eq!(out.lingshi, 799.0);
        assert_eq!(h.rng.remaining(), 1);
    }

    #[test]
    fn manual_is_a_latch() {
        let mut h = Harness::new([]);
        let mut s = default_state(T);
        s.lingshi = 1_000_000.0;
        assert!(!s.manuals[1].learned);
        let id = s.manuals[1].id.clone();
        let cost = s.manuals[1].cost_lingshi;
        let s = learn_manual(s, &id, &mut h.ctx());
        assert!(s.manuals[1].learned);
        assert_eq!(s.lingshi, 1_000_000.0 - cost);
        let again = learn_manual(s.clone(), &id, &mut h.ctx());
        assert_eq!(again.lingshi, s.lingshi);
        assert_eq!(again.logs.len(), s.logs.len() + 1);
    }

    #[test]
    fn secret_manual_respects_realm_requirement() {
        let mut h = Harness::new([]);
        let s = default_state(T);
        let out = learn_secret_manual(s.clone(), "sword-arts", &mut h.ctx());
        assert!(!out.secret_manuals.iter().any(|m| m.learned));

        let mut s = s;
        s.realm_index = s.realms.iter().position(|r| r.name == "炼气·二层").unwrap();
        let out = learn_secret_manual(s, "sword-arts", &mut h.ctx());
        let m = out.secret_manuals.iter().find(|m| m.id == "sword-arts").unwrap();
        assert!(m.learned);
        assert_eq!(m.count, 0);
    }
}
