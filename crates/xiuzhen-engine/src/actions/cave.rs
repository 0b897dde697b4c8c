//! Cave upgrades, feature construction and the production features.

use super::Ctx;
use crate::command::HarvestReward;
use tracing::debug;
use xiuzhen_core::catalog::{
    alchemy_output, cave_bonus_for_level, cave_upgrade_cost, feature_cost, harvest_herbs,
    refining_output, HARVEST_COOLDOWN_MS, MAX_FEATURE_LEVEL,
};
use xiuzhen_core::{merge_stack, CaveFeature, GameState};

pub(crate) fn upgrade_cave(mut state: GameState, ctx: &mut Ctx<'_>) -> GameState {
    let cost = cave_upgrade_cost(state.cave.level);
    if state.lingshi < cost {
        ctx.log(&mut state, format!("灵石不足，扩建洞府需{cost}灵石。"));
        return state;
    }
    state.lingshi -= cost;
    state.cave.level += 1;
    state.cave.efficiency_bonus = cave_bonus_for_level(state.cave.level);
    let level = state.cave.level;
    debug!(level, "cave upgraded");
    ctx.log(&mut state, format!("洞府扩建至{level}级。"));
    state
}

pub(crate) fn build_feature(
    mut state: GameState,
    feature: CaveFeature,
    ctx: &mut Ctx<'_>,
) -> GameState {
    let level = state.cave.features.level(feature);
    let name = feature.display_name();
    let Some(cost) = feature_cost(feature, level) else {
        ctx.log(&mut state, format!("{name}已至{MAX_FEATURE_LEVEL}级，无法再升。"));
        return state;
    };
    if state.lingshi < cost {
        ctx.log(&mut state, format!("灵石不足，修筑{name}需{cost}灵石。"));
        return state;
    }
    state.lingshi -= cost;
    state.cave.features.set_level(feature, level + 1);
    debug!(?feature, level = level + 1, "feature built");
    ctx.log(&mut state, format!("{name}升至{}级。", level + 1));
    state
}

/// Gate shared by the production features: they only work at full level.
fn feature_ready(state: &GameState, feature: CaveFeature) -> bool {
    state.cave.features.level(feature) >= MAX_FEATURE_LEVEL
}

pub(crate) fn harvest_spirit_field(
    mut state: GameState,
    reward: &HarvestReward,
    ctx: &mut Ctx<'_>,
) -> GameState {
    if !feature_ready(&state, CaveFeature::SpiritField) {
        ctx.log(&mut state, "灵田尚未修至满级，无从收获。");
        return state;
    }
    if ctx.now_ms.saturating_sub(state.cave.last_harvest) < HARVEST_COOLDOWN_MS {
        ctx.log(&mut state, "灵田尚在孕育，请稍后再来。");
        return state;
    }
    let lingshi = if reward.lingshi.is_finite() {
        reward.lingshi.max(0.0)
    } else {
        0.0
    };
    state.lingshi += lingshi;
    state.cave.last_harvest = ctx.now_ms;
    let herbs = harvest_herbs();
    let text = format!("你从灵田收获{}×{}，灵石+{lingshi}。", herbs.name, herbs.count);
    merge_stack(&mut state.inventory, herbs);
    ctx.log(&mut state, text);
    state
}

pub(crate) fn craft_pill(mut state: GameState, recipe_id: &str, ctx: &mut Ctx<'_>) -> GameState {
    if !feature_ready(&state, CaveFeature::AlchemyRoom) {
        ctx.log(&mut state, "炼丹房尚未修至满级，无法开炉。");
        return state;
    }
    let pill = alchemy_output();
    let text = format!("丹成（{recipe_id}），得{}×{}。", pill.name, pill.count);
    merge_stack(&mut state.pills, pill);
    debug!(recipe_id, "pill crafted");
    ctx.log(&mut state, text);
    state
}

pub(crate) fn craft_equipment(
    mut state: GameState,
    recipe_id: &str,
    ctx: &mut Ctx<'_>,
) -> GameState {
    if !feature_ready(&state, CaveFeature::RefiningForge) {
        ctx.log(&mut state, "炼器炉尚未修至满级，无法锻造。");
        return state;
    }
    let item = refining_output();
    let text = format!("器成（{recipe_id}），得{}。", item.name);
    merge_stack(&mut state.equipment, item);
    debug!(recipe_id, "equipment crafted");
    ctx.log(&mut state, text);
    state
}
