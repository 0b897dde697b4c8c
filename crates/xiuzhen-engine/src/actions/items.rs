//! Pills and equipment.

use super::Ctx;
use tracing::debug;
use xiuzhen_core::{GameState, PillEffect};

pub(crate) fn use_pill(mut state: GameState, pill_id: &str, ctx: &mut Ctx<'_>) -> GameState {
    let Some(pos) = state.pills.iter().position(|p| p.id == pill_id) else {
        return state;
    };
    let pill = state.pills[pos].clone();
    if pill.count == 0 {
        ctx.log(&mut state, format!("{}已经用完了。", pill.name));
        return state;
    }
    let top_root = state.roots.len().saturating_sub(1);
    if pill.effect_type == PillEffect::Root && state.root_index >= top_root {
        ctx.log(&mut state, format!("灵根已臻极致，无需服用{}。", pill.name));
        return state;
    }

    state.pills[pos].count -= 1;
    let text = match pill.effect_type {
        PillEffect::Xiuwei => {
            state.xiuwei += pill.effect_value;
            format!("你服下{}，修为+{}。", pill.name, pill.effect_value)
        }
        PillEffect::Root => {
            let steps = pill.effect_value.max(0.0) as usize;
            state.root_index = state.root_index.saturating_add(steps).min(top_root);
            let root = state
                .current_root()
                .map_or_else(|| "未知灵根".to_string(), |r| r.name.clone());
            format!("你服下{}，灵根蜕变为「{root}」。", pill.name)
        }
        PillEffect::Efficiency | PillEffect::Breakthrough => {
            format!("你服下{}，{}。", pill.name, pill.effect)
        }
    };
    debug!(pill = %pill.id, "pill used");
    ctx.log(&mut state, text);
    state
}

/// Equip one item, unequipping whatever shares its slot in the same step.
pub(crate) fn equip_item(mut state: GameState, equipment_id: &str, ctx: &mut Ctx<'_>) -> GameState {
    let Some(item) = state.equipment.iter().find(|e| e.id == equipment_id).cloned() else {
        return state;
    };
    if item.equipped {
        ctx.log(&mut state, format!("{}已在身上。", item.name));
        return state;
    }
    for e in state.equipment.iter_mut().filter(|e| e.slot == item.slot) {
        e.equipped = e.id == item.id;
    }
    state.normalize_indexes();
    debug!(item = %item.id, slot = ?item.slot, "equipped");
    ctx.log(&mut state, format!("你装备了{}。", item.name));
    state
}
