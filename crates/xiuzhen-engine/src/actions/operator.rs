//! Operator commands that grant resources and items directly.

use super::Ctx;
use crate::command::{ItemKind, Resource};
use tracing::info;
use xiuzhen_core::catalog::{equipment_template, pet_template, pill_template};
use xiuzhen_core::{merge_stack, Equipment, GameState, Pill};

const TAG: &str = "[GM]";

pub(crate) fn add_resource(
    mut state: GameState,
    resource: Resource,
    amount: f64,
    ctx: &mut Ctx<'_>,
) -> GameState {
    let name = resource.display_name();
    if !amount.is_finite() {
        ctx.log(&mut state, format!("{TAG} {name}数额无效。"));
        return state;
    }
    let slot = match resource {
        Resource::Lingshi => &mut state.lingshi,
        Resource::Shengwang => &mut state.shengwang,
        Resource::Xiuwei => &mut state.xiuwei,
        Resource::YearsCultivated => &mut state.years_cultivated,
    };
    *slot = (*slot + amount).max(0.0);
    info!(?resource, amount, "operator granted resource");
    ctx.log(&mut state, format!("{TAG} {name}{amount:+}。"));
    state
}

pub(crate) fn add_item(
    mut state: GameState,
    kind: ItemKind,
    item_id: &str,
    ctx: &mut Ctx<'_>,
) -> GameState {
    let granted = match kind {
        ItemKind::Pill => state
            .pills
            .iter()
            .find(|p| p.id == item_id)
            .map(|p| Pill {
                count: 1,
                ..p.clone()
            })
            .or_else(|| pill_template(item_id))
            .map(|pill| {
                let name = pill.name.clone();
                merge_stack(&mut state.pills, pill);
                name
            }),
        ItemKind::Equipment => state
            .equipment
            .iter()
            .find(|e| e.id == item_id)
            .map(|e| Equipment {
                count: 1,
                equipped: false,
                ..e.clone()
            })
            .or_else(|| equipment_template(item_id))
            .map(|item| {
                let name = item.name.clone();
                merge_stack(&mut state.equipment, item);
                name
            }),
        ItemKind::Pet => {
            if let Some(owned) = state.pets.iter().find(|p| p.id == item_id) {
                let text = format!("{TAG} 已拥有{}。", owned.name);
                ctx.log(&mut state, text);
                return state;
            }
            pet_template(item_id).map(|pet| {
                let name = pet.name.clone();
                state.pets.push(pet);
                name
            })
        }
        ItemKind::SecretManual => state
            .secret_manuals
            .iter_mut()
            .find(|m| m.id == item_id)
            .map(|m| {
                m.count = m.count.saturating_add(1);
                m.name.clone()
            }),
        ItemKind::Manual => state
            .manuals
            .iter_mut()
            .find(|m| m.id == item_id)
            .map(|m| {
                m.learned = true;
                m.name.clone()
            }),
    };

    match granted {
        Some(name) => {
            info!(?kind, item_id, "operator granted item");
            ctx.log(&mut state, format!("{TAG} 获得了{name}。"));
        }
        None => ctx.log(&mut state, format!("{TAG} 未知物品：{item_id}。")),
    }
    state
}

pub(crate) fn unlock_all_dungeons(mut state: GameState, ctx: &mut Ctx<'_>) -> GameState {
    for d in &mut state.dungeons {
        d.unlocked = true;
    }
    ctx.log(&mut state, format!("{TAG} 所有副本已开启。"));
    state
}

pub(crate) fn complete_activity(
    mut state: GameState,
    activity_id: &str,
    ctx: &mut Ctx<'_>,
) -> GameState {
    let Some(activity) = state.activities.iter_mut().find(|a| a.id == activity_id) else {
        return state;
    };
    activity.completed = true;
    let text = format!("{TAG} 活动「{}」已完成。", activity.name);
    ctx.log(&mut state, text);
    state
}
