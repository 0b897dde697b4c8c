//! Adventures, dungeons and activities.

use super::Ctx;
use tracing::debug;
use xiuzhen_core::catalog::{
    adventure_ore, adventure_rare_drop, ADVENTURE_YEARS, DUNGEON_UNLOCK_CLEARS,
};
use xiuzhen_core::{merge_stack, ActivityKind, GameState};

/// Bonus cultivation years per dungeon clear, scaled by the reward rate.
const DUNGEON_BONUS_YEARS: f64 = 10.0;

pub(crate) fn adventure(mut state: GameState, ctx: &mut Ctx<'_>) -> GameState {
    if state.years_cultivated < ADVENTURE_YEARS {
        ctx.log(
            &mut state,
            format!("修行尚浅，至少需{ADVENTURE_YEARS}年修行方可历练。"),
        );
        return state;
    }
    state.years_cultivated -= ADVENTURE_YEARS;

    let roll = ctx.rng.next_unit();
    let text = if roll < 0.50 {
        let found = ctx.rng.int_between(80, 220) + 35 * state.realm_index as i64;
        state.lingshi += found as f64;
        format!("你在山涧拾得灵石{found}枚。")
    } else if roll < 0.78 {
        let count = ctx.rng.int_between(1, 4) as u32;
        let ore = adventure_ore(count);
        let text = format!("你于矿脉中采得{}×{count}。", ore.name);
        merge_stack(&mut state.inventory, ore);
        text
    } else if roll < 0.93 {
        let gain = ctx.rng.int_between(2, 6);
        state.shengwang += gain as f64;
        format!("你仗义出手，声望+{gain}。")
    } else {
        let drop = adventure_rare_drop();
        let text = format!("机缘巧合，你得到了一枚{}！", drop.name);
        merge_stack(&mut state.inventory, drop);
        text
    };
    debug!(roll, "adventure");
    ctx.log(&mut state, text);
    state
}

pub(crate) fn explore_dungeon(
    mut state: GameState,
    dungeon_id: &str,
    ctx: &mut Ctx<'_>,
) -> GameState {
    let Some(pos) = state.dungeons.iter().position(|d| d.id == dungeon_id) else {
        return state;
    };
    let dungeon = state.dungeons[pos].clone();
    if !dungeon.unlocked {
        ctx.log(&mut state, format!("{}尚未开启。", dungeon.name));
        return state;
    }
    let lingshi_cost = dungeon.cost.lingshi.unwrap_or(0.0);
    if state.years_cultivated < dungeon.cost.years_cultivated || state.lingshi < lingshi_cost {
        ctx.log(
            &mut state,
            format!(
                "探索{}需修行{}年、灵石{lingshi_cost}。",
                dungeon.name, dungeon.cost.years_cultivated
            ),
        );
        return state;
    }

    let rewards = &dungeon.rewards;
    state.years_cultivated -= dungeon.cost.years_cultivated;
    state.lingshi -= lingshi_cost;
    state.lingshi += rewards.lingshi;
    state.shengwang += rewards.shengwang;
    state.years_cultivated += DUNGEON_BONUS_YEARS * rewards.exp_rate;
    state.dungeons[pos].clear_count += 1;

    let mut text = format!(
        "你探索{}归来，灵石+{}，声望+{}。",
        dungeon.name, rewards.lingshi, rewards.shengwang
    );
    if state.dungeons[pos].clear_count >= DUNGEON_UNLOCK_CLEARS {
        if let Some(next) = state.dungeons.get_mut(pos + 1).filter(|d| !d.unlocked) {
            next.unlocked = true;
            text.push_str(&format!("{}已然开启。", next.name));
        }
    }
    debug!(dungeon = %dungeon.id, clears = state.dungeons[pos].clear_count, "dungeon cleared");
    ctx.log(&mut state, text);
    state
}

pub(crate) fn claim_activity(
    mut state: GameState,
    activity_id: &str,
    ctx: &mut Ctx<'_>,
) -> GameState {
    let Some(pos) = state.activities.iter().position(|a| a.id == activity_id) else {
        return state;
    };
    let activity = state.activities[pos].clone();
    let rejection = if !activity.completed {
        Some("尚未完成")
    } else if activity.claimed {
        Some("奖励已领取")
    } else if activity.kind == ActivityKind::Limited && activity.end_time <= ctx.now_ms {
        Some("已经结束")
    } else {
        None
    };
    if let Some(reason) = rejection {
        ctx.log(&mut state, format!("活动「{}」{reason}。", activity.name));
        return state;
    }

    let lingshi = activity.rewards.lingshi.unwrap_or(0.0);
    let shengwang = activity.rewards.shengwang.unwrap_or(0.0);
    state.activities[pos].claimed = true;
    state.lingshi += lingshi;
    state.shengwang += shengwang;
    ctx.log(
        &mut state,
        format!("你领取了活动「{}」的奖励，灵石+{lingshi}。", activity.name),
    );
    state
}
