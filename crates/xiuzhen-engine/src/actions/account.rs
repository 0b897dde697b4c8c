//! Whole-state operations and player identity.

use super::Ctx;
use persistence::from_portable_string;
use tracing::{info, warn};
use xiuzhen_core::catalog::{default_state, starter_bundle_items};
use xiuzhen_core::{merge_stack, GameState};

/// Longest accepted player name, in characters.
pub(crate) const MAX_NAME_CHARS: usize = 24;

const STARTER_LINGSHI: f64 = 5_000.0;
const STARTER_SHENGWANG: f64 = 20.0;

pub(crate) fn reset(ctx: &mut Ctx<'_>) -> GameState {
    info!(now_ms = ctx.now_ms, "game reset");
    default_state(ctx.now_ms)
}

pub(crate) fn import_save(mut state: GameState, text: &str, ctx: &mut Ctx<'_>) -> GameState {
    match from_portable_string(text) {
        Ok(mut imported) => {
            info!(save_version = imported.save_version, "save imported");
            ctx.log(&mut imported, "你已导入存档。");
            imported
        }
        Err(e) => {
            warn!(error = %e, "rejected save import");
            ctx.log(&mut state, "存档格式不正确，导入失败。");
            state
        }
    }
}

pub(crate) fn claim_starter(mut state: GameState, ctx: &mut Ctx<'_>) -> GameState {
    if state.starter_claimed {
        ctx.log(&mut state, "新手补给只能领取一次。");
        return state;
    }
    state.lingshi += STARTER_LINGSHI;
    state.shengwang += STARTER_SHENGWANG;
    for item in starter_bundle_items() {
        merge_stack(&mut state.inventory, item);
    }
    state.starter_claimed = true;
    ctx.log(
        &mut state,
        format!("你领取了新手补给：灵石+{STARTER_LINGSHI}，声望+{STARTER_SHENGWANG}。"),
    );
    state
}

pub(crate) fn rename(mut state: GameState, name: &str, ctx: &mut Ctx<'_>) -> GameState {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
        ctx.log(
            &mut state,
            format!("道号需为1至{MAX_NAME_CHARS}个字。"),
        );
        return state;
    }
    state.player_name = name.to_string();
    ctx.log(&mut state, format!("你改道号为「{name}」。"));
    state
}

pub(crate) fn change_avatar(mut state: GameState, style: &str, ctx: &mut Ctx<'_>) -> GameState {
    let style = style.trim();
    if style.is_empty() {
        ctx.log(&mut state, "未选择头像风格。");
        return state;
    }
    state.avatar_style = style.to_string();
    ctx.log(&mut state, "你更换了头像风格。");
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{Harness, T};
    use persistence::to_portable_string;

    #[test]
    fn starter_bundle_is_one_shot() {
        let mut h = Harness::new([]);
        let s = claim_starter(default_state(T), &mut h.ctx());
        assert_eq!(s.lingshi, 6_200.0);
        assert_eq!(s.shengwang, 20.0);
        assert!(s.starter_claimed);
        let herbs = s.inventory.iter().find(|i| i.id == "herb-1").unwrap();
        assert_eq!(herbs.count, 6);

        let again = claim_starter(s.clone(), &mut h.ctx());
        assert_eq!(again.lingshi, s.lingshi);
        assert_eq!(again.inventory, s.inventory);
        assert_eq!(again.logs.len(), s.logs.len() + 1);
    }

    #[test]
    fn import_replaces_state_and_confirms() {
        let mut h = Harness::new([]);
        let mut other = default_state(T - 1_000);
        other.player_name = "青云子".into();
        other.lingshi = 42.0;
        let text = to_portable_string(&other).unwrap();

        let out = import_save(default_state(T), &text, &mut h.ctx());
        assert_eq!(out.player_name, "青云子");
        assert_eq!(out.lingshi, 42.0);
        assert_eq!(out.logs.len(), other.logs.len() + 1);
        assert_eq!(out.logs.last().unwrap().text, "你已导入存档。");
    }

    #[test]
    fn bad_import_only_logs() {
        let mut h = Harness::new([]);
        let s = default_state(T);
        for bad in ["", "XZ1:@@@", "XZ1:bnVsbA==", "{\"lingshi\":1}"] {
            let out = import_save(s.clone(), bad, &mut h.ctx());
            assert_eq!(out.lingshi, s.lingshi);
            assert_eq!(out.logs.len(), s.logs.len() + 1);
        }
    }

    #[test]
    fn rename_trims_and_bounds() {
        let mut h = Harness::new([]);
        let s = rename(default_state(T), "  凌霄  ", &mut h.ctx());
        assert_eq!(s.player_name, "凌霄");
        let long: String = "道".repeat(MAX_NAME_CHARS + 1);
        let out = rename(s.clone(), &long, &mut h.ctx());
        assert_eq!(out.player_name, "凌霄");
        let out = rename(s.clone(), "   ", &mut h.ctx());
        assert_eq!(out.player_name, "凌霄");
        let exact: String = "道".repeat(MAX_NAME_CHARS);
        assert_eq!(rename(s, &exact, &mut h.ctx()).player_name, exact);
    }

    #[test]
    fn avatar_requires_a_style() {
        let mut h = Harness::new([]);
        let s = change_avatar(default_state(T), "ink", &mut h.ctx());
        assert_eq!(s.avatar_style, "ink");
        assert_eq!(change_avatar(s, "", &mut h.ctx()).avatar_style, "ink");
    }
}
