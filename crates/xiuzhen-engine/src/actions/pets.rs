//! Companion pets.

use super::Ctx;
use xiuzhen_core::GameState;

const FEED_EXP: u32 = 100;
const EVOLVE_EFFICIENCY_STEP: f64 = 0.02;
const EVOLVE_ADVENTURE_STEP: f64 = 0.03;

/// Activate a pet (resting every other one) or send the active pet to rest.
pub(crate) fn toggle_pet(mut state: GameState, pet_id: &str, ctx: &mut Ctx<'_>) -> GameState {
    let Some(pet) = state.pets.iter().find(|p| p.id == pet_id).cloned() else {
        return state;
    };
    if pet.active {
        for p in &mut state.pets {
            p.active = false;
        }
        state.active_pet = None;
        ctx.log(&mut state, format!("{}开始休息。", pet.name));
    } else {
        for p in &mut state.pets {
            p.active = p.id == pet.id;
        }
        state.active_pet = Some(pet.id.clone());
        ctx.log(&mut state, format!("{}随你一同修行。", pet.name));
    }
    state
}

pub(crate) fn feed_pet(
    mut state: GameState,
    pet_id: &str,
    food_type: &str,
    ctx: &mut Ctx<'_>,
) -> GameState {
    let Some(pet) = state.pets.iter_mut().find(|p| p.id == pet_id) else {
        return state;
    };
    pet.exp = pet.exp.saturating_add(FEED_EXP);
    let name = pet.name.clone();
    let text = if food_type.is_empty() {
        format!("你喂养了{name}，经验+{FEED_EXP}。")
    } else {
        format!("你用{food_type}喂养了{name}，经验+{FEED_EXP}。")
    };
    ctx.log(&mut state, text);
    state
}

pub(crate) fn evolve_pet(mut state: GameState, pet_id: &str, ctx: &mut Ctx<'_>) -> GameState {
    let Some(pet) = state.pets.iter_mut().find(|p| p.id == pet_id) else {
        return state;
    };
    pet.evolution += 1;
    pet.bonus.efficiency_bonus += EVOLVE_EFFICIENCY_STEP;
    pet.bonus.adventure_bonus += EVOLVE_ADVENTURE_STEP;
    let text = format!("{}进化成功，已是第{}阶。", pet.name, pet.evolution);
    ctx.log(&mut state, text);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{Harness, T};
    use xiuzhen_core::default_state;

    #[test]
    fn at_most_one_active_pet() {
        let mut h = Harness::new([]);
        let s = toggle_pet(default_state(T), "fire-sparrow", &mut h.ctx());
        let active: Vec<_> = s.pets.iter().filter(|p| p.active).map(|p| p.id.as_str()).collect();
        assert_eq!(active, ["fire-sparrow"]);
        assert_eq!(s.active_pet.as_deref(), Some("fire-sparrow"));

        let s = toggle_pet(s, "fire-sparrow", &mut h.ctx());
        assert!(s.pets.iter().all(|p| !p.active));
        assert_eq!(s.active_pet, None);
    }

    #[test]
    fn feed_and_evolve() {
        let mut h = Harness::new([]);
        let s = feed_pet(default_state(T), "spirit-cat", "灵果", &mut h.ctx());
        let s = evolve_pet(s, "spirit-cat", &mut h.ctx());
        let cat = s.pets.iter().find(|p| p.id == "spirit-cat").unwrap();
        assert_eq!(cat.exp, 100);
        assert_eq!(cat.evolution, 1);
        assert!((cat.bonus.efficiency_bonus - 0.10).abs() < 1e-12);
        assert!((cat.bonus.adventure_bonus - 0.13).abs() < 1e-12);
    }

    #[test]
    fn unknown_pet_is_ignored() {
        let mut h = Harness::new([]);
        let s = default_state(T);
        assert_eq!(feed_pet(s.clone(), "dragon", "", &mut h.ctx()), s);
    }
}
