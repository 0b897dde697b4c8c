//! The command engine: the single function that turns a state and a command
//! into the next state.

use crate::actions::{self, Ctx};
use crate::command::Command;
use crate::random::{RandomSource, SeededRandom};
use crate::tick::{settle, TickMode};
use tracing::{debug, warn};
use xiuzhen_core::{recompute, ConfigError, EngineConfig, GameState};

/// Owns the configuration and the random source; the state itself is
/// passed through by value.
pub struct Engine<R: RandomSource = SeededRandom> {
    config: EngineConfig,
    rng: R,
}

impl Engine<SeededRandom> {
    /// Engine with a ChaCha source, seeded from `config.rng_seed` when set.
    pub fn from_config(config: EngineConfig) -> Result<Self, ConfigError> {
        let rng = SeededRandom::from_seed_option(config.rng_seed);
        Self::with_random(config, rng)
    }
}

impl<R: RandomSource> Engine<R> {
    pub fn with_random(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn random_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Bring a freshly loaded state up to date: recompute, settle the time
    /// spent closed, recompute again.
    pub fn startup(&mut self, state: GameState, now_ms: i64) -> GameState {
        let state = recompute(state);
        let (state, _) = settle(state, now_ms, TickMode::Offline, &self.config);
        recompute(state)
    }

    /// Apply one command. Total: rejections become journal lines and
    /// unknown commands return the state unchanged.
    pub fn apply(&mut self, state: GameState, command: Command, now_ms: i64) -> GameState {
        if command == Command::Unknown {
            debug!("ignoring unknown command");
            return state;
        }
        debug!(command = command.kind(), now_ms, "apply");

        let mut ctx = Ctx {
            now_ms,
            config: &self.config,
            rng: &mut self.rng,
        };
        let next = match command {
            Command::Tick => settle(state, now_ms, TickMode::Live, ctx.config).0,
            Command::Breakthrough => actions::progression::breakthrough(state, &mut ctx),
            Command::Reset => actions::account::reset(&mut ctx),
            Command::ImportSave { save_text } => {
                actions::account::import_save(state, &save_text, &mut ctx)
            }
            Command::ClaimStarter => actions::account::claim_starter(state, &mut ctx),
            Command::RerollRoot => actions::progression::reroll_root(state, &mut ctx),
            Command::LearnManual { manual_id } => {
                actions::progression::learn_manual(state, &manual_id, &mut ctx)
            }
            Command::Adventure => actions::world::adventure(state, &mut ctx),
            Command::UsePill { pill_id } => actions::items::use_pill(state, &pill_id, &mut ctx),
            Command::EquipItem { equipment_id } => {
                actions::items::equip_item(state, &equipment_id, &mut ctx)
            }
            Command::TogglePet { pet_id } => actions::pets::toggle_pet(state, &pet_id, &mut ctx),
            Command::LearnSecretManual { manual_id } => {
                actions::progression::learn_secret_manual(state, &manual_id, &mut ctx)
            }
            Command::ExploreDungeon { dungeon_id } => {
                actions::world::explore_dungeon(state, &dungeon_id, &mut ctx)
            }
            Command::ClaimActivity { activity_id } => {
                actions::world::claim_activity(state, &activity_id, &mut ctx)
            }
            Command::Rename { name } => actions::account::rename(state, &name, &mut ctx),
            Command::ChangeAvatar { style } => {
                actions::account::change_avatar(state, &style, &mut ctx)
            }
            Command::UpgradeCave => actions::cave::upgrade_cave(state, &mut ctx),
            Command::BuildCaveFeature { feature } => {
                actions::cave::build_feature(state, feature, &mut ctx)
            }
            Command::HarvestSpiritField { reward } => {
                actions::cave::harvest_spirit_field(state, &reward, &mut ctx)
            }
            Command::CraftPill { recipe_id } => {
                actions::cave::craft_pill(state, &recipe_id, &mut ctx)
            }
            Command::CraftEquipment { recipe_id } => {
                actions::cave::craft_equipment(state, &recipe_id, &mut ctx)
            }
            Command::FeedPet { pet_id, food_type } => {
                actions::pets::feed_pet(state, &pet_id, &food_type, &mut ctx)
            }
            Command::EvolvePet { pet_id } => actions::pets::evolve_pet(state, &pet_id, &mut ctx),
            Command::GmAddResource { resource, amount } => {
                actions::operator::add_resource(state, resource, amount, &mut ctx)
            }
            Command::GmAddItem { item_type, item_id } => {
                actions::operator::add_item(state, item_type, &item_id, &mut ctx)
            }
            Command::GmUnlockAllDungeons => actions::operator::unlock_all_dungeons(state, &mut ctx),
            Command::GmCompleteActivity { activity_id } => {
                actions::operator::complete_activity(state, &activity_id, &mut ctx)
            }
            Command::Unknown => state,
        };
        recompute(next)
    }

    /// Decode a JSON command and apply it. A payload that does not decode
    /// is treated like an unknown command.
    pub fn apply_json(&mut self, state: GameState, json: &str, now_ms: i64) -> GameState {
        match Command::from_json(json) {
            Ok(command) => self.apply(state, command, now_ms),
            Err(e) => {
                warn!(error = %e, "dropping malformed command");
                state
            }
        }
    }
}
