//! Serializable game state and the entity types it aggregates.
//!
//! Field names serialize in camelCase so saves stay readable by every
//! version of the game that shares the `saveVersion` tag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Format tag written into every save. Raised whenever the layout changes.
pub const CURRENT_SAVE_VERSION: u32 = 2;

/// A rung on the realm ladder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Realm {
    pub id: String,
    pub name: String,
    /// Xiuwei required to break through into this realm.
    pub need_xiuwei: f64,
}

/// Spiritual root rarity tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Root {
    pub id: String,
    pub name: String,
    /// Efficiency multiplier (>= 1.0, 1.0 = no bonus).
    pub efficiency_bonus: f64,
}

/// Cultivation manual. `learned` is a one-way latch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manual {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub learned: bool,
    pub efficiency_bonus: f64,
    pub cost_lingshi: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub count: u32,
}

/// One entry of the player-facing journal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogLine {
    pub id: String,
    pub at_ms: i64,
    pub text: String,
}

/// Cached output of [`crate::compute_derived`]. Never written by commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Derived {
    pub efficiency: f64,
    pub base_per_tick: f64,
    pub gain_per_tick: f64,
}

impl Default for Derived {
    fn default() -> Self {
        Self {
            efficiency: 1.0,
            base_per_tick: 20.0,
            gain_per_tick: 20.0,
        }
    }
}

/// Buildings inside the cave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaveFeature {
    SpiritField,
    AlchemyRoom,
    RefiningForge,
    GatheringArray,
    BeastPen,
}

impl CaveFeature {
    pub const ALL: [CaveFeature; 5] = [
        CaveFeature::SpiritField,
        CaveFeature::AlchemyRoom,
        CaveFeature::RefiningForge,
        CaveFeature::GatheringArray,
        CaveFeature::BeastPen,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            CaveFeature::SpiritField => "灵田",
            CaveFeature::AlchemyRoom => "炼丹房",
            CaveFeature::RefiningForge => "炼器炉",
            CaveFeature::GatheringArray => "聚灵阵",
            CaveFeature::BeastPen => "灵兽圈",
        }
    }
}

/// Level (0..=5) of each cave feature.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaveFeatures {
    pub spirit_field: u8,
    pub alchemy_room: u8,
    pub refining_forge: u8,
    pub gathering_array: u8,
    pub beast_pen: u8,
}

impl CaveFeatures {
    pub fn level(&self, feature: CaveFeature) -> u8 {
        match feature {
            CaveFeature::SpiritField => self.spirit_field,
            CaveFeature::AlchemyRoom => self.alchemy_room,
            CaveFeature::RefiningForge => self.refining_forge,
            CaveFeature::GatheringArray => self.gathering_array,
            CaveFeature::BeastPen => self.beast_pen,
        }
    }

    pub fn set_level(&mut self, feature: CaveFeature, level: u8) {
        let slot = match feature {
            CaveFeature::SpiritField => &mut self.spirit_field,
            CaveFeature::AlchemyRoom => &mut self.alchemy_room,
            CaveFeature::RefiningForge => &mut self.refining_forge,
            CaveFeature::GatheringArray => &mut self.gathering_array,
            CaveFeature::BeastPen => &mut self.beast_pen,
        };
        *slot = level;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cave {
    pub level: u32,
    pub efficiency_bonus: f64,
    pub features: CaveFeatures,
    /// Timestamp (ms) of the last spirit-field harvest.
    pub last_harvest: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PillEffect {
    Xiuwei,
    Efficiency,
    Root,
    Breakthrough,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pill {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub effect: String,
    pub effect_type: PillEffect,
    pub effect_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    pub count: u32,
}

/// Equipment slot. At most one item per slot may be equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
    Ring,
    Necklace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xiuwei_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakthrough_bonus: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub desc: String,
    #[serde(rename = "type")]
    pub slot: EquipSlot,
    pub quality: Rarity,
    pub level: u32,
    pub stats: EquipmentStats,
    pub equipped: bool,
    pub count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetBonus {
    pub efficiency_bonus: f64,
    pub adventure_bonus: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub species: String,
    pub level: u32,
    pub exp: u32,
    pub evolution: u32,
    pub skills: Vec<String>,
    pub bonus: PetBonus,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecretCategory {
    Combat,
    Alchemy,
    Refining,
    Formation,
    Cultivation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretManual {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub category: SecretCategory,
    pub rarity: Rarity,
    pub learned: bool,
    pub effect: String,
    /// Realm names that must already be reached.
    #[serde(default)]
    pub requirements: Vec<String>,
    pub count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    /// Time-boxed: claimable only before `end_time`.
    Limited,
    Daily,
    Weekly,
    Special,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRewards {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lingshi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shengwang: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub desc: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub start_time: i64,
    pub end_time: i64,
    pub rewards: ActivityRewards,
    pub completed: bool,
    pub claimed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Nightmare,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DungeonCost {
    pub years_cultivated: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lingshi: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DungeonRewards {
    pub lingshi: f64,
    pub shengwang: f64,
    /// Multiplier on the bonus cultivation years granted per clear.
    pub exp_rate: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dungeon {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub difficulty: Difficulty,
    pub cost: DungeonCost,
    pub rewards: DungeonRewards,
    pub unlocked: bool,
    pub clear_count: u32,
}

/// Root aggregate. Mutated only through the command engine.
///
/// Missing fields fall back to the catalog defaults so saves written by
/// older versions still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    pub save_version: u32,

    pub lingshi: f64,
    pub shengwang: f64,
    pub years_cultivated: f64,

    pub player_name: String,
    pub avatar_style: String,

    pub xiuwei: f64,
    /// Watermark: timestamp up to which progression has been settled.
    pub last_tick_at_ms: i64,

    pub realms: Vec<Realm>,
    pub realm_index: usize,

    pub roots: Vec<Root>,
    pub root_index: usize,
    pub root_reroll_cost: f64,

    pub manuals: Vec<Manual>,
    pub cave: Cave,
    pub inventory: Vec<InventoryItem>,
    pub pills: Vec<Pill>,
    pub equipment: Vec<Equipment>,
    pub pets: Vec<Pet>,
    pub secret_manuals: Vec<SecretManual>,
    pub activities: Vec<Activity>,
    pub dungeons: Vec<Dungeon>,

    pub active_pet: Option<String>,
    /// Index over `equipment[..].equipped`, keyed by slot.
    pub equipped_items: BTreeMap<EquipSlot, String>,

    pub starter_claimed: bool,
    /// Sequence used to mint unique log line ids.
    pub log_seq: u64,
    pub logs: Vec<LogLine>,

    pub derived: Derived,
}

impl Default for GameState {
    fn default() -> Self {
        crate::catalog::default_state(0)
    }
}

impl GameState {
    pub fn current_realm(&self) -> Option<&Realm> {
        self.realms.get(self.realm_index)
    }

    pub fn next_realm(&self) -> Option<&Realm> {
        self.realms.get(self.realm_index + 1)
    }

    pub fn current_root(&self) -> Option<&Root> {
        self.roots.get(self.root_index)
    }

    /// Append a journal line, dropping the oldest entries beyond `capacity`.
    pub fn push_log(&mut self, at_ms: i64, text: impl Into<String>, capacity: usize) {
        self.log_seq += 1;
        self.logs.push(LogLine {
            id: format!("{at_ms}-{}", self.log_seq),
            at_ms,
            text: text.into(),
        });
        if self.logs.len() > capacity {
            let excess = self.logs.len() - capacity;
            self.logs.drain(..excess);
        }
    }

    /// Rebuild `equipped_items` and `active_pet` from the entity flags.
    ///
    /// When a save carries more than one equipped item for a slot (or more
    /// than one active pet) the first one wins and the rest are cleared.
    pub fn normalize_indexes(&mut self) {
        let mut equipped = BTreeMap::new();
        for item in &mut self.equipment {
            if !item.equipped {
                continue;
            }
            if equipped.contains_key(&item.slot) {
                item.equipped = false;
            } else {
                equipped.insert(item.slot, item.id.clone());
            }
        }
        self.equipped_items = equipped;

        let preferred = self
            .active_pet
            .as_ref()
            .filter(|id| self.pets.iter().any(|p| p.active && &p.id == *id))
            .cloned()
            .or_else(|| self.pets.iter().find(|p| p.active).map(|p| p.id.clone()));
        for pet in &mut self.pets {
            pet.active = preferred.as_deref() == Some(pet.id.as_str());
        }
        self.active_pet = preferred;
    }
}

/// Entities that stack by id instead of occupying one row per copy.
pub trait Stackable {
    fn stack_id(&self) -> &str;
    fn stack_count_mut(&mut self) -> &mut u32;
}

impl Stackable for InventoryItem {
    fn stack_id(&self) -> &str {
        &self.id
    }
    fn stack_count_mut(&mut self) -> &mut u32 {
        &mut self.count
    }
}

impl Stackable for Pill {
    fn stack_id(&self) -> &str {
        &self.id
    }
    fn stack_count_mut(&mut self) -> &mut u32 {
        &mut self.count
    }
}

impl Stackable for Equipment {
    fn stack_id(&self) -> &str {
        &self.id
    }
    fn stack_count_mut(&mut self) -> &mut u32 {
        &mut self.count
    }
}

/// Merge `item` into `list`: bump the count of an existing row with the same
/// id, or append a new row.
pub fn merge_stack<T: Stackable>(list: &mut Vec<T>, mut item: T) {
    match list.iter_mut().find(|x| x.stack_id() == item.stack_id()) {
        Some(existing) => {
            let add = *item.stack_count_mut();
            let count = existing.stack_count_mut();
            *count = count.saturating_add(add);
        }
        None => list.push(item),
    }
}
