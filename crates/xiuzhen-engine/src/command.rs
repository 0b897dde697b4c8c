//! The closed command surface. This is the entire mutation API.
//!
//! Commands travel as JSON objects tagged by `type`, e.g.
//! `{"type":"LEARN_MANUAL","manualId":"breath-control"}`. A tag this build
//! does not recognize decodes to [`Command::Unknown`].

use serde::{Deserialize, Serialize};
use xiuzhen_core::CaveFeature;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Command {
    /// Periodic driver signal. The timestamp is the one passed to
    /// [`crate::Engine::apply`].
    Tick,
    Breakthrough,
    Reset,
    ImportSave {
        save_text: String,
    },
    ClaimStarter,
    RerollRoot,
    LearnManual {
        manual_id: String,
    },
    Adventure,
    UsePill {
        pill_id: String,
    },
    EquipItem {
        equipment_id: String,
    },
    TogglePet {
        pet_id: String,
    },
    LearnSecretManual {
        manual_id: String,
    },
    ExploreDungeon {
        dungeon_id: String,
    },
    ClaimActivity {
        activity_id: String,
    },
    #[serde(rename = "UPDATE_PLAYER_NAME")]
    Rename {
        name: String,
    },
    #[serde(rename = "UPDATE_AVATAR_STYLE")]
    ChangeAvatar {
        style: String,
    },
    UpgradeCave,
    BuildCaveFeature {
        feature: CaveFeature,
    },
    #[serde(rename = "CULTIVATE_SPIRIT_FIELD")]
    HarvestSpiritField {
        reward: HarvestReward,
    },
    #[serde(rename = "ALCHEMY_PILL")]
    CraftPill {
        recipe_id: String,
    },
    #[serde(rename = "REFINING_EQUIPMENT")]
    CraftEquipment {
        recipe_id: String,
    },
    FeedPet {
        pet_id: String,
        #[serde(default)]
        food_type: String,
    },
    EvolvePet {
        pet_id: String,
    },
    GmAddResource {
        resource: Resource,
        amount: f64,
    },
    GmAddItem {
        item_type: ItemKind,
        item_id: String,
    },
    GmUnlockAllDungeons,
    GmCompleteActivity {
        activity_id: String,
    },
    #[serde(other)]
    Unknown,
}

impl Command {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Short stable name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Tick => "tick",
            Command::Breakthrough => "breakthrough",
            Command::Reset => "reset",
            Command::ImportSave { .. } => "import-save",
            Command::ClaimStarter => "claim-starter",
            Command::RerollRoot => "reroll-root",
            Command::LearnManual { .. } => "learn-manual",
            Command::Adventure => "adventure",
            Command::UsePill { .. } => "use-pill",
            Command::EquipItem { .. } => "equip-item",
            Command::TogglePet { .. } => "toggle-pet",
            Command::LearnSecretManual { .. } => "learn-secret-manual",
            Command::ExploreDungeon { .. } => "explore-dungeon",
            Command::ClaimActivity { .. } => "claim-activity",
            Command::Rename { .. } => "rename",
            Command::ChangeAvatar { .. } => "change-avatar",
            Command::UpgradeCave => "cave-upgrade",
            Command::BuildCaveFeature { .. } => "cave-feature-build",
            Command::HarvestSpiritField { .. } => "spirit-field-harvest",
            Command::CraftPill { .. } => "alchemy-craft",
            Command::CraftEquipment { .. } => "equipment-craft",
            Command::FeedPet { .. } => "pet-feed",
            Command::EvolvePet { .. } => "pet-evolve",
            Command::GmAddResource { .. } => "gm-add-resource",
            Command::GmAddItem { .. } => "gm-add-item",
            Command::GmUnlockAllDungeons => "gm-unlock-all-dungeons",
            Command::GmCompleteActivity { .. } => "gm-complete-activity",
            Command::Unknown => "unknown",
        }
    }
}

/// Payload of a spirit-field harvest. The herb list is descriptive.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestReward {
    pub lingshi: f64,
    #[serde(default)]
    pub herbs: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Lingshi,
    Shengwang,
    Xiuwei,
    YearsCultivated,
}

impl Resource {
    pub fn display_name(self) -> &'static str {
        match self {
            Resource::Lingshi => "灵石",
            Resource::Shengwang => "声望",
            Resource::Xiuwei => "修为",
            Resource::YearsCultivated => "修行年数",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Pill,
    Equipment,
    Pet,
    SecretManual,
    Manual,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_tagged_payloads() {
        let c = Command::from_json(r#"{"type":"LEARN_MANUAL","manualId":"m1"}"#).unwrap();
        assert_eq!(
            c,
            Command::LearnManual {
                manual_id: "m1".into()
            }
        );
        let c = Command::from_json(r#"{"type":"BUILD_CAVE_FEATURE","feature":"alchemyRoom"}"#)
            .unwrap();
        assert_eq!(
            c,
            Command::BuildCaveFeature {
                feature: CaveFeature::AlchemyRoom
            }
        );
        let c = Command::from_json(
            r#"{"type":"GM_ADD_RESOURCE","resource":"yearsCultivated","amount":50}"#,
        )
        .unwrap();
        assert_eq!(
            c,
            Command::GmAddResource {
                resource: Resource::YearsCultivated,
                amount: 50.0
            }
        );
    }

    #[test]
    fn legacy_payload_fields_are_ignored() {
        let c = Command::from_json(r#"{"type":"TICK","nowMs":123}"#).unwrap();
        assert_eq!(c, Command::Tick);
        let c = Command::from_json(r#"{"type":"UPGRADE_CAVE","cost":10000}"#).unwrap();
        assert_eq!(c, Command::UpgradeCave);
    }

    #[test]
    fn unrecognized_tag_is_unknown() {
        let c = Command::from_json(r#"{"type":"SUMMON_DRAGON","power":9000}"#).unwrap();
        assert_eq!(c, Command::Unknown);
        assert_eq!(c.kind(), "unknown");
    }

    #[test]
    fn renamed_variants_keep_wire_names() {
        let json = serde_json::to_string(&Command::CraftPill {
            recipe_id: "r".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"ALCHEMY_PILL","recipeId":"r"}"#);
        let json = serde_json::to_string(&Command::Rename { name: "x".into() }).unwrap();
        assert_eq!(json, r#"{"type":"UPDATE_PLAYER_NAME","name":"x"}"#);
    }
}
