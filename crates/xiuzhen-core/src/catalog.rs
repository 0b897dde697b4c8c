//! Static reference data: the realm ladder, root tiers, starting entities,
//! cost tables and item templates.

use crate::derive::recompute;
use crate::model::*;
use std::collections::BTreeMap;

/// Highest level a cave feature can reach.
pub const MAX_FEATURE_LEVEL: u8 = 5;

/// Lingshi needed to raise a cave feature from `level` to `level + 1`.
/// `None` once the feature is maxed.
pub fn feature_cost(feature: CaveFeature, level: u8) -> Option<f64> {
    let ladder: [f64; MAX_FEATURE_LEVEL as usize] = match feature {
        CaveFeature::SpiritField => [2_000.0, 5_000.0, 12_000.0, 28_000.0, 65_000.0],
        CaveFeature::AlchemyRoom => [3_000.0, 8_000.0, 20_000.0, 48_000.0, 110_000.0],
        CaveFeature::RefiningForge => [4_000.0, 10_000.0, 25_000.0, 60_000.0, 140_000.0],
        CaveFeature::GatheringArray => [5_000.0, 12_000.0, 30_000.0, 72_000.0, 170_000.0],
        CaveFeature::BeastPen => [2_500.0, 6_000.0, 15_000.0, 36_000.0, 85_000.0],
    };
    ladder.get(level as usize).copied()
}

/// Lingshi needed to raise the cave itself one level.
pub fn cave_upgrade_cost(level: u32) -> f64 {
    f64::from(level) * 10_000.0
}

/// Cave efficiency multiplier at a given level.
pub fn cave_bonus_for_level(level: u32) -> f64 {
    1.03 + f64::from(level) * 0.02
}

/// Cumulative probability bands for root tiers, upper bounds per tier.
pub const ROOT_TIER_BANDS: [f64; 4] = [0.60, 0.88, 0.98, 1.0];

/// Lingshi multiplier applied to the reroll cost after each attempt.
pub const ROOT_REROLL_COST_GROWTH: f64 = 1.45;

/// Minimum cultivation years required (and spent) per adventure.
pub const ADVENTURE_YEARS: f64 = 20.0;

/// Cultivation years granted per tick.
pub const YEARS_PER_TICK: f64 = 5.0;

/// Cooldown between spirit-field harvests.
pub const HARVEST_COOLDOWN_MS: i64 = 60_000;

/// Clears needed before the next dungeon in sequence unlocks.
pub const DUNGEON_UNLOCK_CLEARS: u32 = 3;

/// Journal text that marks the starter bundle as claimed in older saves.
pub const STARTER_BUNDLE_MARKER: &str = "新手补给";

pub fn starter_bundle_items() -> [InventoryItem; 2] {
    [
        item("spirit-stone", "灵石碎晶", "可以当作灵石使用的碎晶。", 12),
        item("herb-1", "凝气草", "常见灵草，炼丹常用材料。", 6),
    ]
}

pub fn adventure_ore(count: u32) -> InventoryItem {
    item("ore-1", "赤铁矿", "常见矿石，可用于炼器。", count)
}

pub fn adventure_rare_drop() -> InventoryItem {
    item("pill-1", "凝神丹", "服用后短时间内吐纳更顺畅。", 1)
}

pub fn harvest_herbs() -> InventoryItem {
    item("spirit-herb", "灵田药材", "从灵田收获的新鲜药材", 5)
}

pub fn alchemy_output() -> Pill {
    Pill {
        id: "advanced-qi-gathering".into(),
        name: "高级聚气丹".into(),
        desc: "经过精炼的优质聚气丹".into(),
        effect: "立即获得3000修为".into(),
        effect_type: PillEffect::Xiuwei,
        effect_value: 3000.0,
        duration: None,
        count: 2,
    }
}

pub fn refining_output() -> Equipment {
    Equipment {
        id: "refined-legendary-sword".into(),
        name: "传说仙剑".into(),
        desc: "经过千锤百炼的传说级仙剑".into(),
        slot: EquipSlot::Weapon,
        quality: Rarity::Legendary,
        level: 10,
        stats: EquipmentStats {
            efficiency_bonus: Some(0.3),
            xiuwei_bonus: Some(0.15),
            breakthrough_bonus: None,
        },
        equipped: false,
        count: 1,
    }
}

/// Look up a pill by id among the starting pills and crafted outputs.
pub fn pill_template(id: &str) -> Option<Pill> {
    pills()
        .into_iter()
        .chain(std::iter::once(alchemy_output()))
        .find(|p| p.id == id)
        .map(|p| Pill { count: 1, ..p })
}

/// Look up equipment by id among the starting gear and crafted outputs.
pub fn equipment_template(id: &str) -> Option<Equipment> {
    equipment()
        .into_iter()
        .chain(std::iter::once(refining_output()))
        .find(|e| e.id == id)
        .map(|e| Equipment {
            equipped: false,
            count: 1,
            ..e
        })
}

pub fn pet_template(id: &str) -> Option<Pet> {
    pets()
        .into_iter()
        .find(|p| p.id == id)
        .map(|p| Pet { active: false, ..p })
}

fn item(id: &str, name: &str, desc: &str, count: u32) -> InventoryItem {
    InventoryItem {
        id: id.into(),
        name: name.into(),
        desc: desc.into(),
        count,
    }
}

fn realm(id: &str, name: &str, need_xiuwei: f64) -> Realm {
    Realm {
        id: id.into(),
        name: name.into(),
        need_xiuwei,
    }
}

pub fn realms() -> Vec<Realm> {
    vec![
        realm("qi1", "炼气·一层", 0.0),
        realm("qi2", "炼气·二层", 800.0),
        realm("qi3", "炼气·三层", 2_000.0),
        realm("qi4", "炼气·四层", 3_500.0),
        realm("qi5", "炼气·五层", 5_500.0),
        realm("qi6", "炼气·六层", 8_000.0),
        realm("qi7", "炼气·七层", 11_000.0),
        realm("qi8", "炼气·八层", 15_000.0),
        realm("qi9", "炼气·九层", 20_000.0),
        realm("zhuji1", "筑基·初期", 28_000.0),
        realm("zhuji2", "筑基·二层", 38_000.0),
        realm("zhuji3", "筑基·三层", 50_000.0),
        realm("zhuji4", "筑基·中期", 65_000.0),
        realm("zhuji5", "筑基·五层", 82_000.0),
        realm("zhuji6", "筑基·六层", 102_000.0),
        realm("zhuji7", "筑基·七层", 125_000.0),
        realm("zhuji8", "筑基·八层", 151_000.0),
        realm("zhuji9", "筑基·后期", 180_000.0),
        realm("jindan1", "金丹·初期", 220_000.0),
        realm("jindan2", "金丹·二层", 270_000.0),
        realm("jindan3", "金丹·三层", 330_000.0),
        realm("jindan4", "金丹·中期", 400_000.0),
        realm("jindan5", "金丹·五层", 480_000.0),
        realm("jindan6", "金丹·六层", 570_000.0),
        realm("jindan7", "金丹·七层", 670_000.0),
        realm("jindan8", "金丹·八层", 780_000.0),
        realm("jindan9", "金丹·大圆满", 900_000.0),
        realm("yuanying1", "元婴·初期", 1_100_000.0),
        realm("yuanying2", "元婴·二层", 1_350_000.0),
        realm("yuanying3", "元婴·三层", 1_650_000.0),
        realm("yuanying4", "元婴·中期", 2_000_000.0),
        realm("yuanying5", "元婴·五层", 2_400_000.0),
        realm("yuanying6", "元婴·六层", 2_850_000.0),
        realm("yuanying7", "元婴·七层", 3_350_000.0),
        realm("yuanying8", "元婴·八层", 3_900_000.0),
        realm("yuanying9", "元婴·大圆满", 4_500_000.0),
        realm("huashen1", "化神·初期", 5_500_000.0),
        realm("huashen2", "化神·二层", 6_600_000.0),
        realm("huashen3", "化神·三层", 7_800_000.0),
        realm("huashen4", "化神·中期", 9_100_000.0),
        realm("huashen5", "化神·五层", 10_500_000.0),
        realm("huashen6", "化神·六层", 12_000_000.0),
        realm("huashen7", "化神·七层", 13_600_000.0),
        realm("huashen8", "化神·八层", 15_300_000.0),
        realm("huashen9", "化神·大圆满", 17_100_000.0),
        realm("lianxu", "炼虚期", 20_000_000.0),
        realm("heti", "合体期", 28_000_000.0),
        realm("dacheng", "大乘期", 40_000_000.0),
        realm("dujie", "渡劫期", 60_000_000.0),
        realm("tianxian", "天仙", 100_000_000.0),
        realm("xianzun", "仙尊", 200_000_000.0),
        realm("xianhuang", "仙皇", 500_000_000.0),
    ]
}

pub fn roots() -> Vec<Root> {
    [
        ("common", "凡品灵根", 1.0),
        ("good", "上品灵根", 1.15),
        ("rare", "异灵根", 1.35),
        ("heaven", "天灵根", 1.65),
    ]
    .into_iter()
    .map(|(id, name, bonus)| Root {
        id: id.into(),
        name: name.into(),
        efficiency_bonus: bonus,
    })
    .collect()
}

pub fn manuals() -> Vec<Manual> {
    [
        ("breath-1", "《清心吐纳诀》", "入门吐纳，心如止水。", 1.05, 0.0),
        ("breath-2", "《玄元引气篇》", "引灵入体，周天自转。", 1.12, 2_400.0),
        ("breath-3", "《星河归一法》", "以星为引，气机如潮。", 1.22, 8_000.0),
        ("qi-circulation", "《周天搬运功》", "强化经脉运转，加速灵气循环", 1.28, 15_000.0),
        ("five-elements", "《五行调和法》", "调和五行灵气，修炼事半功倍", 1.35, 25_000.0),
        ("golden-core", "《金丹大道》", "结丹期的核心修炼法门", 1.45, 50_000.0),
        ("yuan-ying", "《元婴真诀》", "孕育元婴的无上心法", 1.55, 100_000.0),
        ("spirit-transformation", "《化神玄法》", "化神期的顶级修炼功法", 1.68, 200_000.0),
        ("void-void", "《太虚诀》", "传说中的至高功法，触及大道本源", 1.85, 500_000.0),
        ("immortal-path", "《仙道真经》", "通往仙门的终极法诀", 2.0, 1_000_000.0),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, name, desc, bonus, cost))| Manual {
        id: id.into(),
        name: name.into(),
        desc: desc.into(),
        learned: i == 0,
        efficiency_bonus: bonus,
        cost_lingshi: cost,
    })
    .collect()
}

fn pills() -> Vec<Pill> {
    let pill = |id: &str,
                name: &str,
                desc: &str,
                effect: &str,
                effect_type: PillEffect,
                effect_value: f64,
                duration: Option<i64>,
                count: u32| Pill {
        id: id.into(),
        name: name.into(),
        desc: desc.into(),
        effect: effect.into(),
        effect_type,
        effect_value,
        duration,
        count,
    };
    vec![
        pill(
            "qi-gathering",
            "聚气丹",
            "提升修为的基础丹药",
            "立即获得1000修为",
            PillEffect::Xiuwei,
            1000.0,
            None,
            5,
        ),
        pill(
            "cultivation-boost",
            "修炼散",
            "临时提升修炼效率",
            "修炼效率+20%，持续10分钟",
            PillEffect::Efficiency,
            0.2,
            Some(600_000),
            3,
        ),
        pill(
            "breakthrough-pill",
            "突破丹",
            "大幅提升突破成功率",
            "突破成功率+30%",
            PillEffect::Breakthrough,
            0.3,
            None,
            2,
        ),
        pill(
            "spirit-essence",
            "灵髓丸",
            "顶级修炼丹药，蕴含精纯灵气",
            "立即获得5000修为",
            PillEffect::Xiuwei,
            5000.0,
            None,
            1,
        ),
        pill(
            "root-nourishing",
            "养根丹",
            "滋养灵根，小幅提升灵根品质",
            "灵根品质提升",
            PillEffect::Root,
            1.0,
            None,
            2,
        ),
    ]
}

/// Every piece of equipment the game knows about, starting gear first.
pub fn equipment() -> Vec<Equipment> {
    vec![
        Equipment {
            id: "beginner-sword".into(),
            name: "新手长剑".into(),
            desc: "初学者使用的普通长剑".into(),
            slot: EquipSlot::Weapon,
            quality: Rarity::Common,
            level: 1,
            stats: EquipmentStats {
                efficiency_bonus: Some(0.05),
                ..Default::default()
            },
            equipped: true,
            count: 1,
        },
        Equipment {
            id: "beginner-robe".into(),
            name: "布衣长袍".into(),
            desc: "简单的修行长袍".into(),
            slot: EquipSlot::Armor,
            quality: Rarity::Common,
            level: 1,
            stats: EquipmentStats {
                xiuwei_bonus: Some(0.02),
                ..Default::default()
            },
            equipped: true,
            count: 1,
        },
        Equipment {
            id: "spirit-ring".into(),
            name: "灵玉指环".into(),
            desc: "蕴含灵气的精美指环".into(),
            slot: EquipSlot::Ring,
            quality: Rarity::Rare,
            level: 5,
            stats: EquipmentStats {
                efficiency_bonus: Some(0.12),
                xiuwei_bonus: Some(0.05),
                breakthrough_bonus: None,
            },
            equipped: false,
            count: 1,
        },
        Equipment {
            id: "protective-necklace".into(),
            name: "护身符项链".into(),
            desc: "刻有防护符文的护身符".into(),
            slot: EquipSlot::Necklace,
            quality: Rarity::Rare,
            level: 3,
            stats: EquipmentStats {
                breakthrough_bonus: Some(0.15),
                ..Default::default()
            },
            equipped: false,
            count: 1,
        },
    ]
}

/// Every pet the game knows about. Only the spirit cat starts active.
pub fn pets() -> Vec<Pet> {
    [
        (
            "spirit-cat",
            "灵猫",
            "通人性的灵兽，能帮助主人修炼",
            "灵兽",
            &["灵气感知"][..],
            0.08,
            0.1,
        ),
        ("fire-sparrow", "火雀", "能操控火焰的小型灵鸟", "灵禽", &["火焰喷发"][..], 0.06, 0.15),
        (
            "water-turtle",
            "玄水龟",
            "防御力强大的灵兽",
            "灵兽",
            &["水盾", "防御强化"][..],
            0.05,
            0.08,
        ),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, name, desc, species, skills, eff, adv))| Pet {
        id: id.into(),
        name: name.into(),
        desc: desc.into(),
        species: species.into(),
        level: 1,
        exp: 0,
        evolution: 0,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        bonus: PetBonus {
            efficiency_bonus: eff,
            adventure_bonus: adv,
        },
        active: i == 0,
    })
    .collect()
}

fn secret_manuals() -> Vec<SecretManual> {
    [
        (
            "basic-alchemy",
            "《基础炼丹术》",
            "炼制基础丹药的入门秘籍",
            SecretCategory::Alchemy,
            Rarity::Common,
            "解锁基础丹药炼制",
            "炼气·三层",
        ),
        (
            "sword-arts",
            "《基础剑诀》",
            "修真界最基础的剑法修炼",
            SecretCategory::Combat,
            Rarity::Common,
            "战斗力+10%",
            "炼气·二层",
        ),
        (
            "advanced-sword-arts",
            "《流云剑法》",
            "进阶剑法，剑如流云，变幻莫测",
            SecretCategory::Combat,
            Rarity::Rare,
            "战斗力+25%，历练加成+15%",
            "筑基·初期",
        ),
        (
            "formation-basics",
            "《阵法入门》",
            "基础阵法布置与破解",
            SecretCategory::Formation,
            Rarity::Rare,
            "副本成功率+20%",
            "炼气·五层",
        ),
        (
            "refining-secrets",
            "《炼器秘要》",
            "炼器师的秘密心得",
            SecretCategory::Refining,
            Rarity::Epic,
            "解锁高级装备炼制",
            "金丹·初期",
        ),
        (
            "cultivation-insights",
            "《修炼心得》",
            "前辈高手的修炼经验总结",
            SecretCategory::Cultivation,
            Rarity::Legendary,
            "修炼效率+30%，突破成功率+20%",
            "元婴·初期",
        ),
    ]
    .into_iter()
    .map(|(id, name, desc, category, rarity, effect, req)| SecretManual {
        id: id.into(),
        name: name.into(),
        desc: desc.into(),
        category,
        rarity,
        learned: false,
        effect: effect.into(),
        requirements: vec![req.to_string()],
        count: 1,
    })
    .collect()
}

fn activities(now_ms: i64) -> Vec<Activity> {
    vec![Activity {
        id: "double-xiuwei".into(),
        name: "双倍修炼".into(),
        desc: "限时活动：修炼效率翻倍".into(),
        kind: ActivityKind::Limited,
        start_time: now_ms,
        end_time: now_ms + 24 * 60 * 60 * 1000,
        rewards: ActivityRewards {
            lingshi: Some(500.0),
            ..Default::default()
        },
        completed: false,
        claimed: false,
    }]
}

fn dungeons() -> Vec<Dungeon> {
    [
        (
            "spirit-beast-forest",
            "灵兽森林",
            "栖息着各种灵兽的神秘森林",
            Difficulty::Easy,
            10.0,
            100.0,
            200.0,
            50.0,
            1.2,
            ["spirit-beast-core", "herb-common"],
        ),
        (
            "ancient-ruins",
            "上古遗迹",
            "埋藏着上古修士传承的遗迹",
            Difficulty::Normal,
            30.0,
            500.0,
            800.0,
            200.0,
            1.5,
            ["ancient-scroll", "spirit-ore"],
        ),
        (
            "demon-lair",
            "妖魔洞府",
            "强大的妖魔盘踞的险地",
            Difficulty::Hard,
            60.0,
            1_500.0,
            2_000.0,
            600.0,
            2.0,
            ["demon-core", "rare-herb"],
        ),
        (
            "celestial-pavilion",
            "天机阁",
            "藏有天机秘宝的神秘楼阁",
            Difficulty::Nightmare,
            120.0,
            5_000.0,
            8_000.0,
            2_500.0,
            3.0,
            ["celestial-fragment", "legendary-equip"],
        ),
        (
            "underworld-palace",
            "九幽魔殿",
            "魔道至强者的大本营",
            Difficulty::Nightmare,
            200.0,
            10_000.0,
            15_000.0,
            5_000.0,
            4.0,
            ["infernal-core", "divine-recipe"],
        ),
    ]
    .into_iter()
    .enumerate()
    .map(
        |(i, (id, name, desc, difficulty, years, cost, lingshi, shengwang, exp_rate, items))| {
            Dungeon {
                id: id.into(),
                name: name.into(),
                desc: desc.into(),
                difficulty,
                cost: DungeonCost {
                    years_cultivated: years,
                    lingshi: Some(cost),
                },
                rewards: DungeonRewards {
                    lingshi,
                    shengwang,
                    exp_rate,
                    items: items.iter().map(|s| s.to_string()).collect(),
                },
                unlocked: i == 0,
                clear_count: 0,
            }
        },
    )
    .collect()
}

/// Seed a fresh game at `now_ms`, with derived stats already computed.
pub fn default_state(now_ms: i64) -> GameState {
    let opening = [
        ("start", "你盘膝入定，开始了新的修行旅途。"),
        ("pet", "一只灵猫主动靠近，似乎想与你同行。"),
        ("equipment", "你获得了新手装备，虽然朴素但实用。"),
    ];
    let mut equipped_items = BTreeMap::new();
    equipped_items.insert(EquipSlot::Weapon, "beginner-sword".to_string());
    equipped_items.insert(EquipSlot::Armor, "beginner-robe".to_string());

    let state = GameState {
        save_version: CURRENT_SAVE_VERSION,
        lingshi: 1_200.0,
        shengwang: 0.0,
        years_cultivated: 0.0,
        player_name: "某位道友".into(),
        avatar_style: "default".into(),
        xiuwei: 0.0,
        last_tick_at_ms: now_ms,
        realms: realms(),
        realm_index: 0,
        roots: roots(),
        root_index: 0,
        root_reroll_cost: 800.0,
        manuals: manuals(),
        cave: Cave {
            level: 1,
            efficiency_bonus: 1.03,
            features: CaveFeatures::default(),
            last_harvest: now_ms,
        },
        inventory: Vec::new(),
        pills: pills(),
        equipment: equipment(),
        pets: pets(),
        secret_manuals: secret_manuals(),
        activities: activities(now_ms),
        dungeons: dungeons(),
        active_pet: Some("spirit-cat".into()),
        equipped_items,
        starter_claimed: false,
        log_seq: 0,
        logs: opening
            .iter()
            .map(|(id, text)| LogLine {
                id: (*id).into(),
                at_ms: now_ms,
                text: (*text).into(),
            })
            .collect(),
        derived: Derived::default(),
    };
    recompute(state)
}
