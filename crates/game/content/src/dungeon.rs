//! The built-in starting dungeon.
//!
//! A 20x15 walled grid with three regular enemies, two bosses, three floor
//! items and two quests. Every call builds fresh values, so a reset starts
//! from exactly the same world.

use game_core::{
    AbilityKind, AbilityTag, BossProfile, Character, Enemy, EntityId, Equipment, Item,
    ItemCategory, MapDimensions, ObjectiveKind, ObjectiveTarget, Position, Quest,
    QuestObjective, QuestRewards, QuestStatus, ResourceMeter, SpecialAbility, StatBundle,
    WorldItem,
};

use crate::world::WorldSpec;

pub const GRID_WIDTH: u32 = 20;
pub const GRID_HEIGHT: u32 = 15;

/// Interior maze walls.
pub const INTERIOR_WALLS: [(i32, i32); 12] = [
    (5, 5),
    (6, 5),
    (7, 5),
    (12, 3),
    (12, 4),
    (12, 5),
    (8, 8),
    (9, 8),
    (10, 8),
    (15, 10),
    (15, 11),
    (15, 12),
];

/// The complete default world.
pub fn default_world() -> WorldSpec {
    let mut enemies = initial_enemies();
    enemies.extend(initial_bosses());

    WorldSpec {
        dimensions: MapDimensions::new(GRID_WIDTH, GRID_HEIGHT),
        walls: INTERIOR_WALLS
            .iter()
            .map(|&(x, y)| Position::new(x, y))
            .collect(),
        exits: Vec::new(),
        player: initial_player(),
        enemies,
        items: initial_items(),
        quests: initial_quests(),
    }
}

pub fn initial_player() -> Character {
    Character {
        id: EntityId::player(),
        name: "Hero".into(),
        level: 1,
        health: ResourceMeter::full(100),
        mana: ResourceMeter::full(50),
        experience: 0,
        experience_to_next: 100,
        attack: 15,
        defense: 5,
        position: Position::new(1, 1),
        inventory: Vec::new(),
        equipment: Equipment::empty(),
        gold: 50,
    }
}

struct EnemySeed {
    id: &'static str,
    name: &'static str,
    health: u32,
    attack: i32,
    defense: i32,
    position: (i32, i32),
    experience: u32,
    gold: u32,
}

impl EnemySeed {
    fn build(self, loot: Vec<Item>) -> Enemy {
        Enemy {
            id: EntityId::new(self.id),
            name: self.name.into(),
            health: ResourceMeter::full(self.health),
            attack: self.attack,
            defense: self.defense,
            position: Position::new(self.position.0, self.position.1),
            experience: self.experience,
            gold: self.gold,
            loot,
            boss: None,
        }
    }
}

pub fn initial_enemies() -> Vec<Enemy> {
    vec![
        EnemySeed {
            id: "goblin1",
            name: "Goblin Warrior",
            health: 40,
            attack: 8,
            defense: 2,
            position: (15, 8),
            experience: 25,
            gold: 15,
        }
        .build(vec![
            Item::new(
                "sword1",
                "Rusty Sword",
                ItemCategory::Weapon,
                "A worn but functional sword",
                25,
            )
            .with_stats(StatBundle::attack(5)),
        ]),
        EnemySeed {
            id: "orc1",
            name: "Orc Brute",
            health: 60,
            attack: 12,
            defense: 4,
            position: (10, 12),
            experience: 40,
            gold: 25,
        }
        .build(vec![
            Item::new("armor1", "Leather Armor", ItemCategory::Armor, "Basic protection", 40)
                .with_stats(StatBundle::defense(8)),
        ]),
        EnemySeed {
            id: "skeleton1",
            name: "Skeleton Archer",
            health: 35,
            attack: 10,
            defense: 1,
            position: (5, 10),
            experience: 30,
            gold: 20,
        }
        .build(vec![
            Item::new("potion1", "Health Potion", ItemCategory::Potion, "Restores 50 HP", 30)
                .with_stats(StatBundle::restore(50, 0))
                .with_quantity(1),
        ]),
    ]
}

pub fn initial_bosses() -> Vec<Enemy> {
    let mut dragon = EnemySeed {
        id: "dragon1",
        name: "Shadow Dragon",
        health: 200,
        attack: 25,
        defense: 8,
        position: (17, 2),
        experience: 300,
        gold: 500,
    }
    .build(vec![
        Item::new(
            "armor2",
            "Dragonscale Mail",
            ItemCategory::Armor,
            "Scales that still smoulder",
            250,
        )
        .with_stats(StatBundle::defense(15)),
    ]);
    dragon.boss = Some(BossProfile::new(
        3,
        vec![
            SpecialAbility::new(
                "fire_breath",
                AbilityKind::FireBreath,
                "Fire Breath",
                "A torrent of black flame",
                3,
            )
            .with_damage(35),
            SpecialAbility::new(
                "shadow_heal",
                AbilityKind::ShadowHeal,
                "Shadow Heal",
                "Draws the darkness in to mend its wounds",
                4,
            )
            .with_tag(AbilityTag::Heal),
            SpecialAbility::new(
                "rage_mode",
                AbilityKind::RageMode,
                "Rage Mode",
                "Fury sharpens every strike",
                5,
            )
            .with_tag(AbilityTag::Rage),
        ],
    ));

    let mut lich = EnemySeed {
        id: "lich1",
        name: "Lich Lord",
        health: 150,
        attack: 20,
        defense: 6,
        position: (3, 12),
        experience: 200,
        gold: 300,
    }
    .build(vec![
        Item::new(
            "staff1",
            "Bone Staff",
            ItemCategory::Weapon,
            "Cold to the touch",
            150,
        )
        .with_stats(StatBundle::attack(10)),
    ]);
    lich.boss = Some(BossProfile::new(
        2,
        vec![
            SpecialAbility::new(
                "death_bolt",
                AbilityKind::DeathBolt,
                "Death Bolt",
                "A lance of necrotic energy",
                3,
            )
            .with_damage(30),
            SpecialAbility::new(
                "life_drain",
                AbilityKind::LifeDrain,
                "Life Drain",
                "Steals the vitality of the living",
                2,
            )
            .with_damage(20)
            .with_tag(AbilityTag::Heal),
            SpecialAbility::new(
                "summon_undead",
                AbilityKind::SummonUndead,
                "Summon Undead",
                "Skeletal servants shield their master",
                4,
            )
            .with_tag(AbilityTag::Buff),
        ],
    ));

    vec![dragon, lich]
}

pub fn initial_items() -> Vec<WorldItem> {
    vec![
        WorldItem::new(
            Item::new(
                "treasure1",
                "Golden Chalice",
                ItemCategory::Treasure,
                "A valuable golden chalice",
                100,
            ),
            Position::new(18, 13),
        ),
        WorldItem::new(
            Item::new("key1", "Ancient Key", ItemCategory::Key, "Opens mysterious doors", 0),
            Position::new(3, 8),
        ),
        WorldItem::new(
            Item::new("potion2", "Mana Potion", ItemCategory::Potion, "Restores 30 MP", 25)
                .with_stats(StatBundle::restore(0, 30))
                .with_quantity(1),
            Position::new(16, 5),
        ),
    ]
}

pub fn initial_quests() -> Vec<Quest> {
    vec![
        Quest {
            id: EntityId::new("main1"),
            title: "The Ancient Treasure".into(),
            description: "Find the legendary treasure hidden in the dungeon".into(),
            objectives: vec![QuestObjective::new(
                "obj1",
                "Collect the Golden Chalice",
                ObjectiveKind::Collect,
                ObjectiveTarget::parse("treasure1"),
                1,
            )],
            rewards: QuestRewards {
                experience: 100,
                gold: 200,
                items: Vec::new(),
            },
            status: QuestStatus::Active,
            is_main_quest: true,
        },
        Quest {
            id: EntityId::new("side1"),
            title: "Monster Hunter".into(),
            description: "Defeat the creatures lurking in the shadows".into(),
            objectives: vec![QuestObjective::new(
                "obj2",
                "Defeat 3 enemies",
                ObjectiveKind::Kill,
                ObjectiveTarget::parse("any"),
                3,
            )],
            rewards: QuestRewards {
                experience: 75,
                gold: 100,
                items: vec![
                    Item::new(
                        "reward1",
                        "Steel Sword",
                        ItemCategory::Weapon,
                        "A sharp steel blade",
                        75,
                    )
                    .with_stats(StatBundle::attack(12)),
                ],
            },
            status: QuestStatus::Active,
            is_main_quest: false,
        },
    ]
}
