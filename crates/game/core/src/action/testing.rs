//! Fixtures shared by the action tests.

use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::env::{GameEnv, MapDimensions, PcgRng, StaticMap};
use crate::state::{
    AbilityKind, AbilityTag, BossProfile, Character, Encounter, Enemy, EntityId, Equipment,
    GameState, Item, ItemCategory, Position, ResourceMeter, SpecialAbility, StatBundle,
};

pub(crate) fn hero() -> Character {
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

pub(crate) fn goblin() -> Enemy {
    Enemy {
        id: EntityId::new("goblin1"),
        name: "Goblin Warrior".into(),
        health: ResourceMeter::full(40),
        attack: 8,
        defense: 2,
        position: Position::new(5, 5),
        experience: 25,
        gold: 15,
        loot: vec![
            Item::new("sword1", "Rusty Sword", ItemCategory::Weapon, "A worn blade", 25)
                .with_stats(StatBundle::attack(5)),
        ],
        boss: None,
    }
}

pub(crate) fn dragon() -> Enemy {
    Enemy {
        id: EntityId::new("dragon1"),
        name: "Shadow Dragon".into(),
        health: ResourceMeter::full(200),
        attack: 25,
        defense: 8,
        position: Position::new(6, 2),
        experience: 500,
        gold: 1000,
        loot: Vec::new(),
        boss: Some(BossProfile::new(
            3,
            vec![
                SpecialAbility::new("fire_breath", AbilityKind::FireBreath, "Fire Breath", "", 3)
                    .with_damage(35),
                SpecialAbility::new("shadow_heal", AbilityKind::ShadowHeal, "Shadow Heal", "", 4)
                    .with_tag(AbilityTag::Heal),
                SpecialAbility::new("rage_mode", AbilityKind::RageMode, "Rage Mode", "", 5)
                    .with_tag(AbilityTag::Rage),
            ],
        )),
    }
}

/// An 8x8 walled room with only the hero in it.
pub(crate) struct TestWorld {
    pub state: GameState,
    pub map: StaticMap,
    pub config: GameConfig,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            state: GameState::new(7, hero(), Vec::new(), Vec::new(), Vec::new()),
            map: StaticMap::bordered(MapDimensions::new(8, 8), std::iter::empty()),
            config: GameConfig::default(),
        }
    }

    /// Puts `enemy` in the world and opens an encounter with it.
    pub fn engage(&mut self, enemy: Enemy) {
        let id = self.state.allocate_encounter_id();
        self.state.encounter = Some(Encounter::new(id, enemy.id.clone(), &enemy.name));
        self.state.enemies.push(enemy);
    }

    pub fn validate<A: ActionTransition>(&self, action: A) -> Result<(), A::Error> {
        let env = GameEnv::new(&self.map, &PcgRng, &self.config);
        action.pre_validate(&self.state, &env)
    }

    /// Runs the full transition and advances the nonce on success.
    pub fn apply<A: ActionTransition>(&mut self, action: A) -> Result<A::Result, A::Error> {
        let env = GameEnv::new(&self.map, &PcgRng, &self.config);
        action.pre_validate(&self.state, &env)?;
        let result = action.apply(&mut self.state, &env)?;
        action.post_validate(&self.state, &env)?;
        self.state.nonce += 1;
        Ok(result)
    }
}
