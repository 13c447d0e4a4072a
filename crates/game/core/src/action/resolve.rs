//! Consequences shared by several actions.

use crate::action::Events;
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::inventory::add_to_inventory;
use crate::progression::gain_experience;
use crate::quest::{WorldEvent, record_event};
use crate::state::{CombatOutcome, EncounterId, EntityId, GameState, GameStatus};

pub const GAME_OVER_MESSAGE: &str = "Game Over!";

/// Grants experience and reports every level reached.
pub(crate) fn grant_experience(
    state: &mut GameState,
    env: &GameEnv<'_>,
    amount: u32,
    events: &mut Events,
) {
    let before = state.player.level;
    let gain = gain_experience(&state.player, amount, &env.config().progression);
    state.player = gain.character;
    events.extend((before + 1..=state.player.level).map(|level| GameEvent::LevelUp { level }));
}

/// Feeds a world event to the quest tracker and pays out completed quests.
///
/// Rewards are granted on the completion transition only, so they are paid
/// exactly once per quest.
pub(crate) fn record_world_event(
    state: &mut GameState,
    env: &GameEnv<'_>,
    event: WorldEvent<'_>,
    events: &mut Events,
) {
    let update = record_event(&mut state.quests, event);

    events.extend(
        update
            .progressed
            .into_iter()
            .map(|progress| GameEvent::ObjectiveProgressed {
                quest: progress.quest,
                objective: progress.objective,
                current: progress.current,
                required: progress.required,
            }),
    );

    for index in update.completed {
        let Some(quest) = state.quests.get(index) else {
            continue;
        };
        events.push(GameEvent::QuestCompleted {
            quest: quest.id.clone(),
            is_main_quest: quest.is_main_quest,
        });

        let rewards = quest.rewards.clone();
        if rewards.experience > 0 {
            grant_experience(state, env, rewards.experience, events);
        }
        state.player.gold = state.player.gold.saturating_add(rewards.gold);
        add_to_inventory(&mut state.player, rewards.items);
    }
}

/// Pays out a defeated enemy and closes the encounter.
pub(crate) fn resolve_victory(
    state: &mut GameState,
    env: &GameEnv<'_>,
    encounter: EncounterId,
    enemy_id: &EntityId,
    events: &mut Events,
) {
    state.encounter = None;
    let Some(enemy) = state.remove_enemy(enemy_id) else {
        return;
    };

    events.push(GameEvent::EncounterEnded {
        encounter,
        enemy: enemy.id.clone(),
        outcome: CombatOutcome::Victory,
    });
    events.push(GameEvent::EnemyDefeated {
        enemy: enemy.id.clone(),
        experience: enemy.experience,
        gold: enemy.gold,
        loot: enemy.loot.iter().map(|item| item.id.clone()).collect(),
    });

    state.message = format!(
        "Defeated {}! Gained {} XP and {} gold.",
        enemy.name, enemy.experience, enemy.gold
    );
    grant_experience(state, env, enemy.experience, events);
    state.player.gold = state.player.gold.saturating_add(enemy.gold);
    add_to_inventory(&mut state.player, enemy.loot);

    record_world_event(state, env, WorldEvent::Killed(&enemy.id), events);
}

/// Ends the playthrough. Only a reset leaves this state.
pub(crate) fn resolve_defeat(
    state: &mut GameState,
    encounter: EncounterId,
    enemy_id: &EntityId,
    events: &mut Events,
) {
    state.player.health.current = 0;
    state.encounter = None;
    state.status = GameStatus::GameOver;
    state.message = GAME_OVER_MESSAGE.to_string();

    events.push(GameEvent::EncounterEnded {
        encounter,
        enemy: enemy_id.clone(),
        outcome: CombatOutcome::Defeat,
    });
    events.push(GameEvent::PlayerDefeated);
}
