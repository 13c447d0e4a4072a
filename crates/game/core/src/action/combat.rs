//! Combat encounter state machine.
//!
//! ```text
//! PlayerTurn --Attack--> EnemyTurn | Ended(Victory)
//! PlayerTurn --Defend--> EnemyTurn
//! PlayerTurn --Flee----> Ended(Fled)
//! EnemyTurn  --auto----> PlayerTurn | Ended(Defeat)
//! ```
//!
//! An ended encounter is removed from the state. The enemy turn is a separate
//! action carrying the [`EncounterId`] it was scheduled for; it is rejected as
//! stale when that encounter is gone or no longer waiting on the enemy.

use crate::action::resolve::{resolve_defeat, resolve_victory};
use crate::action::{ActionTransition, Events};
use crate::combat::{
    advance_phase, calculate_damage, mitigate, roll_variance, select_ability, tick_cooldowns,
    use_ability,
};
use crate::env::{GameEnv, compute_seed, context};
use crate::error::{ErrorSeverity, GameError};
use crate::event::{Combatant, GameEvent};
use crate::state::{CombatOutcome, CombatTurn, EncounterId, Enemy, EntityId, GameState};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("no encounter is active")]
    NoEncounter,

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("enemy turn for encounter {encounter} is stale")]
    StaleEncounter { encounter: EncounterId },

    #[error("encounter enemy {enemy} is missing from the world")]
    EnemyMissing { enemy: EntityId },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CombatError::NoEncounter | CombatError::NotPlayerTurn => ErrorSeverity::Recoverable,
            CombatError::StaleEncounter { .. } => ErrorSeverity::Validation,
            CombatError::EnemyMissing { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CombatError::NoEncounter => "COMBAT_NO_ENCOUNTER",
            CombatError::NotPlayerTurn => "COMBAT_NOT_PLAYER_TURN",
            CombatError::StaleEncounter { .. } => "COMBAT_STALE_ENCOUNTER",
            CombatError::EnemyMissing { .. } => "COMBAT_ENEMY_MISSING",
        }
    }
}

/// The player's choice on their turn.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CombatCommand {
    Attack,
    Defend,
    Flee,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatAction {
    pub command: CombatCommand,
}

impl CombatAction {
    pub fn new(command: CombatCommand) -> Self {
        Self { command }
    }
}

fn encounter_enemy<'s>(
    state: &'s mut GameState,
    enemy: &EntityId,
) -> Result<&'s mut Enemy, CombatError> {
    state
        .enemies
        .iter_mut()
        .find(|candidate| &candidate.id == enemy)
        .ok_or_else(|| CombatError::EnemyMissing {
            enemy: enemy.clone(),
        })
}

impl ActionTransition for CombatAction {
    type Error = CombatError;
    type Result = Events;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let encounter = state.encounter.as_ref().ok_or(CombatError::NoEncounter)?;
        if !encounter.is_player_turn() {
            return Err(CombatError::NotPlayerTurn);
        }
        if state.enemy(&encounter.enemy).is_none() {
            return Err(CombatError::EnemyMissing {
                enemy: encounter.enemy.clone(),
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Events, Self::Error> {
        let encounter = state.encounter.as_ref().ok_or(CombatError::NoEncounter)?;
        let id = encounter.id;
        let enemy_id = encounter.enemy.clone();
        let mut events = Events::new();

        match self.command {
            CombatCommand::Attack => {
                let rules = &env.config().combat;
                let seed = compute_seed(state.game_seed, state.nonce, context::PLAYER_DAMAGE);
                let roll = roll_variance(env.rng(), seed, rules);
                let attack = state.player.attack;

                let enemy = encounter_enemy(state, &enemy_id)?;
                let damage = calculate_damage(attack, enemy.defense, roll, rules);
                enemy.health.drain(damage);
                let name = enemy.name.clone();
                let remaining = enemy.health.current;
                let defeated = enemy.is_defeated();
                let phases = if defeated {
                    Vec::new()
                } else {
                    advance_phase(enemy, rules)
                };

                events.push(GameEvent::DamageDealt {
                    encounter: id,
                    target: Combatant::Enemy,
                    amount: damage,
                    remaining,
                });

                let mut log = vec![format!("You attack {name} for {damage} damage!")];
                for phase in phases {
                    log.push(format!("{name} enters phase {phase}!"));
                    events.push(GameEvent::BossPhaseChanged {
                        enemy: enemy_id.clone(),
                        phase,
                    });
                }

                if defeated {
                    resolve_victory(state, env, id, &enemy_id, &mut events);
                } else if let Some(encounter) = state.encounter.as_mut() {
                    log.into_iter().for_each(|line| encounter.push_log(line));
                    encounter.turn = CombatTurn::EnemyTurn;
                    encounter.defending = false;
                }
            }
            CombatCommand::Defend => {
                if let Some(encounter) = state.encounter.as_mut() {
                    encounter.push_log("You raise your guard!");
                    encounter.turn = CombatTurn::EnemyTurn;
                    encounter.defending = true;
                }
                events.push(GameEvent::Defended { encounter: id });
            }
            CombatCommand::Flee => {
                // The enemy keeps its damage and buffs for the next encounter.
                state.encounter = None;
                events.push(GameEvent::EncounterEnded {
                    encounter: id,
                    enemy: enemy_id,
                    outcome: CombatOutcome::Fled,
                });
            }
        }

        Ok(events)
    }
}

/// The automatic enemy counter-turn for one specific encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTurnAction {
    pub encounter: EncounterId,
}

impl EnemyTurnAction {
    pub fn new(encounter: EncounterId) -> Self {
        Self { encounter }
    }
}

impl ActionTransition for EnemyTurnAction {
    type Error = CombatError;
    type Result = Events;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let stale = CombatError::StaleEncounter {
            encounter: self.encounter,
        };
        let encounter = state.encounter.as_ref().ok_or(stale.clone())?;
        if encounter.id != self.encounter || encounter.turn != CombatTurn::EnemyTurn {
            return Err(stale);
        }
        if state.enemy(&encounter.enemy).is_none() {
            return Err(CombatError::EnemyMissing {
                enemy: encounter.enemy.clone(),
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Events, Self::Error> {
        let encounter = state.encounter.as_ref().ok_or(CombatError::StaleEncounter {
            encounter: self.encounter,
        })?;
        let id = encounter.id;
        let enemy_id = encounter.enemy.clone();
        let defending = encounter.defending;

        let rules = &env.config().combat;
        let game_seed = state.game_seed;
        let nonce = state.nonce;
        let guard = |damage: u32| {
            if defending {
                mitigate(damage, rules)
            } else {
                damage
            }
        };
        let mut events = Events::new();
        let mut log = Vec::new();

        let enemy = state
            .enemies
            .iter_mut()
            .find(|enemy| enemy.id == enemy_id)
            .ok_or_else(|| CombatError::EnemyMissing {
                enemy: enemy_id.clone(),
            })?;
        let player = &mut state.player;

        tick_cooldowns(enemy);
        let ability = select_ability(enemy, env.rng(), game_seed, nonce)
            .and_then(|index| use_ability(enemy, index, player, rules, guard));

        let damage = match ability {
            Some(resolution) => {
                log.push(resolution.narration.clone());
                events.push(GameEvent::AbilityUsed {
                    encounter: id,
                    enemy: enemy_id.clone(),
                    ability: resolution.kind,
                    narration: resolution.narration,
                });
                for phase in advance_phase(enemy, rules) {
                    log.push(format!("{} enters phase {phase}!", enemy.name));
                    events.push(GameEvent::BossPhaseChanged {
                        enemy: enemy_id.clone(),
                        phase,
                    });
                }
                resolution.damage_dealt
            }
            None => {
                let seed = compute_seed(game_seed, nonce, context::ENEMY_DAMAGE);
                let roll = roll_variance(env.rng(), seed, rules);
                let damage = guard(calculate_damage(enemy.attack, player.defense, roll, rules));
                player.health.drain(damage);
                log.push(format!("{} attacks you for {damage} damage!", enemy.name));
                damage
            }
        };

        if damage > 0 {
            events.push(GameEvent::DamageDealt {
                encounter: id,
                target: Combatant::Player,
                amount: damage,
                remaining: state.player.health.current,
            });
        }

        if state.player.is_defeated() {
            resolve_defeat(state, id, &enemy_id, &mut events);
            return Ok(events);
        }

        state.message = match (damage, log.first()) {
            (0, Some(narration)) => narration.clone(),
            _ => format!("Took {damage} damage!"),
        };
        if let Some(encounter) = state.encounter.as_mut() {
            log.into_iter().for_each(|line| encounter.push_log(line));
            encounter.turn = CombatTurn::PlayerTurn;
            encounter.defending = false;
        }

        Ok(events)
    }
}
