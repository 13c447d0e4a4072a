//! Boss behavior: ability cooldowns, ability effects and phase transitions.
//!
//! Everything here operates on a single [`Enemy`] (plus the player for
//! damaging abilities) and is a no-op for enemies without a [`BossProfile`].
//!
//! [`BossProfile`]: crate::state::BossProfile

use crate::config::{CombatRules, PhaseRule};
use crate::env::{RngOracle, compute_seed, context};
use crate::state::{AbilityKind, Character, Enemy};

/// Concrete effect of a boss ability under the current rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilityEffect {
    /// Fixed damage to the player.
    Strike { damage: u32 },
    /// Restores boss health.
    Heal { amount: u32 },
    /// Damages the player and heals the boss for a share of it.
    Drain { damage: u32, heal: u32 },
    /// Permanently raises boss stats.
    Empower { attack: i32, defense: i32 },
}

impl AbilityEffect {
    pub fn of(kind: AbilityKind, damage: Option<u32>, rules: &CombatRules) -> Self {
        match kind {
            AbilityKind::FireBreath | AbilityKind::DeathBolt => Self::Strike {
                damage: damage.unwrap_or_default(),
            },
            AbilityKind::ShadowHeal => Self::Heal {
                amount: rules.shadow_heal_amount,
            },
            AbilityKind::LifeDrain => {
                let damage = damage.unwrap_or_default();
                let heal = u64::from(damage) * u64::from(rules.life_drain_percent) / 100;
                Self::Drain {
                    damage,
                    heal: heal.min(u64::from(u32::MAX)) as u32,
                }
            }
            AbilityKind::RageMode => Self::Empower {
                attack: rules.rage_attack_bonus,
                defense: 0,
            },
            AbilityKind::SummonUndead => Self::Empower {
                attack: rules.summon_attack_bonus,
                defense: rules.summon_defense_bonus,
            },
        }
    }

    /// Damage this effect deals to the player before any mitigation.
    pub fn damage(&self) -> u32 {
        match self {
            Self::Strike { damage } | Self::Drain { damage, .. } => *damage,
            Self::Heal { .. } | Self::Empower { .. } => 0,
        }
    }
}

/// What happened when a boss used an ability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityResolution {
    pub kind: AbilityKind,
    pub effect: AbilityEffect,
    /// Damage actually removed from the player.
    pub damage_dealt: u32,
    /// Health actually restored to the boss.
    pub healed: u32,
    pub narration: String,
}

/// Lowers every ability cooldown by one turn, flooring at zero.
pub fn tick_cooldowns(enemy: &mut Enemy) {
    if let Some(boss) = enemy.boss.as_mut() {
        boss.abilities.iter_mut().for_each(|ability| ability.tick_cooldown());
    }
}

/// Picks one ready ability uniformly at random.
///
/// Returns the index into the boss ability list, or `None` when the enemy is not
/// a boss or everything is cooling down.
pub fn select_ability(
    enemy: &Enemy,
    rng: &(impl RngOracle + ?Sized),
    game_seed: u64,
    nonce: u64,
) -> Option<usize> {
    let boss = enemy.boss.as_ref()?;
    let ready: Vec<usize> = boss
        .abilities
        .iter()
        .enumerate()
        .filter(|(_, ability)| ability.is_ready())
        .map(|(index, _)| index)
        .collect();

    if ready.is_empty() {
        return None;
    }

    let seed = compute_seed(game_seed, nonce, context::ABILITY_CHOICE);
    ready.get(rng.pick_index(seed, ready.len())).copied()
}

/// Resolves the ability at `index`, puts it on cooldown and applies its effect.
///
/// `mitigate` scales damage aimed at the player (used while defending).
pub fn use_ability(
    enemy: &mut Enemy,
    index: usize,
    player: &mut Character,
    rules: &CombatRules,
    mitigate: impl Fn(u32) -> u32,
) -> Option<AbilityResolution> {
    let ability = enemy.boss.as_mut()?.abilities.get_mut(index)?;
    ability.trigger_cooldown();
    let kind = ability.kind;
    let ability_name = ability.name.clone();
    let effect = AbilityEffect::of(kind, ability.damage, rules);

    let mut damage_dealt = 0;
    let mut healed = 0;
    let narration = match effect {
        AbilityEffect::Strike { damage } => {
            damage_dealt = player.health.drain(mitigate(damage));
            format!(
                "{} uses {}! You take {} damage!",
                enemy.name, ability_name, damage_dealt
            )
        }
        AbilityEffect::Heal { amount } => {
            healed = enemy.health.restore(amount);
            format!(
                "{} uses {} and recovers {} health!",
                enemy.name, ability_name, healed
            )
        }
        AbilityEffect::Drain { damage, heal } => {
            damage_dealt = player.health.drain(mitigate(damage));
            healed = enemy.health.restore(heal);
            format!(
                "{} uses {}! You take {} damage and it recovers {} health!",
                enemy.name, ability_name, damage_dealt, healed
            )
        }
        AbilityEffect::Empower { attack, defense } => {
            enemy.attack += attack;
            enemy.defense += defense;
            if defense == 0 {
                format!("{} uses {}! Its attack rises by {}!", enemy.name, ability_name, attack)
            } else {
                format!(
                    "{} uses {}! Its attack rises by {} and defense by {}!",
                    enemy.name, ability_name, attack, defense
                )
            }
        }
    };

    Some(AbilityResolution {
        kind,
        effect,
        damage_dealt,
        healed,
        narration,
    })
}

/// Advances the boss phase as far as its current health allows.
///
/// Phase 2 starts at or below `phase_two.health_percent` of maximum health and
/// resets every cooldown; phase 3 starts at or below `phase_three.health_percent`
/// and shortens every cooldown by one. Both checks run in order, so a single
/// heavy hit can move a boss from phase 1 straight to phase 3. Returns the
/// phases entered, in order.
pub fn advance_phase(enemy: &mut Enemy, rules: &CombatRules) -> Vec<u8> {
    let mut entered = Vec::new();
    let health = enemy.health;

    let Some(boss) = enemy.boss.as_mut() else {
        return entered;
    };

    if boss.phase == 1
        && boss.max_phases >= 2
        && health.at_or_below_percent(rules.phase_two.health_percent)
    {
        boss.phase = 2;
        boss.abilities
            .iter_mut()
            .for_each(|ability| ability.current_cooldown = 0);
        boost(&mut enemy.attack, &mut enemy.defense, rules.phase_two);
        entered.push(2);
    }

    if boss.phase == 2
        && boss.max_phases >= 3
        && health.at_or_below_percent(rules.phase_three.health_percent)
    {
        boss.phase = 3;
        boss.abilities.iter_mut().for_each(|ability| ability.tick_cooldown());
        boost(&mut enemy.attack, &mut enemy.defense, rules.phase_three);
        entered.push(3);
    }

    entered
}

fn boost(attack: &mut i32, defense: &mut i32, rule: PhaseRule) {
    *attack += rule.attack_bonus;
    *defense += rule.defense_bonus;
}
