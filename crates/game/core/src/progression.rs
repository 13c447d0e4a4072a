//! Experience and leveling.

use crate::config::ProgressionRules;
use crate::state::Character;

/// Result of an experience grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExperienceGain {
    pub character: Character,
    /// Number of levels gained by this grant.
    pub levels_gained: u32,
}

/// Adds `amount` experience and applies every level-up it pays for.
///
/// Each level-up subtracts the current threshold, raises the level, grows
/// maximum health/mana and attack/defense, refills health and mana, and
/// multiplies the threshold by the growth ratio (rounded down). The loop keeps
/// going until `experience < experience_to_next`.
///
/// Pure: the input character is not modified.
pub fn gain_experience(
    character: &Character,
    amount: u32,
    rules: &ProgressionRules,
) -> ExperienceGain {
    let mut next = character.clone();
    next.experience = next.experience.saturating_add(amount);
    next.experience_to_next = next.experience_to_next.max(1);

    let mut levels_gained = 0;
    while next.experience >= next.experience_to_next {
        next.experience -= next.experience_to_next;
        next.level += 1;
        next.health.maximum += rules.health_per_level;
        next.mana.maximum += rules.mana_per_level;
        next.health.refill();
        next.mana.refill();
        next.attack += rules.attack_per_level;
        next.defense += rules.defense_per_level;
        next.experience_to_next = rules.next_threshold(next.experience_to_next);
        levels_gained += 1;
    }

    ExperienceGain {
        character: next,
        levels_gained,
    }
}
