//! Damage calculation and application.

use crate::config::CombatRules;
use crate::env::RngOracle;

/// Calculate damage from a single hit.
///
/// # Formula
///
/// ```text
/// damage = max(minimum, attack - defense + roll)
/// ```
///
/// `roll` is the variance roll, normally drawn with [`roll_variance`].
pub fn calculate_damage(attack: i32, defense: i32, roll: u32, rules: &CombatRules) -> u32 {
    let raw = i64::from(attack) - i64::from(defense) + i64::from(roll);
    raw.clamp(i64::from(rules.minimum_damage), i64::from(u32::MAX)) as u32
}

/// Draws the uniform variance roll in `0..=rules.damage_variance`.
pub fn roll_variance(rng: &(impl RngOracle + ?Sized), seed: u64, rules: &CombatRules) -> u32 {
    rng.range(seed, 0, rules.damage_variance)
}

/// Scales incoming damage while the defender is guarding.
///
/// Nonzero damage never drops below the minimum damage; zero stays zero.
pub fn mitigate(damage: u32, rules: &CombatRules) -> u32 {
    if damage == 0 {
        return 0;
    }
    let scaled = u64::from(damage) * u64::from(rules.defend_damage_percent) / 100;
    (scaled.min(u64::from(u32::MAX)) as u32).max(rules.minimum_damage)
}
