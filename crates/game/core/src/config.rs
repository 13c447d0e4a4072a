//! Tunable rule tables.
//!
//! Defaults reproduce the canonical balance; content or the runtime may
//! override them (e.g. a TOML/RON config), but the engine never mutates them.

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub combat: CombatRules,
    pub progression: ProgressionRules,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Damage formula and boss behavior parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatRules {
    /// Upper bound of the uniform damage roll added to every hit (inclusive).
    pub damage_variance: u32,
    /// No hit deals less than this.
    pub minimum_damage: u32,
    /// Percentage of incoming damage taken while defending. 100 = no mitigation.
    pub defend_damage_percent: u32,
    pub shadow_heal_amount: u32,
    /// Share of life-drain damage returned to the boss as health.
    pub life_drain_percent: u32,
    pub rage_attack_bonus: i32,
    pub summon_attack_bonus: i32,
    pub summon_defense_bonus: i32,
    pub phase_two: PhaseRule,
    pub phase_three: PhaseRule,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            damage_variance: 4,
            minimum_damage: 1,
            defend_damage_percent: 100,
            shadow_heal_amount: 40,
            life_drain_percent: 80,
            rage_attack_bonus: 10,
            summon_attack_bonus: 5,
            summon_defense_bonus: 3,
            phase_two: PhaseRule {
                health_percent: 66,
                attack_bonus: 5,
                defense_bonus: 2,
            },
            phase_three: PhaseRule {
                health_percent: 33,
                attack_bonus: 8,
                defense_bonus: 3,
            },
        }
    }
}

/// Entry condition and stat boost for a boss phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseRule {
    /// The phase starts once health is at or below this share of maximum.
    pub health_percent: u32,
    pub attack_bonus: i32,
    pub defense_bonus: i32,
}

/// Level-up growth parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionRules {
    pub health_per_level: u32,
    pub mana_per_level: u32,
    pub attack_per_level: i32,
    pub defense_per_level: i32,
    /// Threshold growth as a ratio; 3/2 is a factor of 1.5, rounded down.
    pub threshold_growth_numerator: u32,
    pub threshold_growth_denominator: u32,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            health_per_level: 20,
            mana_per_level: 10,
            attack_per_level: 3,
            defense_per_level: 2,
            threshold_growth_numerator: 3,
            threshold_growth_denominator: 2,
        }
    }
}

impl ProgressionRules {
    /// Next experience threshold, never smaller than one.
    pub fn next_threshold(&self, current: u32) -> u32 {
        let denominator = self.threshold_growth_denominator.max(1) as u64;
        let grown = current as u64 * self.threshold_growth_numerator as u64 / denominator;
        grown.clamp(1, u32::MAX as u64) as u32
    }
}
