//! Combat resolution helpers.
//!
//! Pure functions used by the combat and enemy-turn actions: the damage
//! formula and boss behavior. The encounter state machine itself lives in
//! [`crate::action::combat`].

pub mod boss;
pub mod damage;

pub use boss::{
    AbilityEffect, AbilityResolution, advance_phase, select_ability, tick_cooldowns, use_ability,
};
pub use damage::{calculate_damage, mitigate, roll_variance};
