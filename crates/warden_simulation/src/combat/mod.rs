//! Combat system module
//!
//! ECS ответственность:
//! - Game state: Health, AttackCooldown
//! - Combat rules: cooldown между выстрелами, поворот к цели, смерть
//! - Events: ProjectileLaunchRequested, DamageRequest, EntityDied
//!
//! Снаружи:
//! - projectile spawn + physics (по ProjectileLaunchRequested)
//! - источники урона (шлют DamageRequest)
//! - health bar рендер (читает HealthBar)

use bevy::prelude::*;

pub mod attacker;
pub mod damage;
pub mod systems;
pub mod weapon;

// Re-export основных типов
pub use attacker::{attack, AttackCooldown, AttackOutcome, LaunchRequest};
pub use damage::{DamageRequest, Dead, EntityDestroyed, EntityDied, DESTROY_DELAY};
pub use weapon::ProjectileLaunchRequested;

use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. initialize_health: current = max для новых агентов
/// 2. apply_damage_requests: DamageRequest → Health, смерть, Destroy задача
/// 3. attack_behavior: (в Behavior set, после patrol/chase)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageRequest>()
            .add_event::<EntityDied>()
            .add_event::<EntityDestroyed>()
            .add_event::<ProjectileLaunchRequested>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                (systems::initialize_health, systems::apply_damage_requests)
                    .chain()
                    .in_set(SimulationSet::Health),
                systems::attack_behavior
                    .in_set(SimulationSet::Behavior)
                    .after(crate::ai::systems::chase_behavior),
            ),
        );
    }
}
