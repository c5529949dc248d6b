//! AI decision-making module
//!
//! Perception-driven FSM: Patrol ↔ Chase ↔ Attack.
//! Каждый тик: два sphere-теста → таблица приоритетов → одно поведение.
//! Attack поведение живёт в `crate::combat` (cooldown + launch).

use bevy::prelude::*;

pub mod events;
pub mod fsm;
pub mod patrol;
pub mod perception;
pub mod systems;

#[cfg(test)]
mod fsm_tests;

// Re-export основных типов
pub use events::BehaviorChanged;
pub use fsm::{select_behavior, Behavior, CurrentBehavior, DeadZonePolicy};
pub use patrol::{
    horizontal_distance, patrol, search_walk_point, PatrolStep, WalkPoint, MAX_WALK_POINT_RANGE,
};
pub use perception::{evaluate, AgentTarget, PerceptionState};

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate.
/// Порядок выполнения:
/// 1. update_perception: резолв цели + sphere-тесты
/// 2. select_behaviors: PerceptionState → CurrentBehavior
/// 3. patrol_behavior / chase_behavior: команды Navigator
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BehaviorChanged>().add_systems(
            FixedUpdate,
            (
                systems::update_perception.in_set(SimulationSet::Perception),
                systems::select_behaviors.in_set(SimulationSet::Decision),
                (systems::patrol_behavior, systems::chase_behavior)
                    .chain()
                    .in_set(SimulationSet::Behavior),
            ),
        );
    }
}
