//! Perception + behavior selection systems.

use bevy::prelude::*;

use crate::ai::{
    evaluate, select_behavior, AgentTarget, BehaviorChanged, CurrentBehavior, PerceptionState,
};
use crate::components::{Agent, AgentConfig};
use crate::spatial::SpatialIndex;

/// Система: резолв цели + два sphere-теста
///
/// Цель не резолвится (не задана / без Transform) → perception пропускается,
/// состояние сбрасывается в (false, false). Ошибкой это не считается.
pub fn update_perception(
    mut agents: Query<
        (Entity, &Transform, &AgentConfig, &mut AgentTarget, &mut PerceptionState),
        With<Agent>,
    >,
    targets: Query<&Transform>,
    spatial: Res<SpatialIndex>,
) {
    for (entity, transform, config, mut target, mut perception) in agents.iter_mut() {
        let resolved = target
            .entity
            .and_then(|target_entity| targets.get(target_entity).ok())
            .map(|target_transform| target_transform.translation);

        if resolved.is_none() && target.position.is_some() {
            crate::logger::log(&format!(
                "👻 {:?}: target {:?} no longer resolves, skipping perception",
                entity, target.entity
            ));
        }
        target.set_if_neq(AgentTarget {
            entity: target.entity,
            position: resolved,
        });

        let new_state = if resolved.is_some() {
            evaluate(
                &*spatial,
                transform.translation,
                config.sight_range,
                config.attack_range,
                config.target_mask,
            )
        } else {
            PerceptionState::default()
        };

        perception.set_if_neq(new_state);
    }
}

/// Система: PerceptionState → CurrentBehavior (+ BehaviorChanged)
pub fn select_behaviors(
    mut agents: Query<(Entity, &AgentConfig, &PerceptionState, &mut CurrentBehavior), With<Agent>>,
    mut changes: EventWriter<BehaviorChanged>,
) {
    for (entity, config, perception, mut current) in agents.iter_mut() {
        let next = select_behavior(*perception, config.dead_zone_policy);
        let previous = current.0;

        if previous == next {
            continue;
        }

        crate::logger::log(&format!(
            "AI: {:?} {} → {} (sight: {}, attack: {})",
            entity,
            previous.as_str(),
            next.as_str(),
            perception.target_in_sight,
            perception.target_in_attack_range
        ));

        current.0 = next;
        changes.write(BehaviorChanged {
            entity,
            from: previous,
            to: next,
        });
    }
}
