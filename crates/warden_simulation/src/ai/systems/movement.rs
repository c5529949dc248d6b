//! AI movement systems (patrol, chase).

use bevy::prelude::*;

use crate::ai::{patrol, AgentTarget, Behavior, CurrentBehavior, PatrolStep, WalkPoint};
use crate::components::{Agent, AgentConfig, MovementCommand, Navigator};
use crate::spatial::SpatialIndex;
use crate::DeterministicRng;

/// Система: Patrol behavior
///
/// Нет walk point → ищем (RNG + ground probe); есть → ведём Navigator к нему;
/// ближе arrival_threshold по горизонтали → сбрасываем.
pub fn patrol_behavior(
    mut agents: Query<
        (
            Entity,
            &Transform,
            &AgentConfig,
            &CurrentBehavior,
            &mut WalkPoint,
            &mut MovementCommand,
        ),
        With<Agent>,
    >,
    spatial: Res<SpatialIndex>,
    mut rng: ResMut<DeterministicRng>,
) {
    for (entity, transform, config, behavior, mut walk_point, mut command) in agents.iter_mut() {
        if behavior.0 != Behavior::Patrol {
            continue;
        }

        let had_point = walk_point.is_set();
        let step = patrol(
            &mut walk_point,
            transform.translation,
            config,
            &mut rng.rng,
            &*spatial,
            &mut command,
        );

        match step {
            PatrolStep::Moving(point) if !had_point => {
                crate::logger::log(&format!("🚶 {:?} Patrol: new walk point {:?}", entity, point));
            }
            PatrolStep::Arrived(point) => {
                crate::logger::log(&format!(
                    "📍 {:?} Patrol: reached walk point {:?}",
                    entity, point
                ));
            }
            PatrolStep::Moving(_) | PatrolStep::Searching => {}
        }
    }
}

/// Система: Chase behavior: destination = позиция цели
pub fn chase_behavior(
    mut agents: Query<(&AgentTarget, &CurrentBehavior, &mut MovementCommand), With<Agent>>,
) {
    for (target, behavior, mut command) in agents.iter_mut() {
        if behavior.0 != Behavior::Chase {
            continue;
        }

        // Цель не резолвится: пропускаем тик
        let Some(target_position) = target.position else {
            continue;
        };

        command.set_destination(target_position);
    }
}
