//! Attack behavior system (face target, hold position, launch on cooldown).

use bevy::prelude::*;

use crate::ai::{AgentTarget, Behavior, CurrentBehavior};
use crate::combat::{attack, AttackCooldown, ProjectileLaunchRequested};
use crate::components::{Agent, AgentConfig, MovementCommand};
use crate::timers::{ScheduledTask, ScheduledTasks};

/// Система: Attack behavior
///
/// Каждый тик в Attack: hold position + slerp к цели.
/// Cooldown свободен → ProjectileLaunchRequested + задача ResetAttackCooldown.
pub fn attack_behavior(
    mut agents: Query<
        (
            Entity,
            &mut Transform,
            &AgentConfig,
            &AgentTarget,
            &CurrentBehavior,
            &mut AttackCooldown,
            &mut MovementCommand,
        ),
        With<Agent>,
    >,
    mut tasks: ResMut<ScheduledTasks>,
    mut launches: EventWriter<ProjectileLaunchRequested>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let now = time.elapsed();

    for (entity, mut transform, config, target, behavior, mut cooldown, mut command) in
        agents.iter_mut()
    {
        if behavior.0 != Behavior::Attack {
            continue;
        }

        // Цель не резолвится: пропускаем тик
        let Some(target_position) = target.position else {
            continue;
        };

        let outcome = attack(
            transform.translation,
            transform.rotation,
            target_position,
            &mut cooldown,
            config,
            delta,
            now,
            &mut command,
        );

        transform.rotation = outcome.rotation;

        let (Some(launch), Some(reset_at)) = (outcome.launch, outcome.cooldown_reset_at) else {
            continue;
        };

        launches.write(ProjectileLaunchRequested::new(entity, launch));
        tasks.schedule(reset_at, ScheduledTask::ResetAttackCooldown(entity));

        crate::logger::log(&format!(
            "🎯 {:?} fires at {:?} (cooldown until {:.3}s)",
            entity,
            target_position,
            reset_at.as_secs_f32()
        ));
    }
}
