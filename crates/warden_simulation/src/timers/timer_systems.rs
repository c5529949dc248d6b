//! Timer systems (FixedUpdate)

use bevy::prelude::*;

use super::{FixedTickCounter, ScheduledTask, ScheduledTasks};
use crate::combat::{AttackCooldown, EntityDestroyed};

/// System: Increment tick counter (FixedUpdate, запускается ПЕРВЫМ)
pub fn increment_tick_counter(mut counter: ResMut<FixedTickCounter>) {
    counter.tick = counter.tick.wrapping_add(1); // Wraparound safe
}

/// System: исполнить задачи, у которых наступило время
///
/// - ResetAttackCooldown → AttackCooldown::reset (entity может уже не быть)
/// - Destroy → despawn + EntityDestroyed, остальные задачи entity отменяются
pub fn run_scheduled_tasks(
    mut commands: Commands,
    mut tasks: ResMut<ScheduledTasks>,
    mut cooldowns: Query<&mut AttackCooldown>,
    mut destroyed: EventWriter<EntityDestroyed>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed();

    for task in tasks.drain_due(now) {
        match task {
            ScheduledTask::ResetAttackCooldown(entity) => {
                let Ok(mut cooldown) = cooldowns.get_mut(entity) else {
                    continue; // stale: entity уже удалён
                };
                cooldown.reset();
                crate::logger::log(&format!("🔄 {:?}: attack cooldown reset", entity));
            }
            ScheduledTask::Destroy(entity) => {
                let Ok(mut entity_commands) = commands.get_entity(entity) else {
                    crate::logger::log_warning(&format!(
                        "Destroy: {:?} already despawned, skipping",
                        entity
                    ));
                    continue;
                };
                entity_commands.despawn();

                let cancelled = tasks.cancel_where(|pending| pending.entity() == entity);
                destroyed.write(EntityDestroyed { entity });

                crate::logger::log_info(&format!(
                    "🗑️ {:?} destroyed ({} pending tasks cancelled)",
                    entity, cancelled
                ));
            }
        }
    }
}
