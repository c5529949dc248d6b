//! Health initialization, damage application and death systems.

use bevy::prelude::*;

use crate::combat::{DamageRequest, Dead, EntityDied, DESTROY_DELAY};
use crate::components::{DamageOutcome, Health, HealthBar, HealthPresenter};
use crate::timers::{ScheduledTask, ScheduledTasks};

/// Система: инициализация здоровья при спавне
///
/// current = max, presenter (если есть) получает max.
pub fn initialize_health(mut spawned: Query<(&mut Health, Option<&mut HealthBar>), Added<Health>>) {
    for (mut health, mut bar) in spawned.iter_mut() {
        let presenter = bar.as_deref_mut().map(|bar| bar as &mut dyn HealthPresenter);
        health.initialize(presenter);
    }
}

/// Урон напрямую через World (вне тика): Health меняется сразу,
/// Destroy задача ставится на `elapsed + DESTROY_DELAY` от момента вызова.
///
/// `None`: у entity нет Health (не существует / уже удалён).
pub fn apply_damage_now(world: &mut World, target: Entity, amount: f32) -> Option<DamageOutcome> {
    let now = world
        .get_resource::<Time<Fixed>>()
        .map(|time| time.elapsed())
        .unwrap_or_default();

    let mut targets = world.query::<(&mut Health, Option<&mut HealthBar>)>();
    let Ok((mut health, mut bar)) = targets.get_mut(world, target) else {
        crate::logger::log(&format!(
            "apply_damage: target {:?} has no Health (despawned?), ignoring",
            target
        ));
        return None;
    };

    let presenter = bar.as_deref_mut().map(|bar| bar as &mut dyn HealthPresenter);
    let outcome = health.apply_damage(amount, presenter);
    let (current, max) = (health.current, health.max);

    log_damage(target, amount, current, max);

    if outcome == DamageOutcome::Killed {
        let destroy_at = now + DESTROY_DELAY;
        world
            .resource_mut::<ScheduledTasks>()
            .schedule(destroy_at, ScheduledTask::Destroy(target));
        world.entity_mut(target).insert(Dead);
        world.send_event(EntityDied { entity: target });
        log_death(target, destroy_at.as_secs_f32());
    }

    Some(outcome)
}

/// Система: применение DamageRequest событий (урон, возникший внутри тика)
///
/// 1. Health::apply_damage (+ presenter если прикреплён)
/// 2. Первая смерть → маркер Dead + EntityDied
/// 3. Destroy задача через DESTROY_DELAY (ровно одна на entity)
///
/// Агент продолжает действовать до уничтожения.
pub fn apply_damage_requests(
    mut commands: Commands,
    mut requests: EventReader<DamageRequest>,
    mut targets: Query<(&mut Health, Option<&mut HealthBar>)>,
    mut tasks: ResMut<ScheduledTasks>,
    mut died: EventWriter<EntityDied>,
    time: Res<Time<Fixed>>,
) {
    for request in requests.read() {
        let Ok((mut health, mut bar)) = targets.get_mut(request.target) else {
            crate::logger::log(&format!(
                "DamageRequest: target {:?} has no Health (despawned?), ignoring",
                request.target
            ));
            continue;
        };

        let presenter = bar.as_deref_mut().map(|bar| bar as &mut dyn HealthPresenter);
        let outcome = health.apply_damage(request.amount, presenter);

        log_damage(request.target, request.amount, health.current, health.max);

        if outcome != DamageOutcome::Killed {
            continue;
        }

        let destroy_at = time.elapsed() + DESTROY_DELAY;
        tasks.schedule(destroy_at, ScheduledTask::Destroy(request.target));

        commands.entity(request.target).insert(Dead);
        died.write(EntityDied {
            entity: request.target,
        });

        log_death(request.target, destroy_at.as_secs_f32());
    }
}

fn log_damage(target: Entity, amount: f32, current: f32, max: f32) {
    crate::logger::log(&format!(
        "💥 {:?} took {} damage (HP: {}/{})",
        target, amount, current, max
    ));
}

fn log_death(target: Entity, destroy_at_secs: f32) {
    crate::logger::log_info(&format!(
        "☠️ {:?} died, destruction scheduled at {:.3}s",
        target, destroy_at_secs
    ));
}
