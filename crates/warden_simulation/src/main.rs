//! Headless симуляция Warden
//!
//! Земля + цель, проходящая мимо агента. Агент патрулирует, догоняет,
//! стреляет; после середины прогона получает урон, пока не будет уничтожен.

use bevy::prelude::*;
use warden_simulation::logger;
use warden_simulation::{
    apply_damage, create_headless_app, spawn_agent, tick, AgentConfig, CurrentBehavior,
    EntityDestroyed, GroundPatch, Health, HealthBar, ProjectileLaunchRequested, SimulationConfig,
    SpatialBody, LAYER_GROUND, LAYER_TARGET,
};

const TICKS: u32 = 600;
const TARGET_SPEED: f32 = 4.0;
const DAMAGE_FROM_TICK: u32 = 300;
const DAMAGE_EVERY: u32 = 30;
const DAMAGE_AMOUNT: f32 = 20.0;

fn main() {
    let seed = 42;
    println!("Starting Warden headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    let delta = app.world().resource::<SimulationConfig>().tick_duration();

    let world = app.world_mut();
    world.spawn(GroundPatch::square(Vec3::ZERO, 50.0, LAYER_GROUND));
    let target = world
        .spawn((
            Transform::from_xyz(-20.0, 0.0, 3.0),
            SpatialBody::new(0.5, LAYER_TARGET),
        ))
        .id();
    let agent = spawn_agent(world, Vec3::ZERO, AgentConfig::default(), 100.0, Some(target));
    world.entity_mut(agent).insert(HealthBar::default());

    let mut launches = world
        .resource::<Events<ProjectileLaunchRequested>>()
        .get_cursor();
    let mut destroyed = world.resource::<Events<EntityDestroyed>>().get_cursor();
    let mut launch_count = 0;

    for tick_index in 0..TICKS {
        // Цель идёт вдоль X
        if let Some(mut transform) = app.world_mut().get_mut::<Transform>(target) {
            transform.translation.x += TARGET_SPEED * delta.as_secs_f32();
        }

        if tick_index >= DAMAGE_FROM_TICK && tick_index % DAMAGE_EVERY == 0 {
            apply_damage(app.world_mut(), agent, DAMAGE_AMOUNT);
        }

        tick(&mut app, delta);

        let world = app.world();
        launch_count += launches
            .read(world.resource::<Events<ProjectileLaunchRequested>>())
            .count();

        if destroyed
            .read(world.resource::<Events<EntityDestroyed>>())
            .any(|event| event.entity == agent)
        {
            logger::log_info(&format!(
                "Tick {}: agent destroyed after {} launches",
                tick_index, launch_count
            ));
            break;
        }

        if tick_index % 60 == 0 {
            let behavior = world.get::<CurrentBehavior>(agent).map(|current| current.0);
            let health = world.get::<Health>(agent).map(|health| health.current);
            logger::log_info(&format!(
                "Tick {}: behavior {:?}, health {:?}, launches {}",
                tick_index, behavior, health, launch_count
            ));
        }
    }

    println!("Simulation complete! ({} projectile launches)", launch_count);
}
