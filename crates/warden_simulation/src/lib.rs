//! Warden Simulation Core
//!
//! ECS-симуляция патрульного NPC на Bevy 0.16 (headless)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = decision layer (perception, FSM, cooldown, health)
//! - Движок снаружи = navigation, projectile physics, rendering
//!
//! Связь только через компоненты (MovementCommand, HealthBar) и события
//! (ProjectileLaunchRequested, DamageRequest, EntityDied, EntityDestroyed).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod logger;
pub mod spatial;
pub mod timers;

// Re-export базовых типов для удобства
pub use ai::{
    AIPlugin, AgentTarget, Behavior, BehaviorChanged, CurrentBehavior, DeadZonePolicy,
    PerceptionState, WalkPoint,
};
pub use combat::{
    AttackCooldown, CombatPlugin, DamageRequest, Dead, EntityDestroyed, EntityDied,
    ProjectileLaunchRequested, DESTROY_DELAY,
};
pub use components::*;
pub use spatial::{
    GroundPatch, SpatialBody, SpatialIndex, SpatialPlugin, SpatialQuery, LAYER_AGENTS,
    LAYER_GROUND, LAYER_TARGET,
};
pub use timers::{FixedTickCounter, ScheduledTask, ScheduledTasks, TaskScheduler, TimersPlugin};

/// Порядок систем внутри одного FixedUpdate тика
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Tick counter + пересборка SpatialIndex
    Bookkeeping,
    /// Отложенные задачи (cooldown reset, destroy)
    Timers,
    /// Инициализация здоровья + DamageRequest
    Health,
    /// Резолв цели + sphere-тесты
    Perception,
    /// Выбор поведения
    Decision,
    /// Patrol / Chase / Attack
    Behavior,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Seed и частота тика берутся из `SimulationConfig` (если вставлен до plugin'а).
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Bookkeeping,
                SimulationSet::Timers,
                SimulationSet::Health,
                SimulationSet::Perception,
                SimulationSet::Decision,
                SimulationSet::Behavior,
            )
                .chain(),
        );

        app
            // Fixed timestep (60Hz по умолчанию)
            .insert_resource(Time::<Fixed>::from_hz(config.tick_rate_hz))
            // Детерминистичный RNG (seed из конфига)
            .insert_resource(DeterministicRng::new(config.seed))
            .insert_resource(config)
            // Подсистемы
            .add_plugins((SpatialPlugin, TimersPlugin, CombatPlugin, AIPlugin));
    }
}

/// Параметры запуска симуляции
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub tick_rate_hz: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate_hz: 60.0,
        }
    }
}

impl SimulationConfig {
    /// Длительность одного тика (1 / tick_rate_hz)
    pub fn tick_duration(&self) -> Duration {
        if self.tick_rate_hz > 0.0 && self.tick_rate_hz.is_finite() {
            Duration::from_secs_f64(1.0 / self.tick_rate_hz)
        } else {
            Duration::ZERO
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(SimulationConfig {
            seed,
            ..default()
        })
        .add_plugins(SimulationPlugin);

    app
}

/// Один тик симуляции
///
/// Двигает `Time<Fixed>` на `delta`, ротирует буферы событий симуляции
/// и запускает FixedUpdate ровно один раз.
pub fn tick(app: &mut App, delta: Duration) {
    let world = app.world_mut();

    if let Some(mut time) = world.get_resource_mut::<Time<Fixed>>() {
        time.advance_by(delta);
    }

    rotate_events::<DamageRequest>(world);
    rotate_events::<EntityDied>(world);
    rotate_events::<EntityDestroyed>(world);
    rotate_events::<ProjectileLaunchRequested>(world);
    rotate_events::<BehaviorChanged>(world);

    if let Err(err) = world.try_run_schedule(FixedUpdate) {
        logger::log_error(&format!("tick: FixedUpdate not available: {:?}", err));
    }
}

// Double buffer: событие живёт два тика, потом удаляется
fn rotate_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Внешний урон по entity: Health и presenter обновляются сразу,
/// уничтожение (если умер) через DESTROY_DELAY от текущего `Time<Fixed>::elapsed()`
pub fn apply_damage(world: &mut World, entity: Entity, amount: f32) -> Option<DamageOutcome> {
    combat::systems::apply_damage_now(world, entity, amount)
}

/// Радиус тела агента для spatial queries
pub const AGENT_BODY_RADIUS: f32 = 0.5;

/// Спавн агента со всеми required компонентами
///
/// Невалидный конфиг логируется, агент всё равно спавнится.
pub fn spawn_agent(
    world: &mut World,
    position: Vec3,
    config: AgentConfig,
    max_health: f32,
    target: Option<Entity>,
) -> Entity {
    if let Err(err) = config.validate() {
        logger::log_warning(&format!(
            "spawn_agent: invalid AgentConfig ({}), spawning anyway",
            err
        ));
    }

    let entity = world
        .spawn((
            Agent,
            Transform::from_translation(position),
            config,
            Health::new(max_health),
            AgentTarget::new(target),
            SpatialBody::new(AGENT_BODY_RADIUS, LAYER_AGENTS),
        ))
        .id();

    logger::log_info(&format!(
        "🤖 Agent {:?} spawned at {:?} (HP: {}, target: {:?})",
        entity, position, max_health, target
    ));

    entity
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
