//! Damage / death события и маркеры
//!
//! Поток:
//! apply_damage (снаружи, сразу) / DamageRequest (внутри тика)
//! → Health::apply_damage → EntityDied (один раз)
//! → через DESTROY_DELAY задача Destroy → EntityDestroyed (один раз)

use bevy::prelude::*;
use std::time::Duration;

/// Задержка между смертью и удалением entity (death animation снаружи)
pub const DESTROY_DELAY: Duration = Duration::from_millis(500);

/// Событие: урон, возникший внутри симуляции
///
/// Применяется в Health set системой `apply_damage_requests`.
/// Внешний урон идёт через `crate::apply_damage` (без задержки).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: f32,
}

/// Событие: entity умер (health <= 0), отправляется ровно один раз
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDied {
    pub entity: Entity,
}

/// Событие: отложенное уничтожение сработало, entity удалён
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDestroyed {
    pub entity: Entity,
}

/// Компонент-маркер: entity мертв, ждёт уничтожения
///
/// Только для наблюдателей: AI продолжает работать до despawn.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;
