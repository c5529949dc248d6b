//! Behavior selection: PerceptionState → Patrol / Chase / Attack
//!
//! Состояние не хранится между тиками: каждый тик заново из двух bool.
//! Нет enter/exit hooks, нет debounce: дрожание на границе радиуса допустимо.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::PerceptionState;

/// Поведение агента на текущий тик
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum Behavior {
    /// Ничего не делаем (dead zone или ещё не было тика)
    #[default]
    Idle,
    /// Случайное блуждание по walk points
    Patrol,
    /// Бежим к цели
    Chase,
    /// Стоим, поворачиваемся к цели, стреляем
    Attack,
}

impl Behavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Behavior::Idle => "Idle",
            Behavior::Patrol => "Patrol",
            Behavior::Chase => "Chase",
            Behavior::Attack => "Attack",
        }
    }
}

/// Политика для `in_attack && !in_sight`
///
/// Такое возможно только при attack_range > sight_range (невалидный конфиг).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum DeadZonePolicy {
    /// Ни одна ветка не срабатывает: агент стоит этот тик
    #[default]
    Idle,
    /// `in_attack` сам по себе достаточен для атаки
    Attack,
}

/// Поведение, выбранное на последнем тике (для наблюдения; выбор его не читает)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CurrentBehavior(pub Behavior);

/// Таблица приоритетов
///
/// | in_sight | in_attack | behavior            |
/// |----------|-----------|---------------------|
/// | false    | false     | Patrol              |
/// | true     | false     | Chase               |
/// | true     | true      | Attack              |
/// | false    | true      | policy (Idle/Attack)|
pub fn select_behavior(perception: PerceptionState, policy: DeadZonePolicy) -> Behavior {
    match (perception.target_in_sight, perception.target_in_attack_range) {
        (false, false) => Behavior::Patrol,
        (true, false) => Behavior::Chase,
        (true, true) => Behavior::Attack,
        (false, true) => match policy {
            DeadZonePolicy::Idle => Behavior::Idle,
            DeadZonePolicy::Attack => Behavior::Attack,
        },
    }
}
