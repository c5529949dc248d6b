//! Параметры агента: радиусы, маски слоёв, тайминги атаки

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::{DeadZonePolicy, MAX_WALK_POINT_RANGE};
use crate::spatial::{LAYER_GROUND, LAYER_TARGET};

/// Настройки одного агента (sight/attack radius, patrol, combat)
///
/// Инвариант `0 ≤ attack_range ≤ sight_range` ожидается, но не навязывается
/// ядром: `validate()` сообщает о нарушении, FSM работает в любом случае.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AgentConfig {
    /// Радиус обнаружения цели (метры)
    pub sight_range: f32,
    /// Радиус атаки (метры)
    pub attack_range: f32,
    /// Половина стороны квадрата, в котором ищем walk point
    pub walk_point_range: f32,
    /// Слои, считающиеся землёй для проверки walk point
    pub ground_mask: u32,
    /// Слои, на которых живёт цель
    pub target_mask: u32,
    /// Cooldown между выстрелами (секунды)
    pub time_between_attacks: f32,
    /// Скорость поворота к цели (доля slerp в секунду)
    pub turn_rate: f32,
    /// Импульс снаряда вперёд
    pub forward_impulse: f32,
    /// Импульс снаряда вверх
    pub upward_impulse: f32,
    /// Длина луча вниз при проверке walk point
    pub ground_probe_length: f32,
    /// Дистанция, на которой walk point считается достигнутым
    pub arrival_threshold: f32,
    /// Что делать при `in_attack && !in_sight`
    pub dead_zone_policy: DeadZonePolicy,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            sight_range: 10.0,
            attack_range: 2.0,
            walk_point_range: 10.0,
            ground_mask: LAYER_GROUND,
            target_mask: LAYER_TARGET,
            time_between_attacks: 1.5,
            turn_rate: 5.0,
            forward_impulse: 32.0,
            upward_impulse: 8.0,
            ground_probe_length: 2.0,
            arrival_threshold: 1.0,
            dead_zone_policy: DeadZonePolicy::default(),
        }
    }
}

/// Ошибка валидации `AgentConfig`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite non-negative number, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be a finite positive number, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not exceed {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: f32,
        max: f32,
    },

    #[error("attack_range ({attack_range}) exceeds sight_range ({sight_range})")]
    AttackBeyondSight { attack_range: f32, sight_range: f32 },
}

impl AgentConfig {
    /// Проверить конфиг (первая найденная ошибка)
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("sight_range", self.sight_range),
            ("attack_range", self.attack_range),
            ("walk_point_range", self.walk_point_range),
            ("time_between_attacks", self.time_between_attacks),
            ("forward_impulse", self.forward_impulse),
            ("upward_impulse", self.upward_impulse),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        for (field, value) in [
            ("turn_rate", self.turn_rate),
            ("ground_probe_length", self.ground_probe_length),
            ("arrival_threshold", self.arrival_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.walk_point_range > MAX_WALK_POINT_RANGE {
            return Err(ConfigError::TooLarge {
                field: "walk_point_range",
                value: self.walk_point_range,
                max: MAX_WALK_POINT_RANGE,
            });
        }

        if self.attack_range > self.sight_range {
            return Err(ConfigError::AttackBeyondSight {
                attack_range: self.attack_range,
                sight_range: self.sight_range,
            });
        }

        Ok(())
    }
}
