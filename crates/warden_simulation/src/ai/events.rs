//! AI Events: наблюдаемые переходы FSM

use bevy::prelude::*;

use super::Behavior;

/// Выбранное поведение изменилось по сравнению с прошлым тиком
///
/// Только для наблюдения (UI, звук, логи): FSM его не читает.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BehaviorChanged {
    pub entity: Entity,
    pub from: Behavior,
    pub to: Behavior,
}
