//! Movement компоненты: команда навигации для внешнего Navigator

use bevy::prelude::*;

/// Команда движения агента (исполняет внешний navigation слой)
///
/// Архитектура:
/// - ECS системы пишут MovementCommand (high-level intent)
/// - navigation слой читает и двигает агента к цели со своей скоростью
/// - pathfinding полностью снаружи
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum MovementCommand {
    /// Стоять на месте (не трогать текущий путь)
    Idle,
    /// Двигаться к позиции (world coordinates)
    MoveToPosition { target: Vec3 },
}

impl Default for MovementCommand {
    fn default() -> Self {
        Self::Idle
    }
}

impl MovementCommand {
    pub fn destination(&self) -> Option<Vec3> {
        match self {
            Self::Idle => None,
            Self::MoveToPosition { target } => Some(*target),
        }
    }
}

/// Navigator seam: `set_destination(point)`
///
/// Реализован для `Mut<MovementCommand>` (ECS) и для любого stub'а в тестах.
pub trait Navigator {
    fn set_destination(&mut self, point: Vec3);
}

impl Navigator for MovementCommand {
    fn set_destination(&mut self, point: Vec3) {
        *self = MovementCommand::MoveToPosition { target: point };
    }
}

impl Navigator for Mut<'_, MovementCommand> {
    fn set_destination(&mut self, point: Vec3) {
        // set_if_neq: иначе Changed<MovementCommand> срабатывает каждый тик
        self.set_if_neq(MovementCommand::MoveToPosition { target: point });
    }
}
