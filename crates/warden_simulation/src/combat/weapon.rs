//! Projectile launch: события для внешнего projectile слоя
//!
//! Architecture:
//! - ECS: cooldown + решение стрелять (attack_behavior)
//! - Снаружи: spawn снаряда, импульсы, коллизии
//! - Events: ProjectileLaunchRequested (ECS → projectile layer)

use bevy::prelude::*;

use super::LaunchRequest;

// ❌ Projectile НЕ хранится в ECS: только launch request наружу

/// Event: агент выстрелил (ProjectileLauncher.launch)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileLaunchRequested {
    /// Кто стреляет
    pub shooter: Entity,

    /// Точка спавна (позиция агента + направление на цель)
    pub spawn_position: Vec3,

    /// Unit vector для forward импульса
    pub direction: Vec3,

    /// Импульс вдоль direction
    pub forward_impulse: f32,

    /// Импульс вдоль +Y
    pub upward_impulse: f32,
}

impl ProjectileLaunchRequested {
    pub fn new(shooter: Entity, request: LaunchRequest) -> Self {
        Self {
            shooter,
            spawn_position: request.spawn_position,
            direction: request.direction,
            forward_impulse: request.forward_impulse,
            upward_impulse: request.upward_impulse,
        }
    }

    /// Суммарный импульс (forward + up): то, что physics слой приложит к снаряду
    pub fn total_impulse(&self) -> Vec3 {
        self.direction * self.forward_impulse + Vec3::Y * self.upward_impulse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_event_from_request() {
        let shooter = Entity::from_raw(3);
        let event = ProjectileLaunchRequested::new(
            shooter,
            LaunchRequest {
                spawn_position: Vec3::new(0.0, 1.0, -1.0),
                direction: Vec3::NEG_Z,
                forward_impulse: 32.0,
                upward_impulse: 8.0,
            },
        );

        assert_eq!(event.shooter, shooter);
        assert_eq!(event.spawn_position, Vec3::new(0.0, 1.0, -1.0));
        assert_eq!(event.total_impulse(), Vec3::new(0.0, 8.0, -32.0));
    }
}
