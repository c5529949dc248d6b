//! Attack step: поворот к цели, hold position, выстрел по cooldown
//!
//! Архитектура:
//! - ECS хранит: AttackCooldown (already_attacked + время сброса)
//! - Сброс cooldown: отложенная задача в `ScheduledTasks`, не polling
//! - Снаряд не симулируется: наружу уходит только launch request

use bevy::prelude::*;
use std::time::Duration;

use crate::components::{AgentConfig, Navigator};

/// Cooldown атаки
///
/// Выставляется при выстреле, сбрасывается задачей через time_between_attacks.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AttackCooldown {
    pub already_attacked: bool,
    /// Когда запланирован сброс (elapsed time симуляции)
    pub reset_at: Option<Duration>,
}

impl AttackCooldown {
    /// Может ли атаковать (флаг сброшен)
    pub fn can_attack(&self) -> bool {
        !self.already_attacked
    }

    /// Начать cooldown, вернуть время сброса
    ///
    /// Непредставимый cooldown (inf, 1e20 s) насыщается до `Duration::MAX`.
    pub fn start(&mut self, now: Duration, time_between_attacks: f32) -> Duration {
        let cooldown =
            Duration::try_from_secs_f32(time_between_attacks.max(0.0)).unwrap_or(Duration::MAX);
        let reset_at = now.saturating_add(cooldown);
        self.already_attacked = true;
        self.reset_at = Some(reset_at);
        reset_at
    }

    pub fn reset(&mut self) {
        self.already_attacked = false;
        self.reset_at = None;
    }
}

/// Запрос на запуск снаряда (для внешнего projectile/physics слоя)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchRequest {
    pub spawn_position: Vec3,
    /// Unit vector от точки спавна к цели
    pub direction: Vec3,
    pub forward_impulse: f32,
    pub upward_impulse: f32,
}

/// Результат одного attack тика
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackOutcome {
    /// Новая ориентация агента (slerp к цели)
    pub rotation: Quat,
    pub launch: Option<LaunchRequest>,
    /// Если выстрелили: когда сбросить cooldown
    pub cooldown_reset_at: Option<Duration>,
}

/// Один attack тик
///
/// Всегда: hold position (destination = своя позиция) + поворот к цели.
/// Cooldown свободен: launch request + cooldown до `now + time_between_attacks`.
#[allow(clippy::too_many_arguments)]
pub fn attack(
    agent_position: Vec3,
    agent_rotation: Quat,
    target_position: Vec3,
    cooldown: &mut AttackCooldown,
    config: &AgentConfig,
    delta_secs: f32,
    now: Duration,
    navigator: &mut impl Navigator,
) -> AttackOutcome {
    navigator.set_destination(agent_position);

    let to_target = (target_position - agent_position).try_normalize();

    let rotation = match to_target {
        Some(direction) => {
            let look = Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation;
            let t = (delta_secs * config.turn_rate).clamp(0.0, 1.0);
            agent_rotation.slerp(look, t)
        }
        // Цель в той же точке: смотреть некуда
        None => agent_rotation,
    };

    if !cooldown.can_attack() {
        return AttackOutcome {
            rotation,
            launch: None,
            cooldown_reset_at: None,
        };
    }

    // Forward агента (-Z) как последний fallback
    let direction = to_target.unwrap_or_else(|| agent_rotation * Vec3::NEG_Z);
    let spawn_position = agent_position + direction;
    let launch_direction = (target_position - spawn_position)
        .try_normalize()
        .unwrap_or(direction);

    let reset_at = cooldown.start(now, config.time_between_attacks);

    AttackOutcome {
        rotation,
        launch: Some(LaunchRequest {
            spawn_position,
            direction: launch_direction,
            forward_impulse: config.forward_impulse,
            upward_impulse: config.upward_impulse,
        }),
        cooldown_reset_at: Some(reset_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingNavigator {
        destinations: Vec<Vec3>,
    }

    impl Navigator for RecordingNavigator {
        fn set_destination(&mut self, point: Vec3) {
            self.destinations.push(point);
        }
    }

    const TICK: f32 = 1.0 / 60.0;

    #[test]
    fn test_cooldown_start_and_reset() {
        let mut cooldown = AttackCooldown::default();
        assert!(cooldown.can_attack());

        let reset_at = cooldown.start(Duration::from_secs(2), 1.5);
        assert!(!cooldown.can_attack());
        assert_eq!(reset_at, Duration::from_millis(3500));
        assert_eq!(cooldown.reset_at, Some(reset_at));

        cooldown.reset();
        assert!(cooldown.can_attack());
        assert_eq!(cooldown.reset_at, None);
    }

    #[test]
    fn test_huge_cooldown_saturates() {
        let mut cooldown = AttackCooldown::default();
        let reset_at = cooldown.start(Duration::from_secs(5), 1e20);
        assert_eq!(reset_at, Duration::MAX);
        assert!(!cooldown.can_attack());

        let mut cooldown = AttackCooldown::default();
        assert_eq!(cooldown.start(Duration::from_secs(5), f32::INFINITY), Duration::MAX);

        // NaN → 0: сброс в тот же момент
        let mut cooldown = AttackCooldown::default();
        assert_eq!(cooldown.start(Duration::from_secs(5), f32::NAN), Duration::from_secs(5));
    }

    #[test]
    fn test_attack_fires_once_then_waits() {
        let mut cooldown = AttackCooldown::default();
        let mut navigator = RecordingNavigator::default();
        let config = AgentConfig::default();
        let target = Vec3::new(0.0, 0.0, -1.5);

        let first = attack(
            Vec3::ZERO,
            Quat::IDENTITY,
            target,
            &mut cooldown,
            &config,
            TICK,
            Duration::ZERO,
            &mut navigator,
        );
        let launch = first.launch.expect("cooldown clear → launch");
        assert_eq!(launch.spawn_position, Vec3::new(0.0, 0.0, -1.0));
        assert!((launch.direction - Vec3::NEG_Z).length() < 1e-5);
        assert_eq!(launch.forward_impulse, 32.0);
        assert_eq!(launch.upward_impulse, 8.0);
        assert_eq!(first.cooldown_reset_at, Some(Duration::from_secs_f32(1.5)));

        let second = attack(
            Vec3::ZERO,
            first.rotation,
            target,
            &mut cooldown,
            &config,
            TICK,
            Duration::from_millis(16),
            &mut navigator,
        );
        assert_eq!(second.launch, None);
        assert_eq!(second.cooldown_reset_at, None);
    }

    #[test]
    fn test_attack_always_holds_position() {
        let mut cooldown = AttackCooldown {
            already_attacked: true,
            reset_at: Some(Duration::from_secs(10)),
        };
        let mut navigator = RecordingNavigator::default();
        let position = Vec3::new(4.0, 1.0, 4.0);

        for _ in 0..3 {
            attack(
                position,
                Quat::IDENTITY,
                Vec3::new(5.0, 1.0, 4.0),
                &mut cooldown,
                &AgentConfig::default(),
                TICK,
                Duration::ZERO,
                &mut navigator,
            );
        }

        assert_eq!(navigator.destinations, vec![position; 3]);
    }

    #[test]
    fn test_rotation_turns_gradually() {
        let mut cooldown = AttackCooldown::default();
        let mut navigator = RecordingNavigator::default();
        // Цель справа (+X), агент смотрит в -Z
        let target = Vec3::new(2.0, 0.0, 0.0);
        let look = Transform::IDENTITY.looking_to(Vec3::X, Vec3::Y).rotation;

        let outcome = attack(
            Vec3::ZERO,
            Quat::IDENTITY,
            target,
            &mut cooldown,
            &AgentConfig::default(),
            TICK,
            Duration::ZERO,
            &mut navigator,
        );

        // Не мгновенно: повернулись, но не до конца
        assert!(outcome.rotation.angle_between(Quat::IDENTITY) > 0.0);
        assert!(outcome.rotation.angle_between(look) > 0.01);

        // Большой dt → t clamp до 1 → ровно на цель
        let outcome = attack(
            Vec3::ZERO,
            Quat::IDENTITY,
            target,
            &mut cooldown,
            &AgentConfig::default(),
            1.0,
            Duration::ZERO,
            &mut navigator,
        );
        assert!(outcome.rotation.angle_between(look) < 1e-3);
    }

    #[test]
    fn test_degenerate_direction_falls_back() {
        let mut cooldown = AttackCooldown::default();
        let mut navigator = RecordingNavigator::default();

        // Цель на расстоянии 1: spawn point совпадает с целью
        let outcome = attack(
            Vec3::ZERO,
            Quat::IDENTITY,
            Vec3::new(1.0, 0.0, 0.0),
            &mut cooldown,
            &AgentConfig::default(),
            TICK,
            Duration::ZERO,
            &mut navigator,
        );
        let launch = outcome.launch.expect("launch");
        assert_eq!(launch.spawn_position, Vec3::new(1.0, 0.0, 0.0));
        assert!((launch.direction - Vec3::X).length() < 1e-5);

        // Цель в той же точке: forward агента
        let mut cooldown = AttackCooldown::default();
        let outcome = attack(
            Vec3::ZERO,
            Quat::IDENTITY,
            Vec3::ZERO,
            &mut cooldown,
            &AgentConfig::default(),
            TICK,
            Duration::ZERO,
            &mut navigator,
        );
        assert_eq!(outcome.rotation, Quat::IDENTITY);
        let launch = outcome.launch.expect("launch");
        assert!((launch.direction - Vec3::NEG_Z).length() < 1e-5);
    }
}
