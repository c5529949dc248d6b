//! Базовые компоненты агента: Agent, Health, health presenter

use bevy::prelude::*;

use crate::ai::{AgentTarget, CurrentBehavior, PerceptionState, WalkPoint};
use crate::combat::AttackCooldown;
use crate::components::{AgentConfig, MovementCommand};

/// Агент (NPC с patrol/chase/attack поведением)
///
/// Всё состояние FSM добавляется через Required Components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    AgentConfig,
    AgentTarget,
    PerceptionState,
    CurrentBehavior,
    WalkPoint,
    AttackCooldown,
    Health,
    MovementCommand
)]
pub struct Agent;

/// Здоровье агента
///
/// `current` может уйти в минус (clamp нет). `max` не меняется после спавна.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    destruction_scheduled: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Результат `Health::apply_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Жив (current > 0)
    Wounded,
    /// Только что умер: вызывающий планирует уничтожение
    Killed,
    /// Уже мёртв, уничтожение запланировано раньше
    AlreadyDying,
    /// Урон не конечное число (NaN/inf): проигнорирован, здоровье не менялось
    Ignored,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            destruction_scheduled: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn is_destruction_scheduled(&self) -> bool {
        self.destruction_scheduled
    }

    /// current = max, presenter получает max
    pub fn initialize(&mut self, presenter: Option<&mut dyn HealthPresenter>) {
        self.current = self.max;
        if let Some(presenter) = presenter {
            presenter.set_max_health(self.max);
        }
    }

    /// Вычесть урон, обновить presenter, решить нужно ли уничтожение.
    ///
    /// `Killed` возвращается ровно один раз за жизнь агента.
    pub fn apply_damage(
        &mut self,
        amount: f32,
        presenter: Option<&mut dyn HealthPresenter>,
    ) -> DamageOutcome {
        if !amount.is_finite() {
            crate::logger::log_warning(&format!(
                "Health: non-finite damage {} ignored (HP: {}/{})",
                amount, self.current, self.max
            ));
            return DamageOutcome::Ignored;
        }

        self.current -= amount;

        if let Some(presenter) = presenter {
            presenter.set_health(self.current);
        }

        if self.current > 0.0 {
            return DamageOutcome::Wounded;
        }

        if self.destruction_scheduled {
            return DamageOutcome::AlreadyDying;
        }

        self.destruction_scheduled = true;
        DamageOutcome::Killed
    }
}

/// Внешний presenter здоровья (health bar и т.п.)
pub trait HealthPresenter {
    fn set_max_health(&mut self, value: f32);
    fn set_health(&mut self, value: f32);
}

/// Health bar: данные для UI слоя (рендер не здесь)
///
/// Опциональный компонент: без него вызовы presenter'а просто пропускаются.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HealthBar {
    pub max_health: f32,
    pub health: f32,
}

impl Default for HealthBar {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            health: 100.0,
        }
    }
}

impl HealthPresenter for HealthBar {
    fn set_max_health(&mut self, value: f32) {
        self.max_health = value;
        self.health = value;
    }

    fn set_health(&mut self, value: f32) {
        self.health = value;
    }
}

impl HealthBar {
    /// Заполненность 0..1 (отрицательное здоровье = пустой бар)
    pub fn fill_ratio(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingPresenter {
        max_calls: Vec<f32>,
        health_calls: Vec<f32>,
    }

    impl HealthPresenter for RecordingPresenter {
        fn set_max_health(&mut self, value: f32) {
            self.max_calls.push(value);
        }

        fn set_health(&mut self, value: f32) {
            self.health_calls.push(value);
        }
    }

    #[test]
    fn test_health_damage_goes_negative() {
        let mut health = Health::new(100.0);

        assert_eq!(health.apply_damage(30.0, None), DamageOutcome::Wounded);
        assert_eq!(health.current, 70.0);
        assert!(health.is_alive());

        assert_eq!(health.apply_damage(100.0, None), DamageOutcome::Killed);
        assert_eq!(health.current, -30.0); // без clamp
        assert!(!health.is_alive());
        assert!(health.is_destruction_scheduled());
    }

    #[test]
    fn test_killed_reported_once() {
        let mut health = Health::new(50.0);

        assert_eq!(health.apply_damage(50.0, None), DamageOutcome::Killed);
        assert_eq!(health.apply_damage(10.0, None), DamageOutcome::AlreadyDying);
        assert_eq!(health.apply_damage(0.0, None), DamageOutcome::AlreadyDying);
    }

    #[test]
    fn test_non_finite_damage_ignored() {
        let mut health = Health::new(100.0);
        let mut presenter = RecordingPresenter::default();

        assert_eq!(health.apply_damage(f32::NAN, Some(&mut presenter)), DamageOutcome::Ignored);
        assert_eq!(health.apply_damage(f32::INFINITY, None), DamageOutcome::Ignored);
        assert_eq!(health.apply_damage(f32::NEG_INFINITY, None), DamageOutcome::Ignored);

        assert_eq!(health.current, 100.0);
        assert!(!health.is_destruction_scheduled());
        assert!(presenter.health_calls.is_empty());
    }

    #[test]
    fn test_presenter_receives_every_update() {
        let mut health = Health::new(100.0);
        let mut presenter = RecordingPresenter::default();

        health.initialize(Some(&mut presenter));
        health.apply_damage(40.0, Some(&mut presenter));
        health.apply_damage(70.0, Some(&mut presenter));

        assert_eq!(presenter.max_calls, vec![100.0]);
        assert_eq!(presenter.health_calls, vec![60.0, -10.0]);
    }

    #[test]
    fn test_initialize_restores_max() {
        let mut health = Health {
            current: 3.0,
            max: 80.0,
            destruction_scheduled: false,
        };
        health.initialize(None);
        assert_eq!(health.current, 80.0);
    }

    #[test]
    fn test_health_bar_fill_ratio() {
        let mut bar = HealthBar::default();
        bar.set_max_health(200.0);
        assert_eq!(bar.fill_ratio(), 1.0);

        bar.set_health(50.0);
        assert_eq!(bar.fill_ratio(), 0.25);

        bar.set_health(-20.0);
        assert_eq!(bar.fill_ratio(), 0.0);
    }
}
