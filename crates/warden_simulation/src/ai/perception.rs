//! Perception: два независимых sphere-теста каждый тик, без истории

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::spatial::SpatialQuery;

/// Результат perception за текущий тик
///
/// Пересчитывается полностью каждый тик: никакого hysteresis.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct PerceptionState {
    pub target_in_sight: bool,
    pub target_in_attack_range: bool,
}

/// Цель агента (injected при спавне, не ищется по тегу)
///
/// `position` обновляется perception системой; `None` = цель не резолвится
/// в этом тике (не задана или entity без Transform).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AgentTarget {
    pub entity: Option<Entity>,
    pub position: Option<Vec3>,
}

impl AgentTarget {
    pub fn new(entity: Option<Entity>) -> Self {
        Self {
            entity,
            position: None,
        }
    }
}

/// Pure query: (in_sight, in_attack) вокруг позиции агента
pub fn evaluate(
    spatial: &impl SpatialQuery,
    agent_position: Vec3,
    sight_range: f32,
    attack_range: f32,
    target_mask: u32,
) -> PerceptionState {
    PerceptionState {
        target_in_sight: spatial.check_sphere(agent_position, sight_range, target_mask),
        target_in_attack_range: spatial.check_sphere(agent_position, attack_range, target_mask),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{SpatialBody, SpatialIndex, LAYER_TARGET};

    fn index_with_target(distance: f32) -> SpatialIndex {
        let mut index = SpatialIndex::default();
        index.insert_body(
            Entity::from_raw(1),
            Vec3::new(distance, 0.0, 0.0),
            &SpatialBody::new(0.0, LAYER_TARGET),
        );
        index
    }

    #[test]
    fn test_target_far_away() {
        let state = evaluate(&index_with_target(25.0), Vec3::ZERO, 10.0, 2.0, LAYER_TARGET);
        assert_eq!(state, PerceptionState::default());
    }

    #[test]
    fn test_target_in_sight_only() {
        let state = evaluate(&index_with_target(5.0), Vec3::ZERO, 10.0, 2.0, LAYER_TARGET);
        assert!(state.target_in_sight);
        assert!(!state.target_in_attack_range);
    }

    #[test]
    fn test_target_in_attack_range() {
        let state = evaluate(&index_with_target(1.0), Vec3::ZERO, 10.0, 2.0, LAYER_TARGET);
        assert!(state.target_in_sight);
        assert!(state.target_in_attack_range);
    }

    #[test]
    fn test_misconfigured_ranges_can_report_attack_without_sight() {
        // attack > sight: цель между радиусами → dead zone
        let state = evaluate(&index_with_target(4.0), Vec3::ZERO, 3.0, 5.0, LAYER_TARGET);
        assert!(!state.target_in_sight);
        assert!(state.target_in_attack_range);
    }
}
