//! Patrol: random walk внутри квадрата ±walk_point_range вокруг агента
//!
//! Маршрут не хранится: один walk point за раз, после прибытия ищем новый.

use bevy::prelude::*;
use rand::Rng;

use crate::components::{AgentConfig, Navigator};
use crate::spatial::SpatialQuery;

/// Верхняя граница walk_point_range: шире `gen_range` переполняет f32
pub const MAX_WALK_POINT_RANGE: f32 = f32::MAX / 4.0;

/// Текущая точка патруля (`None` = не задана, ищем на следующем тике)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WalkPoint {
    pub point: Option<Vec3>,
}

impl WalkPoint {
    pub fn is_set(&self) -> bool {
        self.point.is_some()
    }

    pub fn clear(&mut self) {
        self.point = None;
    }
}

/// Что произошло за один patrol тик
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatrolStep {
    /// Точку не нашли (probe не попал в землю): повтор в следующем тике
    Searching,
    /// Двигаемся к точке
    Moving(Vec3),
    /// Дошли: точка сброшена
    Arrived(Vec3),
}

/// Случайная точка в ±range по X/Z на высоте агента, проверенная лучом вниз
pub fn search_walk_point(
    rng: &mut impl Rng,
    spatial: &impl SpatialQuery,
    agent_position: Vec3,
    range: f32,
    ground_mask: u32,
    probe_length: f32,
) -> Option<Vec3> {
    // NaN/отрицательный/огромный range не должен паниковать в gen_range
    let range = if range.is_nan() {
        0.0
    } else {
        range.abs().min(MAX_WALK_POINT_RANGE)
    };

    let random_z = rng.gen_range(-range..=range);
    let random_x = rng.gen_range(-range..=range);

    let candidate = Vec3::new(
        agent_position.x + random_x,
        agent_position.y,
        agent_position.z + random_z,
    );

    spatial
        .raycast(candidate, Vec3::NEG_Y, probe_length, ground_mask)
        .then_some(candidate)
}

/// Горизонтальная дистанция (высота не учитывается)
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Один patrol тик: найти точку если нет, вести к ней, сбросить по прибытии
pub fn patrol(
    walk_point: &mut WalkPoint,
    agent_position: Vec3,
    config: &AgentConfig,
    rng: &mut impl Rng,
    spatial: &impl SpatialQuery,
    navigator: &mut impl Navigator,
) -> PatrolStep {
    if !walk_point.is_set() {
        walk_point.point = search_walk_point(
            rng,
            spatial,
            agent_position,
            config.walk_point_range,
            config.ground_mask,
            config.ground_probe_length,
        );
    }

    let Some(point) = walk_point.point else {
        return PatrolStep::Searching;
    };

    navigator.set_destination(point);

    if horizontal_distance(agent_position, point) < config.arrival_threshold {
        walk_point.clear();
        return PatrolStep::Arrived(point);
    }

    PatrolStep::Moving(point)
}
