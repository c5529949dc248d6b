//! Spatial queries: sphere containment + raycast по слоям
//!
//! Архитектура:
//! - `SpatialQuery`: seam для perception и patrol (любой physics backend)
//! - `SpatialIndex`: встроенная реализация: resource, пересобирается каждый
//!   тик из `SpatialBody` + `GroundPatch` entities
//!
//! Physics симуляции здесь нет: только геометрические запросы.

use bevy::prelude::*;

mod index;


pub use index::{GroundPatch, SpatialBody, SpatialIndex};

// ============================================================================
// Layer битовые маски (на каком слое объект находится)
// ============================================================================

/// Layer 1: Ground (поверхности, пригодные для patrol)
pub const LAYER_GROUND: u32 = 0b1; // 1

/// Layer 2: Targets (игрок и всё, что агент преследует)
pub const LAYER_TARGET: u32 = 0b10; // 2

/// Layer 3: Agents (сами NPC)
pub const LAYER_AGENTS: u32 = 0b100; // 4

/// Геометрические запросы, которые потребляет AI
pub trait SpatialQuery {
    /// Есть ли объект со слоем из `mask` в сфере (center, radius)
    fn check_sphere(&self, center: Vec3, radius: f32, mask: u32) -> bool;

    /// Попадает ли луч в объект со слоем из `mask` на дистанции ≤ max_distance
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32) -> bool;
}

/// Система: пересобрать SpatialIndex из текущих Transform
///
/// Запускается первой в тике: perception/patrol видят позиции этого кадра.
pub fn sync_spatial_index(
    mut index: ResMut<SpatialIndex>,
    bodies: Query<(Entity, &Transform, &SpatialBody)>,
    ground: Query<&GroundPatch>,
) {
    index.clear();

    for (entity, transform, body) in bodies.iter() {
        index.insert_body(entity, transform.translation, body);
    }

    for patch in ground.iter() {
        index.insert_ground(*patch);
    }
}

/// Spatial Plugin: регистрирует SpatialIndex
pub struct SpatialPlugin;

impl Plugin for SpatialPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpatialIndex>().add_systems(
            FixedUpdate,
            sync_spatial_index.in_set(crate::SimulationSet::Bookkeeping),
        );
    }
}
