//! Встроенный SpatialIndex: сферы (bodies) + горизонтальные прямоугольники (ground)

use bevy::prelude::*;

use super::SpatialQuery;

const RAY_EPSILON: f32 = 1e-5;

/// Объект, видимый для spatial queries (сфера вокруг Transform.translation)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SpatialBody {
    pub radius: f32,
    /// На каких слоях находится объект
    pub layers: u32,
}

impl SpatialBody {
    pub fn new(radius: f32, layers: u32) -> Self {
        Self {
            radius: radius.max(0.0),
            layers,
        }
    }
}

/// Участок земли: горизонтальный прямоугольник на высоте `height`
///
/// `min`/`max`: XZ координаты (Vec2.x → world x, Vec2.y → world z).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GroundPatch {
    pub min: Vec2,
    pub max: Vec2,
    pub height: f32,
    pub layers: u32,
}

impl GroundPatch {
    /// Прямоугольник по двум углам (порядок углов не важен)
    pub fn new(corner_a: Vec2, corner_b: Vec2, height: f32, layers: u32) -> Self {
        Self {
            min: corner_a.min(corner_b),
            max: corner_a.max(corner_b),
            height,
            layers,
        }
    }

    /// Квадрат со стороной 2 × half_extent вокруг center (XZ)
    pub fn square(center: Vec3, half_extent: f32, layers: u32) -> Self {
        let center_xz = Vec2::new(center.x, center.z);
        let half = Vec2::splat(half_extent.abs());
        Self::new(center_xz - half, center_xz + half, center.y, layers)
    }

    pub fn contains_xz(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.z >= self.min.y
            && point.z <= self.max.y
    }

    /// Ближайшая к `point` точка прямоугольника
    ///
    /// Поля публичные, поэтому min > max возможен: max/min вместо clamp (без паники).
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.max(self.min.x).min(self.max.x),
            self.height,
            point.z.max(self.min.y).min(self.max.y),
        )
    }

    /// Дистанция вдоль луча до плоскости патча (если попадаем внутрь)
    fn ray_hit(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        if direction.y.abs() < RAY_EPSILON {
            // Луч параллелен плоскости: попадание только если идём по ней
            let on_plane = (origin.y - self.height).abs() < RAY_EPSILON;
            return (on_plane && self.contains_xz(origin)).then_some(0.0);
        }

        let distance = (self.height - origin.y) / direction.y;
        if distance < 0.0 {
            return None;
        }

        let hit_point = origin + direction * distance;
        self.contains_xz(hit_point).then_some(distance)
    }
}

#[derive(Debug, Clone, Copy)]
struct IndexedBody {
    entity: Entity,
    center: Vec3,
    radius: f32,
    layers: u32,
}

impl IndexedBody {
    /// Ray–sphere: дистанция до входа (0 если origin внутри)
    fn ray_hit(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let offset = origin - self.center;
        let b = offset.dot(direction);
        let c = offset.length_squared() - self.radius * self.radius;

        if c <= 0.0 {
            return Some(0.0);
        }
        if b > 0.0 {
            return None; // снаружи и смотрим от сферы
        }

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        Some((-b - discriminant.sqrt()).max(0.0))
    }
}

/// Snapshot геометрии мира на текущий тик
#[derive(Resource, Debug, Clone, Default)]
pub struct SpatialIndex {
    bodies: Vec<IndexedBody>,
    ground: Vec<GroundPatch>,
}

impl SpatialIndex {
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.ground.clear();
    }

    pub fn insert_body(&mut self, entity: Entity, center: Vec3, body: &SpatialBody) {
        self.bodies.push(IndexedBody {
            entity,
            center,
            radius: body.radius,
            layers: body.layers,
        });
    }

    pub fn insert_ground(&mut self, patch: GroundPatch) {
        self.ground.push(patch);
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn ground_count(&self) -> usize {
        self.ground.len()
    }

    /// Все entities со слоем из `mask` внутри сферы (для debug/тестов)
    pub fn bodies_in_sphere(&self, center: Vec3, radius: f32, mask: u32) -> Vec<Entity> {
        self.bodies
            .iter()
            .filter(|body| body.layers & mask != 0)
            .filter(|body| body.center.distance(center) <= radius + body.radius)
            .map(|body| body.entity)
            .collect()
    }
}

impl SpatialQuery for SpatialIndex {
    fn check_sphere(&self, center: Vec3, radius: f32, mask: u32) -> bool {
        if radius < 0.0 || radius.is_nan() {
            return false;
        }

        let body_hit = self
            .bodies
            .iter()
            .filter(|body| body.layers & mask != 0)
            .any(|body| body.center.distance(center) <= radius + body.radius);

        body_hit
            || self
                .ground
                .iter()
                .filter(|patch| patch.layers & mask != 0)
                .any(|patch| patch.closest_point(center).distance(center) <= radius)
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32) -> bool {
        let Some(direction) = direction.try_normalize() else {
            return false;
        };
        if max_distance < 0.0 || max_distance.is_nan() {
            return false;
        }

        let within_reach = |distance: Option<f32>| distance.is_some_and(|d| d <= max_distance);

        self.bodies
            .iter()
            .filter(|body| body.layers & mask != 0)
            .any(|body| within_reach(body.ray_hit(origin, direction)))
            || self
                .ground
                .iter()
                .filter(|patch| patch.layers & mask != 0)
                .any(|patch| within_reach(patch.ray_hit(origin, direction)))
    }
}
