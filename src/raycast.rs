//! Ray queries against ground surfaces filtered by physics layer.
use bevy::math::primitives::InfinitePlane3d;
use bevy::math::{Dir3, Ray3d, Vec2, Vec3};
use bevy::prelude::*;

/// Bit set of physics layers an object belongs to or a query accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches nothing.
    pub const NONE: Self = Self(0);
    /// Layer used by props and characters.
    pub const DEFAULT: Self = Self(1);
    /// Layer the aim ray is allowed to hit.
    pub const GROUND: Self = Self(1 << 8);
    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Returns `true` when any bit is shared with `other`.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

/// Physics layers an entity occupies.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhysicsLayer(pub LayerMask);

/// A horizontal walkable rectangle centred on the entity's translation.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GroundSurface {
    /// Half the size of the rectangle along world X and Z.
    pub half_extents: Vec2,
}

/// Result of a successful ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Surface that was struck.
    pub entity: Entity,
    /// World-space point of impact.
    pub point: Vec3,
    /// Distance along the ray to the point of impact.
    pub distance: f32,
}

/// Casts `ray` against `surfaces` and returns the nearest hit.
///
/// Only surfaces whose layer intersects `mask` are considered, and hits
/// further than `max_distance` are discarded. Surfaces behind the ray origin
/// or outside their extents never report a hit.
pub fn cast_ground_ray<'a, I>(
    ray: Ray3d,
    max_distance: f32,
    mask: LayerMask,
    surfaces: I,
) -> Option<RayHit>
where
    I: IntoIterator<Item = (Entity, &'a Transform, &'a GroundSurface, &'a PhysicsLayer)>,
{
    let plane = InfinitePlane3d { normal: Dir3::Y };
    surfaces
        .into_iter()
        .filter(|(_, _, _, layer)| layer.0.intersects(mask))
        .filter_map(|(entity, transform, surface, _)| {
            let centre = transform.translation;
            let distance = ray.intersect_plane(centre, plane)?;
            if distance > max_distance {
                return None;
            }
            let point = ray.get_point(distance);
            let local = Vec2::new(point.x - centre.x, point.z - centre.z).abs();
            (local.x <= surface.half_extents.x && local.y <= surface.half_extents.y).then_some(
                RayHit {
                    entity,
                    point,
                    distance,
                },
            )
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    struct Surface {
        entity: Entity,
        transform: Transform,
        ground: GroundSurface,
        layer: PhysicsLayer,
    }

    impl Surface {
        fn new(world: &mut World, height: f32, half: f32, layer: LayerMask) -> Self {
            Self {
                entity: world.spawn_empty().id(),
                transform: Transform::from_xyz(0.0, height, 0.0),
                ground: GroundSurface {
                    half_extents: Vec2::splat(half),
                },
                layer: PhysicsLayer(layer),
            }
        }
    }

    fn query(
        surfaces: &[Surface],
    ) -> impl Iterator<Item = (Entity, &Transform, &GroundSurface, &PhysicsLayer)> {
        surfaces
            .iter()
            .map(|s| (s.entity, &s.transform, &s.ground, &s.layer))
    }

    #[fixture]
    fn downward_ray() -> Ray3d {
        Ray3d::new(Vec3::new(3.0, 10.0, 4.0), Dir3::NEG_Y)
    }

    #[rstest]
    fn hits_ground_below_origin(downward_ray: Ray3d) {
        let mut world = World::new();
        let surfaces = [Surface::new(&mut world, 0.0, 20.0, LayerMask::GROUND)];
        let hit = cast_ground_ray(downward_ray, 100.0, LayerMask::GROUND, query(&surfaces))
            .unwrap_or_else(|| panic!("expected a hit"));
        assert_relative_eq!(hit.distance, 10.0, epsilon = 1e-5);
        assert_relative_eq!(hit.point.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(hit.point.z, 4.0, epsilon = 1e-5);
    }

    #[rstest]
    fn ignores_surfaces_outside_mask(downward_ray: Ray3d) {
        let mut world = World::new();
        let surfaces = [
            Surface::new(&mut world, 5.0, 20.0, LayerMask::DEFAULT),
            Surface::new(&mut world, 0.0, 20.0, LayerMask::GROUND),
        ];
        let hit = cast_ground_ray(downward_ray, 100.0, LayerMask::GROUND, query(&surfaces))
            .unwrap_or_else(|| panic!("expected a hit"));
        assert_eq!(hit.entity, surfaces[1].entity);
    }

    #[rstest]
    fn picks_nearest_surface(downward_ray: Ray3d) {
        let mut world = World::new();
        let surfaces = [
            Surface::new(&mut world, 0.0, 20.0, LayerMask::GROUND),
            Surface::new(&mut world, 2.0, 20.0, LayerMask::GROUND),
        ];
        let hit = cast_ground_ray(downward_ray, 100.0, LayerMask::GROUND, query(&surfaces))
            .unwrap_or_else(|| panic!("expected a hit"));
        assert_eq!(hit.entity, surfaces[1].entity);
        assert_relative_eq!(hit.distance, 8.0, epsilon = 1e-5);
    }

    #[rstest]
    #[case::beyond_max_distance(0.0, 20.0, 5.0)]
    #[case::outside_extents(0.0, 2.0, 100.0)]
    #[case::above_origin(15.0, 20.0, 100.0)]
    fn misses(
        downward_ray: Ray3d,
        #[case] height: f32,
        #[case] half: f32,
        #[case] max_distance: f32,
    ) {
        let mut world = World::new();
        let surfaces = [Surface::new(&mut world, height, half, LayerMask::GROUND)];
        assert!(
            cast_ground_ray(downward_ray, max_distance, LayerMask::GROUND, query(&surfaces))
                .is_none()
        );
    }

    #[rstest]
    fn parallel_ray_misses() {
        let mut world = World::new();
        let ray = Ray3d::new(Vec3::new(0.0, 1.0, 0.0), Dir3::X);
        let surfaces = [Surface::new(&mut world, 0.0, 20.0, LayerMask::GROUND)];
        assert!(cast_ground_ray(ray, 100.0, LayerMask::GROUND, query(&surfaces)).is_none());
    }

    #[rstest]
    #[case(LayerMask::GROUND, LayerMask::ALL, true)]
    #[case(LayerMask::GROUND, LayerMask::DEFAULT, false)]
    #[case(LayerMask::NONE, LayerMask::ALL, false)]
    fn layer_intersection(#[case] a: LayerMask, #[case] b: LayerMask, #[case] expected: bool) {
        assert_eq!(a.intersects(b), expected);
    }
}
