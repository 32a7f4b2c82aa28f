use bevy::prelude::*;

/// Axis-aligned collision box, the only shape the toy needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub const fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() <= self.half_extents.x
            && (point.y - self.center.y).abs() <= self.half_extents.y
    }

    /// Separating distance to another box: `(overlapping, distance)`.
    /// The distance is 0 exactly when the boxes overlap or touch.
    pub fn separation(&self, other: &Self) -> (bool, f32) {
        let gap_x = ((self.center.x - other.center.x).abs()
            - (self.half_extents.x + other.half_extents.x))
            .max(0.0);
        let gap_y = ((self.center.y - other.center.y).abs()
            - (self.half_extents.y + other.half_extents.y))
            .max(0.0);
        let distance = gap_x.hypot(gap_y);
        (distance <= 0.0, distance)
    }
}

/// First region containing `point`, front-to-back by `z`.
pub fn region_at_point<I>(point: Vec2, regions: I) -> Option<Entity>
where
    I: IntoIterator<Item = (Entity, Aabb, f32)>,
{
    regions
        .into_iter()
        .filter(|(_, aabb, _)| aabb.contains(point))
        .max_by(|(_, _, za), (_, _, zb)| za.total_cmp(zb))
        .map(|(entity, _, _)| entity)
}

/// Region nearest to `shape` by separating distance, with that distance.
pub fn nearest_region<I>(shape: &Aabb, regions: I) -> Option<(Entity, f32)>
where
    I: IntoIterator<Item = (Entity, Aabb)>,
{
    regions
        .into_iter()
        .map(|(entity, aabb)| {
            let (overlapping, distance) = shape.separation(&aabb);
            (entity, if overlapping { 0.0 } else { distance })
        })
        .min_by(|(_, da), (_, db)| da.total_cmp(db))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_at_the_edge() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        assert!(aabb.contains(Vec2::new(10.0, -10.0)), "edge is inside");
        assert!(!aabb.contains(Vec2::new(10.1, 0.0)), "outside x");
    }

    #[test]
    fn separation_is_zero_when_overlapping() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::splat(10.0));
        let (overlapping, distance) = a.separation(&b);
        assert!(overlapping, "boxes overlap");
        assert!(distance.abs() < f32::EPSILON, "distance is zero");
    }

    #[test]
    fn separation_measures_the_diagonal_gap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(1.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::splat(1.0));
        let (overlapping, distance) = a.separation(&b);
        assert!(!overlapping, "boxes are apart");
        assert!(
            (distance - (3.0f32 * 3.0 + 3.0 * 3.0).sqrt()).abs() < 1e-5,
            "diagonal gap of 3,3"
        );
    }

    #[test]
    fn region_at_point_prefers_the_topmost_hit() {
        let below = Entity::from_raw(1);
        let above = Entity::from_raw(2);
        let hit = region_at_point(
            Vec2::ZERO,
            [
                (below, Aabb::new(Vec2::ZERO, Vec2::splat(10.0)), 0.0),
                (above, Aabb::new(Vec2::ZERO, Vec2::splat(10.0)), 1.0),
            ],
        );
        assert_eq!(hit, Some(above), "higher z wins");
    }

    #[test]
    fn nearest_region_picks_the_smallest_distance() {
        let near = Entity::from_raw(1);
        let far = Entity::from_raw(2);
        let shape = Aabb::new(Vec2::ZERO, Vec2::splat(1.0));
        let found = nearest_region(
            &shape,
            [
                (far, Aabb::new(Vec2::new(100.0, 0.0), Vec2::splat(1.0))),
                (near, Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(1.0))),
            ],
        );
        let (entity, distance) = found.expect("two candidates");
        assert_eq!(entity, near, "nearest candidate wins");
        assert!((distance - 8.0).abs() < 1e-5, "gap between the two boxes");
    }
}
