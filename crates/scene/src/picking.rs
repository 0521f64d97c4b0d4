use foundation::math::precision::stable_total_cmp_f64;
use foundation::math::{Vec3, ray_ellipsoid_hit};

use crate::World;
use crate::components::ComponentBounds;
use crate::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub entity: EntityId,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
    /// Reject hits that lie behind the WGS84 surface as seen from the ray origin.
    pub occlude_with_globe: bool,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
            occlude_with_globe: true,
        }
    }
}

/// Deterministic ray picking over entities with bounds.
///
/// Ordering contract:
/// - If multiple entities are hit at the same distance, the lower `EntityId::index()` wins.
/// - Otherwise, the closest hit along the (normalized) ray wins.
pub fn pick_ray(world: &World, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalized()?;
    let origin = ray.origin.as_array();
    let dir_a = dir.as_array();

    let mut t_max = opts.max_distance;
    if opts.occlude_with_globe
        && let Some(t_surface) = ray_ellipsoid_hit(ray.origin, dir)
    {
        t_max = t_max.min(t_surface);
    }

    let mut best: Option<(f64, EntityId)> = None;
    for (entity, bounds) in world.pickable() {
        let Some(t) = ray_aabb_hit_t(origin, dir_a, bounds, 0.0, t_max) else {
            continue;
        };
        best = match best {
            None => Some((t, entity)),
            Some((bt, be)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| entity.index().cmp(&be.index()));
                if ord.is_lt() {
                    Some((t, entity))
                } else {
                    Some((bt, be))
                }
            }
        };
    }

    let (t, entity) = best?;
    Some(PickHit {
        entity,
        distance: t,
        point: ray.origin + dir.scale(t),
    })
}

fn ray_aabb_hit_t(
    origin: [f64; 3],
    dir: [f64; 3],
    bounds: ComponentBounds,
    mut t_min: f64,
    mut t_max: f64,
) -> Option<f64> {
    let aabb = bounds.to_aabb();
    // Slabs intersection; returns entry distance.
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let (min, max) = (aabb.min[axis], aabb.max[axis]);

        if d.abs() < 1e-12 {
            if o < min || o > max {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (min - o) * inv;
        let mut t2 = (max - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_max < t_min {
            return None;
        }
    }

    Some(t_min.max(0.0))
}
