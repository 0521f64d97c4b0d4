use foundation::math::Vec3;

use crate::World;
use crate::components::{Drawable3D, Transform};
use crate::entity::EntityId;

/// Spawns the WGS84 ellipsoid as the scene root.
///
/// The globe gets no pick bounds; clicks on bare terrain resolve to nothing.
pub fn spawn_wgs84_globe(world: &mut World) -> EntityId {
    let entity = world.spawn();
    world.set_transform(entity, Transform::translate(Vec3::ZERO));
    world.set_drawable_3d(entity, Drawable3D::wgs84_globe());
    entity
}
