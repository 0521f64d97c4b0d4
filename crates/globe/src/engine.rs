use formats::LocationKey;
use foundation::math::{
    Ecef, Geodetic, Vec3, ecef_to_geodetic, ray_ellipsoid_hit, stable_total_cmp_f64,
};
use runtime::frame::Frame;
use scene::World;
use scene::components::{ComponentBounds, ComponentProperties, Transform};
use scene::entity::EntityId;
use scene::picking::{PickOptions, Ray, pick_ray};
use scene::prefabs::spawn_wgs84_globe;
use tracing::{debug, info, warn};
use viewer::{AccessToken, EngineError, FlyTo, GlobeEngine, SceneDescription};

use crate::camera::FlightCamera;
use crate::viewport::Viewport;

/// Property under which marker entities record their location key.
pub const LOCATION_KEY_PROPERTY: &str = "location_key";

/// Click tolerance around a marker's anchor, in screen pixels.
const PICK_RADIUS_PX: f64 = 12.0;

/// Smallest world-space pick half-extent used by `pick_ray`.
const MIN_PICK_HALF_EXTENT_M: f64 = 25.0;

/// Headless globe engine backed by the scene world.
///
/// Scene descriptions are diffed against the last applied one and rebuilt
/// into a fresh `World` when they change. Fly commands drive the
/// `FlightCamera`, which advances on `tick`.
#[derive(Debug)]
pub struct WorldEngine {
    credential: Option<AccessToken>,
    viewport: Viewport,
    world: World,
    applied: Option<SceneDescription>,
    markers: Vec<(EntityId, LocationKey)>,
    camera: FlightCamera,
    frame: Option<Frame>,
    rebuilds: u64,
}

impl WorldEngine {
    pub fn new(viewport: Viewport) -> Self {
        let mut world = World::new();
        spawn_wgs84_globe(&mut world);
        Self {
            credential: None,
            viewport,
            world,
            applied: None,
            markers: Vec::new(),
            camera: FlightCamera::new(),
            frame: None,
            rebuilds: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &FlightCamera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    /// Number of times the world was rebuilt from a changed description.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.frame
    }

    /// Advances the engine clock and any camera flight by `dt_s` seconds.
    pub fn tick(&mut self, dt_s: f64) -> Frame {
        let frame = match self.frame {
            None => Frame::first(dt_s),
            Some(prev) => prev.advance(dt_s),
        };
        self.camera.update(frame.dt_s);
        self.frame = Some(frame);
        frame
    }

    /// Resolves a click at pixel `(x_px, y_px)` to the marker under it.
    ///
    /// Markers are compared in screen space: the nearest visible anchor within
    /// `PICK_RADIUS_PX` wins, ties going to the lower entity index. Anchors on
    /// the far side of the globe are skipped.
    pub fn pick_screen(&self, x_px: f64, y_px: f64) -> Option<LocationKey> {
        let eye = self.camera.eye();
        let mut best: Option<(f64, EntityId, &LocationKey)> = None;
        for (entity, key) in &self.markers {
            let Some(transform) = self.world.transform(*entity) else {
                continue;
            };
            let Some((mx, my)) = self.camera.project(&self.viewport, transform.position) else {
                continue;
            };
            let d_px = (mx - x_px).hypot(my - y_px);
            if d_px > PICK_RADIUS_PX || !visible_from(eye, transform.position) {
                continue;
            }
            let closer = match best {
                None => true,
                Some((bd, be, _)) => stable_total_cmp_f64(d_px, bd)
                    .then_with(|| entity.index().cmp(&be.index()))
                    .is_lt(),
            };
            if closer {
                best = Some((d_px, *entity, key));
            }
        }

        let (d_px, entity, key) = best?;
        debug!(entity = entity.index(), d_px, %key, "screen pick");
        Some(key.clone())
    }

    /// Point on the ellipsoid under pixel `(x_px, y_px)`, if the ray meets it.
    pub fn ground_at(&self, x_px: f64, y_px: f64) -> Option<Geodetic> {
        let ray = self.camera.screen_ray(&self.viewport, x_px, y_px);
        let dir = ray.dir.normalized()?;
        let t = ray_ellipsoid_hit(ray.origin, dir)?;
        Some(ecef_to_geodetic(Ecef::from_vec3(ray.origin + dir.scale(t))))
    }

    /// Resolves a world-space ray to the first marker it hits.
    pub fn pick_ray(&mut self, ray: Ray) -> Option<LocationKey> {
        self.refresh_pick_bounds();
        let hit = pick_ray(&self.world, ray, PickOptions::default())?;
        let key = self
            .markers
            .iter()
            .find(|(entity, _)| *entity == hit.entity)
            .map(|(_, key)| key.clone());
        debug!(entity = hit.entity.index(), distance = hit.distance, ?key, "pick");
        key
    }

    /// World-space pick volumes for `pick_ray`, sized from the camera height
    /// so they cover about `PICK_RADIUS_PX` at the view center.
    fn refresh_pick_bounds(&mut self) {
        let half_extent = (self.camera.meters_per_pixel(&self.viewport) * PICK_RADIUS_PX)
            .max(MIN_PICK_HALF_EXTENT_M);
        for (entity, _) in &self.markers {
            let Some(transform) = self.world.transform(*entity) else {
                continue;
            };
            self.world
                .set_bounds(*entity, ComponentBounds::around(transform.position, half_extent));
        }
    }

    fn rebuild(&mut self, scene: &SceneDescription) {
        let mut world = World::new();
        spawn_wgs84_globe(&mut world);

        let mut markers = Vec::with_capacity(scene.markers.len());
        for marker in &scene.markers {
            let entity = world.spawn();
            world.set_transform(entity, Transform::at_geodetic(marker.position));
            world.set_billboard(entity, marker.billboard.clone());
            world.set_label(entity, marker.label.clone());
            world.set_properties(
                entity,
                ComponentProperties::default()
                    .with("name", marker.name.clone())
                    .with(LOCATION_KEY_PROPERTY, marker.key.as_str()),
            );
            markers.push((entity, marker.key.clone()));
        }

        // Rings get no bounds: they never intercept clicks.
        for ring in &scene.rings {
            let entity = world.spawn();
            world.set_transform(entity, Transform::at_geodetic(ring.position));
            world.set_ellipse(entity, ring.ellipse);
        }

        self.world = world;
        self.markers = markers;
        self.rebuilds += 1;
        self.refresh_pick_bounds();
    }
}

/// Whether the straight segment from `eye` to `point` clears the ellipsoid.
fn visible_from(eye: Vec3, point: Vec3) -> bool {
    let d = point - eye;
    let dist = d.length();
    let Some(dir) = d.normalized() else {
        return true;
    };
    match ray_ellipsoid_hit(eye, dir) {
        None => true,
        // Surface points hit themselves; allow for rounding at Earth scale.
        Some(t) => t + 1.0 + dist * 1e-6 >= dist,
    }
}

impl GlobeEngine for WorldEngine {
    fn configure(&mut self, token: &AccessToken) -> Result<(), EngineError> {
        if token.expose().chars().any(char::is_whitespace) {
            return Err(EngineError::CredentialRejected {
                reason: "token contains whitespace".to_string(),
            });
        }
        self.credential = Some(token.clone());
        info!("globe engine configured");
        Ok(())
    }

    fn apply_scene(&mut self, scene: &SceneDescription) {
        if self.credential.is_none() {
            warn!("scene ignored: engine has no credential");
            return;
        }
        if self.applied.as_ref() == Some(scene) {
            return;
        }

        self.rebuild(scene);
        self.applied = Some(scene.clone());
        debug!(
            markers = scene.markers.len(),
            rings = scene.rings.len(),
            entities = self.world.entity_count(),
            "scene applied"
        );
    }

    fn fly_to(&mut self, command: FlyTo) {
        debug!(
            lon = command.longitude,
            lat = command.latitude,
            alt = command.altitude_m,
            duration = command.duration_s,
            "camera flight"
        );
        self.camera.fly_to(command.destination(), command.duration_s);
    }
}
