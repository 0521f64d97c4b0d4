use formats::{Location, LocationKey, LocationSet};
use runtime::effects::EffectQueue;
use tracing::{debug, error, info, warn};

use crate::config::ViewerConfig;
use crate::engine::{FlyTo, GlobeEngine};
use crate::error::ViewerError;
use crate::state::ViewerState;
use crate::view::{View, render};

/// Side effects produced by committed transitions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewerEffect {
    FlyTo(FlyTo),
}

/// The mounted location viewer.
///
/// Owns its configuration (including the engine credential), the dataset and
/// the UI state. The engine is borrowed only at mount and at `flush`.
#[derive(Debug)]
pub struct LocationViewer {
    config: ViewerConfig,
    locations: LocationSet,
    state: ViewerState,
    effects: EffectQueue<ViewerEffect>,
}

impl LocationViewer {
    /// One-shot initialization. A missing or rejected credential leaves the
    /// viewer permanently in the loading state; it is never retried.
    pub fn mount<E: GlobeEngine>(
        config: ViewerConfig,
        locations: LocationSet,
        engine: &mut E,
    ) -> Self {
        let credential_ready = match config.access_token.as_ref() {
            None => {
                error!("globe access token is missing; rendering stays suppressed");
                false
            }
            Some(token) => match engine.configure(token) {
                Ok(()) => true,
                Err(err) => {
                    error!(%err, "failed to configure globe engine");
                    false
                }
            },
        };

        if !locations.contains_user(&config.default_user) {
            warn!(user = %config.default_user, "default user has no locations");
        }
        // Suspicious records are still shown; the engine decides how to draw them.
        for (user, location, reason) in locations.anomalies() {
            warn!(%user, key = %location.key, reason, "suspicious location record");
        }

        let state = ViewerState::initial(&locations, &config.default_user, credential_ready);
        info!(
            ready = credential_ready,
            users = locations.user_keys().count(),
            locations = locations.location_count(),
            content_hash = locations.content_hash(),
            "location viewer mounted"
        );

        Self {
            config,
            locations,
            state,
            effects: EffectQueue::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state.credential_ready
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    pub fn view(&self) -> View {
        render(&self.state, &self.config)
    }

    pub fn pending_effects(&self) -> Vec<ViewerEffect> {
        self.effects.pending().iter().map(|q| q.effect).collect()
    }

    pub fn switch_user(&mut self, user: &str) -> Result<(), ViewerError> {
        match self.state.switch_user(&self.locations, user) {
            Ok(()) => {
                info!(%user, locations = self.state.active_locations.len(), "switched user");
                Ok(())
            }
            Err(err) => {
                warn!(%user, %err, "user switch ignored");
                Err(err)
            }
        }
    }

    /// Selects an active location and queues a camera flight to it.
    pub fn select_location(&mut self, key: &LocationKey) -> Result<(), ViewerError> {
        let fly = self.config.fly;
        let command = match self.state.select_location(key) {
            Ok(location) => fly_command(location, fly.altitude_m, fly.duration_s),
            Err(err) => {
                warn!(%key, %err, "selection ignored");
                return Err(err);
            }
        };

        info!(%key, lon = command.longitude, lat = command.latitude, "location selected");
        self.effects.push(ViewerEffect::FlyTo(command));
        Ok(())
    }

    /// Pushes the current scene to the engine, then dispatches queued effects
    /// in the order their transitions committed.
    pub fn flush<E: GlobeEngine>(&mut self, engine: &mut E) {
        let View::Ready { scene, .. } = self.view() else {
            return;
        };
        engine.apply_scene(&scene);

        for queued in self.effects.drain() {
            match queued.effect {
                ViewerEffect::FlyTo(command) => {
                    debug!(seq = queued.seq, ?command, "dispatching fly command");
                    engine.fly_to(command);
                }
            }
        }
    }
}

fn fly_command(location: &Location, altitude_m: f64, duration_s: f64) -> FlyTo {
    FlyTo {
        longitude: location.longitude,
        latitude: location.latitude,
        altitude_m,
        duration_s,
    }
}
