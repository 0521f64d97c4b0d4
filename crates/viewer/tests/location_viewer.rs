use formats::{LocationKey, LocationSet};
use pretty_assertions::assert_eq;
use viewer::{
    AccessToken, EngineError, FlyTo, GlobeEngine, LocationViewer, SceneDescription, View,
    ViewerConfig, ViewerEffect, ViewerError,
};

const DATASET: &str = r#"{
    "user1": [
        { "key": 1, "name": "Harbor", "longitude": -9.1, "latitude": 38.7,
          "largeRadius": 8000, "mediumRadius": 4000, "shortRadius": 1500 },
        { "key": 2, "name": "Ridge", "longitude": -3.7, "latitude": 40.4,
          "largeRadius": 10000, "mediumRadius": 5000, "shortRadius": 2000 }
    ],
    "user2": [
        { "key": 1, "name": "Location X", "longitude": 10, "latitude": 20,
          "largeRadius": 5000, "mediumRadius": 2000, "shortRadius": 500 },
        { "key": 2, "name": "Lagoon", "longitude": 3.4, "latitude": 6.5,
          "largeRadius": 7000, "mediumRadius": 3500, "shortRadius": 900 }
    ],
    "user3": [
        { "key": 1, "name": "Cove", "longitude": 151.2, "latitude": -33.9,
          "largeRadius": 11000, "mediumRadius": 5500, "shortRadius": 2000 }
    ]
}"#;

/// Engine double that records every call it receives.
#[derive(Debug, Default)]
struct RecordingEngine {
    reject_credentials: bool,
    configured_with: Vec<String>,
    scenes: Vec<SceneDescription>,
    flights: Vec<FlyTo>,
}

impl GlobeEngine for RecordingEngine {
    fn configure(&mut self, token: &AccessToken) -> Result<(), EngineError> {
        self.configured_with.push(token.expose().to_string());
        if self.reject_credentials {
            return Err(EngineError::CredentialRejected {
                reason: "revoked".to_string(),
            });
        }
        Ok(())
    }

    fn apply_scene(&mut self, scene: &SceneDescription) {
        self.scenes.push(scene.clone());
    }

    fn fly_to(&mut self, command: FlyTo) {
        self.flights.push(command);
    }
}

fn dataset() -> LocationSet {
    LocationSet::from_json_str(DATASET).expect("dataset")
}

fn config_with_token() -> ViewerConfig {
    ViewerConfig::default().with_access_token(AccessToken::new("token-123"))
}

fn mounted() -> (LocationViewer, RecordingEngine) {
    let mut engine = RecordingEngine::default();
    let viewer = LocationViewer::mount(config_with_token(), dataset(), &mut engine);
    (viewer, engine)
}

fn key(k: &str) -> LocationKey {
    LocationKey::new(k)
}

fn names(viewer: &LocationViewer) -> Vec<String> {
    viewer
        .state()
        .active_locations
        .iter()
        .map(|l| l.name.clone())
        .collect()
}

#[test]
fn initial_state_shows_user1_without_selection() {
    let (mut viewer, mut engine) = mounted();
    assert!(viewer.is_ready());
    assert_eq!(engine.configured_with, vec!["token-123".to_string()]);
    assert_eq!(names(&viewer), vec!["Harbor", "Ridge"]);
    assert_eq!(viewer.state().selected_location, None);

    viewer.flush(&mut engine);
    assert_eq!(engine.scenes.len(), 1);
    assert_eq!(engine.scenes[0].markers.len(), 2);
    assert!(engine.scenes[0].rings.is_empty());
    assert!(engine.flights.is_empty());
}

#[test]
fn switch_user_replaces_locations_for_every_profile() {
    let (mut viewer, _engine) = mounted();
    let set = dataset();
    for user in ["user1", "user2", "user3"] {
        viewer.switch_user(user).expect("switch");
        assert_eq!(
            viewer.state().active_locations,
            set.get(user).expect("user").to_vec()
        );
        assert_eq!(viewer.state().selected_location, None);
    }
}

#[test]
fn selecting_each_location_issues_exactly_one_flight() {
    let (mut viewer, mut engine) = mounted();
    let active = viewer.state().active_locations.clone();
    for location in &active {
        viewer.select_location(&location.key).expect("select");
        assert_eq!(viewer.state().selected_location.as_ref(), Some(location));

        let before = engine.flights.len();
        viewer.flush(&mut engine);
        assert_eq!(engine.flights.len(), before + 1);
        assert_eq!(
            engine.flights.last(),
            Some(&FlyTo {
                longitude: location.longitude,
                latitude: location.latitude,
                altitude_m: 3000.0,
                duration_s: 2.0,
            })
        );
    }
}

#[test]
fn clicking_location_x_draws_rings_and_flies_there() {
    let (mut viewer, mut engine) = mounted();
    viewer.switch_user("user2").expect("switch");
    viewer.select_location(&key("1")).expect("select");

    assert_eq!(
        viewer.state().selected_location.as_ref().map(|l| l.name.as_str()),
        Some("Location X")
    );
    assert_eq!(
        viewer.pending_effects(),
        vec![ViewerEffect::FlyTo(FlyTo {
            longitude: 10.0,
            latitude: 20.0,
            altitude_m: 3000.0,
            duration_s: 2.0,
        })]
    );

    viewer.flush(&mut engine);
    let scene = engine.scenes.last().expect("scene");
    let radii: Vec<f64> = scene.rings.iter().map(|r| r.ellipse.semi_major_axis).collect();
    assert_eq!(radii, vec![5000.0, 2000.0, 500.0]);
    for ring in &scene.rings {
        assert!((ring.position.lon_deg() - 10.0).abs() < 1e-9);
        assert!((ring.position.lat_deg() - 20.0).abs() < 1e-9);
    }
    assert!(viewer.pending_effects().is_empty());
}

#[test]
fn switching_user_removes_rings() {
    let (mut viewer, mut engine) = mounted();
    viewer.select_location(&key("2")).expect("select");
    viewer.flush(&mut engine);
    assert_eq!(engine.scenes.last().expect("scene").rings.len(), 3);

    viewer.switch_user("user2").expect("switch");
    viewer.flush(&mut engine);
    let scene = engine.scenes.last().expect("scene");
    assert!(scene.rings.is_empty());
    assert_eq!(
        scene.marker(&key("1")).map(|m| m.name.as_str()),
        Some("Location X")
    );
    // The camera does not move on a user switch.
    assert_eq!(engine.flights.len(), 1);
}

#[test]
fn scene_is_applied_before_flights() {
    #[derive(Default)]
    struct OrderEngine(Vec<&'static str>);
    impl GlobeEngine for OrderEngine {
        fn configure(&mut self, _token: &AccessToken) -> Result<(), EngineError> {
            Ok(())
        }
        fn apply_scene(&mut self, _scene: &SceneDescription) {
            self.0.push("scene");
        }
        fn fly_to(&mut self, _command: FlyTo) {
            self.0.push("fly");
        }
    }

    let mut engine = OrderEngine::default();
    let mut viewer = LocationViewer::mount(config_with_token(), dataset(), &mut engine);
    viewer.select_location(&key("1")).expect("select");
    viewer.select_location(&key("2")).expect("select");
    viewer.flush(&mut engine);
    assert_eq!(engine.0, vec!["scene", "fly", "fly"]);
}

#[test]
fn unknown_user_is_ignored() {
    let (mut viewer, _engine) = mounted();
    viewer.select_location(&key("1")).expect("select");
    let before = viewer.state().clone();

    let err = viewer.switch_user("user42").expect_err("unknown user");
    assert_eq!(
        err,
        ViewerError::UnknownUserKey {
            user: "user42".to_string()
        }
    );
    assert_eq!(viewer.state(), &before);
}

#[test]
fn missing_credential_shows_loading_forever() {
    let mut engine = RecordingEngine::default();
    let mut viewer = LocationViewer::mount(ViewerConfig::default(), dataset(), &mut engine);

    assert!(!viewer.is_ready());
    assert!(engine.configured_with.is_empty());
    assert_eq!(viewer.view(), View::Loading);

    assert_eq!(viewer.switch_user("user2"), Err(ViewerError::NotReady));
    assert_eq!(viewer.select_location(&key("1")), Err(ViewerError::NotReady));
    viewer.flush(&mut engine);
    assert!(engine.scenes.is_empty());
    assert!(engine.flights.is_empty());
    assert_eq!(viewer.view(), View::Loading);
}

#[test]
fn rejected_credential_degrades_without_retry() {
    let mut engine = RecordingEngine {
        reject_credentials: true,
        ..RecordingEngine::default()
    };
    let mut viewer = LocationViewer::mount(config_with_token(), dataset(), &mut engine);

    assert!(!viewer.is_ready());
    viewer.flush(&mut engine);
    viewer.flush(&mut engine);
    assert_eq!(engine.configured_with.len(), 1);
    assert_eq!(viewer.view(), View::Loading);
}

#[test]
fn out_of_range_records_still_reach_the_engine() {
    let payload = r#"{ "user1": [
        { "key": 1, "name": "Good", "longitude": 10, "latitude": 20,
          "largeRadius": 3000, "mediumRadius": 2000, "shortRadius": 1000 },
        { "key": 2, "name": "Wrapped", "longitude": 190, "latitude": 20,
          "largeRadius": 3000, "mediumRadius": 2000, "shortRadius": 1000 } ] }"#;
    let set = LocationSet::from_json_str(payload).expect("dataset");
    assert_eq!(set.anomalies().len(), 1);

    let mut engine = RecordingEngine::default();
    let mut viewer = LocationViewer::mount(config_with_token(), set, &mut engine);
    assert!(viewer.is_ready());
    assert_eq!(names(&viewer), vec!["Good", "Wrapped"]);

    viewer.select_location(&key("2")).expect("select");
    viewer.flush(&mut engine);
    assert_eq!(engine.scenes.last().expect("scene").markers.len(), 2);
    assert_eq!(engine.flights.last().map(|f| f.longitude), Some(190.0));
}
