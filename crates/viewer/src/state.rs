use formats::{Location, LocationKey, LocationSet};

use crate::error::ViewerError;

/// UI state owned by one mounted viewer.
///
/// Invariant: `selected_location`, when set, was an element of
/// `active_locations` at the moment it was selected, and every user switch
/// clears it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewerState {
    pub credential_ready: bool,
    pub active_user: Option<String>,
    pub active_locations: Vec<Location>,
    pub selected_location: Option<Location>,
}

impl ViewerState {
    /// Initial state: the default user's locations, nothing selected.
    ///
    /// A default user missing from the dataset yields an empty set.
    pub fn initial(locations: &LocationSet, default_user: &str, credential_ready: bool) -> Self {
        let active = locations.get(default_user);
        Self {
            credential_ready,
            active_user: active.map(|_| default_user.to_string()),
            active_locations: active.map(<[Location]>::to_vec).unwrap_or_default(),
            selected_location: None,
        }
    }

    /// Replaces the active set with `user`'s locations and clears the selection.
    ///
    /// Unknown users are rejected and the prior state is kept.
    pub fn switch_user(&mut self, locations: &LocationSet, user: &str) -> Result<(), ViewerError> {
        if !self.credential_ready {
            return Err(ViewerError::NotReady);
        }
        let Some(set) = locations.get(user) else {
            return Err(ViewerError::UnknownUserKey {
                user: user.to_string(),
            });
        };

        self.active_user = Some(user.to_string());
        self.active_locations = set.to_vec();
        self.selected_location = None;
        Ok(())
    }

    /// Selects the active location with `key`.
    pub fn select_location(&mut self, key: &LocationKey) -> Result<&Location, ViewerError> {
        if !self.credential_ready {
            return Err(ViewerError::NotReady);
        }
        let Some(location) = self.active_locations.iter().find(|l| &l.key == key) else {
            return Err(ViewerError::UnknownLocation { key: key.clone() });
        };

        Ok(self.selected_location.insert(location.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerState;
    use crate::error::ViewerError;
    use formats::{LocationKey, LocationSet};
    use pretty_assertions::assert_eq;

    fn dataset() -> LocationSet {
        LocationSet::from_json_str(
            r#"{
            "user1": [
                { "key": 1, "name": "A", "longitude": 1, "latitude": 2,
                  "largeRadius": 30, "mediumRadius": 20, "shortRadius": 10 },
                { "key": 2, "name": "B", "longitude": 3, "latitude": 4,
                  "largeRadius": 30, "mediumRadius": 20, "shortRadius": 10 }
            ],
            "user2": [
                { "key": 1, "name": "C", "longitude": 5, "latitude": 6,
                  "largeRadius": 30, "mediumRadius": 20, "shortRadius": 10 }
            ]
        }"#,
        )
        .expect("dataset")
    }

    #[test]
    fn initial_state_uses_default_user() {
        let set = dataset();
        let state = ViewerState::initial(&set, "user1", true);
        assert_eq!(state.active_user.as_deref(), Some("user1"));
        assert_eq!(state.active_locations, set.get("user1").unwrap().to_vec());
        assert_eq!(state.selected_location, None);
    }

    #[test]
    fn missing_default_user_starts_empty() {
        let state = ViewerState::initial(&dataset(), "nobody", true);
        assert!(state.active_locations.is_empty());
        assert_eq!(state.active_user, None);
    }

    #[test]
    fn switching_user_clears_selection() {
        let set = dataset();
        let mut state = ViewerState::initial(&set, "user1", true);
        state.select_location(&LocationKey::new("2")).expect("select");

        state.switch_user(&set, "user2").expect("switch");
        assert_eq!(state.active_locations[0].name, "C");
        assert_eq!(state.selected_location, None);
    }

    #[test]
    fn unknown_user_keeps_prior_state() {
        let set = dataset();
        let mut state = ViewerState::initial(&set, "user1", true);
        state.select_location(&LocationKey::new("1")).expect("select");
        let before = state.clone();

        let err = state.switch_user(&set, "user9").expect_err("unknown");
        assert_eq!(
            err,
            ViewerError::UnknownUserKey {
                user: "user9".to_string()
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn selecting_outside_active_set_is_rejected() {
        let set = dataset();
        let mut state = ViewerState::initial(&set, "user2", true);
        // Key "2" only exists for user1.
        let err = state.select_location(&LocationKey::new("2")).expect_err("reject");
        assert!(matches!(err, ViewerError::UnknownLocation { .. }));
        assert_eq!(state.selected_location, None);
    }

    #[test]
    fn same_key_resolves_against_current_user() {
        let set = dataset();
        let mut state = ViewerState::initial(&set, "user1", true);
        assert_eq!(state.select_location(&LocationKey::new("1")).unwrap().name, "A");
        state.switch_user(&set, "user2").unwrap();
        assert_eq!(state.select_location(&LocationKey::new("1")).unwrap().name, "C");
    }

    #[test]
    fn not_ready_rejects_every_action() {
        let set = dataset();
        let mut state = ViewerState::initial(&set, "user1", false);
        assert_eq!(state.switch_user(&set, "user2"), Err(ViewerError::NotReady));
        assert_eq!(
            state.select_location(&LocationKey::new("1")).map(|l| l.name.clone()),
            Err(ViewerError::NotReady)
        );
    }
}
