use foundation::math::Geodetic;
use formats::{Location, LocationKey};
use scene::components::{Billboard, Ellipse, Label, LabelStyle};

use crate::config::ViewerConfig;
use crate::state::ViewerState;

/// Which of the three concentric rings a shape represents.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RingTier {
    Large,
    Medium,
    Short,
}

impl RingTier {
    pub const ALL: [RingTier; 3] = [RingTier::Large, RingTier::Medium, RingTier::Short];
}

/// A clickable location marker: icon plus name label.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerNode {
    pub key: LocationKey,
    pub name: String,
    pub position: Geodetic,
    pub billboard: Billboard,
    pub label: Label,
}

/// A non-interactive ring around the selected location.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RingNode {
    pub tier: RingTier,
    pub position: Geodetic,
    pub ellipse: Ellipse,
}

/// Everything the engine should show for one state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneDescription {
    pub markers: Vec<MarkerNode>,
    pub rings: Vec<RingNode>,
}

impl SceneDescription {
    pub fn marker(&self, key: &LocationKey) -> Option<&MarkerNode> {
        self.markers.iter().find(|m| &m.key == key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserButton {
    pub user: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Shown for as long as the engine has no usable credential.
    Loading,
    Ready {
        buttons: Vec<UserButton>,
        scene: SceneDescription,
    },
}

impl View {
    pub fn scene(&self) -> Option<&SceneDescription> {
        match self {
            View::Loading => None,
            View::Ready { scene, .. } => Some(scene),
        }
    }
}

pub fn render(state: &ViewerState, config: &ViewerConfig) -> View {
    if !state.credential_ready {
        return View::Loading;
    }

    let buttons = config
        .profiles
        .iter()
        .map(|p| UserButton {
            user: p.key.clone(),
            label: p.label.clone(),
            active: state.active_user.as_deref() == Some(p.key.as_str()),
        })
        .collect();

    View::Ready {
        buttons,
        scene: describe_scene(state, config),
    }
}

pub fn describe_scene(state: &ViewerState, config: &ViewerConfig) -> SceneDescription {
    let markers = state
        .active_locations
        .iter()
        .map(|l| marker_node(l, config))
        .collect();
    let rings = state
        .selected_location
        .as_ref()
        .map(|l| ring_nodes(l, config))
        .unwrap_or_default();

    SceneDescription { markers, rings }
}

fn marker_node(location: &Location, config: &ViewerConfig) -> MarkerNode {
    let style = &config.marker;
    let label = Label {
        font: style.font.clone(),
        fill_color: style.text_fill,
        outline_color: style.text_outline,
        outline_width: style.text_outline_width,
        style: LabelStyle::FillAndOutline,
        pixel_offset: style.label_offset_px,
        ..Label::new(location.name.clone())
    };

    MarkerNode {
        key: location.key.clone(),
        name: location.name.clone(),
        position: surface_point(location),
        billboard: Billboard::new(style.icon.clone())
            .with_scale(style.scale)
            .pinned(),
        label,
    }
}

fn ring_nodes(location: &Location, config: &ViewerConfig) -> Vec<RingNode> {
    RingTier::ALL
        .iter()
        .zip(location.radii())
        .zip(config.rings)
        .map(|((tier, radius), style)| RingNode {
            tier: *tier,
            position: surface_point(location),
            ellipse: Ellipse::disk(radius, style.fill, style.outline),
        })
        .collect()
}

fn surface_point(location: &Location) -> Geodetic {
    Geodetic::from_degrees(location.longitude, location.latitude, 0.0)
}
