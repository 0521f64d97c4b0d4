use std::fmt::Write as _;
use std::str::FromStr;

use formats::LocationKey;
use foundation::math::Geodetic;
use viewer::View;

/// One line of the driver script.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Switch to a user by key (`user user2`).
    User(String),
    /// Press the n-th user button, 1-based (`button 2`).
    Button(usize),
    /// Click the marker with this location key (`click 2`).
    Click(LocationKey),
    /// Click at a pixel position (`pick 640 360`).
    Pick { x_px: f64, y_px: f64 },
    /// Advance the engine clock (`tick 0.5`).
    Tick(f64),
    Show,
    Camera,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("empty command".to_string());
        };
        let args: Vec<&str> = words.collect();

        let cmd = match (verb, args.as_slice()) {
            ("user", [key]) => Command::User((*key).to_string()),
            ("button", [n]) => {
                let n: usize = n.parse().map_err(|_| format!("bad button index: {n}"))?;
                if n == 0 {
                    return Err("button index is 1-based".to_string());
                }
                Command::Button(n)
            }
            ("click", [key]) => Command::Click(LocationKey::new(*key)),
            ("pick", [x, y]) => Command::Pick {
                x_px: parse_f64(x)?,
                y_px: parse_f64(y)?,
            },
            ("tick", [dt]) => {
                let dt = parse_f64(dt)?;
                if dt < 0.0 {
                    return Err(format!("negative tick: {dt}"));
                }
                Command::Tick(dt)
            }
            ("show", []) => Command::Show,
            ("camera", []) => Command::Camera,
            ("quit" | "exit", []) => Command::Quit,
            ("user" | "button" | "click" | "pick" | "tick" | "show" | "camera" | "quit", _) => {
                return Err(format!("wrong arguments for '{verb}'\n\n{}", usage()));
            }
            _ => return Err(format!("unknown command: {verb}\n\n{}", usage())),
        };
        Ok(cmd)
    }
}

/// Parses a script line; blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Option<Result<Command, String>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line.parse())
}

fn parse_f64(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("not a number: {s}"))
}

pub fn usage() -> String {
    "commands:\n  \
     user <key>        switch to a user\n  \
     button <n>        press the n-th user button\n  \
     click <key>       click a location marker\n  \
     pick <x> <y>      click at a pixel position\n  \
     tick <seconds>    advance the clock\n  \
     show              print the current view\n  \
     camera            print the camera position\n  \
     quit"
        .to_string()
}

/// Text rendering of a view.
pub fn describe_view(view: &View) -> String {
    let View::Ready { buttons, scene } = view else {
        return "Loading...".to_string();
    };

    let mut out = String::new();
    let bar: Vec<String> = buttons
        .iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.label)
            } else {
                b.label.clone()
            }
        })
        .collect();
    let _ = writeln!(out, "users: {}", bar.join(" | "));

    for marker in &scene.markers {
        let _ = writeln!(
            out,
            "marker {} {:?} at ({:.4}, {:.4})",
            marker.key,
            marker.name,
            marker.position.lon_deg(),
            marker.position.lat_deg()
        );
    }
    for ring in &scene.rings {
        let _ = writeln!(
            out,
            "ring {:?} r={} m at ({:.4}, {:.4})",
            ring.tier,
            ring.ellipse.semi_major_axis,
            ring.position.lon_deg(),
            ring.position.lat_deg()
        );
    }
    out.trim_end().to_string()
}

pub fn describe_camera(position: Geodetic, flying: bool) -> String {
    format!(
        "camera ({:.4}, {:.4}) alt {:.1} m{}",
        position.lon_deg(),
        position.lat_deg(),
        position.alt_m,
        if flying { " (flying)" } else { "" }
    )
}
