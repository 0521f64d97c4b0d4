mod commands;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use formats::LocationSet;
use globe::{Viewport, WorldEngine};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use viewer::{AccessToken, LocationViewer, ViewerConfig};

use crate::commands::{Command, describe_camera, describe_view, parse_line};

#[derive(Parser, Debug)]
#[command(author, version, about = "Per-user location markers on a headless globe")]
struct Args {
    /// Location dataset (JSON keyed by user); defaults to the bundled one
    #[arg(long)]
    locations: Option<PathBuf>,

    /// Globe access token; overrides GLOBE_ACCESS_TOKEN
    #[arg(long)]
    token: Option<String>,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f64,
}

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = ViewerConfig::from_env();
    if let Some(raw) = args.token {
        config = config.with_access_token(AccessToken::new(raw));
    }

    let locations = match &args.locations {
        Some(path) => LocationSet::load(path)
            .map_err(|e| format!("failed to load {}: {e}", path.display()))?,
        None => LocationSet::bundled().map_err(|e| format!("bundled dataset: {e}"))?,
    };

    let mut engine = WorldEngine::new(Viewport::new(args.width, args.height));
    let mut viewer = LocationViewer::mount(config, locations, &mut engine);
    viewer.flush(&mut engine);

    let mut out = io::stdout().lock();
    writeln!(out, "{}", describe_view(&viewer.view())).map_err(|e| e.to_string())?;

    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            drive(BufReader::new(file), &mut out, &mut viewer, &mut engine)?;
        }
        None => drive(io::stdin().lock(), &mut out, &mut viewer, &mut engine)?,
    }

    info!(frames = engine.last_frame().map_or(0, |f| f.index + 1), "session finished");
    Ok(())
}

/// Executes commands one line at a time as they arrive, until `quit` or EOF.
fn drive<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    viewer: &mut LocationViewer,
    engine: &mut WorldEngine,
) -> Result<(), String> {
    for (lineno, line) in input.lines().enumerate() {
        let line = line.map_err(|e| format!("failed to read input: {e}"))?;
        let Some(parsed) = parse_line(&line) else {
            continue;
        };
        let cmd = match parsed {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!(line = lineno + 1, "{e}");
                continue;
            }
        };
        if cmd == Command::Quit {
            break;
        }
        run(cmd, out, viewer, engine).map_err(|e| format!("failed to write output: {e}"))?;
        out.flush().map_err(|e| format!("failed to write output: {e}"))?;
    }
    Ok(())
}

fn run<W: Write>(
    cmd: Command,
    out: &mut W,
    viewer: &mut LocationViewer,
    engine: &mut WorldEngine,
) -> io::Result<()> {
    // Rejected transitions are logged by the viewer and leave state unchanged.
    match cmd {
        Command::User(user) => {
            let _ = viewer.switch_user(&user);
        }
        Command::Button(n) => {
            let profile = n.checked_sub(1).and_then(|i| viewer.config().profiles.get(i));
            let Some(profile) = profile.cloned() else {
                warn!(button = n, "no such user button");
                return Ok(());
            };
            let _ = viewer.switch_user(&profile.key);
        }
        Command::Click(key) => {
            let _ = viewer.select_location(&key);
        }
        Command::Pick { x_px, y_px } => match engine.pick_screen(x_px, y_px) {
            Some(key) => {
                let _ = viewer.select_location(&key);
            }
            None => match engine.ground_at(x_px, y_px) {
                Some(ground) => info!(
                    lon = ground.lon_deg(),
                    lat = ground.lat_deg(),
                    "click hit bare ground"
                ),
                None => info!(x_px, y_px, "click hit empty sky"),
            },
        },
        Command::Tick(dt) => {
            engine.tick(dt);
        }
        Command::Show => writeln!(out, "{}", describe_view(&viewer.view()))?,
        Command::Camera => {
            let camera = engine.camera();
            writeln!(out, "{}", describe_camera(camera.position(), camera.is_flying()))?;
        }
        Command::Quit => {}
    }
    viewer.flush(engine);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{drive, run};
    use crate::commands::Command;
    use formats::{LocationKey, LocationSet};
    use globe::{Viewport, WorldEngine};
    use pretty_assertions::assert_eq;
    use std::io::{self, BufRead, Read};
    use viewer::{AccessToken, LocationViewer, ViewerConfig};

    fn session() -> (LocationViewer, WorldEngine) {
        let config = ViewerConfig::default().with_access_token(AccessToken::new("token"));
        let mut engine = WorldEngine::new(Viewport::default());
        let mut viewer =
            LocationViewer::mount(config, LocationSet::bundled().expect("bundled"), &mut engine);
        viewer.flush(&mut engine);
        (viewer, engine)
    }

    fn exec(cmd: Command, viewer: &mut LocationViewer, engine: &mut WorldEngine) -> String {
        let mut out = Vec::new();
        run(cmd, &mut out, viewer, engine).expect("run");
        String::from_utf8(out).expect("utf8")
    }

    fn active_user(viewer: &LocationViewer) -> Option<&str> {
        viewer.state().active_user.as_deref()
    }

    #[test]
    fn button_switches_to_matching_profile() {
        let (mut viewer, mut engine) = session();
        exec(Command::Button(2), &mut viewer, &mut engine);
        assert_eq!(active_user(&viewer), Some("user2"));

        // Out-of-range buttons are ignored.
        exec(Command::Button(9), &mut viewer, &mut engine);
        assert_eq!(active_user(&viewer), Some("user2"));
    }

    #[test]
    fn pick_on_marker_pixel_selects_it() {
        let (mut viewer, mut engine) = session();
        exec(Command::User("user2".to_string()), &mut viewer, &mut engine);
        exec(Command::Click(LocationKey::new("2")), &mut viewer, &mut engine);
        exec(Command::Tick(2.0), &mut viewer, &mut engine);
        // Switching user clears the selection but leaves the camera in place.
        exec(Command::Button(2), &mut viewer, &mut engine);
        assert_eq!(viewer.state().selected_location, None);

        let (cx, cy) = engine.viewport().center();
        exec(Command::Pick { x_px: cx, y_px: cy }, &mut viewer, &mut engine);
        let selected = viewer.state().selected_location.as_ref().map(|l| l.name.as_str());
        assert_eq!(selected, Some("Location X"));
        assert_eq!(engine.world().ellipses().len(), 3);
    }

    #[test]
    fn show_and_camera_write_to_output() {
        let (mut viewer, mut engine) = session();
        let shown = exec(Command::Show, &mut viewer, &mut engine);
        assert!(shown.starts_with("users: [User 1] | User 2 | User 3"));
        let camera = exec(Command::Camera, &mut viewer, &mut engine);
        assert!(camera.starts_with("camera ("));
    }

    /// In-memory input that records whether it was asked for bytes past its end.
    struct Tripwire<'a> {
        inner: &'a [u8],
        reads_after_quit: bool,
    }

    impl Read for Tripwire<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.inner.len().min(buf.len());
            buf[..n].copy_from_slice(&self.inner[..n]);
            self.inner = &self.inner[n..];
            Ok(n)
        }
    }

    impl BufRead for Tripwire<'_> {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            if self.inner.is_empty() {
                self.reads_after_quit = true;
            }
            Ok(self.inner)
        }

        fn consume(&mut self, amt: usize) {
            self.inner = &self.inner[amt..];
        }
    }

    #[test]
    fn commands_run_as_lines_arrive_and_stop_at_quit() {
        let (mut viewer, mut engine) = session();
        let mut input = Tripwire {
            inner: b"# switch\nbutton 3\nbogus\nshow\nquit\n",
            reads_after_quit: false,
        };
        let mut out = Vec::new();
        drive(&mut input, &mut out, &mut viewer, &mut engine).expect("drive");

        assert_eq!(active_user(&viewer), Some("user3"));
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("users: User 1 | User 2 | [User 3]"));
        // Nothing after `quit` was requested from the input.
        assert!(!input.reads_after_quit);
    }
}
