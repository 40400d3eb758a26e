/// wire3d Terminal Viewer - wireframe street of buildings
///
/// Controls:
///   - Arrow Keys / PageUp / PageDown: Move the camera
///   - W/S, A/D, Q/E: Rotate about x, y, z
///   - Z/X: Zoom in/out
///   - Home: Reset the camera
///   - Esc / Ctrl-C: Quit
use std::env;

use anyhow::Context;
use wire3d_core::{Viewer, ViewerConfig};
use wire3d_terminal::{cli, logging, render_snapshot, TerminalApp};

fn main() -> anyhow::Result<()> {
    let args = cli::parse_args(env::args().skip(1))?;
    if args.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    match &args.log_file {
        Some(path) => logging::init_file_logging(path)
            .with_context(|| format!("opening log file {}", path.display()))?,
        None if args.snapshot.is_some() => logging::init_stderr_logging(),
        None => {}
    }

    let config = match &args.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    let mut viewer = Viewer::new(config);
    for key in &args.keys {
        if !viewer.handle_key(key) {
            tracing::warn!(key = %key, "no binding for key, ignored");
        }
    }

    if let Some((width, height)) = args.snapshot {
        print!("{}", render_snapshot(&viewer, width, height));
        return Ok(());
    }

    let mut app = TerminalApp::new(viewer).context("reading terminal size")?;
    app.run().context("running terminal viewer")?;
    Ok(())
}
