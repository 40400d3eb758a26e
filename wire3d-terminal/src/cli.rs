/// Command line parsing.
///
/// Usage:
///   wire3d-terminal [--config scene.json] [--log-file wire3d.log]
///                   [--snapshot 80x40] [--key <name>]...
use std::path::PathBuf;

use anyhow::{bail, Context};

pub const USAGE: &str = "\
Usage: wire3d-terminal [OPTIONS]

Options:
  --config <path>     Load viewer settings from a JSON file
  --log-file <path>   Write logs to a file (RUST_LOG filters, default info)
  --snapshot <WxH>    Render a single frame as text to stdout and exit
  --key <name>        Replay a key press before the first frame (repeatable)
  --help              Show this message

Controls:
  Arrows, PageUp/PageDown  Move the camera
  w/s a/d q/e              Rotate about x, y, z
  z/x                      Zoom in/out
  Home                     Reset the camera
  Esc, Ctrl-C              Quit";

#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub snapshot: Option<(usize, usize)>,
    pub keys: Vec<String>,
    pub help: bool,
}

pub fn parse_args<I>(args: I) -> anyhow::Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .with_context(|| format!("{} expects a value", flag))
        };
        match arg.as_str() {
            "--config" => parsed.config = Some(value("--config")?.into()),
            "--log-file" => parsed.log_file = Some(value("--log-file")?.into()),
            "--snapshot" => parsed.snapshot = Some(parse_size(&value("--snapshot")?)?),
            "--key" => parsed.keys.push(value("--key")?),
            "--help" | "-h" => parsed.help = true,
            other => bail!("unknown argument {:?}\n\n{}", other, USAGE),
        }
    }

    Ok(parsed)
}

fn parse_size(size: &str) -> anyhow::Result<(usize, usize)> {
    let (w, h) = size
        .split_once('x')
        .with_context(|| format!("snapshot size {:?} is not WxH", size))?;
    let w: usize = w.parse().with_context(|| format!("bad snapshot width {:?}", w))?;
    let h: usize = h.parse().with_context(|| format!("bad snapshot height {:?}", h))?;
    if w == 0 || h == 0 {
        bail!("snapshot size must be non-zero, got {}", size);
    }
    Ok((w, h))
}
