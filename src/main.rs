//! `tourview` - open the scroll-driven carousel in a native window.
//!
//! The mouse wheel scrolls a simulated page; moving the pointer drifts the
//! camera.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tourview::{Options, Viewer};

/// Scroll-driven 3D image carousel viewer.
#[derive(Parser, Debug)]
#[command(name = "tourview", version, about)]
struct Args {
    /// Image files to place on the ring (defaults to the configured list).
    images: Vec<String>,

    /// TOML options preset.
    #[arg(short, long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Window title.
    #[arg(short, long, default_value = "Tourview")]
    title: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let options = match &args.options {
        Some(path) => match Options::load(path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Options::default(),
    };

    let mut builder = Viewer::builder()
        .with_options(options)
        .with_title(args.title);
    if !args.images.is_empty() {
        builder = builder.with_images(args.images);
    }

    match builder.build().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
