//! Main application entry point.

use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tierdeck_app::{platform, AssetResolver, Shell};
use tierdeck_core::{Preset, Session};

#[derive(Parser)]
#[command(name = "tierdeck", version, about = "TierDeck tier list editor")]
struct Args {
    /// Preset key (e.g. `weekly-cup`).
    #[arg(long, env = "TIERDECK_PRESET")]
    preset: Option<String>,

    /// Raw URL query string, e.g. `preset=weekly-cup`.
    #[arg(long, conflicts_with = "preset")]
    query: Option<String>,

    /// Asset root holding manifests and their images.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Manifest path override (relative to the asset root).
    #[arg(long)]
    manifest: Option<PathBuf>,
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let preset = match (&args.preset, &args.query) {
        (Some(key), _) => Preset::by_key(key),
        (None, Some(query)) => Preset::from_query(query),
        (None, None) => Preset::default_preset(),
    };
    log::info!("starting {} ({})", preset.name, preset.key);

    let mut session = Session::new(preset);
    let manifest_path = args
        .manifest
        .unwrap_or_else(|| PathBuf::from(preset.manifest_path));
    session.load_manifest(
        platform::read_manifest(&args.assets.join(&manifest_path)),
        Instant::now(),
    );

    Shell::new(session, AssetResolver::new(args.assets)).run()
}
