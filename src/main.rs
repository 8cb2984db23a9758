use anyhow::Result;
use appicon_gen::{icon_gen, Config, Variant};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Parser)]
#[clap(
    name = "appicon-gen",
    about = "Render the app icon set at every size the asset catalog lists"
)]
struct Args {
    /// Which icon set to produce
    #[clap(long, value_enum, default_value_t = Variant::Normal)]
    variant: Variant,

    /// Project root; default paths are resolved against it
    #[clap(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// The app icon set's Contents.json
    #[clap(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Output directory for the transparent variant
    #[clap(long, value_name = "DIR")]
    transparent_dir: Option<PathBuf>,

    /// Log every rendering step
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::with_root(args.root, args.variant);
    if let Some(manifest) = args.manifest {
        config.manifest = manifest;
    }
    if let Some(dir) = args.transparent_dir {
        config.transparent_dir = dir;
    }

    icon_gen::generate_icons(&config)?;
    Ok(())
}
