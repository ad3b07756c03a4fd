use std::path::Path;

use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use image_atlas::pipeline::{self, MANIFEST_FILE, OUTPUT_FILE};

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    pipeline::run(Path::new(MANIFEST_FILE), Path::new(OUTPUT_FILE))?;
    println!("Wrote {}", OUTPUT_FILE);
    Ok(())
}
