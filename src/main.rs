// What you GET:
// • One 1024x1024 PNG app icon (neon pixel-art space marine) written to disk.
// • The output path and final size printed to the terminal.
// Nothing to configure: the recipe lives in `IconConfig::rewind_survivor()`.

use anyhow::Context;
use rewind_icon::{IconConfig, render_to_file};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = IconConfig::rewind_survivor();
    let report = render_to_file(&cfg)
        .with_context(|| format!("rendering icon to {}", cfg.output.display()))?;

    println!("Icon saved to {}", report.path.display());
    println!("Size: ({}, {})", report.width, report.height);
    Ok(())
}
