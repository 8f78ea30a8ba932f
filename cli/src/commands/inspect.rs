use anyhow::{Context, Result};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::InspectArgs) -> Result<()> {
    let bytes = std::fs::read(&args.tile)
        .with_context(|| format!("[inspect] Failed to read {}", args.tile.display()))?;

    for layer in linetile::inspect_tile(&bytes)? {
        print!("{layer}");
    }

    Ok(())
}
