use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};

use anyhow::{Context, Result};
use linetile::{Compression, DrawCall, Surface, SurfaceOptions};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let options = SurfaceOptions {
        width: args.width,
        compression: Compression::new(args.level),
    };
    let mut surface = Surface::new(options);

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            log::info!("[render] reading draw calls from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("[render] Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut calls = 0usize;
    for (idx, line) in input.lines().enumerate() {
        let line = line.context("[render] Failed to read draw calls")?;
        let line = line.trim();
        if line.is_empty() { continue }

        let call: DrawCall = serde_json::from_str(line)
            .with_context(|| format!("[render] Invalid draw call on line {}", idx + 1))?;
        call.apply(&mut surface);
        calls += 1;
    }
    log::debug!("[render] applied {} draw calls", calls);

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("[render] Failed to create {}", path.display()))?;
            surface.finish(&mut BufWriter::new(file))
        }
        None => surface.finish(&mut io::stdout().lock()),
    }
}
