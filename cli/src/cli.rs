use std::path::PathBuf;

/// Vector tile encoder CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "linetile", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Encode a JSON-lines stream of draw calls into a compressed tile
    Render(RenderArgs),

    /// Decode a compressed tile and print its layers and features
    Inspect(InspectArgs),
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Draw-call file, one JSON object per line; reads stdin if omitted
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output tile file; writes stdout if omitted
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Drawing surface width in pixels
    #[arg(long, default_value_t = 256)]
    pub width: u32,

    /// Deflate compression level
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: u32,
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Compressed tile file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub tile: PathBuf,
}
