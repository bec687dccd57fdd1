use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about,
    help_template(
        "{before-help}{name} {version}\n{author-with-newline}{about-with-newline}\n{usage-heading} {usage}\n\n{all-args}{after-help}"
    )
)]
pub struct Args {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "macrocfg.toml")]
    pub config: PathBuf,

    /// Tile placement file to read. Overrides `input` in the configuration file.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// File to which the transformed placement should be written.
    /// Overrides `output` in the configuration file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print every tile after all steps have run.
    #[arg(long)]
    pub dump: bool,
}
