use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use markdown_sanitizer::{Result, Sanitizer, SanitizerOptions};

#[derive(Parser)]
#[command(name = "markdown-sanitizer")]
#[command(about = "Sanitize an HTML fragment read from stdin and write it to stdout", long_about = None)]
struct Cli {
    /// JSON file with sanitizer options (allowedTags, allowedAttributes, allowedClasses,
    /// allowedSchemes, urlAttributes).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Use the options as the whole configuration instead of overriding the defaults.
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let options = match &cli.config {
        Some(path) => {
            info!("loading sanitizer options from {}", path.display());
            SanitizerOptions::from_reader(File::open(path)?)?
        }
        None => SanitizerOptions::default(),
    };
    let config = options.resolve(cli.strict);

    let sanitizer = Sanitizer::new(&config);
    sanitizer.sanitize_fragment(&mut io::stdin(), &mut io::stdout())
}
