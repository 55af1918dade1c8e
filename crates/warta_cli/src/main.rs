mod generate;
mod walk;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "warta", about = "Generate the bilingual static blog.")]
struct Cli {
    /// Site source directory; defaults to the current directory.
    #[arg(long = "source-dir", short = 's')]
    source_dir: Option<PathBuf>,
    /// Output directory; defaults to the source directory.
    #[arg(long = "out-dir")]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = resolve_dir(cli.source_dir.as_ref())?;
    let out = match cli.out_dir.as_ref() {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => root.join(path),
        None => root.clone(),
    };
    generate::run(&root, &out)
}

fn resolve_dir(dir: Option<&PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(path) if path.is_absolute() => Ok(path.clone()),
        Some(path) => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            Ok(cwd.join(path))
        }
        None => std::env::current_dir().context("failed to read current directory"),
    }
}
