use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use configtree_codec::TextStyle;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output style (flow, block); overrides config
    #[arg(short, long)]
    pub style: Option<TextStyle>,
}

/// Render the persisted tree as text
pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let session = config.open_session(cwd)?;
    let style = args.style.unwrap_or(config.output_style);
    let text = session.store().export_text_with(style)?;

    match args.out {
        Some(path) => {
            fs::write(&path, &text)?;
            eprintln!("{} Wrote {} ({})", "✓".green(), path.display(), style);
        }
        None => print!("{}", text),
    }

    Ok(())
}
