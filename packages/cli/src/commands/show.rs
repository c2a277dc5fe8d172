use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use configtree_common::{OutlineWriter, Tree};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Print only the number of nodes
    #[arg(short, long)]
    pub count: bool,
}

/// Print an outline of the persisted tree
pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let session = config.open_session(cwd)?;
    let tree = session.store().tree();

    if args.count {
        println!("{}", tree.len());
    } else {
        print!("{}", outline(tree));
    }

    Ok(())
}

pub(crate) fn outline(tree: &Tree) -> String {
    if tree.is_empty() {
        format!("{}\n", "(empty tree)".dimmed())
    } else {
        OutlineWriter::render(tree)
    }
}
