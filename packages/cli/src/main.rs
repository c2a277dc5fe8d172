mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    export, import, init, shell, show, ExportArgs, ImportArgs, InitArgs, ShellArgs, ShowArgs,
};
use tracing_subscriber::EnvFilter;

/// Configtree CLI - edit hierarchical configuration documents
#[derive(Parser, Debug)]
#[command(name = "configtree")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new configtree project
    Init(InitArgs),

    /// Load a YAML document into the stored tree
    Import(ImportArgs),

    /// Render the stored tree as YAML
    Export(ExportArgs),

    /// Print an outline of the stored tree
    Show(ShowArgs),

    /// Edit the stored tree interactively
    Shell(ShellArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Import(args) => import(args, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Show(args) => show(args, &cwd),
        Command::Shell(args) => shell(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
