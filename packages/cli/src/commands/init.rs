use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use configtree_codec::TextStyle;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for persisted snapshots
    #[arg(short, long, default_value = ".configtree")]
    pub storage_dir: String,

    /// Default export style (flow, block)
    #[arg(long, default_value = "flow")]
    pub style: TextStyle,

    /// Undo levels kept per session (0 = unlimited)
    #[arg(long, default_value_t = configtree_editor::DEFAULT_HISTORY_LIMIT)]
    pub history_limit: usize,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing configtree project...".bright_blue().bold());

    let config = Config {
        storage_dir: args.storage_dir.clone(),
        output_style: args.style,
        history_limit: args.history_limit,
        ..Config::default()
    };

    // Create storage directory if it doesn't exist
    let storage_dir = config.get_storage_dir(cwd);
    if !storage_dir.exists() {
        fs::create_dir_all(&storage_dir)?;
        println!("  {} Created {}/", "✓".green(), args.storage_dir);
    }

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: configtree import settings.yaml");
    println!("  2. Run: configtree shell");
    println!("  3. Run: configtree export --out settings.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(force: bool) -> InitArgs {
        InitArgs {
            storage_dir: "state".to_string(),
            style: TextStyle::Block,
            history_limit: 5,
            force,
        }
    }

    #[test]
    fn test_init_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        init(args(false), &cwd).unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.storage_dir, "state");
        assert_eq!(config.output_style, TextStyle::Block);
        assert_eq!(config.history_limit, 5);
        assert!(dir.path().join("state").is_dir());
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, "{}").unwrap();

        init(args(false), &cwd).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");

        init(args(true), &cwd).unwrap();
        assert_eq!(Config::load(&cwd).unwrap().storage_dir, "state");
    }
}
