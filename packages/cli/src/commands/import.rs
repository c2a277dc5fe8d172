use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// YAML document to load
    pub input: PathBuf,
}

/// Replace the persisted tree with the contents of a document
pub fn import(args: ImportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Cannot read {}", args.input.display()))?;

    let mut session = config.open_session(cwd)?;
    session
        .store_mut()
        .import_text(&text)
        .with_context(|| format!("Cannot parse {}", args.input.display()))?;
    session.save()?;

    println!(
        "{} Imported {} nodes from {}",
        "✓".green(),
        session.store().tree().len(),
        args.input.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_persists_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let input = dir.path().join("settings.yaml");
        fs::write(&input, "server:\n  port: 8080\n").unwrap();

        import(ImportArgs { input }, &cwd).unwrap();

        let session = Config::default().open_session(&cwd).unwrap();
        assert_eq!(session.store().find("server-port").unwrap().value(), Some("8080"));
    }

    #[test]
    fn test_malformed_import_keeps_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let good = dir.path().join("good.yaml");
        let bad = dir.path().join("bad.yaml");
        fs::write(&good, "a: 1\n").unwrap();
        fs::write(&bad, "not: [valid").unwrap();

        import(ImportArgs { input: good }, &cwd).unwrap();
        assert!(import(ImportArgs { input: bad }, &cwd).is_err());

        let session = Config::default().open_session(&cwd).unwrap();
        assert!(session.store().find("a").is_some());
    }
}
