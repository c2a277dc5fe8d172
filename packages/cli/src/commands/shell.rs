//! Line-oriented editing console.
//!
//! Reads one command per line, applies it to the session and keeps going
//! when a command fails. Nothing is persisted until `save` (or after every
//! change with `--autosave`).

use crate::commands::show::outline;
use crate::config::Config;
use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use colored::Colorize;
use configtree_codec::TextStyle;
use configtree_common::{NodeKind, SnapshotStorage};
use configtree_editor::EditSession;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

const HELP: &str = "\
Commands:
  add <parent|-> <kind> <title> [value...]   kind: string, int, float, array, map
  rm <key>
  rename <key> <title>
  set <key> <value...>
  mv <key> <dest> [index]
  undo | redo
  show
  export [flow|block]
  import <file>
  save
  help
  quit";

#[derive(Debug, Args)]
pub struct ShellArgs {
    /// Save after every successful change
    #[arg(long)]
    pub autosave: bool,
}

pub fn shell(args: ShellArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut shell = Shell::new(config.open_session(cwd)?, args.autosave);

    println!(
        "{} ({} nodes, type {} for commands)",
        "configtree shell".bright_blue().bold(),
        shell.session().store().tree().len(),
        "help".cyan()
    );

    let stdin = io::stdin();
    shell.run(stdin.lock(), io::stdout())
}

/// One parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Add {
        parent: Option<String>,
        kind: NodeKind,
        title: String,
        value: Option<String>,
    },
    Remove {
        key: String,
    },
    Rename {
        key: String,
        title: String,
    },
    Set {
        key: String,
        value: String,
    },
    Move {
        key: String,
        dest: String,
        index: Option<usize>,
    },
    Undo,
    Redo,
    Show,
    Export(Option<TextStyle>),
    Import(PathBuf),
    Save,
    Help,
    Quit,
}

/// Split off the next whitespace-delimited word
fn next_word<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let trimmed = rest.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let (word, tail) = trimmed.split_at(end);
    *rest = tail;
    Some(word)
}

fn required<'a>(rest: &mut &'a str, what: &str) -> Result<&'a str> {
    next_word(rest).ok_or_else(|| anyhow!("missing {}", what))
}

/// The rest of the line, leading whitespace removed
fn remainder(rest: &str) -> Option<String> {
    let text = rest.trim_start().trim_end_matches(['\r', '\n']);
    (!text.is_empty()).then(|| text.to_string())
}

impl FromStr for ShellCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut rest = line;
        let command = required(&mut rest, "command")?;

        let parsed = match command {
            "add" => {
                let parent = required(&mut rest, "parent key (or -)")?;
                let kind = required(&mut rest, "kind")?.parse::<NodeKind>()?;
                let title = required(&mut rest, "title")?.to_string();
                ShellCommand::Add {
                    parent: (parent != "-").then(|| parent.to_string()),
                    kind,
                    title,
                    value: remainder(rest),
                }
            }
            "rm" => ShellCommand::Remove {
                key: required(&mut rest, "key")?.to_string(),
            },
            "rename" => ShellCommand::Rename {
                key: required(&mut rest, "key")?.to_string(),
                title: remainder(rest).ok_or_else(|| anyhow!("missing title"))?,
            },
            "set" => ShellCommand::Set {
                key: required(&mut rest, "key")?.to_string(),
                value: remainder(rest).unwrap_or_default(),
            },
            "mv" => {
                let key = required(&mut rest, "key")?.to_string();
                let dest = required(&mut rest, "destination key")?.to_string();
                let index = next_word(&mut rest)
                    .map(|i| i.parse::<usize>().with_context(|| format!("bad index '{}'", i)))
                    .transpose()?;
                ShellCommand::Move { key, dest, index }
            }
            "undo" => ShellCommand::Undo,
            "redo" => ShellCommand::Redo,
            "show" => ShellCommand::Show,
            "export" => ShellCommand::Export(
                next_word(&mut rest)
                    .map(|s| s.parse::<TextStyle>().map_err(|e| anyhow!(e)))
                    .transpose()?,
            ),
            "import" => ShellCommand::Import(PathBuf::from(
                remainder(rest).ok_or_else(|| anyhow!("missing file"))?,
            )),
            "save" => ShellCommand::Save,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => bail!("unknown command '{}' (try help)", other),
        };

        Ok(parsed)
    }
}

/// Console state over one editing session
pub struct Shell<S: SnapshotStorage> {
    session: EditSession<S>,
    autosave: bool,
}

impl<S: SnapshotStorage> Shell<S> {
    pub fn new(session: EditSession<S>, autosave: bool) -> Self {
        Self { session, autosave }
    }

    pub fn session(&self) -> &EditSession<S> {
        &self.session
    }

    /// Process lines until `quit` or end of input
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> Result<()> {
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();

            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                match trimmed.parse::<ShellCommand>() {
                    Ok(ShellCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = self.execute(command, &mut out) {
                            writeln!(out, "{} {}", "error:".red().bold(), e)?;
                        }
                    }
                    Err(e) => writeln!(out, "{} {}", "error:".red().bold(), e)?,
                }
            }

            write!(out, "> ")?;
            out.flush()?;
        }

        if self.session.is_dirty() {
            writeln!(
                out,
                "\n{} unsaved changes were discarded",
                "warning:".yellow().bold()
            )?;
        }
        Ok(())
    }

    /// Run one command, writing its output
    pub fn execute(&mut self, command: ShellCommand, out: &mut impl Write) -> Result<()> {
        debug!(?command, "Shell command");
        let store = self.session.store_mut();

        match command {
            ShellCommand::Add {
                parent,
                kind,
                title,
                value,
            } => {
                let key = store.add_node(parent.as_deref(), &title, kind, value.as_deref())?;
                writeln!(out, "{} added {}", "✓".green(), key)?;
            }
            ShellCommand::Remove { key } => {
                store.delete_node(&key)?;
                writeln!(out, "{} removed {}", "✓".green(), key)?;
            }
            ShellCommand::Rename { key, title } => {
                store.rename_node(&key, &title)?;
                writeln!(out, "{} renamed {}", "✓".green(), key)?;
            }
            ShellCommand::Set { key, value } => {
                store.set_value(&key, &value)?;
                writeln!(out, "{} set {}", "✓".green(), key)?;
            }
            ShellCommand::Move { key, dest, index } => {
                let new_key = match index {
                    Some(index) => store.move_node_at(&key, &dest, index)?,
                    None => store.move_node(&key, &dest)?,
                };
                writeln!(out, "{} moved {} → {}", "✓".green(), key, new_key)?;
            }
            ShellCommand::Undo => {
                if !store.undo() {
                    writeln!(out, "{}", "nothing to undo".dimmed())?;
                    return Ok(());
                }
            }
            ShellCommand::Redo => {
                if !store.redo() {
                    writeln!(out, "{}", "nothing to redo".dimmed())?;
                    return Ok(());
                }
            }
            ShellCommand::Show => {
                write!(out, "{}", outline(store.tree()))?;
                return Ok(());
            }
            ShellCommand::Export(style) => {
                let style = style.unwrap_or(store.options().text_style);
                write!(out, "{}", store.export_text_with(style)?)?;
                return Ok(());
            }
            ShellCommand::Import(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("cannot read {}", path.display()))?;
                store.import_text(&text)?;
                writeln!(out, "{} imported {} nodes", "✓".green(), store.tree().len())?;
            }
            ShellCommand::Save => {
                self.session.save()?;
                writeln!(out, "{} saved", "✓".green())?;
                return Ok(());
            }
            ShellCommand::Help => {
                writeln!(out, "{}", HELP)?;
                return Ok(());
            }
            ShellCommand::Quit => return Ok(()),
        }

        if self.autosave {
            self.session.save()?;
        }
        Ok(())
    }
}
