//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::arena::Tree;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::outline::Outline;
use crate::traversal::Order;
use crate::tree_traits::TreeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    if !settings.color {
        colored::control::set_override(false);
    }
    debug!(?settings, "effective settings");

    match &cli.command {
        Some(Commands::Show { file }) => show(&settings, file),
        Some(Commands::Walk { file, order }) => {
            walk(&settings, file, order.unwrap_or(settings.order))
        }
        Some(Commands::Info { file }) => info(&settings, file),
        Some(Commands::Config) => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        Some(Commands::Completion { shell }) => completion(*shell),
        None => Err(CliError::Usage("no command given, see --help".to_string())),
    }
}

fn read_outline(settings: &Settings, file: &Path) -> CliResult<Tree<String>> {
    Ok(Outline::new(settings.indent_width).read(file)?)
}

#[instrument(level = "debug", skip(settings))]
fn show(settings: &Settings, file: &Path) -> CliResult<()> {
    let tree = read_outline(settings, file)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn walk(settings: &Settings, file: &Path, order: Order) -> CliResult<()> {
    let tree = read_outline(settings, file)?;
    for label in walk_labels(&tree, order) {
        output::info(label);
    }
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn info(settings: &Settings, file: &Path) -> CliResult<()> {
    let tree = read_outline(settings, file)?;
    let summary = TreeSummary::of(&tree);
    output::header(&file.display());
    output::field("root", &summary.root);
    output::field("size", &summary.size);
    output::field("height", &summary.height);
    output::field("leaves", &summary.leaves.len());
    for leaf in &summary.leaves {
        output::detail(leaf);
    }
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

/// Element labels in the given traversal order.
pub fn walk_labels(tree: &Tree<String>, order: Order) -> Vec<&str> {
    tree.traverse(order)
        .filter_map(|p| tree.get(p).ok())
        .map(String::as_str)
        .collect()
}

/// Figures reported by `narytree info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSummary {
    pub root: String,
    pub size: usize,
    pub height: usize,
    pub leaves: Vec<String>,
}

impl TreeSummary {
    pub fn of(tree: &Tree<String>) -> Self {
        let root = tree
            .root()
            .ok()
            .and_then(|p| tree.get(p).ok())
            .cloned()
            .unwrap_or_default();
        let leaves = tree
            .leaves()
            .filter_map(|p| tree.get(p).ok())
            .cloned()
            .collect();
        Self {
            root,
            size: tree.size(),
            height: tree.height(),
            leaves,
        }
    }
}
