//! Command dispatch

use std::io::{self, Write};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::PortfolioService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::NodeKey;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("data_dir: {}", settings.data_dir.display());

    match &cli.command {
        Some(Commands::Config { command }) => config_cmd(command, &settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(command) => {
            let container = ServiceContainer::new(settings);
            let mut portfolio = container.portfolio()?;
            portfolio_cmd(command, &mut portfolio, &container.settings)
        }
        None => Ok(()),
    }
}

fn portfolio_cmd(
    command: &Commands,
    portfolio: &mut PortfolioService,
    settings: &Settings,
) -> CliResult<()> {
    match command {
        Commands::Show => show(portfolio),
        Commands::Keys => {
            for key in portfolio.expanded_keys() {
                output::info(&key);
            }
            Ok(())
        }
        Commands::Add {
            parent,
            name,
            value,
        } => add(portfolio, parent.as_ref(), name.as_deref(), value.as_deref()),
        Commands::Update { key, name, value } => {
            if name.is_none() && value.is_none() {
                return Err(CliError::Usage(
                    "nothing to update: pass --name and/or --value".to_string(),
                ));
            }
            portfolio.edit(key, name.clone(), value.as_deref())?;
            let node = portfolio.node(key)?;
            output::success(&format!("[{}] {}", key, node.label(portfolio.presenter())));
            Ok(())
        }
        Commands::Remove { key } => {
            portfolio.remove(key)?;
            output::success(&format!("Removed {}", key));
            Ok(())
        }
        Commands::Backup => {
            portfolio.backup()?;
            output::success("Backup complete");
            Ok(())
        }
        Commands::Restore => {
            let roots = portfolio.restore()?;
            output::success(&format!("Restored {} portfolio(s) from backup", roots));
            Ok(())
        }
        Commands::Chart { rings } => chart(portfolio, &settings.chart_title, *rings),
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(skip(portfolio))]
fn add(
    portfolio: &mut PortfolioService,
    parent: Option<&NodeKey>,
    name: Option<&str>,
    value: Option<&str>,
) -> CliResult<()> {
    let key = portfolio.add(parent, name, value)?;
    let node = portfolio.node(&key)?;
    output::success(&format!("Added [{}] {}", key, node.label(portfolio.presenter())));
    Ok(())
}

fn show(portfolio: &PortfolioService) -> CliResult<()> {
    if portfolio.tree().is_empty() {
        output::warning("no allocations yet, start with `alloctree add --name <portfolio>`");
        return Ok(());
    }
    for root in portfolio.tree() {
        output::info(&root.to_termtree(portfolio.presenter()));
    }

    let summary = portfolio.summary();
    if summary.implied_total > 0.0 {
        let presenter = portfolio.presenter();
        output::header("Totals");
        output::action("implied", &presenter.money(summary.implied_total));
        output::action("current", &presenter.money(summary.current_total));
        output::action("remaining", &presenter.money(summary.remaining));
    }
    Ok(())
}

fn chart(portfolio: &PortfolioService, title: &str, rings: bool) -> CliResult<()> {
    let model = portfolio.chart_model(title);
    if rings {
        output::header(&model.title);
        if let Some(subtitle) = &model.subtitle {
            output::detail(subtitle);
        }
        for tree in model.ring_trees(portfolio.presenter()) {
            output::info(&tree);
        }
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&model)
        .map_err(|e| InfraError::io("serialize chart model", io::Error::new(io::ErrorKind::InvalidData, e)))?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json).map_err(|e| InfraError::io("write chart model", e))?;
    Ok(())
}

fn config_cmd(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory on this platform"),
        },
    }
    Ok(())
}
