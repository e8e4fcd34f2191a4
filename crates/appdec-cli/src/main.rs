//! appdec - Component scaffolding for app-decorators

mod logging;

use anyhow::Result;
use appdec_core::{install, remove, InstallRequest, OsFs, ProductConfig};
use clap::{Parser, Subcommand};
use std::path::Path;

/// CLI version, also the app-decorators version new components are pinned to
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// appdec product configuration
#[derive(Clone)]
pub struct AppdecConfig;

impl ProductConfig for AppdecConfig {
    fn name(&self) -> &'static str {
        "appdec"
    }

    fn display_name(&self) -> &'static str {
        "appdec"
    }

    fn version(&self) -> &'static str {
        CLI_VERSION
    }

    fn primary_package(&self) -> &'static str {
        "app-decorators"
    }

    fn auxiliary_package(&self) -> &'static str {
        "babel-cli"
    }

    fn auxiliary_version(&self) -> &'static str {
        "6.24.1"
    }
}

#[derive(Parser, Debug)]
#[command(name = "appdec")]
#[command(about = "command line tool")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create new component
    #[command(visible_alias = "c")]
    Create(CreateArgs),
    /// Delete existing component
    #[command(visible_alias = "d")]
    Delete(DeleteArgs),
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Name of the component
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Print package manager commands instead of running them. Nothing gets
    /// installed, so the run stops with a cleanup error after the dry run
    #[arg(long)]
    pub debug: bool,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Name of the component
    #[arg(short, long, default_value = "")]
    pub name: String,
}

async fn create(config: &AppdecConfig, root: &Path, args: CreateArgs) -> Result<()> {
    let request = InstallRequest::new(
        args.name.to_lowercase(),
        root,
        config.version(),
        config.name(),
        args.debug,
    );

    let report = install::run(config, &request).await?;

    cliclack::log::success(format!(
        "Created {} with {} core files",
        report.app_path.display(),
        report.core_files.len()
    ))?;
    Ok(())
}

fn delete(config: &AppdecConfig, root: &Path, args: DeleteArgs) -> Result<()> {
    let name = args.name.to_lowercase();
    let removed = remove::delete(&OsFs, root, &name, config.reserved_names())?;

    cliclack::log::success(format!("Deleted {}", removed.display()))?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let debug = matches!(&args.command, Command::Create(create) if create.debug);
    logging::init(debug);

    let config = AppdecConfig;
    let _ = cliclack::intro(config.display_name());

    let result = match std::env::current_dir() {
        Ok(root) => match args.command {
            Command::Create(create_args) => create(&config, &root, create_args).await,
            Command::Delete(delete_args) => delete(&config, &root, delete_args),
        },
        Err(e) => Err(anyhow::Error::new(e).context("Failed while getting root path")),
    };

    if let Err(e) = result {
        let _ = cliclack::log::error(format!("{:#}", e));
        let _ = cliclack::outro_cancel("Failed");
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(1);
    }

    let _ = cliclack::outro("Done");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_create_with_debug() {
        let args = Args::try_parse_from(["appdec", "create", "--name=Collapsible", "--debug"])
            .unwrap();
        match args.command {
            Command::Create(create) => {
                assert_eq!(create.name, "Collapsible");
                assert!(create.debug);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_debug_help_mentions_early_stop() {
        let mut cmd = Args::command();
        let help = cmd
            .find_subcommand_mut("create")
            .unwrap()
            .render_long_help()
            .to_string();
        assert!(help.contains("stops with a cleanup error"));
    }

    #[test]
    fn test_parse_delete_alias() {
        let args = Args::try_parse_from(["appdec", "d", "--name", "collapsible"]).unwrap();
        assert!(matches!(args.command, Command::Delete(d) if d.name == "collapsible"));
    }

    #[test]
    fn test_missing_name_reaches_core_validation() {
        let args = Args::try_parse_from(["appdec", "create"]).unwrap();
        match args.command {
            Command::Create(create) => assert!(create.name.is_empty()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_install_commands_pin_cli_version() {
        let commands = AppdecConfig.install_commands(AppdecConfig.version());
        assert_eq!(commands[1], format!("npm install app-decorators@{}", CLI_VERSION));
        assert_eq!(commands[2], "npm install babel-cli@6.24.1");
    }
}
