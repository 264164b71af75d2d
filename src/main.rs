mod commands;

use clap::{Parser, CommandFactory};
use colored::Colorize;
use wbi::options;

fn main() -> anyhow::Result<()> {
    let cli = options::Cli::parse();

    options::verbose::set_verbose(cli.verbose);

    if cli.verbose && cli.version {
        println!("Verbose mode: {}", "enabled".green());
        options::version::show();
        return Ok(());
    }

    if cli.version {
        options::version::show();
        return Ok(());
    }

    match cli.command {
        Some(options::Commands::Versions { component, os }) => {
            commands::versions::execute(component, os)?;
        }
        Some(options::Commands::Url { component, version, os }) => {
            commands::url::execute(component, &version, os)?;
        }
        Some(options::Commands::Download { component, version, os, dest }) => {
            commands::download::execute(component, &version, os, dest)?;
        }
        Some(options::Commands::Detect) => {
            commands::detect::execute()?;
        }
        Some(options::Commands::RepoUrl { server, repo, os }) => {
            commands::repo_url::execute(server, repo, os)?;
        }
        Some(options::Commands::Config { action }) => {
            commands::config::execute(action)?;
        }
        None => {
            let mut cmd = options::Cli::command();
            cmd.print_help()?;
            println!();
        }
    }

    Ok(())
}
