use anyhow::Context;
use clap::Parser;
use roster_admin::adapters::snapshot::{load_roster, save_roster};
use roster_admin::app::commands::{default_report_name, run_command, CommandOutput};
use roster_admin::core::{ConfigProvider, Storage};
use roster_admin::utils::{logger, validation::Validate};
use roster_admin::{CliConfig, LocalStorage, RosterAdmin, RosterConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Load configuration; a missing file means defaults
    let mut config = match RosterConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            std::process::exit(e.exit_code());
        }
    };
    // CLI flags take precedence over the config file
    if let Some(data_dir) = &cli.data_dir {
        config.store.data_dir = data_dir.clone();
    }

    // Initialize logging
    if config.json_logging() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }
    tracing::debug!("CLI config: {:?}", cli);

    // Validate configuration
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    // Load the roster snapshot; no file yet is an empty roster
    let storage = LocalStorage::new(config.data_dir().to_string());
    let roster = load_roster(&storage, config.store_file())
        .await
        .with_context(|| format!("loading roster from {}", config.data_dir()))?;

    // Run the subcommand against the in-memory roster
    let mutates = cli.mutates();
    let output = match run_command(&RosterAdmin::new(&roster), cli.command) {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    // Persist only when the command wrote something
    if mutates {
        save_roster(&storage, config.store_file(), &roster)
            .await
            .context("saving roster")?;
    }

    // Print messages; reports go to stdout, the given file, or export_dir
    match output {
        CommandOutput::Message(text) => println!("{}", text),
        CommandOutput::Report { csv, output, .. } if output.as_deref() == Some("-") => {
            print!("{}", csv);
        }
        CommandOutput::Report { kind, csv, output } => {
            let path = match output {
                Some(path) => {
                    tokio::fs::write(&path, csv.as_bytes())
                        .await
                        .with_context(|| format!("writing {}", path))?;
                    path
                }
                None => {
                    let exports = LocalStorage::new(config.export_dir().to_string());
                    let name = default_report_name(kind, chrono::Utc::now());
                    exports.write_file(&name, csv.as_bytes()).await?;
                    exports.full_path(&name).display().to_string()
                }
            };
            tracing::info!("Report written to {}", path);
            println!("📁 Report saved to: {}", path);
        }
    }

    Ok(())
}
