// Entry point and high-level CLI flow.
//
// Configuration is resolved first (file, then flags), the inspection table is
// loaded once, narrowed by the kommune filter, and handed to either a single
// view subcommand or the interactive menu.
use bridge_report::cli::{Cli, Commands};
use bridge_report::commands;
use bridge_report::config::{load_config, ReportConfig};
use bridge_report::session::Session;
use bridge_report::views::{self, BridgeSelection};
use bridge_report::{load_inspections, Result};
use clap::Parser;
use std::io;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Config file values, overridden by whatever was given on the command line.
fn resolve_config(cli: &Cli) -> Result<ReportConfig> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(policy) = cli.score_policy {
        config.score_policy = policy;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let (table, load_report) = load_inspections(&config.input, &config.date_formats)?;
    commands::print_load_report(&load_report);

    let export = cli.export.as_deref();
    let command = cli.command.unwrap_or(Commands::Interactive);
    if command == Commands::Interactive {
        let stdin = io::stdin();
        let mut session = Session::new(table, cli.regions, config, stdin.lock());
        return session.run();
    }

    let filtered = views::filter_regions(&table, &cli.regions);
    if !cli.regions.is_empty() {
        log::info!(
            "Kommune filter {:?} keeps {} of {} inspections",
            cli.regions,
            filtered.len(),
            table.len()
        );
    }

    match command {
        Commands::Summary => commands::show_summary(&filtered, &config, export),
        Commands::Regions => {
            // Listed from the full table so the filter values can be discovered.
            commands::show_list("Kommuner", &views::regions(&table));
            Ok(())
        }
        Commands::Bridges => {
            commands::show_list("Bridges", &views::bridges(&filtered));
            Ok(())
        }
        Commands::Raw => commands::show_raw(&filtered, &config, export),
        Commands::Worst { top } => {
            commands::show_worst(&filtered, top.unwrap_or(config.top_n), &config, export)
        }
        Commands::Trend { bridge, element } => {
            commands::show_trend(&filtered, &bridge, element, &config, export)
        }
        Commands::Intervals { element, bridge } => commands::show_intervals(
            &filtered,
            element,
            &BridgeSelection::from_option(bridge),
            &config,
            export,
        ),
        Commands::Outliers {
            element,
            from,
            to,
            threshold,
        } => commands::show_outliers(
            &filtered,
            element,
            from,
            to,
            threshold.unwrap_or(config.outlier_threshold),
            &config,
            export,
        ),
        Commands::Interactive => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
