//! # Context Wiring and Dispatch
//!
//! Every invocation:
//!
//! 1. Parses arguments and installs the `tracing` subscriber (stderr).
//! 2. Loads [`CountdownConfig`] and resolves the data file, with
//!    `--data-file` taking priority.
//! 3. Opens the store and runs `init` (a no-op once the file exists).
//! 4. Dispatches the subcommand and prints its rendered result.
//!
//! `config` skips step 3, so inspecting settings never creates a data file.

use super::render::{render_arrival, render_full, render_list, render_messages};
use super::setup::{Cli, Commands, DisplayArgs, TargetArgs};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use console::Term;
use countdownapp::api::CountdownApi;
use countdownapp::clock::DisplayState;
use countdownapp::commands::CmdResult;
use countdownapp::config::{self, CountdownConfig};
use countdownapp::model::{CountdownFields, CountdownPatch};
use countdownapp::store::{FileStore, FsBackend};
use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Api = CountdownApi<FsBackend>;

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CountdownConfig::load().context("loading configuration")?;
    let data_file = match &cli.data_file {
        Some(path) => path.clone(),
        None => config.data_file()?,
    };
    debug!(data_file = %data_file.display(), seed = config.seed, "resolved configuration");

    let use_color = std::io::stdout().is_terminal();
    let api = CountdownApi::new(FileStore::open(&data_file).with_seed(config.seed));
    let command = cli.command.unwrap_or(Commands::List);
    let init = match command {
        Commands::Config { .. } => CmdResult::default(),
        _ => api.init().await?,
    };

    match command {
        Commands::Config { template } => handle_config(&config, &data_file, template),
        Commands::Init => print_result(&init, use_color),
        Commands::List => {
            let result = api.list(Utc::now()).await?;
            print!("{}", render_list(&result.listed, use_color));
            print_result(&result, use_color);
        }
        Commands::Show { id } => {
            let result = api.show(&id, Utc::now()).await?;
            for shown in &result.listed {
                print!("{}", render_full(shown, use_color));
            }
        }
        Commands::Add {
            title,
            target,
            display,
        } => {
            let fields = add_fields(title, &target, display)?;
            print_result(&api.add(fields).await?, use_color);
        }
        Commands::Edit {
            id,
            title,
            target,
            display,
        } => {
            let patch = CountdownPatch {
                title,
                description: display.description,
                target: target.resolve()?,
                emoji: display.emoji,
                color: display.color,
            };
            print_result(&api.edit(&id, patch).await?, use_color);
        }
        Commands::Delete { id } => print_result(&api.delete(&id).await?, use_color),
        Commands::Export => {
            let result = api.export().await?;
            if let Some(document) = result.document {
                println!("{}", document);
            }
        }
        Commands::Watch { ticks } => watch(&api, ticks, use_color).await?,
    }
    Ok(())
}

/// `RUST_LOG` decides what is logged, `warn` if unset; `--verbose` forces `debug`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Logs share the terminal with rendered output, so they go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn add_fields(title: String, target: &TargetArgs, display: DisplayArgs) -> Result<CountdownFields> {
    let Some(at) = target.resolve()? else {
        bail!("a target is required: pass --date YYYY-MM-DD [--time HH:MM] or --at <RFC3339>");
    };
    Ok(CountdownFields::new(title, at)
        .with_description(display.description.unwrap_or_default())
        .with_emoji(display.emoji.unwrap_or_default())
        .with_color(display.color.unwrap_or_default()))
}

fn print_result(result: &CmdResult, use_color: bool) {
    print!("{}", render_messages(&result.messages, use_color));
}

fn handle_config(config: &CountdownConfig, data_file: &Path, template: bool) {
    if template {
        print!("{}", config::template());
        return;
    }
    let config_file = config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    println!("config_file = {}", config_file);
    println!("data_file = {}", data_file.display());
    println!("seed = {}", config.seed);
}

/// Re-list and re-render once per second. Each countdown that flips to
/// arrived while watching gets exactly one arrival line.
async fn watch(api: &Api, ticks: Option<u64>, use_color: bool) -> Result<()> {
    let term = Term::stdout();
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut previous: HashMap<String, DisplayState> = HashMap::new();
    let mut arrivals: Vec<String> = Vec::new();
    let mut count = 0u64;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }

        let result = api.list(Utc::now()).await?;
        let mut fresh = Vec::new();
        for shown in &result.listed {
            let arrived = previous
                .get(&shown.record.id)
                .is_some_and(|before| shown.state.arrived_since(before));
            if arrived {
                fresh.push(render_arrival(shown, use_color));
            }
        }
        previous = result
            .listed
            .iter()
            .map(|shown| (shown.record.id.clone(), shown.state))
            .collect();

        if use_color {
            // Interactive: redraw in place, keeping past arrivals under the table.
            arrivals.extend(fresh);
            term.clear_screen()?;
            print!("{}", render_list(&result.listed, use_color));
            print!("{}", render_messages(&result.messages, use_color));
            if !arrivals.is_empty() {
                println!();
                print!("{}", arrivals.concat());
            }
        } else {
            print!("{}", render_list(&result.listed, use_color));
            print!("{}", render_messages(&result.messages, use_color));
            print!("{}", fresh.concat());
            println!();
        }

        count += 1;
        if ticks.is_some_and(|limit| count >= limit) {
            break;
        }
    }
    Ok(())
}
