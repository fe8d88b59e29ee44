use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use keywarp::cli::{CliArgs, StartupConfig, StartupMode};
use keywarp::config::Config;
use keywarp::keymap::Action;
use keywarp::mode::Controller;
use keywarp::platform::{replay, HeadlessPlatform, Step};
use keywarp::session::Session;

fn main() -> Result<()> {
    let startup = CliArgs::parse()
        .into_config()
        .map_err(|e| anyhow::anyhow!(e))?;

    keywarp::tracing::init();

    let config = Config::load(startup.config_path.as_deref()).context("Failed to load config")?;

    let status = match &startup.mode {
        StartupMode::ListKeys => {
            list_keys(&config)?;
            0
        }
        StartupMode::DumpConfig => {
            print!("{}", config.to_yaml()?);
            0
        }
        StartupMode::Daemon | StartupMode::Foreground(_) => run(&startup, config)?,
    };

    if status != 0 {
        std::process::exit(status);
    }
    Ok(())
}

fn run(startup: &StartupConfig, config: Config) -> Result<i32> {
    let steps = load_input(startup.replay.as_deref())?;
    let mut platform = HeadlessPlatform::new(startup.screens.clone()).with_file_watching();
    platform.extend(steps);

    let session = Session::new(config)?
        .with_history_path(keywarp::config_paths::history_file())
        .with_oneshot(startup.oneshot);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut controller = Controller::new(&mut platform, session, &mut out)
        .with_config_path(startup.config_path.clone());

    match &startup.mode {
        StartupMode::Foreground(mode) => controller.run_oneshot(mode.clone()),
        _ => {
            tracing::info!(
                "keywarp {} started (config: {})",
                env!("CARGO_PKG_VERSION"),
                controller
                    .config_path()
                    .map_or_else(|| "default".to_string(), |p| p.display().to_string())
            );
            controller.run_daemon()?;
            Ok(0)
        }
    }
}

/// Replay steps from a file, or from stdin when none is given
fn load_input(path: Option<&Path>) -> Result<Vec<Step>> {
    match path {
        Some(path) => Ok(replay::load_script(path)?),
        None => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("Failed to read input script from stdin")?;
            Ok(replay::parse_script(&script)?)
        }
    }
}

fn list_keys(config: &Config) -> Result<()> {
    let keymap = config.keymap()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for action in Action::ALL {
        if let Some(binding) = keymap.binding(*action) {
            writeln!(out, "{:<24} {}", action.name(), binding.display_string())?;
        }
    }
    Ok(())
}
