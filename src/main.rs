//! API smoke tester
//!
//! A CLI tool that checks a backend's contact and status-check endpoints,
//! asserts status codes and reports pass/fail.
//!
//! ## Scenarios
//!
//! 1. `GET /api/` (gating: a failure stops the run)
//! 2. `POST /api/contact`
//! 3. `GET /api/contact`
//! 4. `POST /api/status`
//! 5. `GET /api/status`
//!
//! ## Usage
//!
//! ```bash
//! # Run against the default backend (http://localhost:8001)
//! api-smoke run
//!
//! # Run against another host with JSON output
//! api-smoke run --base-url http://10.0.0.5:8001 --format json
//!
//! # List scenarios
//! api-smoke list --detailed
//! ```
//!
//! The process exits with 0 when every attempted check passed, 1 otherwise.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod utils;

use cli::Args;
use config::{AppConfig, ConfigFile, EnvConfig};
use executor::ApiTester;
use output::{OutputFormat, ResultFormatter};
use utils::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let verbose = args.verbose || env.verbose.unwrap_or(false);
    init_logger(LogLevel::from_flags(verbose, args.quiet));

    match args.command {
        cli::Command::Run(run_args) => {
            let config = load_config(args.config.as_deref(), &env, &run_args)?;
            run(config).await
        }
        cli::Command::List(list_args) => {
            println!("{}", output::format_scenarios(list_args.detailed));
            Ok(ExitCode::SUCCESS)
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args, args.config.as_deref(), &env)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Layer defaults, config file, environment and command-line flags
fn load_config(
    explicit_file: Option<&str>,
    env: &EnvConfig,
    run_args: &cli::RunArgs,
) -> Result<AppConfig> {
    let file = explicit_file.or(env.config_file.as_deref());
    let mut config = ConfigFile::resolve(file)?.app;

    config.apply_env(env);

    if let Some(base_url) = &run_args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = run_args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(format) = &run_args.format {
        config.format = format.clone();
    }
    if run_args.no_color {
        config.color = false;
    }

    config.validate()?;
    Ok(config)
}

async fn run(config: AppConfig) -> Result<ExitCode> {
    let format = OutputFormat::from_str(&config.format)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {}", config.format))?;

    info!(
        "Testing API at {} (timeout {}s)",
        config.api_url(),
        config.timeout_secs
    );

    let tester = ApiTester::new(&config)?;
    let summary = tester.run_all().await;
    info!(
        "Finished: {} passed, {} failed",
        summary.tests_passed,
        summary.failed()
    );

    let mut formatter = ResultFormatter::new(format);
    if !config.color {
        formatter = formatter.no_color();
    }
    println!("{}", formatter.format_summary(&summary));

    Ok(ExitCode::from(summary.exit_code()))
}

fn manage_config(
    args: cli::ConfigArgs,
    explicit_file: Option<&str>,
    env: &EnvConfig,
) -> Result<()> {
    match args.action {
        cli::ConfigAction::Init { output, force } => {
            let path = Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {output}. Use --force to overwrite."
                );
            }

            ConfigFile::default().save(path)?;
            println!("✓ Configuration file created: {output}");
        }

        cli::ConfigAction::Show { env: show_env, format } => {
            if show_env {
                env.print_summary();
                if !env.has_any() {
                    println!();
                    config::print_env_help();
                }
            } else {
                let mut file = ConfigFile::resolve(explicit_file.or(env.config_file.as_deref()))?;
                file.app.apply_env(env);
                let output = if format == "json" {
                    serde_json::to_string_pretty(&file)?
                } else {
                    serde_yaml::to_string(&file)?
                };
                println!("{output}");
            }
        }

        cli::ConfigAction::Validate { file } => {
            let path = file
                .or_else(|| explicit_file.map(str::to_string))
                .or_else(|| ConfigFile::find().map(|p| p.to_string_lossy().to_string()))
                .unwrap_or_else(|| "./api-smoke.yaml".to_string());

            match ConfigFile::load(&path) {
                Ok(_) => {
                    println!("✓ Configuration file is valid: {path}");
                }
                Err(e) => {
                    println!("✗ Configuration file is invalid: {path}");
                    println!("  Error: {e:#}");
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
