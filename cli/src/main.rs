//! CLI entrypoint for gemini-delegate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use delegate_application::{
    CredentialRotator, DelegateTaskInput, DelegateTaskUseCase, ImproveReportUseCase,
    NoProgress, ProgressNotifier, RequestExecutor, RunResearchUseCase,
};
use delegate_domain::{CredentialAssignment, CredentialNumber, DelegationResult, Task};
use delegate_infrastructure::{
    ConfigLoader, EnvFileRotationStore, FileConfig, FsReportStore, GeminiGateway,
    load_credentials,
};
use delegate_presentation::{Action, Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Keys and the rotation cursor live in .env
    let dotenv = dotenvy::dotenv();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env loaded: {}", e),
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::format_error(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    // CLI flags take precedence over every config layer
    if let Some(model) = &cli.model {
        config.api.model = model.clone();
    }
    if let Some(dir) = &cli.output {
        config.output.dir = dir.clone();
    }

    if cli.show_config {
        show_config(&cli, &config)?;
        return Ok(());
    }

    let action = cli.action().unwrap_or_else(|e| e.exit());

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting gemini-delegate");

    // === Dependency Injection ===
    let pool = load_credentials(&config.api.key_prefix).with_context(|| {
        format!(
            "No API keys found. Set {}1, {}2, ... in the environment or .env",
            config.api.key_prefix, config.api.key_prefix
        )
    })?;
    info!("Loaded {} API key(s)", pool.len());

    let override_number = cli
        .key
        .map(|n| CredentialNumber::new(usize::from(n)))
        .transpose()?;

    let store = Arc::new(EnvFileRotationStore::new(
        config.rotation.state_file.clone(),
        config.rotation.cursor_key.clone(),
    ));
    let rotator = Arc::new(CredentialRotator::new(pool, store).with_override(override_number));
    let gateway = Arc::new(GeminiGateway::new(config.api.base_url.clone()));
    let params = config.execution_params();
    let executor = Arc::new(
        RequestExecutor::new(gateway, rotator, params.model.clone())
            .with_policy(config.retry.to_policy()),
    );
    let reports = Arc::new(FsReportStore::new());

    // Plain lines when logs are on so they don't fight the spinner
    let progress: Box<dyn ProgressNotifier> = if cli.quiet || cli.json {
        Box::new(NoProgress)
    } else if cli.verbose > 0 {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    match action {
        Action::Research { topic } => {
            let use_case = RunResearchUseCase::new(executor, reports, params);
            let output = use_case
                .execute(&Task::try_new(topic)?, progress.as_ref())
                .await
                .context("Research failed")?;

            if cli.json {
                println!("{}", ConsoleFormatter::format_json(&output));
            } else {
                print!("{}", ConsoleFormatter::format_research(&output, cli.verbose > 0));
            }
        }
        Action::Improve { notes, file } => {
            let use_case = ImproveReportUseCase::new(executor, reports);
            let output = use_case
                .execute(&notes, &file, progress.as_ref())
                .await
                .context("Improvement failed")?;

            if cli.json {
                println!("{}", ConsoleFormatter::format_json(&output));
            } else {
                print!("{}", ConsoleFormatter::format_improve(&output, cli.verbose > 0));
            }
        }
        Action::Delegate {
            task,
            agents,
            iterations,
        } => {
            let max_iterations = iterations.unwrap_or(params.max_iterations);
            let assignment = match override_number {
                Some(number) => CredentialAssignment::Fixed(number),
                None => CredentialAssignment::Auto,
            };
            let input = DelegateTaskInput::new(Task::try_new(task)?, agents, max_iterations)
                .with_assignment(assignment);

            let use_case = DelegateTaskUseCase::new(executor, reports, params);
            let result = use_case.delegate(input, progress.as_ref()).await?;
            print_delegation(&cli, &result);
        }
        Action::Orchestrate {
            task,
            agents,
            iterations,
        } => {
            let max_iterations = iterations.unwrap_or(params.max_iterations);
            let use_case = DelegateTaskUseCase::new(executor, reports, params);
            let result = use_case
                .orchestrate(&Task::try_new(task)?, agents, max_iterations, progress.as_ref())
                .await?;
            print_delegation(&cli, &result);
        }
    }

    Ok(())
}

/// Agent failures are reported but never change the exit status
fn print_delegation(cli: &Cli, result: &DelegationResult) {
    if cli.json {
        println!("{}", ConsoleFormatter::format_json(result));
    } else {
        print!("{}", ConsoleFormatter::format_delegation(result, cli.verbose > 0));
    }
}

fn show_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    if cli.no_config {
        println!("Configuration files disabled (--no-config)");
    } else {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
    }

    println!();
    println!("Effective configuration:");
    println!(
        "{}",
        toml::to_string_pretty(config).context("Failed to render configuration")?
    );
    Ok(())
}
