//! CLI command definitions

use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser};
use delegate_domain::{MAX_AGENTS, MAX_ITERATIONS};
use std::path::PathBuf;

/// CLI arguments for gemini-delegate
#[derive(Parser, Debug)]
#[command(name = "gemini-delegate")]
#[command(
    author,
    version,
    about = "Gemini client with key rotation, task delegation and quality-gated revisions"
)]
#[command(long_about = r#"
gemini-delegate sends research topics and tasks to the Gemini API.

API keys are read from GEMINI_API_KEY_1, GEMINI_API_KEY_2, ... (a .env file
in the working directory is loaded first). Requests rotate through the keys
and failed attempts are retried on the next key with a longer timeout.

Actions (exactly one is required):
  --research TOPIC          Research a topic and save a report
  --delegate TASK           Split a task into one variant per agent, then
                            assess and revise each answer until it passes
  --orchestrate TASK N      Run N agents on the same task, one key each
  --improve NOTES FILE      Revise an existing report with your notes

Configuration files are loaded from (in priority order):
1. --config <path>                          Explicit config file
2. ./gemini-delegate.toml                   Project-level config
3. ~/.config/gemini-delegate/config.toml    Global config

Example:
  gemini-delegate --research "Renewable energy storage"
  gemini-delegate --delegate "Design a caching layer" --agents 3 --iterations 2
  gemini-delegate --orchestrate "Compare tokio and async-std" 4
  gemini-delegate --improve "Add benchmarks" outputs/AGENT2_caching_layer_TASK.md
"#)]
#[command(group(
    ArgGroup::new("action")
        .args(["research", "delegate", "orchestrate", "improve"])
        .multiple(false)
))]
pub struct Cli {
    /// Research a topic and save the answer as a report
    #[arg(long, value_name = "TOPIC")]
    pub research: Option<String>,

    /// Delegate a task to one or more agents
    #[arg(long, value_name = "TASK")]
    pub delegate: Option<String>,

    /// Number of agents for --delegate (1-8)
    #[arg(
        long,
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(1..=MAX_AGENTS as i64),
        requires = "delegate"
    )]
    pub agents: u8,

    /// Maximum assessment rounds per agent (1-10, defaults to config)
    #[arg(
        long,
        value_name = "M",
        value_parser = clap::value_parser!(u8).range(1..=MAX_ITERATIONS as i64)
    )]
    pub iterations: Option<u8>,

    /// Run N agents on the same task with automatic key assignment
    #[arg(long, num_args = 2, value_names = ["TASK", "N"])]
    pub orchestrate: Option<Vec<String>>,

    /// Revise an existing report file with improvement notes
    #[arg(long, num_args = 2, value_names = ["NOTES", "FILE"])]
    pub improve: Option<Vec<String>>,

    /// Use API key number N for every request instead of rotating
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(1..),
        conflicts_with_all = ["improve", "orchestrate"]
    )]
    pub key: Option<u16>,

    /// Model to use (overrides config)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output directory for reports (overrides config)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

/// The action selected on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Research {
        topic: String,
    },
    Delegate {
        task: String,
        agents: usize,
        iterations: Option<usize>,
    },
    Orchestrate {
        task: String,
        agents: usize,
        iterations: Option<usize>,
    },
    Improve {
        notes: String,
        file: PathBuf,
    },
}

impl Cli {
    /// Resolve the selected action.
    ///
    /// clap rejects conflicting actions on its own; this covers the missing
    /// action and the `N` operand of `--orchestrate`. The returned error
    /// exits with clap's usage status.
    pub fn action(&self) -> Result<Action, clap::Error> {
        let iterations = self.iterations.map(usize::from);

        if let Some(topic) = &self.research {
            return Ok(Action::Research {
                topic: topic.clone(),
            });
        }

        if let Some(task) = &self.delegate {
            return Ok(Action::Delegate {
                task: task.clone(),
                agents: usize::from(self.agents),
                iterations,
            });
        }

        if let Some([task, count]) = self.orchestrate.as_deref() {
            let agents = Self::parse_agent_count(count)?;
            return Ok(Action::Orchestrate {
                task: task.clone(),
                agents,
                iterations,
            });
        }

        if let Some([notes, file]) = self.improve.as_deref() {
            return Ok(Action::Improve {
                notes: notes.clone(),
                file: PathBuf::from(file),
            });
        }

        Err(Self::command().error(
            ErrorKind::MissingRequiredArgument,
            "one of --research, --delegate, --orchestrate or --improve is required",
        ))
    }

    fn parse_agent_count(raw: &str) -> Result<usize, clap::Error> {
        match raw.parse::<usize>() {
            Ok(n) if (1..=MAX_AGENTS).contains(&n) => Ok(n),
            _ => Err(Self::command().error(
                ErrorKind::ValueValidation,
                format!(
                    "invalid agent count '{}' for --orchestrate: expected 1-{}",
                    raw, MAX_AGENTS
                ),
            )),
        }
    }
}
