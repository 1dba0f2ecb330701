//! CLI - Command Line Interface
//!
//! Available Commands:
//! - scorecard scan          - Run a security scan and store its tasks
//! - scorecard score         - Score signals without storing anything
//! - scorecard latest        - Show the most recent scan
//! - scorecard history       - List past scans
//! - scorecard todos ...     - List and update security tasks
//! - scorecard breach-check  - Look an email up in known breaches
//! - scorecard analyze       - Password strength breakdown
//! - scorecard twofa         - 2FA coverage report

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use scorecard_core::config::{ProviderKind, StorageType};
use scorecard_core::{
    NewTodo, Priority, ScorecardConfig, SignalSet, TaskCategory, TodoId, UserKey,
};
use scorecard_decision::analysis::analyze_password;
use scorecard_runtime::{Executor, ScanContext, ScanError};

use crate::render;

/// CLI Errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Executor initialization failed: {0}")]
    ExecutorInitFailed(String),

    #[error("Scan failed: {0}")]
    ScanFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Output error: {0}")]
    OutputError(String),
}

/// CLI Configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Configuration file
    pub config_path: Option<PathBuf>,

    /// JSON storage directory; switches storage to JSON files
    pub storage_path: Option<PathBuf>,

    /// User key; falls back to the configured default user
    pub user: Option<String>,

    /// Verbose output
    pub verbose: bool,

    /// Output format
    pub output_format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            storage_path: None,
            user: None,
            verbose: false,
            output_format: OutputFormat::Pretty,
        }
    }
}

impl CliConfig {
    /// Resolve the scorecard configuration: file, then environment, then flags
    pub fn resolve(&self) -> Result<ScorecardConfig, CliError> {
        let mut config = ScorecardConfig::discover(self.config_path.as_deref())
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        if let Some(path) = &self.storage_path {
            config.storage.storage_type = StorageType::Json;
            config.storage.db_path = path.clone();
        }
        if let Some(user) = &self.user {
            config.default_user = user.clone();
        }

        config
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Minimal,
}

/// Security scorecard CLI
#[derive(Parser, Debug)]
#[command(name = "scorecard")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Store scans and tasks as JSON files under this directory
    #[arg(short, long, global = true)]
    pub storage: Option<PathBuf>,

    /// User key
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Run a security scan, store the result and its tasks
    Scan(ScanArgs),

    /// Score signals without storing anything
    Score(ScoreArgs),

    /// Show the most recent scan
    Latest,

    /// List past scans, newest first
    History,

    /// Manage security tasks
    Todos {
        #[command(subcommand)]
        command: TodoCommands,
    },

    /// Check an email address against known breaches
    BreachCheck(BreachCheckArgs),

    /// Password strength breakdown
    Analyze(AnalyzeArgs),

    /// 2FA coverage report
    Twofa(TwoFaArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ScanArgs {
    /// Password strength score (0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub password_score: Option<i32>,

    /// Number of known breaches
    #[arg(long, allow_negative_numbers = true)]
    pub breach_count: Option<i32>,

    /// Whether 2FA is enabled
    #[arg(long, action = clap::ArgAction::Set)]
    pub two_fa: Option<bool>,

    /// Seed for simulated signals
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ScanArgs {
    /// Signals given on the command line; all three or none
    pub fn signals(&self) -> Result<Option<SignalSet>, CliError> {
        match (self.password_score, self.breach_count, self.two_fa) {
            (Some(p), Some(b), Some(t)) => Ok(Some(SignalSet::new(p, b, t))),
            (None, None, None) => Ok(None),
            _ => Err(CliError::InvalidArgument(
                "--password-score, --breach-count and --two-fa must be given together".into(),
            )),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Password strength score (0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub password_score: i32,

    /// Number of known breaches
    #[arg(long, allow_negative_numbers = true)]
    pub breach_count: i32,

    /// Whether 2FA is enabled
    #[arg(long, action = clap::ArgAction::Set)]
    pub two_fa: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum TodoCommands {
    /// List tasks, most urgent first
    List,

    /// Add a task by hand
    Add(TodoAddArgs),

    /// Mark a task completed
    Done { id: TodoId },

    /// Mark a task not completed
    Undo { id: TodoId },

    /// Flip a task's completion
    Toggle { id: TodoId },
}

#[derive(Args, Debug)]
pub(crate) struct TodoAddArgs {
    /// Task title
    pub title: String,

    /// Task description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Priority (low, medium, high)
    #[arg(short, long, default_value = "medium")]
    pub priority: Priority,

    /// Category (password, 2fa, breach, general)
    #[arg(long, default_value = "general")]
    pub category: TaskCategory,
}

#[derive(Args, Debug)]
pub(crate) struct BreachCheckArgs {
    /// Email address
    pub email: String,
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Password strength score; defaults to the latest scan's
    #[arg(long, allow_negative_numbers = true)]
    pub password_score: Option<i32>,
}

#[derive(Args, Debug)]
pub(crate) struct TwoFaArgs {
    /// Whether 2FA is enabled; defaults to the latest scan's signal
    #[arg(long, action = clap::ArgAction::Set)]
    pub enabled: Option<bool>,

    /// Number of services already protected; defaults to the 2FA audit
    #[arg(long)]
    pub services: Option<usize>,
}

/// Parse CLI arguments and execute commands
pub async fn run_cli() -> Result<(), CliError> {
    run(Cli::parse()).await
}

pub(crate) async fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig {
        config_path: cli.config,
        storage_path: cli.storage,
        user: cli.user,
        verbose: cli.verbose,
        output_format: cli.output.unwrap_or(OutputFormat::Pretty),
    };

    if config.verbose {
        init_tracing();
    }

    let mut settings = config.resolve()?;
    let user = UserKey::new(settings.default_user.clone());
    debug!(%user, storage = ?settings.storage.storage_type, "Resolved configuration");

    if let Commands::Scan(args) = &cli.command {
        apply_scan_args(&mut settings, args)?;
    }

    let context = ScanContext::from_config(&settings)
        .await
        .map_err(|e| CliError::ExecutorInitFailed(e.to_string()))?;
    let executor = Executor::new(context);
    let format = config.output_format;

    let output = match cli.command {
        Commands::Scan(_) => cmd_scan(&executor, &user, format).await?,
        Commands::Score(args) => cmd_score(&executor, args, format)?,
        Commands::Latest => {
            let scan = executor.latest_scan(&user).await.map_err(scan_failed)?;
            render::render_scan(scan.as_ref(), format)?
        }
        Commands::History => {
            let scans = executor.scan_history(&user).await.map_err(scan_failed)?;
            render::render_history(&scans, format)?
        }
        Commands::Todos { command } => cmd_todos(&executor, &user, command, format).await?,
        Commands::BreachCheck(args) => {
            let report = executor.breach_check(&args.email).await.map_err(scan_failed)?;
            render::render_breach_report(&report, format)?
        }
        Commands::Analyze(args) => cmd_analyze(&executor, &user, args, format).await?,
        Commands::Twofa(args) => cmd_twofa(&executor, &user, args, format).await?,
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn scan_failed(e: impl std::fmt::Display) -> CliError {
    CliError::ScanFailed(e.to_string())
}

/// Point the provider at command-line signals or seed
pub(crate) fn apply_scan_args(
    settings: &mut ScorecardConfig,
    args: &ScanArgs,
) -> Result<(), CliError> {
    if let Some(signals) = args.signals()? {
        signals
            .validate()
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
        settings.provider.kind = ProviderKind::Fixed;
        settings.provider.fixed = Some(signals);
    }
    if let Some(seed) = args.seed {
        settings.provider.seed = Some(seed);
    }
    Ok(())
}

async fn cmd_scan(
    executor: &Executor,
    user: &UserKey,
    format: OutputFormat,
) -> Result<String, CliError> {
    let report = executor.run_scan(user).await.map_err(scan_failed)?;
    info!(scan_id = %report.scan.id, "Scan stored");
    render::render_scan_report(&report, format)
}

fn cmd_score(
    executor: &Executor,
    args: ScoreArgs,
    format: OutputFormat,
) -> Result<String, CliError> {
    let signals = SignalSet::new(args.password_score, args.breach_count, args.two_fa);
    let assessment = executor
        .evaluate(&signals)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    render::render_assessment(&assessment, format)
}

async fn cmd_todos(
    executor: &Executor,
    user: &UserKey,
    command: TodoCommands,
    format: OutputFormat,
) -> Result<String, CliError> {
    let todo = match command {
        TodoCommands::List => {
            let todos = executor.list_todos(user).await.map_err(scan_failed)?;
            return render::render_todos(&todos, format);
        }
        TodoCommands::Add(args) => {
            let new = NewTodo::new(user.clone(), args.title)
                .with_description(args.description)
                .with_priority(args.priority)
                .with_category(args.category);
            executor.add_todo(new).await
        }
        TodoCommands::Done { id } => executor.set_todo_completed(&id, true).await,
        TodoCommands::Undo { id } => executor.set_todo_completed(&id, false).await,
        TodoCommands::Toggle { id } => executor.toggle_todo(&id).await,
    }
    .map_err(scan_failed)?;

    render::render_todo(&todo, format)
}

async fn cmd_analyze(
    executor: &Executor,
    user: &UserKey,
    args: AnalyzeArgs,
    format: OutputFormat,
) -> Result<String, CliError> {
    let score = match args.password_score {
        Some(score) => score,
        None => executor
            .latest_scan(user)
            .await
            .map_err(scan_failed)?
            .map(|scan| scan.signals.password_score)
            .ok_or_else(|| {
                CliError::InvalidArgument(
                    "no scans yet; pass --password-score or run `scorecard scan`".into(),
                )
            })?,
    };

    let analysis = analyze_password(score).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    render::render_password_analysis(&analysis, format)
}

async fn cmd_twofa(
    executor: &Executor,
    user: &UserKey,
    args: TwoFaArgs,
    format: OutputFormat,
) -> Result<String, CliError> {
    let coverage = executor
        .two_fa_coverage(user, args.enabled, args.services)
        .await
        .map_err(|e| match e {
            ScanError::InvalidRequest(msg) => CliError::InvalidArgument(msg),
            other => scan_failed(other),
        })?;

    render::render_two_fa(&coverage, format)
}
