#![forbid(unsafe_code)]

mod actor;
mod cmd;
mod config;
mod output;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pragati_core::model::ProfileId;
use pragati_core::{EngineError, EntityStore as _};
use pragati_store::open_store;

use cmd::Ctx;
use config::CliConfig;
use output::OutputMode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pragati: role-scoped monitoring for public infrastructure projects",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Acting profile id (overrides PRAGATI_ACTOR and config).
    #[arg(long, global = true)]
    actor: Option<String>,

    /// Path to the store database (overrides PRAGATI_DB and config).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Setup",
        about = "Initialize the store database",
        after_help = "EXAMPLES:\n    # Create an empty store\n    pgt init\n\n    # Create and load the demo data set\n    pgt init --sample"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Read",
        about = "Role-specific dashboard",
        after_help = "EXAMPLES:\n    pgt dashboard --actor so-maharashtra\n    pgt dashboard --actor c-kumar --json"
    )]
    Dashboard,

    #[command(
        next_help_heading = "Read",
        about = "List visible projects",
        after_help = "EXAMPLES:\n    pgt projects --actor dc-mumbai\n    pgt projects --actor so-maharashtra --status delayed"
    )]
    Projects(cmd::projects::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one project with its history",
        after_help = "EXAMPLES:\n    pgt show p-road-1 --actor dc-mumbai"
    )]
    Show(cmd::projects::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "List projects open for contractor self-assignment"
    )]
    Available,

    #[command(
        next_help_heading = "Contractor",
        about = "Claim an unassigned ongoing project",
        after_help = "EXAMPLES:\n    pgt claim p-sports-1 --actor c-kumar"
    )]
    Claim(cmd::claim::ClaimArgs),

    #[command(
        next_help_heading = "Contractor",
        about = "Submit a fund-release request",
        after_help = "EXAMPLES:\n    pgt submit-fund p-road-1 --amount 250000 \\\n        --description \"Road base material\" --actor c-kumar"
    )]
    SubmitFund(cmd::submit::SubmitFundArgs),

    #[command(
        next_help_heading = "Contractor",
        about = "Record a progress image (progress, ar, 360)",
        after_help = "EXAMPLES:\n    pgt submit-image p-road-1 --kind 360 \\\n        --url https://blobs.example/site.jpg --actor c-kumar"
    )]
    SubmitImage(cmd::submit::SubmitImageArgs),

    #[command(
        next_help_heading = "Contractor",
        about = "Report completion percentage and status",
        after_help = "EXAMPLES:\n    pgt progress p-road-1 --completion 70 --actor c-kumar\n    pgt progress p-road-1 --completion 100 --status completed --actor c-kumar"
    )]
    Progress(cmd::submit::ProgressArgs),

    #[command(
        next_help_heading = "Review",
        about = "Approve a pending fund update",
        after_help = "EXAMPLES:\n    pgt approve <fund-update-id> --actor dc-mumbai"
    )]
    Approve(cmd::review::ApproveArgs),

    #[command(
        next_help_heading = "Review",
        about = "Reject a pending fund update"
    )]
    Reject(cmd::review::RejectArgs),

    #[command(
        next_help_heading = "Messages",
        about = "Send a message to the counterparty",
        after_help = "EXAMPLES:\n    # Contractor to their collector\n    pgt message \"Foundation work done\" --project p-road-1 --actor c-kumar\n\n    # Collector to a contractor\n    pgt message \"Inspection on Friday\" --contractor c-kumar --actor dc-mumbai"
    )]
    Message(cmd::message::MessageArgs),

    #[command(next_help_heading = "Messages", about = "List your messages")]
    Inbox,

    #[command(
        next_help_heading = "Messages",
        about = "Mark a message read (counterparty only)"
    )]
    Read(cmd::message::ReadArgs),

    #[command(next_help_heading = "Records", about = "List visible alerts")]
    Alerts(cmd::records::AlertsArgs),

    #[command(
        next_help_heading = "Records",
        about = "Resolve an active alert",
        after_help = "EXAMPLES:\n    pgt resolve-alert a-delay-1 --actor dc-pune"
    )]
    ResolveAlert(cmd::records::ResolveAlertArgs),

    #[command(next_help_heading = "Records", about = "List visible citizen feedback")]
    Feedback(cmd::records::FeedbackArgs),

    #[command(
        next_help_heading = "Records",
        about = "Advance feedback along pending -> in_progress -> resolved",
        after_help = "EXAMPLES:\n    pgt advance f-school-1 --to in_progress --actor dc-pune"
    )]
    Advance(cmd::records::AdvanceArgs),

    #[command(
        next_help_heading = "Read",
        about = "Allocated-vs-utilized fund rollup"
    )]
    Fundflow,

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    pgt completions bash > /etc/bash_completion.d/pgt"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_env("PRAGATI_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_db_path(flag: Option<PathBuf>, config: &CliConfig) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Some(path) = env::var_os("PRAGATI_DB") {
        return PathBuf::from(path);
    }
    config
        .db_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("pragati.sqlite3"))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let mode = cli.output_mode();

    if let Err(err) = run(cli, mode) {
        if let Some(engine) = err.downcast_ref::<EngineError>() {
            output::render_engine_error(mode, engine);
        } else {
            eprintln!("error: {err:#}");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, mode: OutputMode) -> Result<()> {
    let cwd = env::current_dir().context("determine working directory")?;
    let config = CliConfig::load(&cwd)?;
    let db_path = resolve_db_path(cli.db, &config);
    tracing::debug!(db = %db_path.display(), "store path resolved");

    match cli.command {
        Commands::Init(args) => cmd::init::run_init(&args, &db_path, mode),
        Commands::Completions(args) => cmd::completions::run_completions::<Cli>(&args),
        command => {
            let actor_id =
                actor::require_actor(cli.actor.as_deref(), config.default_actor.as_deref())?;
            let store = open_store(&db_path)?;
            let profile = store
                .profile(&ProfileId::new(actor_id))
                .map_err(EngineError::from)?;
            let mut ctx = Ctx {
                store,
                actor: profile,
                output: mode,
            };

            match command {
                Commands::Init(_) | Commands::Completions(_) => unreachable!("handled above"),
                Commands::Dashboard => cmd::dashboard::run_dashboard(&ctx),
                Commands::Projects(args) => cmd::projects::run_list(&ctx, &args),
                Commands::Show(args) => cmd::projects::run_show(&ctx, &args),
                Commands::Available => cmd::projects::run_available(&ctx),
                Commands::Claim(args) => cmd::claim::run_claim(&mut ctx, &args),
                Commands::SubmitFund(args) => cmd::submit::run_submit_fund(&mut ctx, &args),
                Commands::SubmitImage(args) => cmd::submit::run_submit_image(&mut ctx, &args),
                Commands::Progress(args) => cmd::submit::run_progress(&mut ctx, &args),
                Commands::Approve(args) => cmd::review::run_approve(&mut ctx, &args),
                Commands::Reject(args) => cmd::review::run_reject(&mut ctx, &args),
                Commands::Message(args) => cmd::message::run_message(&mut ctx, &args),
                Commands::Inbox => cmd::message::run_inbox(&ctx),
                Commands::Read(args) => cmd::message::run_read(&mut ctx, &args),
                Commands::Alerts(args) => cmd::records::run_alerts(&ctx, &args),
                Commands::ResolveAlert(args) => cmd::records::run_resolve_alert(&mut ctx, &args),
                Commands::Feedback(args) => cmd::records::run_feedback(&ctx, &args),
                Commands::Advance(args) => cmd::records::run_advance(&mut ctx, &args),
                Commands::Fundflow => cmd::fundflow::run_fundflow(&ctx),
            }
        }
    }
}
