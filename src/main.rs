use anyhow::Context;
use clap::Parser;
use peptalk_api::{AppState, RestApi, Tuning};
use peptalk_context::{ContextMatcher, PackCatalog};
use peptalk_core::GoalTable;
use peptalk_stack::StackScorer;
use peptalk_storage::StorageManager;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Context matching and stack suggestion service
#[derive(Parser, Debug)]
#[command(name = "peptalk")]
#[command(about = "Context matching and stack suggestions for peptide content", long_about = None)]
struct Args {
    /// Directory for saved stacks and submissions
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Compound catalog JSON (compounds, goals, search synonyms)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Context pack catalog JSON; the built-in packs are used when omitted
    #[arg(long)]
    packs: Option<PathBuf>,

    /// Tuning constants JSON (matcher, scoring, suggestion_limit)
    #[arg(long)]
    tuning: Option<PathBuf>,
}

fn load_tuning(path: Option<&PathBuf>) -> anyhow::Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading tuning file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing tuning file {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Pep-Talk v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", args.http_port);

    let tuning = load_tuning(args.tuning.as_ref())?;
    tuning.validate()?;

    let packs = match &args.packs {
        Some(path) => PackCatalog::from_path(path)?,
        None => PackCatalog::builtin()?,
    };
    info!("Loaded {} context packs", packs.len());

    if args.catalog.is_none() {
        warn!("No --catalog given; the stack builder starts with an empty catalog");
    }
    let content = StorageManager::load_content(args.catalog.as_deref())?;
    info!(
        "Loaded {} compounds and {} goals",
        content.compounds.len(),
        content.goals.len()
    );

    let storage = Arc::new(StorageManager::new(&args.data_dir)?);
    info!("Storage initialized");

    let state = Arc::new(AppState::new(
        content,
        ContextMatcher::from_catalog(packs, tuning.matcher.clone()),
        StackScorer::new(tuning.scoring, GoalTable::default()),
        storage,
        tuning.suggestion_limit,
    ));

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("Pep-Talk started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
