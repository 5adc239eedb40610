//! headless — drives the contagion grid without a drawing surface.
//!
//! Starts a controller, lets the ticker run for `--run-ms`, pauses, steps one
//! manual turn, resumes for another `--run-ms`, then stops and prints the
//! final board.  Every report is applied to an in-memory `BoardView` and,
//! with `--output <dir>`, written to `turn_summaries.csv` / `marks.csv`.
//!
//! ```text
//! cargo run -p headless -- --agents 200 --step-delay-ms 20 --run-ms 1000 --output ./out
//! RUST_LOG=cg_sim=trace cargo run -p headless
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cg_control::LifecycleController;
use cg_core::SimulationConfig;
use cg_output::{BoardView, CsvWriter, WriterSink};
use cg_sim::{RenderReport, ReportSink};

/// Headless contagion grid runner
#[derive(Parser, Debug)]
#[command(name = "headless")]
#[command(about = "Run the contagion grid simulator without a UI", long_about = None)]
struct Args {
    /// JSON file holding a full SimulationConfig (flags below override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board side length in cells
    #[arg(long)]
    board_size: Option<i32>,

    /// Bucket side length in cells
    #[arg(long)]
    bucket_size: Option<i32>,

    /// Number of agent managers
    #[arg(long)]
    managers: Option<i32>,

    /// Agents per manager
    #[arg(long)]
    agents: Option<i32>,

    /// Delay between periodic turns, in milliseconds
    #[arg(long)]
    step_delay_ms: Option<u64>,

    /// Master seed
    #[arg(long)]
    seed: Option<u64>,

    /// How long each running phase lasts, in milliseconds
    #[arg(long, default_value = "500")]
    run_ms: u64,

    /// Directory for CSV output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG still wins when set)
    #[arg(short, long)]
    verbose: bool,
}

// ── Sink ──────────────────────────────────────────────────────────────────────

/// Everything the controller's sink feeds; shared so `main` can read it back.
struct Recorder {
    view: BoardView,
    csv:  Option<WriterSink<CsvWriter>>,
}

impl ReportSink for Recorder {
    fn on_report(&mut self, report: &RenderReport) {
        self.view.apply(report);
        if let Some(csv) = self.csv.as_mut() {
            csv.on_report(report);
        }
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = build_config(&args)?;
    config.validate().context("invalid configuration")?;
    info!(
        board = config.board_size,
        bucket = config.bucket_size,
        agents = config.total_agents(),
        step_delay_ms = config.step_delay.as_millis() as u64,
        seed = config.seed,
        "contagion grid (headless)"
    );

    let csv = match &args.output {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
            Some(WriterSink::new(CsvWriter::new(dir)?))
        }
        None => None,
    };
    let recorder = Arc::new(Mutex::new(Recorder { view: BoardView::new(), csv }));

    let shared = Arc::clone(&recorder);
    let controller = LifecycleController::spawn(move |report: &RenderReport| {
        if let Ok(mut r) = shared.lock() {
            r.on_report(report);
        }
    })?;

    let run_for = Duration::from_millis(args.run_ms);
    let t0 = Instant::now();

    controller.start(config)?;
    thread::sleep(run_for);

    controller.stop()?;
    controller.turn()?;
    let paused = controller.state()?;
    info!(state = %paused, turn = ?last_turn(&recorder), "paused after one manual turn");

    controller.resume()?;
    thread::sleep(run_for);
    controller.stop()?;

    info!(state = %controller.state()?, live_tickers = controller.live_tickers(), "stopped");
    controller.shutdown()?;

    let mut recorder = recorder.lock().map_err(|_| anyhow!("report sink panicked"))?;
    if let Some(csv) = recorder.csv.as_mut() {
        csv.finish();
        if let Some(e) = csv.take_error() {
            warn!(error = %e, "CSV output incomplete");
        }
    }

    let view = &recorder.view;
    info!(
        turns = view.last_turn().map_or(0, |t| t.0),
        reports = view.reports_applied(),
        agents = view.mark_count(),
        infected = view.infected_count(),
        buckets = view.bucket_count(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "done"
    );
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Defaults, then the JSON file, then individual flags.
fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(v) = args.board_size    { config.board_size = v; }
    if let Some(v) = args.bucket_size   { config.bucket_size = v; }
    if let Some(v) = args.managers      { config.number_of_managers = v; }
    if let Some(v) = args.agents        { config.agents_per_manager = v; }
    if let Some(v) = args.step_delay_ms { config.step_delay = Duration::from_millis(v); }
    if let Some(v) = args.seed          { config.seed = v; }
    Ok(config)
}

fn last_turn(recorder: &Mutex<Recorder>) -> Option<u64> {
    recorder.lock().ok()?.view.last_turn().map(|t| t.0)
}
