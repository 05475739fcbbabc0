//! TUI entrypoint: steps a backup plan one augmenting path at a time
//! Controls: [s] Step, [r] Run/Pause, [q] Quit
//! With `--print` the plan is solved headlessly and printed instead.

mod app;
mod backend;
mod config;
mod ui;

use anyhow::{Context, Result};
use app::App;
use backend::{FlowBackend, PlannerBackend};
use bflow_core_plus::CapacityModel;
use clap::{Parser, ValueEnum};
use config::Scenario;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ui::draw;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event as CEvent, KeyCode},
    execute, terminal,
};
use ratatui::{backend::CrosstermBackend, Terminal};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModelArg {
    /// Fold node limits into each edge (reference behaviour)
    Fold,
    /// Split every node into in/out twins (exact node limits)
    Split,
}

impl From<ModelArg> for CapacityModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Fold => CapacityModel::EdgeFolding,
            ModelArg::Split => CapacityModel::NodeSplitting,
        }
    }
}

/// Max-throughput backup planner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON: network + request)
    scenario: PathBuf,

    /// How node limits enter the flow network
    #[arg(long, value_enum, default_value_t = ModelArg::Split)]
    model: ModelArg,

    /// Solve and print the plan without starting the TUI
    #[arg(long)]
    print: bool,

    /// Write logs to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Auto-run interval in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Number of augmenting paths kept on screen
    #[arg(long, default_value_t = 32)]
    history: usize,
}

fn init_tracing(args: &Args) -> Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| "bflow_core_plus=info,bflow_tui=info".into());
    match &args.log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter())
                .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        None if args.print => {
            tracing_subscriber::registry()
                .with(filter())
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        }
        // No sink: stdout belongs to the TUI
        None => {}
    }
    Ok(())
}

fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    // Leave alternate screen and show cursor
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    Ok(())
}

fn run_tui<B: FlowBackend>(mut app: App<B>, tick_rate: Duration) -> Result<()> {
    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Ensure terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));

    let mut last_tick = Instant::now();

    // Event loop
    loop {
        draw(&mut terminal, &app)?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_millis(0));

        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('s') => app.step(),
                    KeyCode::Char('r') => app.toggle_running(),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if app.running {
                app.step();
            }
            last_tick = Instant::now();
        }
    }

    // Cleanup
    restore_terminal()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let scenario = Scenario::load(&args.scenario)?;
    info!(
        scenario = %args.scenario.display(),
        nodes = scenario.network.node_count(),
        connections = scenario.network.connections().len(),
        "loaded scenario"
    );

    let mut backend = PlannerBackend::new(scenario, args.model.into())?;

    if args.print {
        while backend.step().is_some() {}
        print!("{}", backend.plan());
        return Ok(());
    }

    let app = App::new(backend, args.history);
    run_tui(app, Duration::from_millis(args.tick_ms))
}
