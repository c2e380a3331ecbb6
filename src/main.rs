use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod controller;
mod domain;
mod dropdown;
mod loader;
mod model;
mod table;
mod teams;
mod ui;
mod view;

use controller::Controller;
use domain::{DEFAULT_DATA_PATH, TVConfig, TVError};
use model::{Model, Status};
use ui::TableUI;

/// Browse basketball player statistics in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// CSV file with one row per player. `~` and environment variables are expanded.
    #[arg(default_value = DEFAULT_DATA_PATH)]
    path: String,

    /// Start with only the top 25 rows visible
    #[arg(long = "top-25")]
    top_25: bool,

    /// Maximum rendered width of a column
    #[arg(long, default_value_t = 24)]
    max_column_width: usize,

    /// Milliseconds to wait for terminal input between redraws
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,

    /// Where log output is written to
    #[arg(long, default_value = "courtside.log")]
    log_file: PathBuf,
}

impl Cli {
    fn into_config(self) -> Result<TVConfig, TVError> {
        let path = shellexpand::full(&self.path)
            .map_err(|e| TVError::LoadingFailed(e.to_string()))?;
        Ok(TVConfig::default()
            .path(PathBuf::from(path.as_ref()))
            .max_column_width(self.max_column_width)
            .event_poll_time(self.poll_ms)
            .start_with_row_limit(self.top_25))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli.log_file) {
        eprintln!("Error: could not open log file {:?}: {}", cli.log_file, e);
        return ExitCode::FAILURE;
    }

    let result = cli.into_config().and_then(run);
    restore_terminal();
    match result {
        Err(e) => {
            error!("Stopped with error: {e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn init_logging(path: &Path) -> Result<(), TVError> {
    // The terminal belongs to the UI, so logs go to a file.
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("courtside=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

fn restore_terminal() {
    if let Err(e) = execute!(stdout(), DisableMouseCapture) {
        error!("Could not disable mouse capture: {e}");
    }
    ratatui::restore();
}

fn run(config: TVConfig) -> Result<(), TVError> {
    info!("Starting courtside with {:?}", config);

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;

    let size = terminal.size()?;
    let mut model = Model::init(&config, size.width as usize, size.height as usize);
    model.load_data_file(config.path.clone());

    let mut ui = TableUI::new(&config);
    let controller = Controller::new(&config);

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        let message = controller.handle_event()?;
        model.update(message)?;
    }

    info!("Quitting courtside");
    Ok(())
}
