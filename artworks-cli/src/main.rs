mod browse;
mod error;
mod paths;
mod view;

use std::fs;
use std::fs::File;
use std::process::ExitCode;
use std::time::Duration;

use artworks_lib::ArtworksClient;
use artworks_lib::DEFAULT_BASE_URL;
use artworks_lib::controller::TableController;
use clap::Parser;
use clap::Subcommand;
use log::LevelFilter;
use simplelog::Config;
use simplelog::WriteLogger;

use crate::error::CliError;

/// Browse the Art Institute of Chicago collection and select rows across pages.
#[derive(Debug, Parser)]
#[command(name = "artworks", version)]
struct Cli {
    /// Base URL of the artworks API.
    #[arg(long, env = "ARTWORKS_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Rows per page.
    #[arg(long, env = "ARTWORKS_PAGE_SIZE", default_value_t = 12,
          value_parser = clap::value_parser!(u16).range(1..=100))]
    page_size: u16,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Log level written to the log file (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive table (default).
    Browse {
        /// Page to open first.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Select rows starting from a page and print them.
    Select {
        /// Number of rows to select.
        #[arg(long, short)]
        count: usize,
        /// Page the selection starts from.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(cli.log_level)?;

    let client = ArtworksClient::builder()
        .url(cli.api_url.as_str())
        .timeout(Duration::from_secs(cli.timeout_secs))
        .connect_timeout(Duration::from_secs(cli.timeout_secs.min(10)))
        .build()?;
    log::info!("using {}", client.base_url());

    let mut controller = TableController::new(client, usize::from(cli.page_size));

    match cli.command.unwrap_or(Command::Browse { page: 1 }) {
        Command::Browse { page } => browse::run(&mut controller, page).await,
        Command::Select { count, page } => select(&mut controller, page, count).await,
    }
}

async fn select(controller: &mut TableController, page: usize, count: usize) -> Result<(), CliError> {
    controller.load_page(page).await?;

    let summary = controller.bulk_select(count).await;

    print!(
        "{}",
        view::render_rows(controller.selection().records(), controller.selection())
    );
    if let Some(summary) = &summary {
        browse::print_summary(summary);
    }
    browse::print_notices(controller);

    Ok(())
}

/// Writes logs to the platform cache dir, rotating the previous run's log.
fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    if level == LevelFilter::Off {
        return Ok(());
    }
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let log_file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), log_file)?;
    Ok(())
}
