use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use offense_meter::analysis::HttpAnalysisClient;
use offense_meter::history::{FileStore, HistoryStore};
use offense_meter::view::render::{render_display, render_history};
use offense_meter::view::{Completion, ViewController};

#[derive(Parser, Debug)]
#[command(
    name = "offense-meter",
    version,
    about = "Score text for offensiveness and browse past results"
)]
struct Cli {
    /// Root URL of the analysis service.
    #[arg(long, env = "OFFENSE_METER_URL", default_value = "http://127.0.0.1:8080")]
    url: String,
    /// Directory holding the local history.
    #[arg(long, env = "OFFENSE_METER_DATA_DIR", default_value = ".offense-meter")]
    data_dir: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze text and record the result.
    Analyze {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List past analyses, newest first.
    History,
    /// Show a past analysis again without contacting the service.
    Replay {
        /// Position as printed by `history` (1 = newest).
        position: usize,
    },
    /// Delete all past analyses.
    Clear,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let analyzer = HttpAnalysisClient::new(&cli.url)?;
    let history = HistoryStore::new(FileStore::new(&cli.data_dir));
    let mut view = ViewController::new(analyzer, history);

    match cli.command {
        Command::Analyze { text } => {
            let done = view.submit(&text.join(" ")).await?;
            print!("{}", render_display(view.display()));
            if done == Completion::Failed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::History => print!("{}", render_history(&view.history())),
        Command::Replay { position } => {
            if position == 0 {
                bail!("positions start at 1");
            }
            view.replay(position - 1)?;
            println!("> {}\n", view.display().input);
            print!("{}", render_display(view.display()));
        }
        Command::Clear => {
            view.clear_history()?;
            println!("History cleared.");
        }
    }

    Ok(ExitCode::SUCCESS)
}
