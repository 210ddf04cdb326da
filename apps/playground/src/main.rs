use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use playground_api::{OrderManagementApp, PersonManagementApp};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod session;

use config::{load_settings, OutputFormat};
use session::{Output, Session};

#[derive(Parser, Debug)]
#[command(about = "Order and person management demos over in-memory data services")]
struct Cli {
    /// Config file; defaults to ./playground.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the seeded order list.
    Orders,
    /// Print the seeded person list.
    Persons,
    /// Run commands from a script file, or stdin when none is given.
    Session {
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    init_tracing(&settings.log_filter);
    let format = cli.format.unwrap_or(settings.output_format);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Orders => {
            let orders = OrderManagementApp::default().list_orders();
            render::output(&mut out, format, &Output::Orders { orders })?;
        }
        Command::Persons => {
            let persons = PersonManagementApp::default().list_persons();
            render::output(&mut out, format, &Output::Persons { persons })?;
        }
        Command::Session { script } => {
            let mut session = Session::default();
            let stats = match script {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("failed to open script '{}'", path.display()))?;
                    session.run(BufReader::new(file), &mut out, format)?
                }
                None => session.run(io::stdin().lock(), &mut out, format)?,
            };
            info!(
                commands = stats.commands,
                errors = stats.errors,
                changes = stats.changes,
                "session finished"
            );
        }
    }

    out.flush()?;
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
