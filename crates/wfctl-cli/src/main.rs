//! wfctl
//!
//! Command-line control for the Wayfire compositor over its IPC socket.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use miette::IntoDiagnostic;
use wfctl_config::{Config, TableStyle};
use wfctl_ipc::WayfireSocket;

mod args;
mod commands;
mod devices;
mod dispatch;
mod error;
mod output;
mod registry;
mod watch;
mod workspace;

#[cfg(test)]
mod testing;

use error::CommandError;
use output::{render, OutputMode};

#[derive(Parser, Debug)]
#[command(name = "wfctl")]
#[command(about = "Control the Wayfire compositor over IPC")]
#[command(version)]
#[command(allow_negative_numbers = true)]
#[command(after_help = "Run without a command to list the available commands.")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.config/wfctl/config.kdl")]
    config: String,

    /// Wayfire IPC socket (overrides $WAYFIRE_SOCKET and the config file)
    #[arg(short, long)]
    socket: Option<PathBuf>,

    /// Print replies as tables instead of JSON
    #[arg(short = 'f', long = "format")]
    table: bool,

    /// Table border style: fancy-grid, grid, simple or plain
    #[arg(long)]
    style: Option<TableStyle>,

    /// Print compositor events as they arrive
    #[arg(short, long)]
    monitor: bool,

    /// Only watch this event (repeatable, with --monitor)
    #[arg(short, long = "event", value_name = "EVENT")]
    events: Vec<String>,

    /// Command to run, e.g. `list views` or `move view 7 50 60`
    command: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let config_path: PathBuf = shellexpand::tilde(&cli.config).into_owned().into();
    let config = wfctl_config::load_config(&config_path)?;

    init_tracing(&config);

    let mode = if cli.table {
        OutputMode::Table(cli.style.unwrap_or(config.global.table_style))
    } else {
        OutputMode::Json
    };
    let socket = cli.socket.clone().or_else(|| config.global.socket.clone());

    if cli.monitor {
        let mut client = WayfireSocket::connect(socket.as_deref()).await.into_diagnostic()?;
        let mut stdout = std::io::stdout().lock();
        let result = watch::watch_events(&mut client, &cli.events, mode, &mut stdout).await;
        drop(stdout);
        if let Err(err) = result {
            exit_with(&err);
        }
        return Ok(());
    }

    let tokens = dispatch::tokenize(&cli.command.join(" "));
    let tokens = config.expand_alias(&tokens);
    if let Err(err) = run(&tokens, socket, mode).await {
        exit_with(&err);
    }
    Ok(())
}

fn init_tracing(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.global.log_level.as_filter())
            }),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(tokens: &[String], socket: Option<PathBuf>, mode: OutputMode) -> Result<(), CommandError> {
    // Resolve first so bad input never opens the socket
    let invocation = dispatch::resolve(tokens)?;
    let mut client = WayfireSocket::connect(socket.as_deref()).await?;
    let outcome = invocation.run(&mut client).await?;

    let mut stdout = std::io::stdout().lock();
    for item in &outcome.printed {
        writeln!(stdout, "{}", render(item, mode)?)?;
    }
    for problem in &outcome.problems {
        eprintln!("warning: {}", problem);
    }
    Ok(())
}

/// Report `err` and end the process with its exit status
fn exit_with(err: &CommandError) -> ! {
    eprintln!("error: {}", err);
    if err.wants_usage() {
        eprintln!("\nAvailable commands:\n{}", registry::command_list());
    }
    std::process::exit(err.exit_code());
}
