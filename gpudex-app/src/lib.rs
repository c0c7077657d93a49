//! gpudex - interactive GPU catalogue search and list curation.
//!
//! This is the thin application layer: argument parsing, the command table,
//! and the prompt loop. Catalogue, list and export logic lives in the
//! `crates/` directory.
//!
//! # Architecture
//!
//! - **CLI** ([`cli`]): flags and configuration precedence
//! - **Commands** ([`commands`]): the command table, option parsing and handlers
//! - **Shell** ([`shell`]): quote-aware tokenizing and the read-eval-print loop
//! - **State** ([`state`]): catalogue, registry, exporter and session owned together
//! - **Errors** ([`error`]): `CommandError`, the user-facing failure shape

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod session;
pub mod shell;
pub mod state;

pub use cli::CliArgs;
pub use commands::{Dispatcher, Outcome};
pub use error::CommandError;
pub use shell::Shell;
pub use state::AppState;

use anyhow::Context;
use std::io::{self, Write};
use tracing::info;

/// Initialize tracing subscriber for logging.
///
/// Logs go to stderr so they never mix with command output. `RUST_LOG`
/// overrides the default level.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Load everything and run either the `-e` commands or the interactive prompt.
pub fn run(args: &CliArgs) -> anyhow::Result<()> {
    info!("Starting gpudex v{}", env!("CARGO_PKG_VERSION"));

    let config = args.load_config().context("failed to load configuration")?;
    let state = AppState::from_config(config).context("failed to initialize gpudex")?;
    let dispatcher = Dispatcher::new().context("invalid command table")?;
    let mut shell = Shell::new(dispatcher, state);

    let stdout = io::stdout();
    if args.execute.is_empty() {
        shell
            .run(io::stdin().lock(), stdout.lock())
            .context("terminal I/O failed")?;
        return Ok(());
    }

    let mut out = stdout.lock();
    if let Some(notice) = &shell.state().startup_notice {
        writeln!(out, "{notice}")?;
    }
    for line in &args.execute {
        match shell.execute(line) {
            Outcome::Continue(text) => writeln!(out, "{text}")?,
            Outcome::Exit(text) => {
                writeln!(out, "{text}")?;
                break;
            }
        }
    }
    Ok(())
}
