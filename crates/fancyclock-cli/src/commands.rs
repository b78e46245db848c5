use super::args::{Cli, Commands, DisplayArgs};
use super::handlers;
use super::handlers::watch::WatchLimits;
use crate::context::ExecutionContext;
use crate::logging::{self, LogSink};
use crate::types::LogLevel;
use anyhow::Result;
use fancyclock_runtime::config::expand_tilde;
use fancyclock_runtime::resolve_config_path;
use is_terminal::IsTerminal;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

pub fn run(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.config.as_deref())?;
    let ctx = ExecutionContext::load(config_path, cli.locale, cli.format)?;

    let command = cli.command.unwrap_or(Commands::Show {
        display: DisplayArgs::default(),
    });
    let full_screen = matches!(command, Commands::Show { .. }) && io::stdout().is_terminal();
    init_logging(&ctx, cli.log_level, cli.log_file.as_deref(), full_screen)?;
    tracing::debug!(config = %ctx.config_path().display(), "config resolved");

    match command {
        Commands::Show { display } => handlers::show::handle(&ctx, &display),

        Commands::Watch {
            display,
            count,
            duration_ms,
        } => handlers::watch::handle(
            &ctx,
            &display,
            WatchLimits {
                count,
                duration: duration_ms.map(Duration::from_millis),
            },
        ),

        Commands::Now { display, at } => handlers::now::handle(&ctx, &display, at.as_deref()),

        Commands::Config { command } => handlers::config::handle(&ctx, command),
    }
}

fn init_logging(
    ctx: &ExecutionContext,
    level: Option<LogLevel>,
    log_file: Option<&str>,
    full_screen: bool,
) -> Result<()> {
    let level = level
        .map(|l| l.to_string())
        .unwrap_or_else(|| ctx.config().log.level.clone());
    let file: Option<PathBuf> = log_file
        .map(expand_tilde)
        .or_else(|| ctx.config().log.file_path());

    let sink = match (&file, full_screen) {
        (Some(path), _) => LogSink::File(path),
        (None, true) => LogSink::Disabled,
        (None, false) => LogSink::Stderr,
    };
    logging::init(&level, sink)
}
