use crate::types::{LogLevel, OutputFormat, StyleArg};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fancyclock")]
#[command(about = "Show the current time and date, refreshed every tenth of a second", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Config file (default: <config dir>/fancyclock/config.toml)")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Locale for names and ordering, e.g. en_US or fr_FR")]
    pub locale: Option<String>,

    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[arg(long, global = true, help = "Write logs to this file instead of stderr")]
    pub log_file: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full-screen clock (default)
    Show {
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Print one line per refresh
    Watch {
        #[command(flatten)]
        display: DisplayArgs,

        #[arg(long, help = "Stop after this many refreshes")]
        count: Option<u64>,

        #[arg(long, help = "Stop after this many milliseconds")]
        duration_ms: Option<u64>,
    },

    /// Print the current time once
    Now {
        #[command(flatten)]
        display: DisplayArgs,

        #[arg(long, help = "Render this RFC 3339 instant instead of the system clock")]
        at: Option<String>,
    },

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved config file path
    Path,

    /// Print the effective configuration
    Show,

    /// Write a config file with default values
    Init {
        #[arg(long)]
        force: bool,
    },
}

/// Display options shared by every command that renders the clock.
/// Unset options fall back to the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct DisplayArgs {
    #[arg(long)]
    pub time_style: Option<StyleArg>,

    #[arg(long)]
    pub date_style: Option<StyleArg>,

    #[arg(long, help = "strftime pattern shown in a single region instead of the styles")]
    pub pattern: Option<String>,

    #[arg(long, help = "Show the time only")]
    pub no_date: bool,

    #[arg(long)]
    pub interval_ms: Option<u64>,
}
