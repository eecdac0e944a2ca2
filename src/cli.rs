//! CLI argument parsing
//!
//! Uses clap for argument parsing with derive macros.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use notification_system::NotificationKind;
use std::io;
use std::path::PathBuf;

/// In-process notification registry with native desktop escalation
#[derive(Parser, Debug)]
#[command(name = "notification-system")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/notification-system/config.toml)
    #[arg(short, long, env = "NOTIFICATION_SYSTEM_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register one notification and escalate it if the window is hidden
    Send {
        /// Notification title
        title: String,

        /// Notification message
        #[arg(default_value = "")]
        body: String,

        /// Tag for a stable, reusable id
        #[arg(long)]
        tag: Option<String>,

        /// Severity hint for floating renderers
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Show as a floating notification for this many seconds
        #[arg(long)]
        float_time: Option<u64>,

        /// Treat the window as hidden (forces desktop escalation)
        #[arg(long, default_value_t = false)]
        hidden: bool,

        /// Keep running this many seconds to receive clicks
        #[arg(long, default_value_t = 0)]
        wait: u64,
    },

    /// Create random float notifications, then remove and clear them
    Demo {
        /// Number of notifications to create
        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,

        /// Treat the window as hidden (forces desktop escalation)
        #[arg(long, default_value_t = false)]
        hidden: bool,
    },

    /// Print plugin registration metadata as JSON
    Meta,

    /// Print the effective configuration
    Config {
        /// Print a commented example instead
        #[arg(long, default_value_t = false)]
        example: bool,

        /// Write the effective configuration to the config path
        #[arg(long, default_value_t = false, conflicts_with = "example")]
        save: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Notification type as accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Info,
    Success,
    Warning,
    Error,
}

impl From<KindArg> for NotificationKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Info => Self::Info,
            KindArg::Success => Self::Success,
            KindArg::Warning => Self::Warning,
            KindArg::Error => Self::Error,
        }
    }
}

/// Print shell completions to stdout
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "notification-system", &mut io::stdout());
}
