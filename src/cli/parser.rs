use crate::core::timelog::TimepieceId;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimepiece
#[derive(Parser)]
#[command(
    name = "rtimepiece",
    version = env!("CARGO_PKG_VERSION"),
    about = "Named stopwatches you can start and stop at will, persisted in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Create a new timepiece
    New {
        /// Display name (defaults to `default_name` from the configuration)
        name: Option<String>,

        #[arg(long = "start", help = "Start the new timepiece right away")]
        start: bool,
    },

    /// List all timepieces with their state and total time
    List,

    /// Show one timepiece with all its recorded intervals
    Show { id: TimepieceId },

    /// Start a timepiece (no-op if already running)
    Start { id: TimepieceId },

    /// Stop a timepiece (no-op if already stopped)
    Stop { id: TimepieceId },

    /// Start a stopped timepiece or stop a running one
    Toggle { id: TimepieceId },

    /// Rename a timepiece
    Rename { id: TimepieceId, name: String },

    /// Discard the whole history of a timepiece
    Reset {
        id: TimepieceId,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Delete a timepiece
    Del {
        id: TimepieceId,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Live display of a timepiece's total time
    Watch {
        id: TimepieceId,

        #[arg(long = "interval", help = "Refresh interval in milliseconds")]
        interval: Option<u64>,

        #[arg(long = "ticks", help = "Stop after this many refreshes")]
        ticks: Option<u64>,
    },

    /// Check stored timepieces for unreadable records and odd timestamps
    Check,

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Export every recorded interval
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Overwrite an existing file without asking")]
        force: bool,
    },
}
