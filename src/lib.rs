//! rTimepiece library root.
//! Exposes the timepiece model and store, the CLI parser, the high-level
//! run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod storage;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

pub use crate::core::{App, TimeLog, TimepieceStore};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, &cfg),
        cmd => {
            let app = App::open(cfg)?;
            match cmd {
                Commands::New { .. } => commands::new::handle(cmd, &app),
                Commands::List => commands::list::handle(cmd, &app),
                Commands::Show { .. } => commands::show::handle(cmd, &app),
                Commands::Start { .. } | Commands::Stop { .. } | Commands::Toggle { .. } => {
                    commands::run::handle(cmd, &app)
                }
                Commands::Rename { .. } => commands::rename::handle(cmd, &app),
                Commands::Reset { .. } => commands::reset::handle(cmd, &app),
                Commands::Del { .. } => commands::del::handle(cmd, &app),
                Commands::Watch { .. } => commands::watch::handle(cmd, &app),
                Commands::Check => commands::check::handle(cmd, &app),
                Commands::Log { .. } => commands::log::handle(cmd, &app),
                Commands::Backup { .. } => commands::backup::handle(cmd, &app),
                Commands::Export { .. } => commands::export::handle(cmd, &app),
                Commands::Init | Commands::Config { .. } => Ok(()),
            }
        }
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once
    let mut cfg = Config::load()?;

    // --db overrides the configured database
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, cfg)
}
