//! fieldops library root.
//! Exposes the CLI parser, the high-level run() function and the workflow
//! engines behind it.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use crate::core::geo::{GeoOptions, NoLocation, StaticLocation};
use crate::core::services::Services;
use crate::core::session::FileSessionStore;
use crate::db::store::Store;
use chrono::Duration;
use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Open the store and wire the collaborators for one invocation.
pub fn build_services(cli: &Cli, cfg: &Config) -> AppResult<Services> {
    let store = Store::open(&cfg.database)?;
    let session_file = cli.session.clone().unwrap_or_else(|| cfg.session_file.clone());

    let geo = GeoOptions {
        timeout: Duration::seconds(cfg.geo_timeout_secs as i64),
        max_age: Duration::seconds(cfg.geo_max_age_secs as i64),
        ..GeoOptions::default()
    };

    let svc = Services::new(store, FileSessionStore::new(session_file)).with_geo_options(geo);
    Ok(match (cli.location.lat, cli.location.lon) {
        (Some(lat), Some(lon)) => {
            svc.with_locator(StaticLocation::new(lat, lon, cli.location.acc))
        }
        _ => svc.with_locator(NoLocation),
    })
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => return commands::init::handle(cli),
        Commands::Config { .. } => return commands::config::handle(cmd, cfg),
        Commands::Db { .. } => return commands::db::handle(cmd, cfg),
        _ => {}
    }

    let svc = build_services(cli, cfg)?;
    match cmd {
        Commands::Init | Commands::Config { .. } | Commands::Db { .. } => Ok(()),
        Commands::Log { .. } => commands::log::handle(cmd, &svc),
        Commands::Setup { .. } | Commands::Login { .. } | Commands::Logout | Commands::Whoami => {
            commands::auth::handle(cmd, &svc)
        }
        Commands::User { .. } => commands::user::handle(cmd, &svc),
        Commands::Area { .. } => commands::area::handle(cmd, &svc),
        Commands::Timer { .. } => commands::timer::handle(cmd, &svc),
        Commands::Order { .. } => commands::order::handle(cmd, &svc),
        Commands::Entry { .. } | Commands::Summary => commands::entry::handle(cmd, &svc),
        Commands::Review { .. } => commands::review::handle(cmd, &svc),
        Commands::Task { .. } => commands::task::handle(cmd, &svc),
        Commands::Client { .. } => commands::client::handle(cmd, &svc),
        Commands::File { .. } => commands::file::handle(cmd, &svc),
        Commands::Setting { .. } => commands::setting::handle(cmd, &svc),
        Commands::Export { .. } => commands::export::handle(cmd, &svc),
        Commands::Backup { .. } | Commands::Restore { .. } => commands::backup::handle(cmd, &svc),
        Commands::Portal { .. } => commands::portal::handle(cmd, &svc),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once; `init` writes its own
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
