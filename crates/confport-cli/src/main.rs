//! confport - import and export provider configuration from the command line
//!
//! Exit codes: 0 on success, 1 on failure, 2 when an import was persisted
//! but the active provider could not be synced live.

mod dialog;
mod notifier;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use confport_core::backend::{FileConfigBackend, FileLiveSync, LiveSync};
use confport_core::logging::{ConsoleLogger, FileLogger, LogLevel, Logger};
use confport_core::session::messages;
use confport_core::{log_debug, log_info, log_warn};
use confport_core::{
    ControllerDeps, ExportNaming, ImportExportController, ImportStatus, SessionScope,
    SettingsFile, TransferSettings,
};

use dialog::ArgDialog;
use notifier::CliNotifier;

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_PARTIAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "confport")]
#[command(about = "Import and export provider configuration with safety backups")]
#[command(version)]
struct Args {
    /// Settings file (default: <config_dir>/confport/settings.yaml)
    #[arg(long, global = true, env = "CONFPORT_SETTINGS")]
    settings: Option<PathBuf>,

    /// Configuration store, overrides `store_path`
    #[arg(long, global = true, env = "CONFPORT_STORE")]
    store: Option<PathBuf>,

    /// Safety backup directory, overrides `backup_dir`
    #[arg(long, global = true, env = "CONFPORT_BACKUP_DIR")]
    backup_dir: Option<PathBuf>,

    /// Live settings file, overrides `live_path`
    #[arg(long, global = true, env = "CONFPORT_LIVE")]
    live: Option<PathBuf>,

    /// Print debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also append log lines to the debug file in the temp directory
    #[arg(long, global = true)]
    debug_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a configuration file; the current configuration is backed up first
    Import {
        /// File to import (JSON or YAML)
        file: Option<PathBuf>,

        /// Choose the file with the native picker
        #[arg(long)]
        pick: bool,
    },

    /// Export the current configuration
    Export {
        /// Destination file or directory (default: current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Choose the destination with the native picker
        #[arg(long)]
        pick: bool,
    },

    /// Inspect or restore safety backups
    Backups {
        #[command(subcommand)]
        action: Option<BackupAction>,
    },
}

#[derive(Subcommand, Debug)]
enum BackupAction {
    /// List safety backups, newest first
    List,

    /// Replace the configuration with a safety backup
    Restore {
        /// Backup id as shown by `list`
        id: String,
    },
}

/// Console output, optionally mirrored into the debug file
struct CliLogger {
    console: ConsoleLogger,
    file: Option<FileLogger>,
}

impl CliLogger {
    fn new(verbose: bool, debug_log: bool) -> Self {
        let level = if verbose { LogLevel::Debug } else { LogLevel::Info };
        Self {
            console: ConsoleLogger::new().with_min_level(level),
            file: debug_log.then(|| FileLogger::new("cli")),
        }
    }
}

impl Logger for CliLogger {
    fn debug(&self, message: &str) {
        self.console.debug(message);
        if let Some(file) = &self.file {
            file.debug(message);
        }
    }

    fn info(&self, message: &str) {
        self.console.info(message);
        if let Some(file) = &self.file {
            file.info(message);
        }
    }

    fn warn(&self, message: &str) {
        self.console.warn(message);
        if let Some(file) = &self.file {
            file.warn(message);
        }
    }

    fn error(&self, message: &str) {
        self.console.error(message);
        if let Some(file) = &self.file {
            file.error(message);
        }
    }
}

/// Collaborators shared by every subcommand
struct App {
    settings: TransferSettings,
    logger: Arc<dyn Logger>,
    backend: Arc<FileConfigBackend>,
    live_sync: Arc<FileLiveSync>,
}

impl App {
    fn new(settings: TransferSettings, logger: Arc<dyn Logger>) -> Self {
        let backend = Arc::new(FileConfigBackend::from_settings(&settings, logger.clone()));
        let live_sync = Arc::new(FileLiveSync::new(backend.clone(), settings.live_path(), logger.clone()));
        Self { settings, logger, backend, live_sync }
    }

    fn controller(&self, dialog: ArgDialog, notifier: Arc<CliNotifier>) -> SessionScope {
        let controller = ImportExportController::new(ControllerDeps {
            dialog: Arc::new(dialog),
            backend: self.backend.clone(),
            live_sync: self.live_sync.clone(),
            notifier,
            logger: self.logger.clone(),
        })
        .with_export_naming(ExportNaming::from_settings(&self.settings));
        SessionScope::new(Arc::new(controller))
    }
}

fn load_settings(args: &Args) -> Result<TransferSettings> {
    let file = args
        .settings
        .clone()
        .map(SettingsFile::new)
        .unwrap_or_else(SettingsFile::user);
    let mut settings = file
        .load()
        .with_context(|| format!("Failed to load settings from {}", file.path().display()))?;

    if let Some(store) = &args.store {
        settings.store_path = Some(store.clone());
    }
    if let Some(backup_dir) = &args.backup_dir {
        settings.backup_dir = Some(backup_dir.clone());
    }
    if let Some(live) = &args.live {
        settings.live_path = Some(live.clone());
    }
    Ok(settings)
}

fn import_exit_code(status: ImportStatus) -> u8 {
    match status {
        ImportStatus::Success => EXIT_SUCCESS,
        ImportStatus::PartialSuccess => EXIT_PARTIAL,
        _ => EXIT_FAILURE,
    }
}

async fn run_import(ctx: &App, file: Option<PathBuf>, pick: bool) -> Result<u8> {
    let notifier = Arc::new(CliNotifier::new(ctx.logger.clone()));
    let dialog = ArgDialog::new(std::env::current_dir()?)
        .with_open(file)
        .with_pick(pick);
    let session = ctx.controller(dialog, notifier);

    session.select_import_file().await;
    session.import_config().await;

    let outcome = session.snapshot();
    if let Some(backup_id) = outcome.backup_id() {
        log_info!(ctx.logger, "Previous configuration saved as {}", backup_id);
    }
    log_debug!(ctx.logger, "Import finished with status {}", outcome.status());
    Ok(import_exit_code(outcome.status()))
}

async fn run_export(ctx: &App, out: Option<PathBuf>, pick: bool) -> Result<u8> {
    let notifier = Arc::new(CliNotifier::new(ctx.logger.clone()));
    let dialog = ArgDialog::new(std::env::current_dir()?)
        .with_out(out)
        .with_pick(pick);
    let session = ctx.controller(dialog, notifier.clone());

    session.export_config().await;

    Ok(if notifier.errors() > 0 { EXIT_FAILURE } else { EXIT_SUCCESS })
}

fn list_backups(ctx: &App) -> Result<u8> {
    let backups = ctx.backend.list_backups().context("Failed to list backups")?;
    if backups.is_empty() {
        println!("No backups in {}", ctx.backend.backup_dir().display());
        return Ok(EXIT_SUCCESS);
    }

    for entry in backups {
        println!("{}\t{} bytes\t{}", entry.id, entry.size_bytes, entry.path.display());
    }
    Ok(EXIT_SUCCESS)
}

async fn restore_backup(ctx: &App, id: &str) -> Result<u8> {
    let previous = ctx
        .backend
        .restore_backup(id)
        .with_context(|| format!("Failed to restore backup {}", id))?;
    log_info!(ctx.logger, "Restored {}; previous configuration saved as {}", id, previous);

    let outcome = ctx.live_sync.sync_current_providers_live().await;
    if !outcome.ok {
        log_warn!(
            ctx.logger,
            "Live sync after restore failed: {}",
            outcome.error.as_deref().unwrap_or("unknown error")
        );
        log_warn!(ctx.logger, "{}", messages::PARTIAL_SUCCESS);
        return Ok(EXIT_PARTIAL);
    }
    Ok(EXIT_SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let logger: Arc<dyn Logger> = Arc::new(CliLogger::new(args.verbose, args.debug_log));
    let settings = load_settings(&args)?;
    log_debug!(logger, "Store: {}", settings.store_path().display());
    log_debug!(logger, "Backups: {}", settings.backup_dir().display());
    log_debug!(logger, "Live settings: {}", settings.live_path().display());

    let ctx = App::new(settings, logger);

    let code = match args.command {
        Command::Import { file, pick } => run_import(&ctx, file, pick).await?,
        Command::Export { out, pick } => run_export(&ctx, out, pick).await?,
        Command::Backups { action } => match action.unwrap_or(BackupAction::List) {
            BackupAction::List => list_backups(&ctx)?,
            BackupAction::Restore { id } => restore_backup(&ctx, &id).await?,
        },
    };
    Ok(ExitCode::from(code))
}
