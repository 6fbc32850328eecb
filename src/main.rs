//! HMA Rewriter - command-line entry point.
//!
//! # Execution Flow
//!
//! 1. Parse arguments and load settings (`hma-rewriter.yaml`, `HMA_REWRITER__*`)
//! 2. Initialize logging (stderr, optional rotating log file), then handle
//!    `--print-settings` / `--init-settings`
//! 3. Check the output destination: overwrite confirmation, parent directories
//! 4. Load the Hide My Applist config (JSON)
//! 5. Apply the whitelist: validate names, resolve ignore rules, update every target app
//! 6. Write the document and report apps whose config was left unchanged
//!
//! Nothing is written unless every step before it succeeded.

use anyhow::{Result, bail};
use camino::Utf8PathBuf;
use clap::Parser;
use hma_rewriter::cli::{self, Cli, OutputTarget};
use hma_rewriter::config::{self as settings_config, SETTINGS_FILE_NAME};
use hma_rewriter::services::FsRuleReader;
use hma_rewriter::{APP_NAME, ConfigManager, VERSION, WhitelistApplier};

fn main() -> Result<()> {
    let args = Cli::parse();

    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(|| Utf8PathBuf::from(SETTINGS_FILE_NAME));
    let config_manager = ConfigManager::new(&settings_path);
    let settings = config_manager.load_settings()?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = hma_rewriter::logging::setup_logging(&settings.logging, args.verbose)?;
    tracing::debug!("Starting {} v{}", APP_NAME, VERSION);
    match config_manager.settings_source() {
        Some(path) => tracing::debug!("Loaded settings from {}", path),
        None => tracing::debug!("Settings file not found at {}, using defaults", settings_path),
    }

    if args.print_settings {
        print!("{}", settings_config::to_yaml(&settings)?);
        return Ok(());
    }

    if args.init_settings {
        config_manager.save_settings(&settings)?;
        println!(">>> {}", settings_path);
        return Ok(());
    }

    let (Some(config_path), Some(raw_output)) = (args.config.as_deref(), args.output.as_deref())
    else {
        bail!("`--config` and `--output` are required");
    };

    let target = OutputTarget::parse(raw_output, config_path);
    if !cli::prepare_output(&target, args.force_overwrite, args.mkdir, cli::confirm_overwrite)? {
        println!("aborted");
        bail!("Output file exists and overwrite was declined");
    }

    let mut document = settings_config::load_document(config_path)?;

    let request = args.apply_request(&settings.default_whitelist);
    let report = WhitelistApplier::new(&settings.template, &FsRuleReader)
        .apply(&mut document, &request)?;

    cli::write_document(&target, &document, args.pretty)?;

    if let Some(path) = target.path() {
        println!("{}", cli::render_report(&report));
        let resolved = path.canonicalize_utf8().unwrap_or_else(|_| path.to_path_buf());
        println!(">>> {}", resolved);
    }

    Ok(())
}
