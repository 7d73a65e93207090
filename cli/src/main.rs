//! CLI entrypoint for ttseval
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use ttseval_application::{
    CatalogSource, EvalConfig, InMemoryResultStore, ResultStore, RunSessionUseCase,
    WorkflowController,
};
use ttseval_domain::WorkflowVariant;
use ttseval_infrastructure::{
    ConfigLoader, CsvCatalogSource, FileConfig, JsonlResultStore, LocalAssetResolver,
    RandomSidePicker,
};
use ttseval_presentation::{Cli, OutputConfig, RaterRepl, ReplConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    // CLI flags override file configuration
    if let Some(variant) = cli.variant {
        config.session.variant = variant.into();
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog.path = catalog.clone();
    }
    if let Some(audio_dir) = &cli.audio_dir {
        config.catalog.audio_dir = audio_dir.clone();
    }
    if let Some(store) = &cli.store {
        config.store.file = Some(store.clone());
    }

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("config: {}", issue);
        }
        bail!("Invalid configuration ({} issues)", issues.len());
    }

    let output = OutputConfig {
        color: config.output.color && !cli.no_color,
    };
    if !output.color {
        colored::control::set_override(false);
    }

    let variant = config.session.variant;
    info!("Starting ttseval ({} session)", variant);

    // === Dependency Injection ===
    let source = CsvCatalogSource::new(&config.catalog.path);
    let catalog = source
        .load()
        .with_context(|| format!("Failed to load catalog {}", config.catalog.path.display()))?;
    if catalog.is_empty() {
        bail!("Catalog {} has no samples", config.catalog.path.display());
    }
    info!(
        "Loaded {} samples across {} models",
        catalog.len(),
        catalog.models().len()
    );

    let assets = Arc::new(LocalAssetResolver::new(&config.catalog.audio_dir));
    let picker = Arc::new(RandomSidePicker::new());
    let eval_config = EvalConfig::new(variant).with_calibration(config.calibration.to_policy());
    let controller = WorkflowController::new(Arc::new(catalog), assets, picker, eval_config);

    let store = build_store(&config, variant, cli.dry_run);
    let use_case = RunSessionUseCase::new(controller, store);

    let repl_config = ReplConfig {
        show_legend: config.repl.show_legend,
        history_file: config.repl.history_file.as_ref().map(PathBuf::from),
    };
    RaterRepl::new(use_case, repl_config)
        .with_name(cli.name.clone())
        .run()?;

    Ok(())
}

fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let Some(file_name) = path.file_name() else {
        bail!("--log-file must name a file: {}", path.display());
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn build_store(config: &FileConfig, variant: WorkflowVariant, dry_run: bool) -> Arc<dyn ResultStore> {
    if dry_run {
        info!("Dry run: ratings are kept in memory only");
        return Arc::new(InMemoryResultStore::new());
    }

    let path = config.store.path_for(variant);
    info!("Recording ratings to {}", path.display());
    Arc::new(
        JsonlResultStore::new(path)
            .with_lock_timeout(config.store.lock_timeout())
            .with_stale_after(config.store.stale_after()),
    )
}
