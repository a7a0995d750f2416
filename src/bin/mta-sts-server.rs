use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use mta_sts_server::{
    Config, PersistenceError, PolicyRecord, Sources, StartupError, logging, resolve, save, server,
};

#[path = "mta-sts-server/args.rs"]
mod args;
#[path = "mta-sts-server/output.rs"]
mod output;

use args::{Cli, Commands, PolicyArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Start {
            policy,
            save_config,
        } => {
            output::print_banner();
            let config = resolve_or_exit(&policy);
            if save_config {
                save_if_absent(&config, policy.config_path().as_deref());
            }
            start(config)
        }
        Commands::ShowConfig { policy, format } => {
            let config = resolve_or_exit(&policy);
            let record = PolicyRecord::new(&config);
            output::print_config(&config, &record, &format)
        }
        Commands::SaveConfig { policy, force } => {
            let config = resolve_or_exit(&policy);
            let path = policy.config_path().ok_or(PersistenceError::NoHome)?;
            save(&config, &path, force)?;
            println!("config written to {}", path.display());
            Ok(())
        }
    }
}

/// Résout et valide, sinon affiche chaque erreur et quitte (1 pour la
/// config, 2 pour la découverte DNS).
fn resolve_or_exit(args: &PolicyArgs) -> Config {
    // Les logs démarrent avec le niveau des flags, puis suivent le fichier.
    let log = logging::init(args.verbosity().unwrap_or(false));
    let config_path = args.config_path();
    let sources = match Sources::load(args.layer(), config_path.as_deref()) {
        Ok(sources) => sources,
        Err(err) => abort(StartupError::from(err)),
    };
    if let Some(log) = &log {
        log.set_verbose(sources.merge().verbose);
    }

    match resolve(&sources) {
        Ok(config) => config,
        Err(err) => abort(err),
    }
}

fn abort(err: StartupError) -> ! {
    output::print_startup_error(&err);
    std::process::exit(err.exit_code());
}

/// Au démarrage l'écriture est best effort: les échecs sont seulement loggés.
fn save_if_absent(config: &Config, path: Option<&Path>) {
    let Some(path) = path else {
        tracing::warn!("{}", PersistenceError::NoHome);
        return;
    };
    match save(config, path, false) {
        Ok(()) => {}
        Err(PersistenceError::AlreadyExists { .. }) => {
            tracing::debug!(path = %path.display(), "config file already present, not overwritten");
        }
        Err(err) => tracing::warn!(error = %err, "could not save config"),
    }
}

fn start(config: Config) -> Result<()> {
    let policy = Arc::new(PolicyRecord::new(&config));
    tracing::info!(
        domain = config.domain(),
        mode = %config.mode(),
        mx = %config.mx_hosts().join(","),
        max_age = config.max_age(),
        "policy ready"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    runtime
        .block_on(server::run(&config, policy, shutdown_signal()))
        .context("server failed")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
}
