use anyhow::Result;
use mta_sts_server::{Config, PolicyRecord, StartupError};
use serde::Serialize;

pub fn print_banner() {
    println!("MTA-STS-Server v{}", env!("CARGO_PKG_VERSION"));
}

/// Erreurs de démarrage sur stderr, une violation par ligne.
pub fn print_startup_error(err: &StartupError) {
    match err {
        StartupError::Config(config_err) if !config_err.violations().is_empty() => {
            eprintln!("Error in configuration, please fix the following errors:");
            for violation in config_err.violations() {
                eprintln!("  - {violation}");
            }
        }
        other => eprintln!("error: {other}"),
    }
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a Config,
    policy: &'a str,
}

pub fn print_config(config: &Config, policy: &PolicyRecord, format: &str) -> Result<()> {
    match format {
        "human" => {
            println!("Domain: {}", config.domain());
            println!("Mode: {}", config.mode());
            if config.mx_hosts().is_empty() {
                println!("MX: <none>");
            } else {
                println!("MX: {}", config.mx_hosts().join(","));
            }
            println!("Max Age: {}", config.max_age());
            println!("Port: {}", config.port());
            println!("Verbose: {}", config.verbose());
            println!();
            println!("{policy}");
        }
        "json" => {
            let report = Report {
                config,
                policy: policy.as_str(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        other => anyhow::bail!("unknown --format '{other}', use: human|json"),
    }
    Ok(())
}
