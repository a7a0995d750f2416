use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mta_sts_server::{Layer, default_config_path};

#[derive(Parser)]
#[command(name = "mta-sts-server", version)]
#[command(about = "mta-sts server is a simple server to serve mta-sts.txt")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// démarre le serveur
    Start {
        #[command(flatten)]
        policy: PolicyArgs,

        /// enregistre la config résolue si aucun fichier n'existe encore
        #[arg(long)]
        save_config: bool,
    },
    /// affiche la config résolue et la politique générée
    #[command(name = "show-config")]
    ShowConfig {
        #[command(flatten)]
        policy: PolicyArgs,

        /// format: human|json
        #[arg(long, default_value = "human")]
        format: String,
    },
    /// valide puis écrit la config dans le fichier YAML
    #[command(name = "save-config")]
    SaveConfig {
        #[command(flatten)]
        policy: PolicyArgs,

        /// écrase un fichier existant
        #[arg(long)]
        force: bool,
    },
}

/// Flags communs aux commandes. Ce qui manque vient de l'environnement, puis
/// du fichier de config, puis des valeurs par défaut.
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// domaine protégé (env: DOMAIN)
    #[arg(short, long)]
    pub domain: Option<String>,

    /// mode: testing|enforce|none (env: STS_MODE)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// hôtes MX, séparés par des virgules; vide = découverte DNS (env: STS_MX)
    #[arg(short = 'x', long)]
    pub mx: Option<String>,

    /// max_age en secondes (env: STS_MAX_AGE)
    #[arg(long = "max_age", alias = "max-age")]
    pub max_age: Option<String>,

    /// port d'écoute
    #[arg(short, long)]
    pub port: Option<String>,

    /// logs de diagnostic
    #[arg(short, long, overrides_with = "no_verbose")]
    pub verbose: bool,

    /// coupe les logs de diagnostic, même si le fichier de config les active
    #[arg(long, overrides_with = "verbose")]
    pub no_verbose: bool,

    /// fichier de config (défaut: $HOME/.config/mta-sts-server/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

impl PolicyArgs {
    pub fn layer(&self) -> Layer {
        Layer {
            domain: self.domain.clone(),
            mode: self.mode.clone(),
            mx: self.mx.clone(),
            max_age: self.max_age.clone(),
            port: self.port.clone(),
            verbose: self.verbosity(),
        }
    }

    /// `None` laisse décider l'environnement puis le fichier.
    pub fn verbosity(&self) -> Option<bool> {
        match (self.verbose, self.no_verbose) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(default_config_path)
    }
}
