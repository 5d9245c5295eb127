//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Resolve API management subsystem options and alerting rules
#[derive(Parser, Debug)]
#[command(name = "amp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve subsystem options from an APIManager document
    ///
    /// Generated secret values are written to the secrets file unless
    /// --plan is given.
    ///
    /// Examples:
    ///   amp resolve apimanager.yaml
    ///   amp resolve apimanager.yaml --component zync --format yaml
    ///   amp resolve apimanager.yaml --plan
    Resolve {
        /// APIManager document (.toml, .json, .yaml)
        spec: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Component::All)]
        component: Component,

        /// Target namespace; defaults to the document's metadata.namespace
        #[arg(short, long)]
        namespace: Option<String>,

        /// Secrets file; defaults to <config dir>/amp-operator/secrets.json
        #[arg(long, env = "AMP_SECRETS_FILE")]
        secrets: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Report which secret fields would be generated, without writing
        #[arg(long)]
        plan: bool,
    },

    /// Print alerting-rule bundles
    Rules {
        /// Only this subsystem
        #[arg(short, long)]
        component: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },

    /// List subsystems with registered rule factories
    Components,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Zync,
    Apicast,
    All,
}

impl Component {
    pub fn includes_zync(self) -> bool {
        matches!(self, Component::Zync | Component::All)
    }

    pub fn includes_apicast(self) -> bool {
        matches!(self, Component::Apicast | Component::All)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}
