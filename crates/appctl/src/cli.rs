//! Command-line argument parsing with clap.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::client::ClientConfig;
use crate::commands::Action;

/// appctl - manage applications on a cluster orchestrator.
#[derive(Parser, Debug, Clone)]
#[command(name = "appctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// API base URL; request paths such as `/apps` are appended to it.
    #[arg(
        short,
        long,
        env = "APPCTL_ENDPOINT",
        default_value = "http://localhost:8080/v2"
    )]
    pub endpoint: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Human)]
    pub format: Format,

    /// Request timeout in seconds.
    #[arg(
        short,
        long,
        env = "APPCTL_TIMEOUT",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// User for HTTP basic auth.
    #[arg(short, long, env = "APPCTL_USER")]
    pub user: Option<String>,

    /// Password for HTTP basic auth.
    #[arg(long, env = "APPCTL_PASSWORD", hide_env_values = true, requires = "user")]
    pub password: Option<String>,

    /// Accept invalid TLS certificates.
    #[arg(short = 'k', long)]
    pub insecure: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Transport settings from the global flags.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.endpoint)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_insecure(self.insecure);
        if let Some(user) = &self.user {
            config = config.with_basic_auth(user, self.password.clone());
        }
        config
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[derive(Default)]
pub enum Format {
    /// Human-readable aligned columns.
    #[default]
    Human,
    /// Response body exactly as returned by the API.
    Raw,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List all applications.
    List,

    /// List the versions of an application.
    Versions {
        /// Application ID.
        id: String,
    },

    /// Show one version of an application.
    Show {
        /// Application ID.
        id: String,
        /// Version to show.
        version: String,
    },

    /// Create an application from a JSON definition.
    Create {
        /// Path to the JSON application definition.
        file: PathBuf,
    },

    /// Replace an application definition (forced).
    Update {
        /// Application ID.
        id: String,
        /// Path to the JSON application definition.
        file: PathBuf,
    },

    /// Restart all instances of an application (forced).
    Restart {
        /// Application ID.
        id: String,
    },

    /// Destroy an application.
    Destroy {
        /// Application ID.
        id: String,
    },
}

impl Commands {
    /// The action this subcommand runs and its positional arguments.
    #[must_use]
    pub fn invocation(&self) -> (Action, Vec<String>) {
        match self {
            Self::List => (Action::List, Vec::new()),
            Self::Versions { id } => (Action::Versions, vec![id.clone()]),
            Self::Show { id, version } => (Action::Show, vec![id.clone(), version.clone()]),
            Self::Create { file } => (Action::Create, vec![file.to_string_lossy().into_owned()]),
            Self::Update { id, file } => (
                Action::Update,
                vec![id.clone(), file.to_string_lossy().into_owned()],
            ),
            Self::Restart { id } => (Action::Restart, vec![id.clone()]),
            Self::Destroy { id } => (Action::Destroy, vec![id.clone()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list() {
        let cli = Cli::parse_from(["appctl", "list"]);
        assert!(matches!(cli.command, Commands::List));
        assert_eq!(cli.command.invocation(), (Action::List, vec![]));
    }

    #[test]
    fn parse_show() {
        let cli = Cli::parse_from(["appctl", "show", "web", "v1"]);
        match &cli.command {
            Commands::Show { id, version } => {
                assert_eq!(id, "web");
                assert_eq!(version, "v1");
            }
            _ => panic!("expected show command"),
        }
        let (action, args) = cli.command.invocation();
        assert_eq!(action, Action::Show);
        assert_eq!(args, ["web", "v1"]);
    }

    #[test]
    fn parse_update() {
        let cli = Cli::parse_from(["appctl", "update", "web", "app.json"]);
        let (action, args) = cli.command.invocation();
        assert_eq!(action, Action::Update);
        assert_eq!(args, ["web", "app.json"]);
    }

    #[test]
    fn every_action_has_a_subcommand() {
        let invocations = [
            vec!["appctl", "list"],
            vec!["appctl", "versions", "a"],
            vec!["appctl", "show", "a", "v"],
            vec!["appctl", "create", "a.json"],
            vec!["appctl", "update", "a", "a.json"],
            vec!["appctl", "restart", "a"],
            vec!["appctl", "destroy", "a"],
        ];
        for (argv, expected) in invocations.iter().zip(Action::ALL) {
            let cli = Cli::parse_from(argv.iter().copied());
            let (action, args) = cli.command.invocation();
            assert_eq!(action, expected);
            assert_eq!(args.len(), expected.arity());
            assert_eq!(argv[1], expected.name());
        }
    }

    #[test]
    fn missing_positional_rejected() {
        let result = Cli::try_parse_from(["appctl", "show", "web"]);
        assert!(result.is_err());
    }

    #[test]
    fn format_defaults_to_human() {
        let cli = Cli::parse_from(["appctl", "list"]);
        assert_eq!(cli.format, Format::Human);
    }

    #[test]
    fn format_flag_raw() {
        let cli = Cli::parse_from(["appctl", "--format", "raw", "list"]);
        assert_eq!(cli.format, Format::Raw);
    }

    #[test]
    fn endpoint_flag() {
        let cli = Cli::parse_from(["appctl", "-e", "https://marathon.internal:8443/v2", "list"]);
        assert_eq!(cli.endpoint, "https://marathon.internal:8443/v2");
    }

    #[test]
    fn client_config_from_flags() {
        let cli = Cli::parse_from([
            "appctl", "-t", "5", "-u", "admin", "--password", "secret", "-k", "list",
        ]);
        let config = cli.client_config();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user.as_deref(), Some("admin"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert!(config.insecure);
    }

    #[test]
    fn zero_timeout_rejected() {
        let result = Cli::try_parse_from(["appctl", "--timeout", "0", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn password_requires_user() {
        let result = Cli::try_parse_from(["appctl", "--password", "secret", "list"]);
        assert!(result.is_err());
    }
}
