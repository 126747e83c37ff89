//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use plaza_core::config;
use plaza_core::logging::{self, LogTarget};

mod commands;

#[derive(Parser)]
#[command(name = "plaza")]
#[command(version)]
#[command(about = "Terminal client for the Plaza social network")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the Plaza API (overrides the config file)
    #[arg(long, global = true, env = config::API_URL_ENV, value_name = "URL")]
    api_url: Option<String>,
}

/// Credentials for commands that sign in before acting.
///
/// The session cookie lives only as long as the process, so every headless
/// command authenticates on its own.
#[derive(clap::Args, Debug, Clone)]
struct CredentialArgs {
    /// Account username
    #[arg(short, long)]
    username: String,

    /// Account password
    #[arg(long, env = "PLAZA_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Sign in and show the identity the server resolves the session to
    Whoami {
        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// Sign in and print the feed
    Feed {
        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// Sign in and publish a post
    Post {
        #[command(flatten)]
        credentials: CredentialArgs,

        /// Text of the post
        #[arg(short, long)]
        message: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, api_url } = cli;

    // Config commands must work even when the config file is broken.
    if let Some(Commands::Config { command }) = &command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        };
    }

    let config = config::Config::load().context("load config")?;
    let base_url = config
        .resolve_base_url_with(api_url.as_deref())
        .context("resolve API base URL")?;

    // default to the interactive client
    let Some(command) = command else {
        let _guard = logging::init(&config, LogTarget::File).context("init logging")?;
        return commands::tui::run(&base_url).await;
    };

    let _guard = logging::init(&config, LogTarget::Stderr).context("init logging")?;

    match command {
        Commands::Config { .. } => Ok(()),
        Commands::Whoami { credentials } => {
            commands::session::whoami(&base_url, &credentials.username, &credentials.password)
                .await
        }
        Commands::Feed { credentials } => {
            commands::session::feed(&base_url, &credentials.username, &credentials.password).await
        }
        Commands::Post {
            credentials,
            message,
        } => {
            commands::session::post(
                &base_url,
                &credentials.username,
                &credentials.password,
                &message,
            )
            .await
        }
    }
}
