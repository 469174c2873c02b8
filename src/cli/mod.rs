pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::Api;
use crate::config;
use crate::router::Navigator;
use crate::session::SessionStore;
use crate::stores::{DashboardCache, UiState};

#[derive(Parser)]
#[command(name = "stagemed")]
#[command(about = "StageMed CLI - terminal client for the medical internship platform")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Authentication and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Role selection")]
    Role {
        #[command(subcommand)]
        cmd: commands::role::RoleCommands,
    },

    #[command(about = "Navigate the platform by path")]
    Nav {
        #[command(subcommand)]
        cmd: commands::nav::NavCommands,
    },

    #[command(about = "Internship offers")]
    Offers {
        #[command(subcommand)]
        cmd: commands::offers::OfferCommands,
    },

    #[command(about = "Notifications")]
    Notify {
        #[command(subcommand)]
        cmd: commands::notify::NotifyCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Everything the commands need, constructed once at startup: the session
/// (restored from persisted tokens), the API client bound to it, the UI
/// stores and the navigator. The 401 side channel is wired here so a
/// session expiry during any command forces a login navigation.
pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub api: Arc<Api>,
    pub ui: Arc<UiState>,
    pub dashboards: Arc<DashboardCache>,
    pub navigator: Arc<Navigator>,
}

impl AppContext {
    pub fn init() -> anyhow::Result<Self> {
        let config = config::config();

        let session = Arc::new(SessionStore::from_config(config));
        let api = Arc::new(Api::new(config, Arc::clone(&session))?);
        let ui = Arc::new(UiState::default());
        let dashboards = Arc::new(DashboardCache::default());
        let navigator = Arc::new(Navigator::new(
            config,
            Arc::clone(&session),
            Arc::clone(&api),
            Arc::clone(&ui),
            Arc::clone(&dashboards),
        ));

        let nav = Arc::clone(&navigator);
        api.on_unauthorized(move || {
            let _ = nav.navigate("/login");
        });

        Ok(Self {
            session,
            api,
            ui,
            dashboards,
            navigator,
        })
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = AppContext::init()?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(&ctx, cmd, output_format).await,
        Commands::Role { cmd } => commands::role::handle(&ctx, cmd, output_format).await,
        Commands::Nav { cmd } => commands::nav::handle(&ctx, cmd, output_format).await,
        Commands::Offers { cmd } => commands::offers::handle(&ctx, cmd, output_format).await,
        Commands::Notify { cmd } => commands::notify::handle(&ctx, cmd, output_format).await,
    }
}
