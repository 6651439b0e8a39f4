pub mod auth;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod filter;
pub mod models;
pub mod retry;
pub mod services;
pub mod state;

use clap::Parser;

use cli::{AuthCommands, Cli, Commands, RecordCommands, StartDateCommands, commands};
pub use config::Config;
use state::SharedState;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state = SharedState::new(config).await?;

    match cli.command {
        Commands::Auth { command } => match command {
            AuthCommands::Login { code } => commands::cmd_login(&state, code.as_deref()).await,
            AuthCommands::Status => commands::cmd_auth_status(&state).await,
            AuthCommands::Logout => commands::cmd_logout(&state).await,
        },

        Commands::Programs(args) => commands::cmd_programs(&state, &args).await,

        Commands::Filters => commands::cmd_filters(&state).await,

        Commands::Watching => commands::cmd_watching(&state).await,

        Commands::Record { command } => match command {
            RecordCommands::Add {
                episode_id,
                comment,
                rating,
            } => commands::cmd_record_add(&state, &episode_id, comment, rating).await,
            RecordCommands::List { limit } => commands::cmd_record_list(&state, limit).await,
            RecordCommands::Remove { record_id } => {
                commands::cmd_record_remove(&state, &record_id).await
            }
        },

        Commands::Status { work_id, state: status } => {
            commands::cmd_status(&state, &work_id, &status).await
        }

        Commands::Search { query } => {
            let query = query.join(" ");
            commands::cmd_search(&state, &query).await
        }

        Commands::Info { id, mal } => commands::cmd_info(&state, id, mal).await,

        Commands::StartDate { command } => match command {
            StartDateCommands::Set { work_id, date } => {
                commands::cmd_start_date_set(&state, work_id, &date).await
            }
            StartDateCommands::Clear { work_id } => {
                commands::cmd_start_date_clear(&state, work_id).await
            }
        },
    }
}
