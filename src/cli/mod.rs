//! Command-line interface for kiroku.

pub mod commands;

use clap::{Args, Parser, Subcommand};

/// Kiroku - anime watch-progress tracker
/// A headless client for Annict, AniList and MyAnimeList
#[derive(Parser)]
#[command(name = "kiroku")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in to Annict and manage credentials
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },

    /// Show the filterable program timetable
    #[command(alias = "p")]
    Programs(ProgramsArgs),

    /// Show the filter facets present in the current program list
    Filters,

    /// List works being watched, with the next unwatched episode
    #[command(alias = "w")]
    Watching,

    /// Manage viewing records
    #[command(alias = "r")]
    Record {
        #[command(subcommand)]
        command: RecordCommands,
    },

    /// Set the viewer status of a work
    Status {
        /// Annict work id
        work_id: String,
        /// One of: watching, wanna-watch, watched, on-hold, stop-watching
        state: String,
    },

    /// Search AniList for anime
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Look up one anime by id
    #[command(alias = "i")]
    Info {
        /// AniList id (or MAL id with --mal)
        id: i32,
        /// Query MyAnimeList instead of AniList
        #[arg(long)]
        mal: bool,
    },

    /// Manage per-work custom start dates
    StartDate {
        #[command(subcommand)]
        command: StartDateCommands,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Print the authorization URL and exchange the pasted code
    Login {
        /// Authorization code, if already obtained
        #[arg(long)]
        code: Option<String>,
    },

    /// Show whether an access token is stored
    Status,

    /// Forget the stored access token
    Logout,
}

#[derive(Subcommand)]
pub enum RecordCommands {
    /// Log a viewing record for an episode
    Add {
        /// Annict episode id
        episode_id: String,
        /// Optional comment
        #[arg(long)]
        comment: Option<String>,
        /// Optional rating (0.0 - 5.0)
        #[arg(long)]
        rating: Option<f64>,
    },

    /// Show recent records
    #[command(alias = "ls")]
    List {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: i32,
    },

    /// Delete a record by id
    #[command(alias = "rm")]
    Remove {
        /// Annict record id
        record_id: String,
    },
}

#[derive(Subcommand)]
pub enum StartDateCommands {
    /// Set a custom start date for a work
    Set {
        /// Numeric Annict work id
        work_id: i64,
        /// Date (YYYY-MM-DD) or RFC3339 timestamp
        date: String,
    },

    /// Clear the custom start date of a work
    Clear {
        /// Numeric Annict work id
        work_id: i64,
    },
}

#[derive(Args, Debug, Default)]
pub struct ProgramsArgs {
    /// Only these media types (tv, ova, ona, movie, other)
    #[arg(long = "media")]
    pub media: Vec<String>,

    /// Only these seasons (winter, spring, summer, autumn)
    #[arg(long = "season")]
    pub seasons: Vec<String>,

    /// Only these years
    #[arg(long = "year")]
    pub years: Vec<i32>,

    /// Only these channels (exact name)
    #[arg(long = "channel")]
    pub channels: Vec<String>,

    /// Only these viewer statuses (watching, wanna-watch, ...)
    #[arg(long = "status")]
    pub statuses: Vec<String>,

    /// Case-insensitive search over title and channel
    #[arg(long)]
    pub search: Option<String>,

    /// Hide programs that have not aired yet
    #[arg(long)]
    pub aired_only: bool,

    /// Sort by start time: asc or desc
    #[arg(long)]
    pub sort: Option<String>,

    /// Persist the resulting filters as the new defaults
    #[arg(long)]
    pub save_filters: bool,

    /// Ignore persisted filters and start from scratch
    #[arg(long)]
    pub no_saved_filters: bool,
}
