//! Domain types for watch-progress tracking with strong typing.
//!
//! Newtype id wrappers prevent mixing the opaque Annict GraphQL ids of
//! different entities, and the enums here give the upstream string
//! vocabularies (media, season, viewer status) a typed home.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when an upstream string does not match a known enum value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized {kind}: '{value}'")]
pub struct ParseError {
    kind: &'static str,
    value: String,
}

impl ParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id! {
    /// Opaque Annict id of a work (an anime title tracked by the user).
    WorkId
}

string_id! {
    /// Opaque Annict id of an episode.
    EpisodeId
}

string_id! {
    /// Opaque Annict id of a broadcast program.
    ProgramId
}

string_id! {
    /// Opaque Annict id of a viewing record.
    RecordId
}

/// Media kind of a work, as reported by the tracking APIs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkMedia {
    #[default]
    Tv,
    Ova,
    Ona,
    Movie,
    Other,
}

impl WorkMedia {
    pub const ALL: [Self; 5] = [Self::Tv, Self::Ova, Self::Ona, Self::Movie, Self::Other];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tv => "TV",
            Self::Ova => "OVA",
            Self::Ona => "ONA",
            Self::Movie => "MOVIE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for WorkMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkMedia {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TV" => Ok(Self::Tv),
            "OVA" => Ok(Self::Ova),
            "ONA" => Ok(Self::Ona),
            "MOVIE" => Ok(Self::Movie),
            "OTHER" => Ok(Self::Other),
            _ => Err(ParseError::new("media type", s)),
        }
    }
}

/// Broadcast season of a work.
///
/// The derive order is the canonical display order: winter, spring,
/// summer, autumn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeasonName {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl SeasonName {
    /// Seasons in canonical order.
    pub const ALL: [Self; 4] = [Self::Winter, Self::Spring, Self::Summer, Self::Autumn];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Winter => "WINTER",
            Self::Spring => "SPRING",
            Self::Summer => "SUMMER",
            Self::Autumn => "AUTUMN",
        }
    }
}

impl fmt::Display for SeasonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SeasonName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WINTER" => Ok(Self::Winter),
            "SPRING" => Ok(Self::Spring),
            "SUMMER" => Ok(Self::Summer),
            "AUTUMN" | "FALL" => Ok(Self::Autumn),
            _ => Err(ParseError::new("season", s)),
        }
    }
}

/// Viewer status of a work on Annict.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusState {
    Watching,
    WannaWatch,
    Watched,
    OnHold,
    StopWatching,
    #[default]
    NoState,
}

impl StatusState {
    pub const ALL: [Self; 6] = [
        Self::Watching,
        Self::WannaWatch,
        Self::Watched,
        Self::OnHold,
        Self::StopWatching,
        Self::NoState,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Watching => "WATCHING",
            Self::WannaWatch => "WANNA_WATCH",
            Self::Watched => "WATCHED",
            Self::OnHold => "ON_HOLD",
            Self::StopWatching => "STOP_WATCHING",
            Self::NoState => "NO_STATE",
        }
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "WATCHING" => Ok(Self::Watching),
            "WANNA_WATCH" => Ok(Self::WannaWatch),
            "WATCHED" => Ok(Self::Watched),
            "ON_HOLD" => Ok(Self::OnHold),
            "STOP_WATCHING" => Ok(Self::StopWatching),
            "NO_STATE" => Ok(Self::NoState),
            _ => Err(ParseError::new("status", s)),
        }
    }
}

/// Program list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    StartTimeAsc,
    StartTimeDesc,
}

impl SortOrder {
    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::StartTimeAsc)
    }
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "start_time_asc" => Ok(Self::StartTimeAsc),
            "desc" | "start_time_desc" => Ok(Self::StartTimeDesc),
            _ => Err(ParseError::new("sort order", s)),
        }
    }
}
