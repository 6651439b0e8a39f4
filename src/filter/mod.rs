//! Program filtering and sorting.
//!
//! Pure functions over `ProgramWithWork` lists: `apply_filters` runs seven
//! independent predicates combined as a logical AND and then sorts, and
//! `extract_available_filters` computes the facet values present in a list
//! for populating filter pickers. Nothing here touches the clock or any
//! I/O; the aired cutoff takes `now` as an argument.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{SeasonName, SortOrder, StatusState, WorkMedia};
use crate::models::ProgramWithWork;

/// The active filter selections.
///
/// Selections are set-valued: an empty set means "no restriction", never
/// "exclude all".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub selected_media: HashSet<WorkMedia>,
    pub selected_seasons: HashSet<SeasonName>,
    pub selected_years: HashSet<i32>,
    /// Channel names, matched exactly.
    pub selected_channels: HashSet<String>,
    pub selected_statuses: HashSet<StatusState>,
    /// Case-insensitive substring over work title and channel names.
    pub search_query: String,
    pub show_only_aired: bool,
    pub sort_order: SortOrder,
}

impl FilterState {
    /// True when no predicate can remove an element.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.selected_media.is_empty()
            && self.selected_seasons.is_empty()
            && self.selected_years.is_empty()
            && self.selected_channels.is_empty()
            && self.selected_statuses.is_empty()
            && self.search_query.is_empty()
            && !self.show_only_aired
    }
}

/// Distinct facet values present in a program list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AvailableFilters {
    /// Media types in canonical enum order.
    pub media: Vec<WorkMedia>,
    /// Seasons in winter, spring, summer, autumn order.
    pub seasons: Vec<SeasonName>,
    /// Years, newest first.
    pub years: Vec<i32>,
    /// Channel names, lexicographic.
    pub channels: Vec<String>,
}

/// Filters and sorts a program list.
///
/// All predicates are evaluated independently; combining filters is a
/// logical AND. Sorting is by effective start time per
/// `state.sort_order`.
#[must_use]
pub fn apply_filters(
    programs: Vec<ProgramWithWork>,
    state: &FilterState,
    now: DateTime<Utc>,
) -> Vec<ProgramWithWork> {
    let mut filtered: Vec<ProgramWithWork> = programs
        .into_iter()
        .filter(|p| matches(p, state, now))
        .collect();

    filtered.sort_by_key(ProgramWithWork::effective_started_at);
    if !state.sort_order.is_ascending() {
        filtered.reverse();
    }

    filtered
}

fn matches(program: &ProgramWithWork, state: &FilterState, now: DateTime<Utc>) -> bool {
    let checks = [
        matches_media(program, state),
        matches_season(program, state),
        matches_year(program, state),
        matches_channel(program, state),
        matches_status(program, state),
        matches_search(program, state),
        matches_aired(program, state, now),
    ];
    checks.into_iter().all(|ok| ok)
}

fn matches_media(program: &ProgramWithWork, state: &FilterState) -> bool {
    state.selected_media.is_empty() || state.selected_media.contains(&program.work.media)
}

fn matches_season(program: &ProgramWithWork, state: &FilterState) -> bool {
    state.selected_seasons.is_empty()
        || program
            .work
            .season_name
            .is_some_and(|s| state.selected_seasons.contains(&s))
}

fn matches_year(program: &ProgramWithWork, state: &FilterState) -> bool {
    state.selected_years.is_empty()
        || program
            .work
            .season_year
            .is_some_and(|y| state.selected_years.contains(&y))
}

fn matches_channel(program: &ProgramWithWork, state: &FilterState) -> bool {
    state.selected_channels.is_empty()
        || program
            .programs
            .iter()
            .any(|p| state.selected_channels.contains(&p.channel.name))
}

fn matches_status(program: &ProgramWithWork, state: &FilterState) -> bool {
    state.selected_statuses.is_empty()
        || state.selected_statuses.contains(&program.work.viewer_status)
}

fn matches_search(program: &ProgramWithWork, state: &FilterState) -> bool {
    if state.search_query.is_empty() {
        return true;
    }

    let needle = state.search_query.to_lowercase();
    program.work.title.to_lowercase().contains(&needle)
        || program
            .programs
            .iter()
            .any(|p| p.channel.name.to_lowercase().contains(&needle))
}

fn matches_aired(program: &ProgramWithWork, state: &FilterState, now: DateTime<Utc>) -> bool {
    !state.show_only_aired || program.effective_started_at() <= now
}

/// Computes the facet values actually present in `programs`.
#[must_use]
pub fn extract_available_filters(programs: &[ProgramWithWork]) -> AvailableFilters {
    let media_present: HashSet<WorkMedia> = programs.iter().map(|p| p.work.media).collect();
    let seasons_present: HashSet<SeasonName> =
        programs.iter().filter_map(|p| p.work.season_name).collect();

    let media = WorkMedia::ALL
        .into_iter()
        .filter(|m| media_present.contains(m))
        .collect();

    let seasons = SeasonName::ALL
        .into_iter()
        .filter(|s| seasons_present.contains(s))
        .collect();

    let mut years: Vec<i32> = programs
        .iter()
        .filter_map(|p| p.work.season_year)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));

    let mut channels: Vec<String> = programs
        .iter()
        .flat_map(|p| p.programs.iter().map(|prog| prog.channel.name.clone()))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    channels.sort();

    AvailableFilters {
        media,
        seasons,
        years,
        channels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EpisodeId, ProgramId, WorkId};
    use crate::models::{Channel, Episode, Program, Work};
    use chrono::TimeZone;

    fn ts(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, day, hour, 0, 0).unwrap()
    }

    fn entry(
        title: &str,
        media: WorkMedia,
        season: Option<SeasonName>,
        year: Option<i32>,
        status: StatusState,
        channel: &str,
        started_at: DateTime<Utc>,
    ) -> ProgramWithWork {
        let work = Work {
            id: WorkId::new(title),
            annict_id: 1,
            title: title.to_string(),
            media,
            season_name: season,
            season_year: year,
            viewer_status: status,
            episodes_count: Some(12),
            image_url: None,
        };
        let program = Program {
            id: ProgramId::new(format!("{title}-p")),
            started_at,
            channel: Channel {
                annict_id: 1,
                name: channel.to_string(),
            },
            episode: Episode {
                id: EpisodeId::new(format!("{title}-e")),
                number: Some(1),
                number_text: None,
                title: None,
            },
        };
        ProgramWithWork::new(work, vec![program])
    }

    fn sample() -> Vec<ProgramWithWork> {
        vec![
            entry(
                "Frieren",
                WorkMedia::Tv,
                Some(SeasonName::Autumn),
                Some(2023),
                StatusState::Watching,
                "Nippon TV",
                ts(1, 12),
            ),
            entry(
                "Dungeon Meshi",
                WorkMedia::Tv,
                Some(SeasonName::Winter),
                Some(2024),
                StatusState::Watching,
                "Tokyo MX",
                ts(2, 10),
            ),
            entry(
                "Look Back",
                WorkMedia::Movie,
                Some(SeasonName::Summer),
                Some(2024),
                StatusState::WannaWatch,
                "Theatrical",
                ts(3, 8),
            ),
        ]
    }

    #[test]
    fn empty_selections_only_reorder() {
        let programs = sample();
        let titles_before: HashSet<String> =
            programs.iter().map(|p| p.work.title.clone()).collect();

        let state = FilterState::default();
        assert!(state.is_unrestricted());

        let out = apply_filters(programs, &state, ts(10, 0));
        let titles_after: HashSet<String> = out.iter().map(|p| p.work.title.clone()).collect();
        assert_eq!(titles_before, titles_after);
    }

    #[test]
    fn asc_then_desc_are_reversed_without_ties() {
        let state_asc = FilterState::default();
        let state_desc = FilterState {
            sort_order: SortOrder::StartTimeDesc,
            ..FilterState::default()
        };

        let asc = apply_filters(sample(), &state_asc, ts(10, 0));
        let mut desc = apply_filters(sample(), &state_desc, ts(10, 0));

        desc.reverse();
        let asc_titles: Vec<&str> = asc.iter().map(|p| p.work.title.as_str()).collect();
        let desc_titles: Vec<&str> = desc.iter().map(|p| p.work.title.as_str()).collect();
        assert_eq!(asc_titles, desc_titles);
    }

    #[test]
    fn sorts_by_start_time_ascending() {
        let out = apply_filters(sample(), &FilterState::default(), ts(10, 0));
        let titles: Vec<&str> = out.iter().map(|p| p.work.title.as_str()).collect();
        assert_eq!(titles, vec!["Frieren", "Dungeon Meshi", "Look Back"]);
    }

    #[test]
    fn media_filter() {
        let state = FilterState {
            selected_media: [WorkMedia::Movie].into_iter().collect(),
            ..FilterState::default()
        };
        let out = apply_filters(sample(), &state, ts(10, 0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].work.title, "Look Back");
    }

    #[test]
    fn season_filter_excludes_missing_season() {
        let mut programs = sample();
        programs[0].work.season_name = None;

        let state = FilterState {
            selected_seasons: [SeasonName::Winter].into_iter().collect(),
            ..FilterState::default()
        };
        let out = apply_filters(programs, &state, ts(10, 0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].work.title, "Dungeon Meshi");
    }

    #[test]
    fn year_filter() {
        let state = FilterState {
            selected_years: [2024].into_iter().collect(),
            ..FilterState::default()
        };
        let out = apply_filters(sample(), &state, ts(10, 0));
        let titles: Vec<&str> = out.iter().map(|p| p.work.title.as_str()).collect();
        assert_eq!(titles, vec!["Dungeon Meshi", "Look Back"]);
    }

    #[test]
    fn channel_filter_matches_any_program() {
        let state = FilterState {
            selected_channels: ["Tokyo MX".to_string()].into_iter().collect(),
            ..FilterState::default()
        };
        let out = apply_filters(sample(), &state, ts(10, 0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].work.title, "Dungeon Meshi");
    }

    #[test]
    fn status_filter() {
        let state = FilterState {
            selected_statuses: [StatusState::WannaWatch].into_iter().collect(),
            ..FilterState::default()
        };
        let out = apply_filters(sample(), &state, ts(10, 0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].work.title, "Look Back");
    }

    #[test]
    fn search_matches_title_case_insensitively() {
        let state = FilterState {
            search_query: "frieren".to_string(),
            ..FilterState::default()
        };
        let out = apply_filters(sample(), &state, ts(10, 0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].work.title, "Frieren");
    }

    #[test]
    fn search_matches_channel_name() {
        let state = FilterState {
            search_query: "tokyo".to_string(),
            ..FilterState::default()
        };
        let out = apply_filters(sample(), &state, ts(10, 0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].work.title, "Dungeon Meshi");
    }

    #[test]
    fn aired_cutoff_uses_injected_now() {
        let state = FilterState {
            show_only_aired: true,
            ..FilterState::default()
        };

        // Between the second and third broadcasts.
        let out = apply_filters(sample(), &state, ts(2, 12));
        let titles: Vec<&str> = out.iter().map(|p| p.work.title.as_str()).collect();
        assert_eq!(titles, vec!["Frieren", "Dungeon Meshi"]);

        // A broadcast exactly at `now` counts as aired.
        let out = apply_filters(sample(), &state, ts(3, 8));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn aired_cutoff_respects_custom_start_date() {
        let mut programs = sample();
        // Aired on day 1 by schedule, but the user starts it on day 20.
        programs[0].custom_started_at = Some(ts(20, 0));

        let state = FilterState {
            show_only_aired: true,
            ..FilterState::default()
        };
        let out = apply_filters(programs, &state, ts(10, 0));
        let titles: Vec<&str> = out.iter().map(|p| p.work.title.as_str()).collect();
        assert_eq!(titles, vec!["Dungeon Meshi", "Look Back"]);
    }

    #[test]
    fn filters_combine_as_logical_and() {
        let state = FilterState {
            selected_media: [WorkMedia::Tv].into_iter().collect(),
            selected_years: [2024].into_iter().collect(),
            ..FilterState::default()
        };
        let out = apply_filters(sample(), &state, ts(10, 0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].work.title, "Dungeon Meshi");
    }

    #[test]
    fn available_filters_facets() {
        let facets = extract_available_filters(&sample());
        assert_eq!(facets.media, vec![WorkMedia::Tv, WorkMedia::Movie]);
        assert_eq!(
            facets.seasons,
            vec![SeasonName::Winter, SeasonName::Summer, SeasonName::Autumn]
        );
        assert_eq!(facets.years, vec![2024, 2023]);
        assert_eq!(
            facets.channels,
            vec![
                "Nippon TV".to_string(),
                "Theatrical".to_string(),
                "Tokyo MX".to_string()
            ]
        );
    }

    #[test]
    fn available_filters_empty_input() {
        let facets = extract_available_filters(&[]);
        assert!(facets.media.is_empty());
        assert!(facets.seasons.is_empty());
        assert!(facets.years.is_empty());
        assert!(facets.channels.is_empty());
    }

    #[test]
    fn filter_state_serde_round_trip() {
        let state = FilterState {
            selected_media: [WorkMedia::Tv].into_iter().collect(),
            selected_seasons: [SeasonName::Spring].into_iter().collect(),
            selected_years: [2024].into_iter().collect(),
            selected_channels: ["Tokyo MX".to_string()].into_iter().collect(),
            selected_statuses: [StatusState::Watching].into_iter().collect(),
            search_query: "fri".to_string(),
            show_only_aired: true,
            sort_order: SortOrder::StartTimeDesc,
        };

        let json = serde_json::to_string(&state).unwrap();
        let back: FilterState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
