//! Program timetable command handler

use crate::cli::ProgramsArgs;
use crate::filter::FilterState;
use crate::state::SharedState;

/// Builds the effective filter state: persisted defaults (unless
/// suppressed) extended by the command-line selections.
pub async fn resolve_filters(
    state: &SharedState,
    args: &ProgramsArgs,
) -> anyhow::Result<FilterState> {
    let mut filters = if args.no_saved_filters {
        FilterState::default()
    } else {
        state.programs.load_filter_state().await?
    };

    for media in &args.media {
        filters.selected_media.insert(media.parse()?);
    }
    for season in &args.seasons {
        filters.selected_seasons.insert(season.parse()?);
    }
    filters.selected_years.extend(args.years.iter().copied());
    filters
        .selected_channels
        .extend(args.channels.iter().cloned());
    for status in &args.statuses {
        filters.selected_statuses.insert(status.parse()?);
    }

    if let Some(search) = &args.search {
        filters.search_query = search.clone();
    }
    if args.aired_only {
        filters.show_only_aired = true;
    }
    if let Some(sort) = &args.sort {
        filters.sort_order = sort.parse()?;
    }

    Ok(filters)
}

pub async fn cmd_programs(state: &SharedState, args: &ProgramsArgs) -> anyhow::Result<()> {
    let filters = resolve_filters(state, args).await?;
    let programs = state.programs.list_programs(&filters).await?;

    if programs.is_empty() {
        println!("No programs match the current filters.");
    } else {
        println!("Programs ({} works)", programs.len());
        println!("{:-<70}", "");

        for pw in &programs {
            let program = pw.first_program();
            let status = match pw.work.viewer_status.as_str() {
                "WATCHING" => "▶",
                "WATCHED" => "✓",
                _ => " ",
            };

            println!(
                "{} {}  {:<14} {}",
                status,
                pw.effective_started_at().format("%Y-%m-%d %H:%M"),
                program.channel.name,
                pw.work.title
            );
            println!("    {}", program.episode.label());
        }
    }

    if args.save_filters {
        state.programs.save_filter_state(&filters).await?;
        println!();
        println!("Filters saved as defaults.");
    }

    Ok(())
}
