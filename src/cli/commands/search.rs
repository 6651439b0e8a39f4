//! AniList search command handler

use crate::constants::limits::MAX_SEARCH_RESULTS;
use crate::state::SharedState;

pub async fn cmd_search(state: &SharedState, query: &str) -> anyhow::Result<()> {
    println!("Searching for: {query}");

    let results = state.anilist.search(query).await?;

    if results.is_empty() {
        println!("No anime found matching '{query}'");
        return Ok(());
    }

    println!();
    println!("Search Results:");
    println!("{:-<60}", "");

    for media in results.iter().take(MAX_SEARCH_RESULTS) {
        let eps = media
            .episodes
            .map_or_else(|| "? eps".to_string(), |e| format!("{e} eps"));

        println!("{} ({})", media.title_romaji, eps);
        if let Some(english) = &media.title_english
            && english != &media.title_romaji
        {
            println!("    EN: {english}");
        }

        let season = match (media.season_year, media.season) {
            (Some(year), Some(season)) => format!("{year} {season}"),
            (Some(year), None) => year.to_string(),
            _ => "?".to_string(),
        };
        println!(
            "    Season: {} | Status: {} | AniList ID: {}",
            season,
            media.status.as_deref().unwrap_or("UNKNOWN"),
            media.id
        );
        println!();
    }

    Ok(())
}
