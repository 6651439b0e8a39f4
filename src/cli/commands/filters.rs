//! Filter facets command handler

use crate::state::SharedState;

pub async fn cmd_filters(state: &SharedState) -> anyhow::Result<()> {
    let facets = state.programs.available_filters().await?;

    if facets.media.is_empty() && facets.channels.is_empty() {
        println!("No programs available, so no filters to offer.");
        return Ok(());
    }

    let media: Vec<String> = facets.media.iter().map(ToString::to_string).collect();
    let seasons: Vec<String> = facets.seasons.iter().map(ToString::to_string).collect();
    let years: Vec<String> = facets.years.iter().map(ToString::to_string).collect();

    println!("Media:    {}", media.join(", "));
    println!("Seasons:  {}", seasons.join(", "));
    println!("Years:    {}", years.join(", "));
    println!("Channels: {}", facets.channels.join(", "));

    Ok(())
}
