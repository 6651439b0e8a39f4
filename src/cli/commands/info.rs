//! Anime detail lookup command handler

use crate::state::SharedState;

pub async fn cmd_info(state: &SharedState, id: i32, use_mal: bool) -> anyhow::Result<()> {
    if use_mal {
        info_from_mal(state, id).await
    } else {
        info_from_anilist(state, id).await
    }
}

async fn info_from_anilist(state: &SharedState, id: i32) -> anyhow::Result<()> {
    let Some(media) = state.anilist.media_by_id(id).await? else {
        println!("No AniList entry with id {id}");
        return Ok(());
    };

    println!("{}", media.title_romaji);
    if let Some(native) = &media.title_native {
        println!("{native}");
    }
    println!("{:-<60}", "");
    println!(
        "Format: {} | Episodes: {} | Status: {}",
        media.format.as_deref().unwrap_or("?"),
        media
            .episodes
            .map_or_else(|| "?".to_string(), |e| e.to_string()),
        media.status.as_deref().unwrap_or("?")
    );
    if let Some(score) = media.average_score {
        println!("Score: {score}/100");
    }
    if let Some(description) = &media.description {
        println!();
        println!("{description}");
    }

    Ok(())
}

async fn info_from_mal(state: &SharedState, id: i32) -> anyhow::Result<()> {
    if !state.mal.is_configured() {
        anyhow::bail!("set myanimelist.client_id in config.toml to query MyAnimeList");
    }

    let Some(anime) = state.mal.get_anime(id).await? else {
        println!("No MyAnimeList entry with id {id}");
        return Ok(());
    };

    println!("{}", anime.title);
    if let Some(titles) = &anime.alternative_titles
        && let Some(ja) = &titles.ja
    {
        println!("{ja}");
    }
    println!("{:-<60}", "");
    println!(
        "Episodes: {} | Status: {}",
        anime
            .num_episodes
            .filter(|n| *n > 0)
            .map_or_else(|| "?".to_string(), |e| e.to_string()),
        anime.status.as_deref().unwrap_or("?")
    );
    if let Some(season) = &anime.start_season {
        println!("Season: {} {}", season.year, season.season);
    }
    if let Some(mean) = anime.mean {
        println!("Score: {mean:.2}/10");
    }
    if let Some(synopsis) = &anime.synopsis {
        println!();
        println!("{synopsis}");
    }

    Ok(())
}
