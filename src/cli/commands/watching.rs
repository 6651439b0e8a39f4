//! Watching list command handler

use crate::state::SharedState;

pub async fn cmd_watching(state: &SharedState) -> anyhow::Result<()> {
    let entries = state.library.watching().await?;

    if entries.is_empty() {
        println!("Not watching anything right now.");
        println!();
        println!("Set a status with: kiroku status <work_id> watching");
        return Ok(());
    }

    println!("Watching ({} works)", entries.len());
    println!("{:-<70}", "");

    for entry in &entries {
        let season = entry.work.season_label().unwrap_or_default();
        println!("{} {}", entry.work.title, season);

        match &entry.next_episode {
            Some(episode) => println!("    Next: {}", episode.label()),
            None => println!("    Up to date"),
        }
        println!(
            "    Work ID: {} (annict: {})",
            entry.work.id, entry.work.annict_id
        );
    }

    Ok(())
}
