//! Record command handlers

use crate::domain::{EpisodeId, RecordId};
use crate::state::SharedState;

pub async fn cmd_record_add(
    state: &SharedState,
    episode_id: &str,
    comment: Option<String>,
    rating: Option<f64>,
) -> anyhow::Result<()> {
    if let Some(rating) = rating
        && !(0.0..=5.0).contains(&rating)
    {
        anyhow::bail!("rating must be between 0.0 and 5.0");
    }

    let episode_id = EpisodeId::new(episode_id);
    let record = state
        .records
        .create_record(&episode_id, comment, rating)
        .await?;

    println!(
        "Recorded: {} {}",
        record.work_title,
        record.episode.label()
    );
    println!("Record ID: {}", record.id);

    Ok(())
}

pub async fn cmd_record_list(state: &SharedState, limit: i32) -> anyhow::Result<()> {
    let records = state.records.recent_records(limit).await?;

    if records.is_empty() {
        println!("No records yet.");
        return Ok(());
    }

    println!("Recent records ({} shown)", records.len());
    println!("{:-<70}", "");

    for record in &records {
        println!(
            "{}  {} {}",
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.work_title,
            record.episode.label()
        );
        if let Some(rating) = record.rating {
            println!("    Rating: {rating:.1}");
        }
        if let Some(comment) = &record.comment {
            println!("    {comment}");
        }
        println!("    ID: {}", record.id);
    }

    Ok(())
}

pub async fn cmd_record_remove(state: &SharedState, record_id: &str) -> anyhow::Result<()> {
    let record_id = RecordId::new(record_id);
    state.records.delete_record(&record_id).await?;
    println!("Deleted record {record_id}");
    Ok(())
}
