//! Custom start date command handlers

use chrono::{DateTime, NaiveDate, Utc};

use crate::state::SharedState;

fn parse_date(input: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("expected YYYY-MM-DD or an RFC3339 timestamp: '{input}'"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("invalid date: '{input}'"))?;

    Ok(midnight.and_utc())
}

pub async fn cmd_start_date_set(
    state: &SharedState,
    work_id: i64,
    date: &str,
) -> anyhow::Result<()> {
    let started_at = parse_date(date)?;
    state
        .library
        .set_custom_start_date(work_id, started_at)
        .await?;
    println!(
        "Custom start date for work {} set to {}",
        work_id,
        started_at.format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

pub async fn cmd_start_date_clear(state: &SharedState, work_id: i64) -> anyhow::Result<()> {
    state.library.clear_custom_start_date(work_id).await?;
    println!("Custom start date for work {work_id} cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_plain_date_as_utc_midnight() {
        let parsed = parse_date("2024-04-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_rfc3339() {
        let parsed = parse_date("2024-04-01T12:30:00+09:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 4, 1, 3, 30, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date("next tuesday").is_err());
    }
}
