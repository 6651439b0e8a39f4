//! Viewer status command handler

use crate::domain::{StatusState, WorkId};
use crate::state::SharedState;

pub async fn cmd_status(state: &SharedState, work_id: &str, status: &str) -> anyhow::Result<()> {
    let status: StatusState = status.parse()?;
    let work_id = WorkId::new(work_id);

    state.library.update_status(&work_id, status).await?;
    println!("Status of {work_id} set to {status}");

    Ok(())
}
