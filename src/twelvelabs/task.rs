//! Task polling.

use super::{Task, VideoUnderstanding};
use crate::error::Result;
use std::time::Duration;
use tracing::{debug, instrument};

/// Poll a task until it reaches a terminal status.
///
/// `on_update` is called with every observed state, including the final one.
/// There is no overall timeout: the vendor's status is the only stop signal.
#[instrument(skip(service, task, on_update), fields(task_id = %task.id))]
pub async fn wait_for_done<F>(
    service: &dyn VideoUnderstanding,
    task: Task,
    poll_interval: Duration,
    mut on_update: F,
) -> Result<Task>
where
    F: FnMut(&Task) + Send,
{
    let mut task = task;
    loop {
        task = service.retrieve_task(&task.id).await?;
        debug!("Task status: {}", task.status);
        on_update(&task);

        if task.status.is_terminal() {
            return Ok(task);
        }

        tokio::time::sleep(poll_interval).await;
    }
}
